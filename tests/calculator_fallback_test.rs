use anyhow::Result;
use astro_portal::calculators::SubmissionState;
use astro_portal::domain::model::{BirthProfile, Gender, Provenance};
use astro_portal::{ApiClient, CalculatorController, PortalError};
use chrono::{NaiveDate, NaiveTime};
use httpmock::prelude::*;
use serde_json::json;

fn profile(name: &str, date: (i32, u32, u32), time: (u32, u32)) -> BirthProfile {
    BirthProfile {
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        birth_time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
        birth_place: "Kolkata".to_string(),
        gender: None,
    }
}

fn asha() -> BirthProfile {
    profile("Asha", (1990, 6, 15), (10, 0))
}

/// Client pointed at a mock server that answers every calculator call with 503.
fn failing_backend(server: &MockServer) -> ApiClient {
    server.mock(|when, then| {
        when.method(POST);
        then.status(503).json_body(json!({"detail": "maintenance"}));
    });
    ApiClient::new(server.url("/api"))
}

#[tokio::test]
async fn test_backend_result_is_unwrapped() -> Result<()> {
    let server = MockServer::start();
    let moon_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/calculators/moon-sign")
            .header("content-type", "application/json")
            .json_body_includes(r#"{"birth_date": "1990-06-15", "birth_time": "10:00", "gender": "male", "language": "english"}"#);
        then.status(200)
            .json_body(json!({"data": {"data": {"moon_sign": "Cancer"}}}));
    });

    let client = ApiClient::new(server.url("/api"));
    let mut controller = CalculatorController::new(&client);
    let computed = controller.moon_sign(&asha()).await?;

    moon_mock.assert();
    assert_eq!(computed.provenance, Provenance::Backend);
    assert_eq!(computed.result, json!({"moon_sign": "Cancer"}));
    assert_eq!(controller.state(), SubmissionState::Resolved);
    Ok(())
}

#[tokio::test]
async fn test_moon_sign_falls_back_to_local_estimate() -> Result<()> {
    let server = MockServer::start();
    let client = failing_backend(&server);
    let mut controller = CalculatorController::new(&client);

    let computed = controller.moon_sign(&asha()).await?;

    assert!(computed.is_estimate());
    assert_eq!(computed.result["moon_sign"], "Libra");
    assert_eq!(computed.result["name"], "Asha");
    assert_eq!(controller.state(), SubmissionState::Resolved);
    assert!(!controller.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_local_estimates_are_deterministic() -> Result<()> {
    let server = MockServer::start();
    let client = failing_backend(&server);
    let mut controller = CalculatorController::new(&client);

    let first = controller.dosha(&asha()).await?;
    let second = controller.dosha(&asha()).await?;
    assert_eq!(first, second);

    let male = profile("Ravi", (1988, 4, 12), (6, 30));
    let female = profile("Meera", (1991, 11, 3), (18, 45));
    let first = controller.horoscope_matching(&male, &female).await?;
    let second = controller.horoscope_matching(&male, &female).await?;
    assert_eq!(first, second);
    assert_eq!(first.result["male_details"]["zodiac_sign"], "Aries");
    assert_eq!(first.result["female_details"]["zodiac_sign"], "Scorpio");
    assert_eq!(first.result["max_score"], 36);
    Ok(())
}

#[tokio::test]
async fn test_ascendant_and_gemstone_fall_back() -> Result<()> {
    let server = MockServer::start();
    let client = failing_backend(&server);
    let mut controller = CalculatorController::new(&client);

    let ascendant = controller.ascendant(&asha()).await?;
    assert!(ascendant.is_estimate());
    assert_eq!(ascendant.result["ascendant"], "Virgo");

    let gemstone = controller.gemstone(&asha()).await?;
    assert!(gemstone.is_estimate());
    assert_eq!(gemstone.result["primary_gemstone"], "Diamond");
    Ok(())
}

#[tokio::test]
async fn test_kundli_uses_backend_chart() -> Result<()> {
    let server = MockServer::start();
    let kundli_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/calculators/kundli")
            .header_missing("authorization")
            .json_body_includes(r#"{"name": "Asha", "birth_date": "1990-06-15", "birth_place": "Kolkata"}"#);
        then.status(200)
            .json_body(json!({"success": true, "data": {"rashi": "Tula", "guna": 31}}));
    });

    let client = ApiClient::new(server.url("/api"));
    let computed = CalculatorController::new(&client).kundli(&asha()).await?;

    kundli_mock.assert();
    assert_eq!(computed.provenance, Provenance::Backend);
    assert_eq!(computed.result, json!({"rashi": "Tula", "guna": 31}));
    Ok(())
}

#[tokio::test]
async fn test_kundli_falls_back_to_local_chart() -> Result<()> {
    let server = MockServer::start();
    let client = failing_backend(&server);
    let mut controller = CalculatorController::new(&client);

    let first = controller.kundli(&asha()).await?;
    let second = controller.kundli(&asha()).await?;

    assert!(first.is_estimate());
    assert_eq!(first, second);
    assert_eq!(first.result["sun_sign"], "Gemini");
    assert_eq!(first.result["rashi"], "Mithuna");
    assert_eq!(first.result["moon_sign"], "Libra");
    assert_eq!(first.result["planets"]["mars"], "Sagittarius");
    assert_eq!(first.result["manglik"], "Yes");
    let guna = first.result["guna"].as_u64().unwrap();
    assert!((18..38).contains(&guna));
    assert_eq!(controller.state(), SubmissionState::Resolved);
    Ok(())
}

#[tokio::test]
async fn test_empty_dosha_list_is_replaced() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/calculators/dosha");
        then.status(200)
            .json_body(json!({"success": true, "data": {"doshas": [], "overall_health": "Excellent"}}));
    });

    let client = ApiClient::new(server.url("/api"));
    let computed = CalculatorController::new(&client).dosha(&asha()).await?;

    assert_eq!(computed.provenance, Provenance::Backend);
    let doshas = computed.result["doshas"].as_array().unwrap();
    assert_eq!(doshas.len(), 1);
    assert_eq!(doshas[0]["name"], "No Major Doshas");
    Ok(())
}

#[tokio::test]
async fn test_matching_forces_partner_genders() -> Result<()> {
    let server = MockServer::start();
    let matching_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/calculators/horoscope-matching")
            .json_body_includes(r#"{"male_details": {"gender": "male"}, "female_details": {"gender": "female"}}"#);
        then.status(200).json_body(json!({"data": {"total_score": 28}}));
    });

    let client = ApiClient::new(server.url("/api"));
    let mut male = profile("Ravi", (1988, 4, 12), (6, 30));
    male.gender = Some(Gender::Other);
    let mut female = profile("Meera", (1991, 11, 3), (18, 45));
    female.gender = Some(Gender::Male);

    let computed = CalculatorController::new(&client)
        .horoscope_matching(&male, &female)
        .await?;

    matching_mock.assert();
    assert_eq!(computed.result["total_score"], 28);
    Ok(())
}

#[tokio::test]
async fn test_numerology_failure_is_terminal() -> Result<()> {
    let server = MockServer::start();
    let numerology_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/numerology/calculate")
            .json_body(json!({"name": "Asha", "birth_date": "1990-06-15"}));
        then.status(500).json_body(json!({"detail": "Numerology engine offline"}));
    });

    let client = ApiClient::new(server.url("/api"));
    let mut controller = CalculatorController::new(&client);
    let err = controller
        .numerology(" Asha ", NaiveDate::from_ymd_opt(1990, 6, 15).unwrap())
        .await
        .unwrap_err();

    numerology_mock.assert();
    assert!(matches!(
        err,
        PortalError::CalculatorError { ref detail, .. } if detail == "Numerology engine offline"
    ));
    assert_eq!(
        err.user_friendly_message(),
        "Failed to calculate numerology. Please try again later."
    );
    assert_eq!(controller.state(), SubmissionState::Resolved);
    Ok(())
}

#[tokio::test]
async fn test_rudraksha_failure_is_terminal() -> Result<()> {
    let server = MockServer::start();
    let rudraksha_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/calculators/rudraksha")
            .json_body_includes(r#"{"name": "Asha", "current_problems": ["Health Issues"]}"#);
        then.status(502);
    });

    let client = ApiClient::new(server.url("/api"));
    let err = CalculatorController::new(&client)
        .rudraksha(&asha(), &["Health Issues".to_string()])
        .await
        .unwrap_err();

    rudraksha_mock.assert();
    assert!(matches!(
        err,
        PortalError::CalculatorError { ref detail, .. } if detail == "HTTP error! status: 502"
    ));
    assert!(!err.user_friendly_message().contains("502"));
    assert_eq!(
        err.user_friendly_message(),
        "Failed to calculate Rudraksha recommendations. Please try again later."
    );
    Ok(())
}

#[tokio::test]
async fn test_numerology_requires_a_name() -> Result<()> {
    let client = ApiClient::new("http://127.0.0.1:1/api");
    let err = CalculatorController::new(&client)
        .numerology("   ", NaiveDate::from_ymd_opt(1990, 6, 15).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::ValidationError { .. }));
    Ok(())
}
