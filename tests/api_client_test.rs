use anyhow::Result;
use astro_portal::domain::model::{AuthToken, BirthDetails, BirthProfile};
use astro_portal::domain::ports::RetryPolicy;
use astro_portal::{ApiClient, PortalConfig};
use chrono::{NaiveDate, NaiveTime};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn asha_details() -> BirthDetails {
    BirthProfile {
        name: "Asha".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        birth_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        birth_place: "Kolkata".to_string(),
        gender: None,
    }
    .to_wire()
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn test_login_sends_form_encoded_credentials() -> Result<()> {
    let server = MockServer::start();
    let login_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body_includes("username=asha")
            .body_includes("password=secret");
        then.status(200)
            .json_body(json!({"access_token": "tok-123", "token_type": "bearer"}));
    });

    let client = ApiClient::new(server.url("/api"));
    let result = client.login("asha", "secret").await;

    login_mock.assert();
    assert!(result.success());
    assert_eq!(result.data().unwrap().access_token, "tok-123");
    Ok(())
}

#[tokio::test]
async fn test_bearer_token_is_attached() -> Result<()> {
    let server = MockServer::start();
    let me_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/me")
            .header("authorization", "Bearer tok-123");
        then.status(200)
            .json_body(json!({"username": "asha", "role": "user"}));
    });

    let client = ApiClient::new(server.url("/api"));
    let result = client.current_user(&AuthToken::new("tok-123")).await;

    me_mock.assert();
    assert_eq!(result.data().unwrap()["username"], "asha");
    Ok(())
}

#[tokio::test]
async fn test_error_detail_is_surfaced() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401)
            .json_body(json!({"detail": "Incorrect username or password"}));
    });

    let client = ApiClient::new(server.url("/api"));
    let result = client.login("asha", "wrong").await;

    assert!(!result.success());
    assert_eq!(result.error(), Some("Incorrect username or password"));
    Ok(())
}

#[tokio::test]
async fn test_error_without_body_uses_status_line() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(404).body("");
    });

    let client = ApiClient::new(server.url("/api"));
    let result = client.services().await;

    assert_eq!(result.error(), Some("HTTP error! status: 404"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_a_failure() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blogs/");
        then.status(200)
            .header("content-type", "application/json")
            .body("{not json");
    });

    let client = ApiClient::new(server.url("/api"));
    let result = client.blogs().await;

    assert!(!result.success());
    assert!(result.data().is_none());
    assert!(result.error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_post_server_error_is_not_retried() -> Result<()> {
    let server = MockServer::start();
    let booking_mock = server.mock(|when, then| {
        when.method(POST).path("/api/bookings/");
        then.status(500).json_body(json!({"detail": "database unavailable"}));
    });

    let client = ApiClient::new(server.url("/api")).with_retry_policy(fast_retry(3));
    let result = client
        .create_booking(&AuthToken::new("tok-123"), &json!({"service_id": 1}))
        .await;

    assert_eq!(booking_mock.hits(), 1);
    assert_eq!(result.error(), Some("database unavailable"));
    Ok(())
}

#[tokio::test]
async fn test_get_server_error_is_retried_when_enabled() -> Result<()> {
    let server = MockServer::start();
    let faq_mock = server.mock(|when, then| {
        when.method(GET).path("/api/faqs/");
        then.status(503);
    });

    let client = ApiClient::new(server.url("/api")).with_retry_policy(fast_retry(2));
    let result = client.faqs().await;

    assert_eq!(faq_mock.hits(), 3);
    assert!(!result.success());
    Ok(())
}

#[tokio::test]
async fn test_default_policy_makes_a_single_attempt() -> Result<()> {
    let server = MockServer::start();
    let faq_mock = server.mock(|when, then| {
        when.method(GET).path("/api/faqs/");
        then.status(503);
    });

    let client = ApiClient::new(server.url("/api"));
    let _ = client.faqs().await;

    assert_eq!(faq_mock.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rate_limited_post_is_retried() -> Result<()> {
    let server = MockServer::start();
    let dosha_mock = server.mock(|when, then| {
        when.method(POST).path("/api/calculators/dosha");
        then.status(429).header("Retry-After", "0");
    });

    let client = ApiClient::new(server.url("/api")).with_retry_policy(fast_retry(1));
    let result = client.calculate_dosha(&asha_details()).await;

    assert_eq!(dosha_mock.hits(), 2);
    assert!(!result.success());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_yields_failure() -> Result<()> {
    let client = ApiClient::new("http://127.0.0.1:1/api");
    let result = client.services().await;

    assert!(!result.success());
    assert!(result.error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_panchang_by_date_path() -> Result<()> {
    let server = MockServer::start();
    let panchang_mock = server.mock(|when, then| {
        when.method(GET).path("/api/panchang/date/2025-01-10");
        then.status(200).json_body(json!({"tithi": "Ekadashi"}));
    });

    let client = ApiClient::new(format!("{}/", server.url("/api")));
    let result = client.panchang_by_date("2025-01-10").await;

    panchang_mock.assert();
    assert_eq!(result.data().unwrap()["tithi"], "Ekadashi");
    Ok(())
}

#[tokio::test]
async fn test_anonymous_calls_carry_no_authorization() -> Result<()> {
    let server = MockServer::start();
    let services_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/services/")
            .header_missing("authorization");
        then.status(200).json_body(json!([{"id": 1}]));
    });
    let dosha_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/calculators/dosha")
            .header_missing("authorization");
        then.status(200).json_body(json!({"doshas": []}));
    });

    let client = ApiClient::new(server.url("/api"));
    let services = client.services().await;
    let dosha = client.calculate_dosha(&asha_details()).await;

    services_mock.assert();
    dosha_mock.assert();
    assert!(services.success());
    assert!(dosha.success());
    Ok(())
}

#[tokio::test]
async fn test_configured_timeout_yields_timeout_message() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/faqs/");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(json!([]));
    });

    let config = PortalConfig {
        api_base_url: server.url("/api"),
        timeout: Some(Duration::from_millis(200)),
        retry: RetryPolicy::default(),
        session_path: "unused-session.json".to_string(),
    };
    let client = ApiClient::from_config(&config)?;
    let result = client.faqs().await;

    assert!(!result.success());
    assert_eq!(
        result.error(),
        Some("Request timeout. Please check your connection and try again.")
    );
    Ok(())
}
