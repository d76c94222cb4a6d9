//! Calculator controllers and their local estimates.
//!
//! Each calculator asks the backend first. When the backend fails, calculators
//! with [`FailurePolicy::Fallback`] answer with a deterministic local estimate
//! tagged [`Provenance::LocalEstimate`](crate::domain::model::Provenance);
//! the others report the failure.

pub mod ascendant;
pub mod dosha;
pub mod gemstone;
pub mod kundli;
pub mod matching;
pub mod moon_sign;
pub mod zodiac;

use crate::core::api_client::ApiClient;
use crate::core::fallback::{with_api_fallback, FailurePolicy};
use crate::domain::model::{
    ApiResult, BirthProfile, Computed, Gender, MatchingRequest, NumerologyRequest,
    RudrakshaRequest,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use serde_json::Value;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKind {
    Kundli,
    Dosha,
    Gemstone,
    MoonSign,
    Ascendant,
    HoroscopeMatching,
    Rudraksha,
    Numerology,
}

impl CalculatorKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            CalculatorKind::Kundli => "/calculators/kundli",
            CalculatorKind::Dosha => "/calculators/dosha",
            CalculatorKind::Gemstone => "/calculators/gemstone",
            CalculatorKind::MoonSign => "/calculators/moon-sign",
            CalculatorKind::Ascendant => "/calculators/ascendant",
            CalculatorKind::HoroscopeMatching => "/calculators/horoscope-matching",
            CalculatorKind::Rudraksha => "/calculators/rudraksha",
            CalculatorKind::Numerology => "/numerology/calculate",
        }
    }

    /// Numerology and Rudraksha have no local estimate.
    pub fn policy(&self) -> FailurePolicy {
        match self {
            CalculatorKind::Rudraksha | CalculatorKind::Numerology => FailurePolicy::Terminal,
            _ => FailurePolicy::Fallback,
        }
    }

    /// Human name used in logs and in the failure message users see.
    pub fn label(&self) -> &'static str {
        match self {
            CalculatorKind::Kundli => "your kundli",
            CalculatorKind::Dosha => "dosha analysis",
            CalculatorKind::Gemstone => "gemstone recommendations",
            CalculatorKind::MoonSign => "moon sign",
            CalculatorKind::Ascendant => "ascendant",
            CalculatorKind::HoroscopeMatching => "horoscope matching",
            CalculatorKind::Rudraksha => "Rudraksha recommendations",
            CalculatorKind::Numerology => "numerology",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Resolved,
}

pub struct CalculatorController<'a> {
    client: &'a ApiClient,
    state: SubmissionState,
}

impl<'a> CalculatorController<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    async fn submit<Fut, L>(&mut self, kind: CalculatorKind, api_call: Fut, local: L) -> Result<Computed<Value>>
    where
        Fut: Future<Output = ApiResult<Value>>,
        L: FnOnce() -> Result<Value>,
    {
        self.state = SubmissionState::Submitting;
        tracing::debug!("Calculating {} via {}", kind.label(), kind.endpoint());

        let outcome = with_api_fallback(kind.label(), api_call, local, kind.policy()).await;

        self.state = SubmissionState::Resolved;
        match &outcome {
            Ok(computed) => tracing::info!("{} result ready ({:?})", kind.label(), computed.provenance),
            Err(e) => tracing::warn!("{} calculation failed: {}", kind.label(), e),
        }
        outcome
    }

    pub async fn kundli(&mut self, profile: &BirthProfile) -> Result<Computed<Value>> {
        let client = self.client;
        let details = profile.to_wire();
        self.submit(CalculatorKind::Kundli, client.calculate_kundli(&details), || {
            Ok(serde_json::to_value(kundli::estimate(profile))?)
        })
        .await
    }

    pub async fn dosha(&mut self, profile: &BirthProfile) -> Result<Computed<Value>> {
        let client = self.client;
        let details = profile.to_wire();
        let mut computed = self
            .submit(CalculatorKind::Dosha, client.calculate_dosha(&details), || {
                Ok(serde_json::to_value(dosha::estimate(profile))?)
            })
            .await?;
        dosha::ensure_doshas_present(&mut computed.result);
        Ok(computed)
    }

    pub async fn gemstone(&mut self, profile: &BirthProfile) -> Result<Computed<Value>> {
        let client = self.client;
        let details = profile.to_wire();
        self.submit(CalculatorKind::Gemstone, client.calculate_gemstone(&details), || {
            Ok(serde_json::to_value(gemstone::estimate(profile))?)
        })
        .await
    }

    pub async fn moon_sign(&mut self, profile: &BirthProfile) -> Result<Computed<Value>> {
        let client = self.client;
        let details = profile.to_wire();
        self.submit(CalculatorKind::MoonSign, client.calculate_moon_sign(&details), || {
            Ok(serde_json::to_value(moon_sign::estimate(profile))?)
        })
        .await
    }

    pub async fn ascendant(&mut self, profile: &BirthProfile) -> Result<Computed<Value>> {
        let client = self.client;
        let details = profile.to_wire();
        self.submit(CalculatorKind::Ascendant, client.calculate_ascendant(&details), || {
            Ok(serde_json::to_value(ascendant::estimate(profile))?)
        })
        .await
    }

    pub async fn horoscope_matching(
        &mut self,
        male: &BirthProfile,
        female: &BirthProfile,
    ) -> Result<Computed<Value>> {
        let client = self.client;
        let mut male_details = male.to_wire();
        male_details.gender = Gender::Male;
        let mut female_details = female.to_wire();
        female_details.gender = Gender::Female;
        let request = MatchingRequest {
            male_details,
            female_details,
        };

        self.submit(
            CalculatorKind::HoroscopeMatching,
            client.calculate_horoscope_matching(&request),
            || Ok(serde_json::to_value(matching::estimate(male, female))?),
        )
        .await
    }

    pub async fn rudraksha(
        &mut self,
        profile: &BirthProfile,
        current_problems: &[String],
    ) -> Result<Computed<Value>> {
        let client = self.client;
        let request = RudrakshaRequest {
            details: profile.to_wire(),
            current_problems: current_problems.to_vec(),
        };
        self.submit(CalculatorKind::Rudraksha, client.calculate_rudraksha(&request), || {
            Ok(Value::Null)
        })
        .await
    }

    pub async fn numerology(&mut self, name: &str, birth_date: NaiveDate) -> Result<Computed<Value>> {
        validate_non_empty_string("Name", name)?;
        let client = self.client;
        let request = NumerologyRequest {
            name: name.trim().to_string(),
            birth_date: birth_date.format("%Y-%m-%d").to_string(),
        };
        self.submit(CalculatorKind::Numerology, client.calculate_numerology(&request), || {
            Ok(Value::Null)
        })
        .await
    }
}
