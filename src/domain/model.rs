use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one backend call.
///
/// Only constructible through [`ApiResult::ok`] and [`ApiResult::err`], so a
/// successful result always carries data and a failed one always carries an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    outcome: std::result::Result<T, String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self { outcome: Ok(data) }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        self.outcome
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            outcome: self.outcome.map(f),
        }
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ApiResult", 2)?;
        state.serialize_field("success", &self.success())?;
        match &self.outcome {
            Ok(data) => state.serialize_field("data", data)?,
            Err(error) => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

/// Bearer token issued by `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Birth details collected by every calculator form. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthProfile {
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub birth_place: String,
    pub gender: Option<Gender>,
}

/// Wire shape the calculator endpoints accept.
#[derive(Debug, Clone, Serialize)]
pub struct BirthDetails {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_place: String,
    pub gender: Gender,
    pub language: String,
}

impl BirthProfile {
    pub fn to_wire(&self) -> BirthDetails {
        BirthDetails {
            name: self.name.clone(),
            birth_date: self.birth_date.format("%Y-%m-%d").to_string(),
            birth_time: self.birth_time.format("%H:%M").to_string(),
            birth_place: self.birth_place.clone(),
            gender: self.gender.unwrap_or_default(),
            language: "english".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchingRequest {
    pub male_details: BirthDetails,
    pub female_details: BirthDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct RudrakshaRequest {
    #[serde(flatten)]
    pub details: BirthDetails,
    pub current_problems: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumerologyRequest {
    pub name: String,
    pub birth_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
}

/// Partial profile edit; unset fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none() && self.preferred_language.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialRequest {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Appointment form as the user fills it in; dates and times are raw form strings.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub service_id: u32,
    pub booking_date: String,
    pub booking_time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
    pub notes: Option<String>,
}

/// Appointment as posted to `/bookings/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingPayload {
    pub service_id: u32,
    pub booking_date: String,
    pub booking_time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub id: serde_json::Value,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Backend,
    LocalEstimate,
}

/// A calculator result tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computed<T> {
    pub provenance: Provenance,
    pub result: T,
}

impl<T> Computed<T> {
    pub fn is_estimate(&self) -> bool {
        self.provenance == Provenance::LocalEstimate
    }
}
