use crate::calculators::CalculatorKind;
use crate::domain::model::{
    ApiResult, AuthToken, BirthDetails, MatchingRequest, NumerologyRequest, PasswordChange,
    ProfileUpdate, RegisterRequest, RudrakshaRequest, TestimonialRequest, TokenResponse,
};
use crate::domain::ports::{ConfigProvider, RetryPolicy};
use crate::utils::error::Result;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your connection and try again.";

/// Upper bound for any single wait between attempts, including server-sent `Retry-After`.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Request body variants. Only `Json` carries the JSON content type.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// What a single attempt produced, and whether another attempt may help.
enum Attempt<T> {
    Done(ApiResult<T>),
    Retry {
        result: ApiResult<T>,
        after: Option<Duration>,
    },
}

/// Typed wrapper over the consultation backend.
///
/// Every method returns an [`ApiResult`]; transport failures, non-2xx statuses
/// and undecodable bodies all come back as `ApiResult::err`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry: config.retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        token: Option<&AuthToken>,
    ) -> ApiResult<T> {
        let mut attempt = 0u32;
        loop {
            match self.send_once(&method, path, &body, token).await {
                Attempt::Done(result) => return result,
                Attempt::Retry { result, after } => {
                    if attempt >= self.retry.max_retries {
                        return result;
                    }
                    let delay = retry_delay(self.retry.base_delay, attempt, after);
                    tracing::debug!(
                        "Retrying {} {} in {:?} (attempt {}/{})",
                        method,
                        path,
                        delay,
                        attempt + 1,
                        self.retry.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        body: &RequestBody,
        token: Option<&AuthToken>,
    ) -> Attempt<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(value),
            RequestBody::Form(fields) => request.form(fields),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                let message = if e.is_timeout() {
                    TIMEOUT_MESSAGE.to_string()
                } else {
                    e.to_string()
                };
                return Attempt::Retry {
                    result: ApiResult::err(message),
                    after: None,
                };
            }
        };

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url, status);

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let text = response.text().await.unwrap_or_default();
            let message = error_message(status, &text);
            tracing::warn!("Backend rejected {} {}: {}", method, path, message);

            let result = ApiResult::err(message);
            let retryable = status == StatusCode::TOO_MANY_REQUESTS
                || (status.is_server_error() && *method == Method::GET);
            return if retryable {
                Attempt::Retry {
                    result,
                    after: retry_after,
                }
            } else {
                Attempt::Done(result)
            };
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Attempt::Done(ApiResult::err(e.to_string())),
        };
        Attempt::Done(decode_body(&text))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> ApiResult<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.request(method, path, RequestBody::Json(value), token).await,
            Err(e) => ApiResult::err(format!("Could not encode request: {}", e)),
        }
    }

    async fn get(&self, path: &str, token: Option<&AuthToken>) -> ApiResult<Value> {
        self.request(Method::GET, path, RequestBody::Empty, token).await
    }

    // Auth

    /// OAuth2 password grant; the body is form encoded, never JSON.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        self.request(Method::POST, "/auth/login", RequestBody::Form(form), None)
            .await
    }

    pub async fn register(&self, user: &RegisterRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, "/auth/register", user, None).await
    }

    pub async fn register_admin(&self, user: &RegisterRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, "/auth/register-admin", user, None)
            .await
    }

    pub async fn current_user(&self, token: &AuthToken) -> ApiResult<Value> {
        self.get("/auth/me", Some(token)).await
    }

    pub async fn verify_email(&self, verification_token: &str) -> ApiResult<Value> {
        self.send_json(
            Method::POST,
            "/auth/verify-email",
            &json!({ "token": verification_token }),
            None,
        )
        .await
    }

    pub async fn resend_verification(&self, email: &str) -> ApiResult<Value> {
        self.send_json(
            Method::POST,
            "/auth/resend-verification",
            &json!({ "email": email }),
            None,
        )
        .await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        self.send_json(
            Method::POST,
            "/auth/forgot-password",
            &json!({ "email": email }),
            None,
        )
        .await
    }

    pub async fn reset_password(&self, reset_token: &str, new_password: &str) -> ApiResult<Value> {
        self.send_json(
            Method::POST,
            "/auth/reset-password",
            &json!({ "token": reset_token, "new_password": new_password }),
            None,
        )
        .await
    }

    pub async fn update_profile(&self, token: &AuthToken, profile: &ProfileUpdate) -> ApiResult<Value> {
        self.send_json(Method::PUT, "/auth/me", profile, Some(token))
            .await
    }

    pub async fn change_password(
        &self,
        token: &AuthToken,
        change: &PasswordChange,
    ) -> ApiResult<Value> {
        self.send_json(Method::POST, "/auth/me/change-password", change, Some(token))
            .await
    }

    // Content

    pub async fn services(&self) -> ApiResult<Value> {
        self.get("/services/", None).await
    }

    pub async fn service(&self, id: u32) -> ApiResult<Value> {
        self.get(&format!("/services/{}", id), None).await
    }

    pub async fn blogs(&self) -> ApiResult<Value> {
        self.get("/blogs/", None).await
    }

    pub async fn blog(&self, id: u32) -> ApiResult<Value> {
        self.get(&format!("/blogs/{}", id), None).await
    }

    pub async fn horoscopes(&self) -> ApiResult<Value> {
        self.get("/horoscopes/", None).await
    }

    pub async fn horoscope(&self, id: u32) -> ApiResult<Value> {
        self.get(&format!("/horoscopes/{}", id), None).await
    }

    pub async fn panchang(&self) -> ApiResult<Value> {
        self.get("/panchang/", None).await
    }

    pub async fn panchang_by_date(&self, date: &str) -> ApiResult<Value> {
        self.get(&format!("/panchang/date/{}", date), None).await
    }

    pub async fn testimonials(&self) -> ApiResult<Value> {
        self.get("/testimonials/", None).await
    }

    pub async fn create_testimonial(&self, testimonial: &TestimonialRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, "/testimonials", testimonial, None)
            .await
    }

    pub async fn faqs(&self) -> ApiResult<Value> {
        self.get("/faqs/", None).await
    }

    // Bookings

    pub async fn bookings(&self, token: &AuthToken) -> ApiResult<Value> {
        self.get("/bookings/", Some(token)).await
    }

    pub async fn create_booking<B: Serialize>(&self, token: &AuthToken, booking: &B) -> ApiResult<Value> {
        self.send_json(Method::POST, "/bookings/", booking, Some(token))
            .await
    }

    pub async fn confirm_booking(&self, token: &AuthToken, booking_id: u64) -> ApiResult<Value> {
        self.request(
            Method::POST,
            &format!("/bookings/{}/confirm", booking_id),
            RequestBody::Empty,
            Some(token),
        )
        .await
    }

    // Calculators

    pub async fn calculate_kundli(&self, details: &BirthDetails) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Kundli.endpoint(), details, None)
            .await
    }

    pub async fn calculate_dosha(&self, details: &BirthDetails) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Dosha.endpoint(), details, None)
            .await
    }

    pub async fn calculate_gemstone(&self, details: &BirthDetails) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Gemstone.endpoint(), details, None)
            .await
    }

    pub async fn calculate_moon_sign(&self, details: &BirthDetails) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::MoonSign.endpoint(), details, None)
            .await
    }

    pub async fn calculate_ascendant(&self, details: &BirthDetails) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Ascendant.endpoint(), details, None)
            .await
    }

    pub async fn calculate_horoscope_matching(&self, request: &MatchingRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::HoroscopeMatching.endpoint(), request, None)
            .await
    }

    pub async fn calculate_rudraksha(&self, request: &RudrakshaRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Rudraksha.endpoint(), request, None)
            .await
    }

    pub async fn calculate_numerology(&self, request: &NumerologyRequest) -> ApiResult<Value> {
        self.send_json(Method::POST, CalculatorKind::Numerology.endpoint(), request, None)
            .await
    }
}

/// `detail`, then `message`, then the generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Null => None,
                Value::String(_) => None,
                other => Some(other.to_string()),
            })
    };

    field("detail")
        .or_else(|| field("message"))
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()))
}

/// `base * 2^attempt`, or the server's `Retry-After`, never above [`MAX_RETRY_DELAY`].
fn retry_delay(base: Duration, attempt: u32, after: Option<Duration>) -> Duration {
    let delay = match after {
        Some(after) => after,
        None => 2u32
            .checked_pow(attempt)
            .and_then(|factor| base.checked_mul(factor))
            .unwrap_or(MAX_RETRY_DELAY),
    };
    delay.min(MAX_RETRY_DELAY)
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    match serde_json::from_str::<T>(text) {
        Ok(data) => ApiResult::ok(data),
        Err(e) => {
            tracing::warn!("Could not decode backend response: {}", e);
            ApiResult::err(format!("Invalid response from server: {}", e))
        }
    }
}
