use crate::domain::model::{ApiResult, Computed, Provenance};
use crate::utils::error::{PortalError, Result};
use serde_json::Value;
use std::future::Future;

/// What a controller does when the backend call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Substitute a local estimate, tagged `Provenance::LocalEstimate`.
    Fallback,
    /// Surface the failure to the user.
    Terminal,
}

/// Peels the envelope layers the backend wraps around calculator payloads.
///
/// `{data: {data: {x: 1}}}` and `{data: {x: 1}}` both become `{x: 1}`.
/// A `null` inner `data` is left in place.
pub fn unwrap_payload(mut payload: Value) -> Value {
    loop {
        match payload {
            Value::Object(mut map) if map.get("data").is_some_and(|v| !v.is_null()) => {
                payload = map.remove("data").unwrap_or(Value::Null);
            }
            other => return other,
        }
    }
}

/// Runs `api_call`; on failure, either computes `local` or returns the error per `policy`.
///
/// `local` only runs when the backend did not answer successfully. `label` names the
/// calculation in the error a terminal failure produces; the backend's own message is
/// logged and kept as the error's detail.
pub async fn with_api_fallback<Fut, L>(
    label: &str,
    api_call: Fut,
    local: L,
    policy: FailurePolicy,
) -> Result<Computed<Value>>
where
    Fut: Future<Output = ApiResult<Value>>,
    L: FnOnce() -> Result<Value>,
{
    match api_call.await.into_result() {
        Ok(payload) => Ok(Computed {
            provenance: Provenance::Backend,
            result: unwrap_payload(payload),
        }),
        Err(error) => match policy {
            FailurePolicy::Fallback => {
                tracing::warn!("Backend unavailable ({}), using local estimate", error);
                Ok(Computed {
                    provenance: Provenance::LocalEstimate,
                    result: local()?,
                })
            }
            FailurePolicy::Terminal => {
                tracing::warn!("{} failed without fallback: {}", label, error);
                Err(PortalError::CalculatorError {
                    calculator: label.to_string(),
                    detail: error,
                })
            }
        },
    }
}
