pub mod api_client;
pub mod booking;
pub mod fallback;
pub mod session;

pub use crate::domain::model::{ApiResult, Computed, Provenance};
pub use crate::domain::ports::{ConfigProvider, RetryPolicy, SessionStore};
pub use crate::utils::error::Result;
