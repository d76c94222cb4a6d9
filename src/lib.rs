pub mod calculators;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use calculators::{CalculatorController, CalculatorKind};
pub use config::{ConfigOverrides, PortalConfig};
pub use core::{
    api_client::ApiClient,
    booking::BookingController,
    session::{FileSessionStore, Session},
};
pub use utils::error::{PortalError, Result};
