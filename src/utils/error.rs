use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid date/time '{value}': {reason}")]
    DateTimeError { value: String, reason: String },

    #[error("Authentication required: {message}")]
    AuthRequired { message: String },

    #[error("Authentication failed: {message}")]
    AuthFailed { message: String },

    #[error("Backend request failed: {message}")]
    BackendError { message: String },

    #[error("Booking failed: {message}")]
    BookingError { message: String },

    #[error("Calculation of {calculator} failed: {detail}")]
    CalculatorError { calculator: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Authentication,
    Backend,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::HttpError(_) => ErrorCategory::Network,
            PortalError::IoError(_) | PortalError::SerializationError(_) => ErrorCategory::System,
            PortalError::ConfigError { .. }
            | PortalError::ConfigValidationError { .. }
            | PortalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PortalError::ValidationError { .. } | PortalError::DateTimeError { .. } => {
                ErrorCategory::Input
            }
            PortalError::AuthRequired { .. } | PortalError::AuthFailed { .. } => {
                ErrorCategory::Authentication
            }
            PortalError::BackendError { .. }
            | PortalError::BookingError { .. }
            | PortalError::CalculatorError { .. } => ErrorCategory::Backend,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Authentication => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message safe to show to an end user. Raw detail only survives for content and
    /// booking errors, where it is already a backend-authored sentence; calculator
    /// detail stays in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            PortalError::HttpError(_) => {
                "Could not reach the astrology service. Please try again later.".to_string()
            }
            PortalError::IoError(_) | PortalError::SerializationError(_) => {
                "A local file could not be read or written.".to_string()
            }
            PortalError::ConfigError { .. }
            | PortalError::ConfigValidationError { .. }
            | PortalError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            PortalError::ValidationError { message } => message.clone(),
            PortalError::DateTimeError { value, .. } => {
                format!("'{}' is not a valid date or time", value)
            }
            PortalError::AuthRequired { .. } => "Please log in to continue.".to_string(),
            PortalError::AuthFailed { message } => format!("Login failed: {}", message),
            PortalError::BackendError { message }
            | PortalError::BookingError { message } => message.clone(),
            PortalError::CalculatorError { calculator, .. } => {
                format!("Failed to calculate {}. Please try again later.", calculator)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the --api-url setting",
            ErrorCategory::Configuration => "Review the config file and command line flags",
            ErrorCategory::Input => "Dates use YYYY-MM-DD and times use HH:MM",
            ErrorCategory::Authentication => "Run `astro-portal login` and retry",
            ErrorCategory::Backend => "Retry later or contact support if the problem persists",
            ErrorCategory::System => "Check file permissions for the session path",
        }
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
