use thiserror::Error;

pub const GENERIC_LOAD_ERROR: &str = "An unexpected error occurred.";
pub const GENERIC_SUBMIT_ERROR: &str = "An error occurred while creating the booking.";
pub const DEFAULT_SUBMIT_ERROR: &str = "Unable to create booking.";

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Package ID not provided.")]
    MissingPackageId,

    #[error("Request to {path} failed with status {status}")]
    FetchFailure {
        path: String,
        status: u16,
        message: Option<String>,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Validation { message: String },

    #[error("Booking request to {path} was rejected with status {status}")]
    SubmitFailure {
        path: String,
        status: u16,
        message: Option<String>,
    },

    #[error("A booking request is already in flight")]
    SubmitInProgress,

    #[error("This booking has already been submitted")]
    AlreadyBooked,

    #[error("Unknown form field: {name}")]
    UnknownField { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Remote,
    Network,
    Validation,
    Configuration,
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPackageId | Self::UnknownField { .. } => ErrorCategory::Input,
            Self::FetchFailure { .. } | Self::SubmitFailure { .. } => ErrorCategory::Remote,
            Self::Transport(_) | Self::Serialization(_) | Self::Io(_) => ErrorCategory::Network,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::SubmitInProgress | Self::AlreadyBooked => ErrorCategory::State,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::State => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Remote | ErrorCategory::Validation => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Message from the server body if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::FetchFailure { message, .. } | Self::SubmitFailure { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingPackageId => "No package was selected.".to_string(),
            Self::FetchFailure {
                message: Some(message),
                ..
            } => message.clone(),
            Self::FetchFailure { status, .. } => {
                format!("The booking service answered with status {}.", status)
            }
            Self::Transport(_) | Self::Serialization(_) => GENERIC_LOAD_ERROR.to_string(),
            Self::Io(e) => format!("Could not read a local file: {}", e),
            Self::Validation { message } => message.clone(),
            Self::SubmitFailure { .. } => {
                format!("Error: {}", self.server_message().unwrap_or(DEFAULT_SUBMIT_ERROR))
            }
            Self::SubmitInProgress => "Your booking is still being processed.".to_string(),
            Self::AlreadyBooked => "This booking was already placed.".to_string(),
            Self::UnknownField { name } => format!("The form has no field called '{}'.", name),
            Self::Config { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Pick a package from the listing and try again.",
            ErrorCategory::Remote => "Check the message from the booking service and adjust the request.",
            ErrorCategory::Network => "Check that the booking service is reachable, then retry.",
            ErrorCategory::Validation => "Fill in the travel date and at least one traveler.",
            ErrorCategory::Configuration => "Fix the command line flags or the TOML config file.",
            ErrorCategory::State => "Wait for the current request to finish.",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
