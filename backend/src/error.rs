use serde::Serialize;
use thiserror::Error;

use crate::directions::DirectionsError;
use crate::kv_store::StoreError;
use crate::weather::WeatherError;

/// How loudly a failure should be presented to the pilgrim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("{0}")]
    General(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn severity(&self) -> Severity {
        match self {
            AppError::NotFound(_) => Severity::Info,
            AppError::Network(_) | AppError::InvalidData(_) => Severity::Warning,
            AppError::Authentication(_) | AppError::Permission(_) | AppError::General(_) => {
                Severity::Error
            }
            AppError::Server(_) | AppError::Config(_) => Severity::Critical,
        }
    }

    /// Short sentence suitable for display, without internal detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(_) => "Unable to reach the network. Check your connection.",
            AppError::InvalidData(_) => "The data received could not be read.",
            AppError::Authentication(_) => "Please sign in again.",
            AppError::Permission(_) => "Permission is required to continue.",
            AppError::NotFound(_) => "Nothing was found for this request.",
            AppError::Server(_) => "The server ran into a problem. Try again later.",
            AppError::General(_) => "Something went wrong.",
            AppError::Config(_) => "The application is misconfigured.",
        }
    }
}

impl From<DirectionsError> for AppError {
    fn from(err: DirectionsError) -> Self {
        match err {
            DirectionsError::Http(e) => AppError::Network(e.to_string()),
            DirectionsError::Status(status) => AppError::Server(format!("directions returned {status}")),
            DirectionsError::NoRoute(msg) => AppError::NotFound(msg),
            DirectionsError::Decode(msg) => AppError::InvalidData(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io(e) => AppError::General(e.to_string()),
            StoreError::Serde(e) => AppError::General(format!("stored value unreadable: {e}")),
            StoreError::InvalidKey(key) => AppError::InvalidData(format!("invalid key {key:?}")),
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::Http(e) => AppError::Network(e.to_string()),
            WeatherError::Status(status) => AppError::Server(format!("weather returned {status}")),
            WeatherError::Store(e) => e.into(),
        }
    }
}

impl From<gpx::errors::GpxError> for AppError {
    fn from(err: gpx::errors::GpxError) -> Self {
        AppError::General(format!("failed to build GPX document: {err}"))
    }
}
