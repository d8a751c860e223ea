use std::fmt;

use thiserror::Error;

pub type LensResult<T> = Result<T, LensError>;

/// Outbound request issued to the generative model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Summary,
    Forecast,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => f.write_str("summary"),
            Self::Forecast => f.write_str("forecast"),
        }
    }
}

/// Coarse classification used by callers that only branch on the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No JSON object boundary in the model reply.
    Parse,
    /// A JSON span was found but could not be decoded.
    Syntax,
    /// Decoded data is missing required fields or has the wrong shape.
    Validation,
    /// The outbound model call failed.
    Transport,
    /// Caller misuse: busy session, bad viewport, bad input.
    Usage,
}

/// Every failure surfaced by the crate.
///
/// The `Display` text of the parse, validation and transport variants is the
/// message shown to the end user; detail for logs lives in the fields.
#[derive(Debug, Error)]
pub enum LensError {
    #[error("The API response did not contain a valid JSON object.")]
    NoJsonObject,

    #[error("Failed to parse forecast data. The API returned invalid JSON.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid forecast data format received from API.")]
    InvalidForecast { reason: String },

    #[error("Failed to generate {kind}. Please check the logs for more details.")]
    Transport { kind: RequestKind, detail: String },

    #[error("a {kind} request is already in flight")]
    RequestInFlight { kind: RequestKind },

    #[error("request ticket no longer matches the session")]
    StaleTicket,

    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("a summary must be loaded before requesting a forecast")]
    ForecastUnavailable,

    #[error("invalid viewport: width={width}, height={height}, padding={padding}")]
    InvalidViewport {
        width: f64,
        height: f64,
        padding: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LensError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoJsonObject => ErrorKind::Parse,
            Self::InvalidJson(_) => ErrorKind::Syntax,
            Self::InvalidForecast { .. } => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RequestInFlight { .. }
            | Self::StaleTicket
            | Self::EmptyTopic
            | Self::ForecastUnavailable
            | Self::InvalidViewport { .. }
            | Self::InvalidData(_)
            | Self::InvalidInput(_)
            | Self::Config(_) => ErrorKind::Usage,
        }
    }

    pub(crate) fn invalid_forecast(reason: impl Into<String>) -> Self {
        Self::InvalidForecast {
            reason: reason.into(),
        }
    }

    #[cfg(feature = "http-client")]
    pub(crate) fn transport(kind: RequestKind, detail: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            detail: detail.into(),
        }
    }
}
