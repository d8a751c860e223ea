use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{AxisLabelLocale, ChartViewport, ForecastRequest};
use crate::error::{LensError, LensResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Host configuration.
///
/// Serializable so applications can load it from a JSON file; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Attach the web-search grounding tool to requests.
    #[serde(default = "default_search_grounding")]
    pub search_grounding: bool,
    #[serde(default)]
    pub chart: ChartViewport,
    #[serde(default)]
    pub locale: AxisLabelLocale,
    #[serde(default)]
    pub default_forecast: ForecastRequest,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            search_grounding: default_search_grounding(),
            chart: ChartViewport::default(),
            locale: AxisLabelLocale::default(),
            default_forecast: ForecastRequest::default(),
        }
    }
}

impl LensConfig {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: ChartViewport) -> Self {
        self.chart = chart;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn from_json_str(input: &str) -> LensResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| LensError::Config(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> LensResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LensError::Config(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> LensResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LensError::Config(format!("failed to serialize config: {e}")))
    }

    pub fn validate(self) -> LensResult<Self> {
        if self.model.trim().is_empty() {
            return Err(LensError::Config("model must not be empty".to_owned()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(LensError::Config(format!(
                "api_base_url must be an http(s) url, got `{}`",
                self.api_base_url
            )));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(LensError::Config("api_key_env must not be empty".to_owned()));
        }
        if self.request_timeout_secs == 0 {
            return Err(LensError::Config(
                "request_timeout_secs must be > 0".to_owned(),
            ));
        }
        self.chart
            .validate()
            .map_err(|e| LensError::Config(format!("chart: {e}")))?;
        self.default_forecast
            .validate()
            .map_err(|e| LensError::Config(format!("default_forecast: {e}")))?;
        Ok(self)
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key_from_env(&self) -> LensResult<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LensError::Config(format!(
                "environment variable `{}` is not set",
                self.api_key_env
            ))),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_search_grounding() -> bool {
    true
}
