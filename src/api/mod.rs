mod config;
mod export;
#[cfg(feature = "http-client")]
mod gemini;
mod model;
mod prompts;
mod session;

pub use config::{DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, LensConfig};
pub use export::{EmailDraft, format_email_body};
#[cfg(feature = "http-client")]
pub use gemini::GeminiClient;
pub use model::{GenerativeModel, ModelRequest, ModelResponse};
pub use prompts::{forecast_prompt, summary_prompt};
pub use session::{ForecastSession, RequestTicket};

use crate::core::{ChartGeometry, compute_geometry_with_locale};
use crate::error::LensResult;

impl ForecastSession {
    /// Chart layout of the current forecast; `None` before a forecast loads.
    pub fn chart_geometry(&self, config: &LensConfig) -> LensResult<Option<ChartGeometry>> {
        self.forecast()
            .map(|forecast| compute_geometry_with_locale(&forecast.forecast, config.chart, config.locale))
            .transpose()
    }
}
