use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LensError, LensResult};

/// A web source the model grounded its summary on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub uri: String,
    pub title: String,
}

impl Reference {
    #[must_use]
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// One forecast sample. `value` is the raw, un-normalized magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDataPoint {
    pub time: String,
    pub value: f64,
}

impl ForecastDataPoint {
    #[must_use]
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Structured forecast decoded from a model reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub forecast: Vec<ForecastDataPoint>,
    pub analysis: String,
    pub methodology: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub error_measure: String,
}

impl ForecastResult {
    /// `false` for the degenerate result of an empty `forecast` array.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.forecast.is_empty()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.has_data() && !self.analysis.is_empty() && !self.methodology.is_empty()
    }
}

/// Time step used to break a forecast horizon down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weeks,
    Months,
    #[default]
    Years,
}

impl Granularity {
    pub fn parse(input: &str) -> LensResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "weeks" | "week" => Ok(Self::Weeks),
            "months" | "month" => Ok(Self::Months),
            "years" | "year" => Ok(Self::Years),
            other => Err(LensError::InvalidInput(format!(
                "unknown granularity `{other}` (expected weeks, months or years)"
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weeks => f.write_str("weeks"),
            Self::Months => f.write_str("months"),
            Self::Years => f.write_str("years"),
        }
    }
}

/// Horizons offered for forecasting, in years.
pub const FORECAST_DURATION_OPTIONS: [u32; 3] = [3, 5, 10];

/// Parameters of one forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub duration_years: u32,
    #[serde(default)]
    pub granularity: Granularity,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            duration_years: 5,
            granularity: Granularity::Years,
        }
    }
}

impl ForecastRequest {
    pub fn new(duration_years: u32, granularity: Granularity) -> LensResult<Self> {
        let request = Self {
            duration_years,
            granularity,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(self) -> LensResult<Self> {
        if !FORECAST_DURATION_OPTIONS.contains(&self.duration_years) {
            return Err(LensError::InvalidInput(format!(
                "forecast duration must be one of {FORECAST_DURATION_OPTIONS:?} years, got {}",
                self.duration_years
            )));
        }
        Ok(self)
    }
}

/// Chart drawing area in logical units. The plot area is inset by `padding`
/// on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 320.0,
            padding: 50.0,
        }
    }
}

impl ChartViewport {
    #[must_use]
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.padding.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.padding >= 0.0
            && self.plot_width() > 0.0
            && self.plot_height() > 0.0
    }

    pub fn validate(self) -> LensResult<Self> {
        if !self.is_valid() {
            return Err(LensError::InvalidViewport {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width - 2.0 * self.padding
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartViewport, ForecastRequest, Granularity};

    #[test]
    fn viewport_without_plot_area_is_invalid() {
        assert!(ChartViewport::default().is_valid());
        assert!(!ChartViewport::new(100.0, 320.0, 50.0).is_valid());
        assert!(!ChartViewport::new(0.0, 320.0, 0.0).is_valid());
        assert!(!ChartViewport::new(600.0, 320.0, -1.0).is_valid());
        assert!(!ChartViewport::new(f64::NAN, 320.0, 50.0).is_valid());
    }

    #[test]
    fn forecast_request_rejects_unsupported_horizon() {
        assert!(ForecastRequest::new(5, Granularity::Months).is_ok());
        assert!(ForecastRequest::new(7, Granularity::Months).is_err());
    }

    #[test]
    fn granularity_parses_singular_and_plural() {
        assert_eq!(Granularity::parse("Week").expect("weeks"), Granularity::Weeks);
        assert_eq!(Granularity::parse(" months ").expect("months"), Granularity::Months);
        assert!(Granularity::parse("decades").is_err());
    }
}
