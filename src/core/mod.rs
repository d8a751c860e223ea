pub mod axis_ticks;
pub mod chart_geometry;
pub mod label_format;
pub mod references;
pub mod response_parser;
pub mod scale;
pub mod types;

pub use chart_geometry::{
    ChartGeometry, LinePath, PathCommand, PlotBounds, PlotGeometry, PlotPoint, TimeLabel,
    ValueRange, ValueTick, compute_geometry, compute_geometry_with_locale,
};
pub use label_format::{AxisLabelLocale, format_number};
pub use references::{GroundingChunk, dedupe_references, references_from_grounding};
pub use response_parser::{extract_json_span, parse_forecast};
pub use scale::LinearScale;
pub use types::{
    ChartViewport, FORECAST_DURATION_OPTIONS, ForecastDataPoint, ForecastRequest, ForecastResult,
    Granularity, Reference,
};
