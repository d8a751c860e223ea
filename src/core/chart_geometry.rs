use std::fmt::Write as _;

use smallvec::SmallVec;
use tracing::debug;

use crate::core::axis_ticks::{MAX_TIME_LABELS, VALUE_TICK_COUNT, axis_ticks, select_label_indices};
use crate::core::label_format::{AxisLabelLocale, TICK_LABEL_FRACTION_DIGITS, format_number};
use crate::core::{ChartViewport, ForecastDataPoint, LinearScale};
use crate::error::{LensError, LensResult};

/// Ratio of the data span added above and below a non-flat series.
pub const VALUE_PADDING_RATIO: f64 = 0.10;
/// Ratio of `|value|` added around a flat series.
pub const FLAT_SERIES_PADDING_RATIO: f64 = 0.20;
/// Lower bound on the padding around a flat series.
pub const FLAT_SERIES_MIN_PADDING: f64 = 10.0;

/// Plot area inside the viewport padding, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotBounds {
    #[must_use]
    pub fn from_viewport(viewport: ChartViewport) -> Self {
        Self {
            left: viewport.padding,
            top: viewport.padding,
            right: viewport.width - viewport.padding,
            bottom: viewport.height - viewport.padding,
        }
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.left + self.right) / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Observed data extremes and the padded range actually plotted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub data_min: f64,
    pub data_max: f64,
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Pads the data extremes so neither touches the plot edge and a flat
    /// series keeps a non-zero span.
    #[must_use]
    pub fn padded(data_min: f64, data_max: f64) -> Self {
        // Scaling before subtracting keeps the pad finite for any finite input.
        let pad = if data_max == data_min {
            (data_min.abs() * FLAT_SERIES_PADDING_RATIO).max(FLAT_SERIES_MIN_PADDING)
        } else {
            data_max * VALUE_PADDING_RATIO - data_min * VALUE_PADDING_RATIO
        };
        Self {
            data_min,
            data_max,
            min: (data_min - pad).max(f64::MIN),
            max: (data_max + pad).min(f64::MAX),
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Pixel position of one forecast point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// One Y-axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

/// One X-axis label anchored under the point at `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLabel {
    pub index: usize,
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

/// Polyline through the plotted points. Empty for fewer than two points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePath {
    commands: Vec<PathCommand>,
}

impl LinePath {
    fn through(points: &[PlotPoint]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                if index == 0 {
                    PathCommand::MoveTo {
                        x: point.x,
                        y: point.y,
                    }
                } else {
                    PathCommand::LineTo {
                        x: point.x,
                        y: point.y,
                    }
                }
            })
            .collect();
        Self { commands }
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG `d` attribute, e.g. `M 50,270 L 300,160`.
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut data = String::with_capacity(self.commands.len() * 16);
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                data.push(' ');
            }
            let _ = match command {
                PathCommand::MoveTo { x, y } => write!(data, "M {x},{y}"),
                PathCommand::LineTo { x, y } => write!(data, "L {x},{y}"),
            };
        }
        data
    }
}

/// Layout of a series with at least one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGeometry {
    pub viewport: ChartViewport,
    pub bounds: PlotBounds,
    pub value_range: ValueRange,
    pub points: Vec<PlotPoint>,
    pub value_ticks: SmallVec<[ValueTick; VALUE_TICK_COUNT]>,
    pub time_labels: Vec<TimeLabel>,
    pub path: LinePath,
}

/// Chart layout recomputed on every render.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    /// The series was empty; renderers show a placeholder.
    NoData {
        viewport: ChartViewport,
        bounds: PlotBounds,
    },
    Plot(PlotGeometry),
}

impl ChartGeometry {
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    #[must_use]
    pub fn viewport(&self) -> ChartViewport {
        match self {
            Self::NoData { viewport, .. } => *viewport,
            Self::Plot(plot) => plot.viewport,
        }
    }

    #[must_use]
    pub fn as_plot(&self) -> Option<&PlotGeometry> {
        match self {
            Self::NoData { .. } => None,
            Self::Plot(plot) => Some(plot),
        }
    }
}

/// Lays out `points` with en-US tick labels.
pub fn compute_geometry(
    points: &[ForecastDataPoint],
    viewport: ChartViewport,
) -> LensResult<ChartGeometry> {
    compute_geometry_with_locale(points, viewport, AxisLabelLocale::EnUs)
}

/// Lays out `points` inside `viewport`.
///
/// Fails only for an invalid viewport or non-finite values; an empty series
/// yields [`ChartGeometry::NoData`].
pub fn compute_geometry_with_locale(
    points: &[ForecastDataPoint],
    viewport: ChartViewport,
    locale: AxisLabelLocale,
) -> LensResult<ChartGeometry> {
    let viewport = viewport.validate()?;
    let bounds = PlotBounds::from_viewport(viewport);

    if points.is_empty() {
        debug!("chart geometry has no data");
        return Ok(ChartGeometry::NoData { viewport, bounds });
    }

    let mut data_min = f64::INFINITY;
    let mut data_max = f64::NEG_INFINITY;
    for point in points {
        if !point.value.is_finite() {
            return Err(LensError::InvalidData(format!(
                "forecast value at `{}` must be finite",
                point.time
            )));
        }
        data_min = data_min.min(point.value);
        data_max = data_max.max(point.value);
    }

    let value_range = ValueRange::padded(data_min, data_max);
    let x_axis = IndexAxis::new(points.len(), bounds)?;
    let y_axis = ValueAxis::new(value_range, bounds);

    let plotted: Vec<PlotPoint> = points
        .iter()
        .enumerate()
        .map(|(index, point)| PlotPoint {
            x: x_axis.x_for(index),
            y: y_axis.y_for(point.value),
            value: point.value,
        })
        .collect();

    let value_ticks = axis_ticks((value_range.min, value_range.max), VALUE_TICK_COUNT)
        .into_iter()
        .map(|value| ValueTick {
            value,
            y: y_axis.y_for(value),
            label: format_number(value, TICK_LABEL_FRACTION_DIGITS, locale),
        })
        .collect();

    let time_labels: Vec<TimeLabel> = select_label_indices(points.len(), MAX_TIME_LABELS)
        .into_iter()
        .map(|index| TimeLabel {
            index,
            x: plotted[index].x,
            label: points[index].time.clone(),
        })
        .collect();

    let path = LinePath::through(&plotted);

    debug!(
        points = plotted.len(),
        time_labels = time_labels.len(),
        min = value_range.min,
        max = value_range.max,
        "computed chart geometry"
    );

    Ok(ChartGeometry::Plot(PlotGeometry {
        viewport,
        bounds,
        value_range,
        points: plotted,
        value_ticks,
        time_labels,
        path,
    }))
}

/// Horizontal placement by point index.
enum IndexAxis {
    Centered(f64),
    Spread(LinearScale),
}

impl IndexAxis {
    fn new(point_count: usize, bounds: PlotBounds) -> LensResult<Self> {
        if point_count <= 1 {
            return Ok(Self::Centered(bounds.center_x()));
        }
        let last = (point_count - 1) as f64;
        Ok(Self::Spread(LinearScale::new(
            0.0,
            last,
            bounds.left,
            bounds.right,
        )?))
    }

    fn x_for(&self, index: usize) -> f64 {
        match self {
            Self::Centered(x) => *x,
            Self::Spread(scale) => scale.domain_to_pixel(index as f64),
        }
    }
}

/// Inverted vertical placement by value.
struct ValueAxis {
    scale: Option<LinearScale>,
    center_y: f64,
}

impl ValueAxis {
    fn new(range: ValueRange, bounds: PlotBounds) -> Self {
        // A collapsed range cannot build a scale; those values sit mid-plot.
        Self {
            scale: LinearScale::new(range.min, range.max, bounds.bottom, bounds.top).ok(),
            center_y: bounds.center_y(),
        }
    }

    fn y_for(&self, value: f64) -> f64 {
        match self.scale {
            Some(scale) => scale.domain_to_pixel(value),
            None => self.center_y,
        }
    }
}
