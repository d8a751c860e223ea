use crate::core::{ChartGeometry, ChartViewport, PlotGeometry};
use crate::error::LensResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

pub const CHART_TITLE: &str = "A line chart showing the forecasted trend over time.";
pub const NO_DATA_MESSAGE: &str = "No data to display";

/// Colors and sizes used when materializing a chart geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub series_color: Color,
    pub marker_outline_color: Color,
    pub label_color: Color,
    pub placeholder_color: Color,
    pub grid_color: Color,
    pub axis_color: Color,
    pub series_stroke_width: f64,
    pub marker_radius: f64,
    pub marker_stroke_width: f64,
    pub font_size_px: f64,
    pub value_label_offset_px: f64,
    pub time_label_offset_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let slate = Color::from_rgb8(148, 163, 184);
        Self {
            series_color: Color::from_rgb8(56, 189, 248),
            marker_outline_color: Color::from_rgb8(15, 23, 42),
            label_color: slate,
            placeholder_color: Color::from_rgb8(100, 116, 139),
            grid_color: slate.with_alpha(0.2),
            axis_color: slate.with_alpha(0.3),
            series_stroke_width: 2.0,
            marker_radius: 4.0,
            marker_stroke_width: 2.0,
            font_size_px: 12.0,
            value_label_offset_px: 10.0,
            time_label_offset_px: 20.0,
        }
    }
}

/// Backend-agnostic scene for one chart draw pass, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: ChartViewport,
    pub title: String,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: ChartViewport) -> Self {
        Self {
            viewport,
            title: CHART_TITLE.to_owned(),
            lines: Vec::new(),
            texts: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
        }
    }

    /// Materializes `geometry` into grid, axes, labels, the series line and
    /// point markers.
    pub fn from_geometry(geometry: &ChartGeometry, style: &ChartStyle) -> LensResult<Self> {
        let frame = match geometry {
            ChartGeometry::NoData { viewport, bounds } => {
                Self::new(*viewport).with_text(
                    TextPrimitive::new(
                        NO_DATA_MESSAGE,
                        bounds.center_x(),
                        bounds.center_y(),
                        style.font_size_px,
                        style.placeholder_color,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle),
                )
            }
            ChartGeometry::Plot(plot) => Self::from_plot(plot, style),
        };
        frame.validate()?;
        Ok(frame)
    }

    fn from_plot(plot: &PlotGeometry, style: &ChartStyle) -> Self {
        let bounds = plot.bounds;
        let mut frame = Self::new(plot.viewport);

        for tick in &plot.value_ticks {
            frame.lines.push(
                LinePrimitive::new(
                    bounds.left,
                    tick.y,
                    bounds.right,
                    tick.y,
                    1.0,
                    style.grid_color,
                )
                .with_stroke_style(LineStrokeStyle::Dashed {
                    dash_px: 3.0,
                    gap_px: 3.0,
                }),
            );
            frame.texts.push(
                TextPrimitive::new(
                    tick.label.clone(),
                    bounds.left - style.value_label_offset_px,
                    tick.y,
                    style.font_size_px,
                    style.label_color,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        frame.lines.push(LinePrimitive::new(
            bounds.left,
            bounds.top,
            bounds.left,
            bounds.bottom,
            1.0,
            style.axis_color,
        ));

        // Models occasionally emit blank period labels; those get no text.
        for label in plot.time_labels.iter().filter(|label| !label.label.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                label.label.clone(),
                label.x,
                bounds.bottom + style.time_label_offset_px,
                style.font_size_px,
                style.label_color,
                TextHAlign::Center,
            ));
        }
        frame.lines.push(LinePrimitive::new(
            bounds.left,
            bounds.bottom,
            bounds.right,
            bounds.bottom,
            1.0,
            style.axis_color,
        ));

        if !plot.path.is_empty() {
            frame.paths.push(PathPrimitive {
                data: plot.path.to_svg_data(),
                stroke_width: style.series_stroke_width,
                color: style.series_color,
            });
        }

        frame.circles.extend(plot.points.iter().map(|point| CirclePrimitive {
            cx: point.x,
            cy: point.y,
            radius: style.marker_radius,
            fill: style.series_color,
            stroke: style.marker_outline_color,
            stroke_width: style.marker_stroke_width,
        }));

        frame
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> LensResult<()> {
        self.viewport.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.texts.is_empty()
            && self.paths.is_empty()
            && self.circles.is_empty()
    }
}
