mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{CHART_TITLE, ChartStyle, NO_DATA_MESSAGE, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};
pub use svg_renderer::{SvgRenderer, frame_to_svg};

use crate::core::ChartGeometry;
use crate::error::LensResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from parsing and layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> LensResult<()>;
}

/// Builds a frame from `geometry` with the default style and hands it to `renderer`.
pub fn render_geometry<R: Renderer + ?Sized>(
    renderer: &mut R,
    geometry: &ChartGeometry,
) -> LensResult<()> {
    let frame = RenderFrame::from_geometry(geometry, &ChartStyle::default())?;
    renderer.render(&frame)
}
