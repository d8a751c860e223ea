//! topic-lens: web-grounded topic summaries and forecasts.
//!
//! `core` holds the pure pieces (forecast reply parsing, reference
//! deduplication, chart layout), `render` turns a layout into drawable
//! primitives and SVG, and `api` owns session state, prompts, the model
//! transport seam and the email export.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ForecastSession, LensConfig};
pub use error::{ErrorKind, LensError, LensResult, RequestKind};
