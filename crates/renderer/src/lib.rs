//! Coordinate mapping and script generation for the live memory chart.
//!
//! [`AxisMapper`] projects samples onto the canvas under a sliding time
//! window; [`RenderEngine`] owns one and emits the initial page plus the
//! incremental redraw scripts served to the polling client.

pub mod axis;
pub mod engine;
mod page;

pub use axis::{AxisMapper, CanvasGeometry, DataRange, PixelPoint, ViewWindow};
pub use engine::{RenderEngine, NUM_HLABEL, NUM_VLABEL};
