//! Quadrant engine crate.
//!
//! Renderer-agnostic pieces a watch face draws with and a host renders from:
//! geometry, colors and pens, the recorded draw stream, the `Canvas` painter,
//! frame timing and logger setup.

pub mod canvas;
pub mod coords;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod time;

pub use canvas::Canvas;
