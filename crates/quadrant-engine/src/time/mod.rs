//! Frame timing.
//!
//! Measures how long each redraw takes and how far apart redraws land, so a
//! host can spot frames that blow the tick budget.
//! Intended usage:
//! - one `FrameClock` per surface
//! - wrap each `on_draw` call in `measure()`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
