//! Quadrant analog watch face.
//!
//! Host callbacks arrive through [`WatchFace`]; the face answers with redraw
//! requests and wake-ups on its [`Host`], and records frames into a
//! `quadrant_engine::Canvas`.

pub mod background;
pub mod clock;
pub mod error;
pub mod face;
pub mod host;
pub mod render;
pub mod scheduler;
pub mod style;
pub mod theme;

#[cfg(test)]
mod testing;

pub use error::FaceError;
pub use face::{
    AnalogFace, BackgroundFill, DeviceProperties, DisplayMode, FaceOptions, LifecyclePhase,
    RenderState, WatchFace,
};
pub use host::{FaceStyle, Host, WakeupToken};
pub use theme::{ThemeResources, ThemeSpec, ThemeTable};

/// Convenience imports for hosts.
pub mod prelude {
    pub use crate::clock::ClockSnapshot;
    pub use crate::error::FaceError;
    pub use crate::face::{
        AnalogFace, BackgroundFill, DeviceProperties, DisplayMode, FaceOptions, WatchFace,
    };
    pub use crate::host::{FaceStyle, Host, WakeupToken};
    pub use crate::theme::{ThemeResources, ThemeSpec, ThemeTable};
}
