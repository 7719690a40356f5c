//! Shape payloads and their `DrawList` push helpers, one file per shape.

pub(crate) mod circle;
pub(crate) mod fill;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod text;

pub use circle::CircleCmd;
pub use fill::FillCmd;
pub use image::ImageCmd;
pub use line::{LineCmd, StrokeCap};
pub use text::{TextAlign, TextCmd};
