//! The recorded draw stream.
//!
//! A face records one frame of fills, bitmaps, lines, circles and text into a
//! `DrawList`; hosts replay it in paint order (layer, then recording order)
//! into whatever backend they own. Shape payloads and their `push_*` helpers
//! live in `scene::shapes`.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::{CircleCmd, FillCmd, ImageCmd, LineCmd, StrokeCap, TextAlign, TextCmd};
pub use z_index::ZIndex;
