//! Geometry shared by the draw stream and the faces that fill it.
//!
//! Surface space:
//! - pixels, origin top-left
//! - +X right, +Y down
//!
//! Faces compute positions in this space directly; renderers map it onto
//! whatever their target is (SVG user units, framebuffer pixels).

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
