//! Paint model shared between faces and renderers.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - `Pen`: the per-primitive paint parameters a face hands to the canvas

pub mod color;
pub mod pen;

pub use color::Color;
pub use pen::Pen;
