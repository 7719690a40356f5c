use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Horizontal placement of a text run relative to its anchor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Single-line text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Font size in pixels.
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub anti_alias: bool,
    /// Baseline anchor; `align` decides which part of the run sits on it.
    pub anchor: Vec2,
    pub align: TextAlign,
}

impl DrawList {
    /// Records a text draw command.
    #[inline]
    pub fn push_text(&mut self, z: ZIndex, text: TextCmd) {
        self.push(z, DrawCmd::Text(text));
    }
}
