use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Solid fill of a region; used to clear the surface behind a face.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub rect: Rect,
    pub color: Color,
}

impl FillCmd {
    #[inline]
    pub fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

impl DrawList {
    /// Records a solid fill over `rect`.
    #[inline]
    pub fn push_fill(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Fill(FillCmd::new(rect, color)));
    }
}
