use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// How the ends of a stroked line are finished.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StrokeCap {
    /// Ends exactly at the endpoints.
    #[default]
    Butt,
    /// Half-disc past each endpoint.
    Round,
    /// Half-square past each endpoint.
    Square,
}

/// Stroked line segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
    pub width: f32,
    pub cap: StrokeCap,
    pub anti_alias: bool,
}

impl LineCmd {
    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

impl DrawList {
    /// Records a stroked line.
    #[inline]
    pub fn push_line(&mut self, z: ZIndex, line: LineCmd) {
        self.push(z, DrawCmd::Line(line));
    }
}
