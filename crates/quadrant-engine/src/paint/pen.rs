use crate::scene::StrokeCap;

use super::Color;

/// Everything a canvas call needs to know about how to paint one primitive.
///
/// Lines use `stroke_width` and `cap`; circles are filled with `color`; text
/// uses `text_size` and `bold`. `anti_alias` applies to all three.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub cap: StrokeCap,
    pub text_size: f32,
    pub bold: bool,
}

impl Pen {
    /// Anti-aliased, butt-capped, 1px pen of the given color.
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            stroke_width: 1.0,
            anti_alias: true,
            cap: StrokeCap::Butt,
            text_size: 12.0,
            bold: false,
        }
    }

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    #[inline]
    pub const fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    #[inline]
    pub const fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    #[inline]
    pub const fn with_text(mut self, size: f32, bold: bool) -> Self {
        self.text_size = size;
        self.bold = bold;
        self
    }
}
