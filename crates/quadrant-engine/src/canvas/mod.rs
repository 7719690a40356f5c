//! Drawing surface handed to a face on every redraw.
//!
//! `Canvas` wraps the engine's `DrawList` with an immediate-mode API in the
//! shape faces are written against (`draw_line`, `draw_circle`, ...). Every
//! call lands on its own z-layer, so paint order is call order.

use std::sync::Arc;

use image::RgbaImage;

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Pen};
use crate::scene::{DrawList, LineCmd, TextAlign, TextCmd, ZIndex};

pub struct Canvas<'a> {
    draw_list: &'a mut DrawList,
    z: ZIndex,
}

impl<'a> Canvas<'a> {
    /// Starts recording on top of whatever `draw_list` already holds.
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        let z = draw_list
            .items()
            .iter()
            .map(|item| item.key.z.above())
            .max()
            .unwrap_or_default();
        Self { draw_list, z }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Floods `bounds` with a solid color.
    pub fn draw_color(&mut self, bounds: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_fill(z, bounds, color);
    }

    /// Blits a shared bitmap into `dest`.
    pub fn draw_bitmap(&mut self, dest: Rect, image: Arc<RgbaImage>) {
        let z = self.next_z();
        self.draw_list.push_image(z, dest, image);
    }

    /// Strokes a segment using the pen's color, width, cap and anti-aliasing.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, pen: &Pen) {
        let z = self.next_z();
        self.draw_list.push_line(
            z,
            LineCmd {
                from,
                to,
                color: pen.color,
                width: pen.stroke_width,
                cap: pen.cap,
                anti_alias: pen.anti_alias,
            },
        );
    }

    /// Fills a circle with the pen's color.
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, pen: &Pen) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, pen.color, pen.anti_alias);
    }

    /// Draws one line of text with its baseline on `anchor`.
    pub fn draw_text(&mut self, text: impl Into<String>, anchor: Vec2, align: TextAlign, pen: &Pen) {
        let z = self.next_z();
        self.draw_list.push_text(
            z,
            TextCmd {
                text: text.into(),
                size: pen.text_size,
                color: pen.color,
                bold: pen.bold,
                anti_alias: pen.anti_alias,
                anchor,
                align,
            },
        );
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = self.z;
        self.z = z.above();
        z
    }
}
