//! Writes recorded frames as SVG so a face can be inspected without a
//! display.
//!
//! Bitmaps are not inlined; the writer saves them once as a PNG next to the
//! SVG and links them by file name.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::RgbaImage;
use log::debug;

use quadrant_engine::paint::Color;
use quadrant_engine::scene::{DrawCmd, DrawList, StrokeCap, TextAlign};

/// Serializes `list` in paint order. Image commands link to `bitmap_href`.
pub fn render_svg(list: &mut DrawList, width: f32, height: f32, bitmap_href: &str) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    for item in list.iter_in_paint_order() {
        // Writing into a String cannot fail.
        let _ = match &item.cmd {
            DrawCmd::Fill(f) => writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                f.rect.origin.x,
                f.rect.origin.y,
                f.rect.width(),
                f.rect.height(),
                paint_attr("fill", f.color),
            ),
            DrawCmd::Image(img) => writeln!(
                out,
                r#"  <image x="{}" y="{}" width="{}" height="{}" href="{bitmap_href}"/>"#,
                img.dest.origin.x,
                img.dest.origin.y,
                img.dest.width(),
                img.dest.height(),
            ),
            DrawCmd::Line(l) => writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-width="{}" stroke-linecap="{}"{}/>"#,
                l.from.x,
                l.from.y,
                l.to.x,
                l.to.y,
                paint_attr("stroke", l.color),
                l.width,
                linecap(l.cap),
                rendering(l.anti_alias),
            ),
            DrawCmd::Circle(c) => writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" {}{}/>"#,
                c.center.x,
                c.center.y,
                c.radius,
                paint_attr("fill", c.color),
                rendering(c.anti_alias),
            ),
            DrawCmd::Text(t) => writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" font-weight="{}" text-anchor="{}" {}>{}</text>"#,
                t.anchor.x,
                t.anchor.y,
                t.size,
                if t.bold { "bold" } else { "normal" },
                text_anchor(t.align),
                paint_attr("fill", t.color),
                escape(&t.text),
            ),
        };
    }

    out.push_str("</svg>\n");
    out
}

fn paint_attr(attr: &str, color: Color) -> String {
    let [r, g, b, a] = color.to_srgb_u8();
    if a == u8::MAX {
        format!(r##"{attr}="#{r:02x}{g:02x}{b:02x}""##)
    } else {
        format!(
            r##"{attr}="#{r:02x}{g:02x}{b:02x}" {attr}-opacity="{:.3}""##,
            f32::from(a) / 255.0
        )
    }
}

fn linecap(cap: StrokeCap) -> &'static str {
    match cap {
        StrokeCap::Butt => "butt",
        StrokeCap::Round => "round",
        StrokeCap::Square => "square",
    }
}

fn rendering(anti_alias: bool) -> &'static str {
    if anti_alias { "" } else { r#" shape-rendering="crispEdges""# }
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Overwrites one SVG file with each new frame.
pub struct FrameWriter {
    svg_path: PathBuf,
    bitmap_path: PathBuf,
    bitmap_href: String,
    written_bitmap: Option<Arc<RgbaImage>>,
}

impl FrameWriter {
    pub fn new(svg_path: impl Into<PathBuf>) -> Self {
        let svg_path = svg_path.into();
        let bitmap_path = svg_path.with_extension("background.png");
        let bitmap_href = bitmap_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            svg_path,
            bitmap_path,
            bitmap_href,
            written_bitmap: None,
        }
    }

    pub fn write(&mut self, list: &mut DrawList, width: f32, height: f32) -> Result<()> {
        let bitmap = list.items().iter().find_map(|item| match &item.cmd {
            DrawCmd::Image(img) => Some(Arc::clone(&img.image)),
            _ => None,
        });
        if let Some(bitmap) = bitmap {
            let fresh = self
                .written_bitmap
                .as_ref()
                .is_none_or(|prev| !Arc::ptr_eq(prev, &bitmap));
            if fresh {
                bitmap
                    .save(&self.bitmap_path)
                    .with_context(|| format!("failed to write {}", self.bitmap_path.display()))?;
                debug!("background bitmap written to {}", self.bitmap_path.display());
                self.written_bitmap = Some(bitmap);
            }
        }

        let svg = render_svg(list, width, height, &self.bitmap_href);
        fs::write(&self.svg_path, svg)
            .with_context(|| format!("failed to write {}", self.svg_path.display()))
    }
}
