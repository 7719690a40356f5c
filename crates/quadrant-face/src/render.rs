//! The per-frame draw routine.
//!
//! `draw_face` is pure: it reads the frame inputs and records commands into a
//! canvas. Reading the clock and deciding *when* to draw belong to the face.
//!
//! All radii below are offsets from the dial radius, which is half the
//! surface width. The main ticks and the second hand intentionally reach past
//! the dial edge and get clipped by the display.

use std::sync::Arc;

use image::RgbaImage;
use quadrant_engine::coords::{Rect, Vec2};
use quadrant_engine::paint::{Color, Pen};
use quadrant_engine::scene::TextAlign;
use quadrant_engine::Canvas;

use crate::clock::{dial_point, tick_angle, ClockSnapshot};
use crate::style::{StyleRole, StyleSet};

/// Inner/outer radius offsets of the four quarter ticks.
pub const MAIN_TICK_SPAN: (f32, f32) = (-7.0, 70.0);
/// Inner/outer radius offsets of the eight five-minute ticks.
pub const SIDE_TICK_SPAN: (f32, f32) = (19.0, 30.0);

pub const MINUTE_HAND_OFFSET: f32 = -25.0;
pub const HOUR_HAND_OFFSET: f32 = -50.0;
pub const SECOND_HAND_OFFSET: f32 = 30.0;

pub const HUB_RADIUS: f32 = 8.0;
pub const SECOND_HUB_RADIUS: f32 = 5.0;
pub const CAP_RADIUS: f32 = 2.0;

/// Numerals and their baseline anchors relative to the center.
pub const NUMERALS: [(&str, f32, f32); 4] = [
    ("12", 0.0, -132.0),
    ("3", 142.0, 8.0),
    ("6", 0.0, 145.0),
    ("9", -142.0, 8.0),
];

/// Everything one frame depends on.
#[derive(Debug, Clone)]
pub struct FaceFrame<'a> {
    pub styles: &'a StyleSet,
    pub snapshot: ClockSnapshot,
    pub ambient: bool,
    /// Low-fidelity ambient override: hands drawn without anti-aliasing.
    pub hands_aliased: bool,
    /// Pre-scaled background bitmap; painted only in interactive mode.
    pub background: Option<Arc<RgbaImage>>,
}

pub fn draw_face(canvas: &mut Canvas<'_>, bounds: Rect, frame: &FaceFrame<'_>) {
    let styles = frame.styles;
    let pen = |role| styles.resolve(role, frame.hands_aliased);

    // Background.
    match (&frame.background, frame.ambient) {
        (Some(bitmap), false) => canvas.draw_bitmap(bounds, Arc::clone(bitmap)),
        _ => canvas.draw_color(bounds, Color::BLACK),
    }

    // Centered on the whole surface, insets ignored.
    let center = Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0);
    let radius = center.x;

    let main_tick = pen(StyleRole::MainTick);
    for i in (0..60).step_by(15) {
        draw_tick(canvas, center, radius, i, MAIN_TICK_SPAN, &main_tick);
    }

    let side_tick = pen(StyleRole::SideTick);
    for i in (0..60).step_by(5).filter(|i| i % 15 != 0) {
        draw_tick(canvas, center, radius, i, SIDE_TICK_SPAN, &side_tick);
    }

    for (label, dx, dy) in NUMERALS {
        canvas.draw_text(label, center + Vec2::new(dx, dy), TextAlign::Center, &main_tick);
    }

    let angles = frame.snapshot.hand_angles();

    let minute_hand = pen(StyleRole::MinuteHand);
    let hour_hand = pen(StyleRole::HourHand);
    canvas.draw_line(
        center,
        dial_point(center, angles.minutes, radius + MINUTE_HAND_OFFSET),
        &minute_hand,
    );
    canvas.draw_line(
        center,
        dial_point(center, angles.hours, radius + HOUR_HAND_OFFSET),
        &hour_hand,
    );

    canvas.draw_circle(center, HUB_RADIUS, &hour_hand);

    if frame.ambient {
        // Paint over the second hub so ambient shows no trace of it.
        canvas.draw_circle(center, SECOND_HUB_RADIUS, &pen(StyleRole::Background));
    } else {
        let second_hand = pen(StyleRole::SecondHand);
        canvas.draw_circle(center, SECOND_HUB_RADIUS, &second_hand);
        canvas.draw_line(
            center,
            dial_point(center, angles.seconds, radius + SECOND_HAND_OFFSET),
            &second_hand,
        );
    }

    canvas.draw_circle(center, CAP_RADIUS, &hour_hand);
}

fn draw_tick(
    canvas: &mut Canvas<'_>,
    center: Vec2,
    radius: f32,
    index: u32,
    (inner, outer): (f32, f32),
    pen: &Pen,
) {
    let angle = tick_angle(index);
    canvas.draw_line(
        dial_point(center, angle, radius + inner),
        dial_point(center, angle, radius + outer),
        pen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use quadrant_engine::scene::{DrawCmd, DrawList, LineCmd};

    use crate::theme::ThemeTable;

    const BOUNDS: Rect = Rect::from_size(320.0, 320.0);

    fn styles() -> StyleSet {
        StyleSet::from_theme(&ThemeTable::standard()).unwrap()
    }

    fn snapshot(h: u32, m: u32, s: u32) -> ClockSnapshot {
        let dt = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 3, h, m, s)
            .unwrap();
        ClockSnapshot::from_datetime(&dt)
    }

    fn record(frame: &FaceFrame<'_>) -> DrawList {
        let mut list = DrawList::new();
        draw_face(&mut Canvas::new(&mut list), BOUNDS, frame);
        list
    }

    fn lines(list: &DrawList) -> Vec<&LineCmd> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Line(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    fn second_hand_lines<'l>(list: &'l DrawList, styles: &StyleSet) -> Vec<&'l LineCmd> {
        let sec = styles.get(StyleRole::SecondHand);
        lines(list)
            .into_iter()
            .filter(|l| l.color == sec.color && l.width == sec.stroke_width)
            .collect()
    }

    fn frame(styles: &StyleSet, ambient: bool) -> FaceFrame<'_> {
        FaceFrame {
            styles,
            snapshot: snapshot(10, 10, 30),
            ambient,
            hands_aliased: false,
            background: None,
        }
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn interactive_frame_has_every_element() {
        let s = styles();
        let list = record(&frame(&s, false));

        let kinds: Vec<_> = list.items().iter().map(|i| i.cmd.kind()).collect();
        let count = |k| kinds.iter().filter(|&&x| x == k).count();
        assert_eq!(kinds[0], "fill");
        assert_eq!(count("line"), 4 + 8 + 3);
        assert_eq!(count("text"), 4);
        assert_eq!(count("circle"), 3);
        assert_eq!(second_hand_lines(&list, &s).len(), 1);
    }

    #[test]
    fn ambient_frame_never_draws_second_hand() {
        let s = styles();
        for sec in [0, 1, 29, 59] {
            let mut f = frame(&s, true);
            f.snapshot = snapshot(3, 0, sec);
            let list = record(&f);
            assert!(second_hand_lines(&list, &s).is_empty());
            assert_eq!(lines(&list).len(), 4 + 8 + 2);
        }
    }

    #[test]
    fn ambient_second_hub_uses_background_color() {
        let s = styles();
        let list = record(&frame(&s, true));
        let hub = list
            .items()
            .iter()
            .find_map(|i| match &i.cmd {
                DrawCmd::Circle(c) if c.radius == SECOND_HUB_RADIUS => Some(c.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(hub.color, s.get(StyleRole::Background).color);
    }

    #[test]
    fn cap_is_painted_last() {
        let s = styles();
        for ambient in [false, true] {
            let mut list = record(&frame(&s, ambient));
            let last = list.iter_in_paint_order().last().unwrap().cmd.clone();
            match last {
                DrawCmd::Circle(c) => {
                    assert_eq!(c.radius, CAP_RADIUS);
                    assert_eq!(c.color, s.get(StyleRole::HourHand).color);
                }
                other => panic!("expected the cap circle, got {other:?}"),
            }
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn quarter_ticks_span_dial_offsets() {
        let s = styles();
        let list = record(&frame(&s, false));
        let main = s.get(StyleRole::MainTick);
        let ticks: Vec<_> = lines(&list).into_iter().filter(|l| l.color == main.color).collect();
        assert_eq!(ticks.len(), 4);

        // 12 o'clock tick runs straight up from r-7 to r+70.
        let top = ticks[0];
        assert!((top.from.x - 160.0).abs() < 1e-3);
        assert!((top.from.y - (160.0 - 153.0)).abs() < 1e-3);
        assert!((top.to.y - (160.0 - 230.0)).abs() < 1e-3);
        assert!((top.length() - 77.0).abs() < 1e-3);
    }

    #[test]
    fn side_ticks_skip_quarters() {
        let s = styles();
        let list = record(&frame(&s, false));
        let side = s.get(StyleRole::SideTick);
        let ticks: Vec<_> = lines(&list).into_iter().filter(|l| l.color == side.color).collect();
        assert_eq!(ticks.len(), 8);
        for t in ticks {
            assert!((t.length() - 11.0).abs() < 1e-3);
            // None of them is vertical or horizontal.
            assert!((t.to.x - 160.0).abs() > 1.0 && (t.to.y - 160.0).abs() > 1.0);
        }
    }

    #[test]
    fn hands_point_at_the_time() {
        let s = styles();
        let mut f = frame(&s, false);
        f.snapshot = snapshot(3, 0, 0);
        let list = record(&f);

        let hour = s.get(StyleRole::HourHand);
        let minute = s.get(StyleRole::MinuteHand);
        let find = |w: f32| {
            lines(&list)
                .into_iter()
                .find(|l| l.width == w && l.from == Vec2::new(160.0, 160.0))
                .unwrap()
                .clone()
        };

        // 3:00: hour hand points right, minute hand straight up.
        let h = find(hour.stroke_width);
        assert!((h.to.x - (160.0 + 110.0)).abs() < 1e-3 && (h.to.y - 160.0).abs() < 1e-3);
        let m = find(minute.stroke_width);
        assert!((m.to.x - 160.0).abs() < 1e-3 && (m.to.y - (160.0 - 135.0)).abs() < 1e-3);
    }

    #[test]
    fn center_ignores_origin_and_uses_half_extents() {
        let s = styles();
        let mut list = DrawList::new();
        draw_face(&mut Canvas::new(&mut list), Rect::from_size(320.0, 290.0), &frame(&s, true));
        let cap = list
            .items()
            .iter()
            .rev()
            .find_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => Some(c.center),
                _ => None,
            })
            .unwrap();
        assert_eq!(cap, Vec2::new(160.0, 145.0));
    }

    #[test]
    fn numerals_are_centered_text() {
        let s = styles();
        let list = record(&frame(&s, false));
        let texts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        let labels: Vec<_> = texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["12", "3", "6", "9"]);
        assert!(texts.iter().all(|t| t.align == TextAlign::Center && t.bold));
        assert_eq!(texts[0].anchor, Vec2::new(160.0, 28.0));
    }

    // ── styles ────────────────────────────────────────────────────────────

    #[test]
    fn aliased_hands_keep_ticks_anti_aliased() {
        let s = styles();
        let mut f = frame(&s, true);
        f.hands_aliased = true;
        let list = record(&f);

        let hands = s.get(StyleRole::MinuteHand).color;
        for l in lines(&list) {
            if l.color == hands {
                assert!(!l.anti_alias);
            } else {
                assert!(l.anti_alias);
            }
        }
    }

    #[test]
    fn bitmap_background_only_when_interactive() {
        let s = styles();
        let bmp = Arc::new(RgbaImage::new(320, 320));

        let mut f = frame(&s, false);
        f.background = Some(Arc::clone(&bmp));
        assert_eq!(record(&f).items()[0].cmd.kind(), "image");

        f.ambient = true;
        match &record(&f).items()[0].cmd {
            DrawCmd::Fill(fill) => assert_eq!(fill.color, Color::BLACK),
            other => panic!("expected a black fill, got {other:?}"),
        }
    }
}
