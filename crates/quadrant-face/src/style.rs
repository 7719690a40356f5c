//! Cached drawing styles.
//!
//! The set is built once from the theme and never mutated. The one per-mode
//! change a face needs (dropping anti-aliasing on hands for low-fidelity
//! ambient displays) is applied at lookup time through [`StyleSet::resolve`].

use quadrant_engine::paint::Pen;
use quadrant_engine::scene::StrokeCap;

use crate::error::FaceError;
use crate::theme::{keys, ThemeResources};

/// Numeral size in pixels.
pub const NUMERAL_TEXT_SIZE: f32 = 22.0;

/// Names the six styles of a face.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StyleRole {
    Background,
    SideTick,
    MainTick,
    HourHand,
    MinuteHand,
    SecondHand,
}

impl StyleRole {
    pub const ALL: [StyleRole; 6] = [
        StyleRole::Background,
        StyleRole::SideTick,
        StyleRole::MainTick,
        StyleRole::HourHand,
        StyleRole::MinuteHand,
        StyleRole::SecondHand,
    ];

    /// Hand styles are the ones affected by the low-fidelity ambient override.
    #[inline]
    pub fn is_hand(self) -> bool {
        matches!(self, StyleRole::HourHand | StyleRole::MinuteHand | StyleRole::SecondHand)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleSet {
    background: Pen,
    side_tick: Pen,
    main_tick: Pen,
    hour_hand: Pen,
    minute_hand: Pen,
    second_hand: Pen,
}

impl StyleSet {
    /// Resolves every style from `theme`. The first missing or invalid
    /// resource aborts with its key.
    pub fn from_theme(theme: &dyn ThemeResources) -> Result<Self, FaceError> {
        let background = Pen::solid(theme.color(keys::BACKGROUND)?)
            .with_stroke_width(0.0)
            .with_anti_alias(false);

        // Tick pens double as the numeral text style.
        let main_tick = Pen::solid(theme.color(keys::MAIN_TICKS)?)
            .with_stroke_width(theme.dimension(keys::TICK_STROKE)?)
            .with_cap(StrokeCap::Butt)
            .with_text(NUMERAL_TEXT_SIZE, true);
        let side_tick = main_tick.with_color(theme.color(keys::SIDE_TICKS)?);

        let minute_hand = Pen::solid(theme.color(keys::ANALOG_HANDS)?)
            .with_stroke_width(theme.dimension(keys::MIN_HAND_STROKE)?)
            .with_cap(StrokeCap::Butt);
        let hour_hand = minute_hand.with_stroke_width(theme.dimension(keys::HOUR_HAND_STROKE)?);

        let second_hand = Pen::solid(theme.color(keys::SEC_HAND)?)
            .with_stroke_width(theme.dimension(keys::SEC_HAND_STROKE)?)
            .with_cap(StrokeCap::Butt);

        Ok(Self {
            background,
            side_tick,
            main_tick,
            hour_hand,
            minute_hand,
            second_hand,
        })
    }

    /// The style exactly as built from the theme.
    pub fn get(&self, role: StyleRole) -> &Pen {
        match role {
            StyleRole::Background => &self.background,
            StyleRole::SideTick => &self.side_tick,
            StyleRole::MainTick => &self.main_tick,
            StyleRole::HourHand => &self.hour_hand,
            StyleRole::MinuteHand => &self.minute_hand,
            StyleRole::SecondHand => &self.second_hand,
        }
    }

    /// The style to paint with this frame. `hands_aliased` forces
    /// anti-aliasing off on hand styles and leaves the rest untouched.
    pub fn resolve(&self, role: StyleRole, hands_aliased: bool) -> Pen {
        let pen = *self.get(role);
        if hands_aliased && role.is_hand() {
            pen.with_anti_alias(false)
        } else {
            pen
        }
    }
}
