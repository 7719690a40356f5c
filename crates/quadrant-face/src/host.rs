//! Outbound contract: what a face needs from the platform hosting it.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Opaque handle for one scheduled wake-up, issued by the host.
///
/// The face keeps the token of its single pending wake-up and drops any
/// delivery carrying a different one, so a wake-up that raced a cancellation
/// is harmless.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WakeupToken(pub u64);

/// How far a notification card may cover the face when it peeks in.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPeek {
    /// A single line of the card.
    #[default]
    Short,
    /// As much of the card as the system sees fit.
    Variable,
}

/// Whether a peeking card gets an opaque background.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBackground {
    /// Only for interruptive notifications.
    #[default]
    Interruptive,
    /// For every card.
    Persistent,
}

/// Where the system draws an indicator over the face.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorPlacement {
    #[default]
    TopCenter,
    TopLeft,
    TopRight,
    Center,
    BottomCenter,
}

/// System UI preferences a face declares once, when it is created.
///
/// The defaults keep the dial clear: short peeking cards, status icons and
/// the hotword hint at the top, no system clock drawn over the hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceStyle {
    pub card_peek: CardPeek,
    pub card_background: CardBackground,
    pub status_bar: IndicatorPlacement,
    pub hotword_indicator: IndicatorPlacement,
    pub show_system_time: bool,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            card_peek: CardPeek::Short,
            card_background: CardBackground::Interruptive,
            status_bar: IndicatorPlacement::TopCenter,
            hotword_indicator: IndicatorPlacement::TopCenter,
            show_system_time: false,
        }
    }
}

/// Services a host platform provides to a face.
///
/// Every method is called from the host's single event queue; implementations
/// never see concurrent calls from the face.
pub trait Host {
    /// Applies the face's system UI preferences. Called once from create.
    fn set_face_style(&mut self, style: &FaceStyle);

    /// Asks the host to call `on_draw` soon. Repeated requests before the
    /// draw happens may be coalesced.
    fn request_redraw(&mut self);

    /// Posts a deferred `on_wakeup(token)` onto the event queue after `delay`.
    fn schedule_wakeup(&mut self, delay: Duration) -> WakeupToken;

    /// Withdraws a wake-up. Unknown or already-delivered tokens are a no-op.
    fn cancel_wakeup(&mut self, token: WakeupToken);

    /// Current wall-clock time in the device's time zone.
    fn read_wall_clock(&self) -> DateTime<FixedOffset>;

    /// Starts delivering `on_time_zone_changed`.
    fn subscribe_time_zone_changes(&mut self);

    /// Stops delivering `on_time_zone_changed`.
    fn unsubscribe_time_zone_changes(&mut self);
}
