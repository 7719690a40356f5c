//! Wall-clock snapshots and hand geometry.
//!
//! Angles follow the clock-face convention: `0` points at 12 o'clock and
//! grows clockwise, so a point at `angle` and distance `len` from the center
//! sits at `(sin(angle) * len, -cos(angle) * len)` in surface space.

use std::f64::consts::TAU;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Timelike};
use quadrant_engine::coords::Vec2;

/// The time a frame is drawn for, already split into dial units.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClockSnapshot {
    /// `0..=11`; noon and midnight are `0`.
    pub hour12: u32,
    pub minute: u32,
    pub second: u32,
    /// `0..=999`.
    pub millis: u32,
    /// Offset of the zone the reading was taken in.
    pub utc_offset_secs: i32,
    /// Unix epoch milliseconds of the reading.
    pub epoch_millis: i64,
}

impl ClockSnapshot {
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let offset: FixedOffset = dt.offset().fix();
        Self {
            hour12: dt.hour() % 12,
            minute: dt.minute(),
            second: dt.second(),
            // A leap second reports nanos past 1e9; pin it to the last milli.
            millis: (dt.nanosecond() / 1_000_000).min(999),
            utc_offset_secs: offset.local_minus_utc(),
            epoch_millis: dt.timestamp_millis(),
        }
    }

    /// Seconds including the sub-second fraction, `[0, 60)`.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.second as f64 + self.millis as f64 / 1000.0
    }

    /// Minutes including the elapsed seconds, `[0, 60)`.
    #[inline]
    pub fn minutes(&self) -> f64 {
        self.minute as f64 + self.seconds() / 60.0
    }

    /// Hours on a 12-hour dial including the elapsed minutes, `[0, 12)`.
    #[inline]
    pub fn hours(&self) -> f64 {
        self.hour12 as f64 + self.minutes() / 60.0
    }

    pub fn hand_angles(&self) -> HandAngles {
        HandAngles {
            seconds: dial_angle(self.seconds() / 60.0),
            minutes: dial_angle(self.minutes() / 60.0),
            hours: dial_angle(self.hours() / 12.0),
        }
    }
}

/// Hand rotations in radians, each in `[0, 2π)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hours: f32,
    pub minutes: f32,
    pub seconds: f32,
}

/// Converts a fraction of a full turn to radians in `[0, 2π)`.
fn dial_angle(turns: f64) -> f32 {
    let radians = (turns * TAU).rem_euclid(TAU) as f32;
    // Rounding to f32 can land exactly on 2π.
    if radians >= std::f32::consts::TAU { 0.0 } else { radians }
}

/// Angle of tick `index` on a 60-division dial.
#[inline]
pub fn tick_angle(index: u32) -> f32 {
    dial_angle(index as f64 / 60.0)
}

/// Point at `angle` and `length` from `center`, clock-face convention.
#[inline]
pub fn dial_point(center: Vec2, angle: f32, length: f32) -> Vec2 {
    center + Vec2::new(angle.sin() * length, -angle.cos() * length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32, ms: u32) -> ClockSnapshot {
        let dt = FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 3, 3)
                    .unwrap()
                    .and_hms_milli_opt(h, m, s, ms)
                    .unwrap(),
            )
            .unwrap();
        ClockSnapshot::from_datetime(&dt)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── snapshot decomposition ────────────────────────────────────────────

    #[test]
    fn noon_and_midnight_read_zero_hours() {
        assert_eq!(at(0, 0, 0, 0).hour12, 0);
        assert_eq!(at(12, 0, 0, 0).hour12, 0);
        assert_eq!(at(23, 0, 0, 0).hour12, 11);
    }

    #[test]
    fn keeps_offset_and_epoch() {
        let dt = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(1970, 1, 1, 2, 0, 1)
            .unwrap();
        let snap = ClockSnapshot::from_datetime(&dt);
        assert_eq!(snap.utc_offset_secs, 7200);
        assert_eq!(snap.epoch_millis, 1000);
        assert_eq!(snap.hour12, 2);
    }

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn midnight_is_all_zero() {
        let a = at(0, 0, 0, 0).hand_angles();
        assert_eq!(a, HandAngles { hours: 0.0, minutes: 0.0, seconds: 0.0 });
    }

    #[test]
    fn half_past_midnight() {
        let a = at(0, 30, 0, 0).hand_angles();
        assert_eq!(a.minutes, PI);
        // Half an hour is 1/24 of a 12-hour turn: (0 + 30/60) / 12 * 2π.
        assert!(close(a.hours, PI / 12.0));
        assert_eq!(a.seconds, 0.0);
    }

    #[test]
    fn three_o_clock_hour_hand_is_a_quarter_turn() {
        assert!(close(at(3, 0, 0, 0).hand_angles().hours, PI / 2.0));
    }

    #[test]
    fn noon_matches_midnight() {
        assert_eq!(at(12, 0, 0, 0).hand_angles(), at(0, 0, 0, 0).hand_angles());
    }

    #[test]
    fn sub_second_fraction_moves_second_hand() {
        let a = at(0, 0, 15, 500).hand_angles();
        assert!(close(a.seconds, 15.5 / 60.0 * TAU));
    }

    #[test]
    fn angles_stay_in_range_and_advance_over_twelve_hours() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        let mut prev: Option<HandAngles> = None;
        let mut t = start;
        while t < start + Duration::hours(12) {
            let a = ClockSnapshot::from_datetime(&utc.from_local_datetime(&t).unwrap()).hand_angles();
            for v in [a.hours, a.minutes, a.seconds] {
                assert!((0.0..TAU).contains(&v), "{v} out of range at {t}");
            }
            if let Some(p) = prev {
                // Hours never wrap inside the period; the others only move
                // forward modulo a turn.
                assert!(a.hours >= p.hours, "hour hand ran backwards at {t}");
                for (now, before) in [(a.minutes, p.minutes), (a.seconds, p.seconds)] {
                    let step = (now - before).rem_euclid(TAU);
                    assert!(step < PI, "hand jumped backwards at {t}");
                }
            }
            prev = Some(a);
            t += Duration::milliseconds(7_250);
        }
    }

    #[test]
    fn last_millisecond_stays_below_full_turn() {
        let a = at(11, 59, 59, 999).hand_angles();
        assert!(a.hours < TAU && a.minutes < TAU && a.seconds < TAU);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn zero_points_up_and_quarter_points_right() {
        let c = Vec2::new(100.0, 100.0);
        let up = dial_point(c, 0.0, 10.0);
        assert!(close(up.x, 100.0) && close(up.y, 90.0));

        let right = dial_point(c, tick_angle(15), 10.0);
        assert!(close(right.x, 110.0) && close(right.y, 100.0));
    }
}
