//! Test doubles shared by the face's unit tests.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::host::{FaceStyle, Host, WakeupToken};

/// Records every outbound call and enforces the host-side invariants a real
/// platform would rely on: one pending wake-up at most, balanced time-zone
/// subscriptions.
#[derive(Debug)]
pub(crate) struct MockHost {
    now: DateTime<FixedOffset>,
    pending: Vec<(WakeupToken, Duration)>,
    next_token: u64,

    pub redraws: usize,
    pub cancelled: Vec<WakeupToken>,
    pub tz_subscribed: bool,
    pub tz_subscribe_calls: usize,
    pub face_style: Option<FaceStyle>,
}

impl MockHost {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            pending: Vec::new(),
            next_token: 1,
            redraws: 0,
            cancelled: Vec::new(),
            tz_subscribed: false,
            tz_subscribe_calls: 0,
            face_style: None,
        }
    }

    pub fn at_epoch_millis(ms: i64) -> Self {
        let utc = FixedOffset::east_opt(0).unwrap();
        Self::at(utc.timestamp_millis_opt(ms).unwrap())
    }

    pub fn set_now(&mut self, now: DateTime<FixedOffset>) {
        self.now = now;
    }

    pub fn advance_millis(&mut self, ms: i64) {
        self.now += chrono::Duration::milliseconds(ms);
    }

    pub fn pending_delays(&self) -> Vec<Duration> {
        self.pending.iter().map(|&(_, d)| d).collect()
    }

    /// Hands the pending wake-up back as if its delay elapsed.
    pub fn deliver_pending(&mut self) -> Option<WakeupToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0).0)
        }
    }
}

impl Host for MockHost {
    fn set_face_style(&mut self, style: &FaceStyle) {
        assert!(self.face_style.is_none(), "face style declared twice");
        self.face_style = Some(*style);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn schedule_wakeup(&mut self, delay: Duration) -> WakeupToken {
        assert!(
            self.pending.is_empty(),
            "wakeup scheduled while {:?} is still pending",
            self.pending
        );
        let token = WakeupToken(self.next_token);
        self.next_token += 1;
        self.pending.push((token, delay));
        token
    }

    fn cancel_wakeup(&mut self, token: WakeupToken) {
        self.pending.retain(|&(t, _)| t != token);
        self.cancelled.push(token);
    }

    fn read_wall_clock(&self) -> DateTime<FixedOffset> {
        self.now
    }

    fn subscribe_time_zone_changes(&mut self) {
        assert!(!self.tz_subscribed, "time zone receiver registered twice");
        self.tz_subscribed = true;
        self.tz_subscribe_calls += 1;
    }

    fn unsubscribe_time_zone_changes(&mut self) {
        assert!(self.tz_subscribed, "time zone receiver released while not registered");
        self.tz_subscribed = false;
    }
}
