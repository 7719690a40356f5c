//! Once-per-second redraw timer.
//!
//! While the face is visible and interactive the scheduler keeps exactly one
//! wake-up pending with the host, each landing on the next wall-clock second
//! boundary. Aligning to the boundary (instead of adding a fixed second to the
//! last fire) keeps the second hand from drifting against the real clock.

use std::time::Duration;

use log::trace;

use crate::host::{Host, WakeupToken};

/// Redraw period while interactive.
pub const INTERACTIVE_UPDATE_RATE: Duration = Duration::from_secs(1);

/// Whether the ticking timer should run for this visibility/mode pair.
#[inline]
pub fn should_run(visible: bool, ambient: bool) -> bool {
    visible && !ambient
}

/// Delay from `now_ms` (Unix epoch millis) to the next second boundary.
///
/// Exactly on a boundary the answer is a full period, never zero.
pub fn delay_to_next_tick(now_ms: i64) -> Duration {
    let rate = INTERACTIVE_UPDATE_RATE.as_millis() as i64;
    let into_period = now_ms.rem_euclid(rate);
    Duration::from_millis((rate - into_period) as u64)
}

/// What happened to a delivered wake-up.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WakeupOutcome {
    /// Matched the pending token: a redraw was requested.
    Fired,
    /// Not the pending token (cancelled or superseded); ignored.
    Stale,
}

/// Holds the zero-or-one pending wake-up.
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<WakeupToken>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pending(&self) -> Option<WakeupToken> {
        self.pending
    }

    /// Cancels the pending wake-up, if any.
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.pending.take() {
            trace!("cancel wakeup {token:?}");
            host.cancel_wakeup(token);
        }
    }

    /// Drops whatever is pending and, when `running`, redraws right away and
    /// arms the next boundary-aligned wake-up.
    pub fn reschedule<H: Host + ?Sized>(&mut self, host: &mut H, running: bool) {
        self.cancel(host);
        if running {
            host.request_redraw();
            self.arm(host);
        }
    }

    /// Handles a wake-up delivered by the host.
    pub fn on_wakeup<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        token: WakeupToken,
        running: bool,
    ) -> WakeupOutcome {
        if self.pending != Some(token) {
            trace!("ignoring stale wakeup {token:?} (pending {:?})", self.pending);
            return WakeupOutcome::Stale;
        }

        self.pending = None;
        host.request_redraw();
        if running {
            self.arm(host);
        }
        WakeupOutcome::Fired
    }

    fn arm<H: Host + ?Sized>(&mut self, host: &mut H) {
        debug_assert!(self.pending.is_none(), "arming over a pending wakeup");

        let now_ms = host.read_wall_clock().timestamp_millis();
        let delay = delay_to_next_tick(now_ms);
        let token = host.schedule_wakeup(delay);
        trace!("armed wakeup {token:?} in {}ms", delay.as_millis());
        self.pending = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;

    // ── pure helpers ──────────────────────────────────────────────────────

    #[test]
    fn should_run_truth_table() {
        assert!(should_run(true, false));
        assert!(!should_run(true, true));
        assert!(!should_run(false, false));
        assert!(!should_run(false, true));
    }

    #[test]
    fn delay_mid_second() {
        assert_eq!(delay_to_next_tick(1500), Duration::from_millis(500));
    }

    #[test]
    fn delay_on_boundary_is_full_period() {
        assert_eq!(delay_to_next_tick(2000), Duration::from_millis(1000));
        assert_eq!(delay_to_next_tick(0), Duration::from_millis(1000));
    }

    #[test]
    fn delay_just_before_boundary() {
        assert_eq!(delay_to_next_tick(2999), Duration::from_millis(1));
    }

    #[test]
    fn delay_before_epoch() {
        assert_eq!(delay_to_next_tick(-250), Duration::from_millis(250));
    }

    // ── scheduling ────────────────────────────────────────────────────────

    #[test]
    fn reschedule_running_redraws_and_arms_aligned() {
        let mut host = MockHost::at_epoch_millis(1_700_000_000_250);
        let mut sched = TickScheduler::new();

        sched.reschedule(&mut host, true);

        assert_eq!(host.redraws, 1);
        assert_eq!(host.pending_delays(), vec![Duration::from_millis(750)]);
        assert!(sched.pending().is_some());
    }

    #[test]
    fn reschedule_stopped_only_cancels() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.reschedule(&mut host, true);
        let armed = sched.pending().unwrap();

        sched.reschedule(&mut host, false);

        assert_eq!(sched.pending(), None);
        assert!(host.pending_delays().is_empty());
        assert_eq!(host.cancelled, vec![armed]);
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn repeated_reschedule_keeps_one_pending() {
        let mut host = MockHost::at_epoch_millis(10);
        let mut sched = TickScheduler::new();
        for _ in 0..5 {
            sched.reschedule(&mut host, true);
            assert_eq!(host.pending_delays().len(), 1);
        }
    }

    #[test]
    fn wakeup_rearms_while_running() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.reschedule(&mut host, true);

        host.advance_millis(1000);
        let token = host.deliver_pending().unwrap();
        assert_eq!(sched.on_wakeup(&mut host, token, true), WakeupOutcome::Fired);

        assert_eq!(host.redraws, 2);
        assert_eq!(host.pending_delays(), vec![Duration::from_millis(1000)]);
    }

    #[test]
    fn late_wakeup_realigns_to_boundary() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.reschedule(&mut host, true);

        // Delivered 130ms late: the next one still lands on the boundary.
        host.advance_millis(1130);
        let token = host.deliver_pending().unwrap();
        sched.on_wakeup(&mut host, token, true);

        assert_eq!(host.pending_delays(), vec![Duration::from_millis(870)]);
    }

    #[test]
    fn wakeup_after_stop_redraws_without_rearming() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.reschedule(&mut host, true);

        let token = host.deliver_pending().unwrap();
        assert_eq!(sched.on_wakeup(&mut host, token, false), WakeupOutcome::Fired);
        assert_eq!(sched.pending(), None);
        assert!(host.pending_delays().is_empty());
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.reschedule(&mut host, true);
        let first = sched.pending().unwrap();
        sched.reschedule(&mut host, true);

        let redraws = host.redraws;
        assert_eq!(sched.on_wakeup(&mut host, first, true), WakeupOutcome::Stale);
        assert_eq!(host.redraws, redraws);
        assert_ne!(sched.pending(), Some(first));
    }

    #[test]
    fn cancel_without_pending_is_noop() {
        let mut host = MockHost::at_epoch_millis(0);
        let mut sched = TickScheduler::new();
        sched.cancel(&mut host);
        assert!(host.cancelled.is_empty());
    }
}
