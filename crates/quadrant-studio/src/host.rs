//! `Host` implementation backed by a tokio event queue.
//!
//! Everything the face asks for turns into a [`HostMessage`] on one unbounded
//! channel, which the studio loop drains in order. Wake-ups are sleeper tasks;
//! cancelling one aborts its task.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Offset};
use log::{debug, info, trace};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use quadrant_face::{FaceStyle, Host, WakeupToken};

use crate::config::ScriptEvent;

/// Messages serialized onto the studio's single event queue.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostMessage {
    Redraw,
    Wakeup(WakeupToken),
    Script(ScriptEvent),
}

/// Where the host reads the time from.
#[derive(Debug, Copy, Clone)]
pub enum WallClock {
    /// The machine's local time zone.
    Local,
    /// The system clock shown in a fixed UTC offset.
    Fixed(FixedOffset),
}

impl WallClock {
    pub fn now(self) -> DateTime<FixedOffset> {
        match self {
            WallClock::Local => Local::now().fixed_offset(),
            WallClock::Fixed(offset) => chrono::Utc::now().with_timezone(&offset),
        }
    }
}

pub struct StudioHost {
    queue: UnboundedSender<HostMessage>,
    clock: WallClock,

    sleepers: HashMap<WakeupToken, JoinHandle<()>>,
    next_token: u64,

    redraw_queued: bool,
    redraw_requests: u64,

    tz_subscribed: bool,
    last_offset: Option<FixedOffset>,
}

impl StudioHost {
    pub fn new(queue: UnboundedSender<HostMessage>, clock: WallClock) -> Self {
        Self {
            queue,
            clock,
            sleepers: HashMap::new(),
            next_token: 1,
            redraw_queued: false,
            redraw_requests: 0,
            tz_subscribed: false,
            last_offset: None,
        }
    }

    /// Clears the coalescing flag. Returns whether a redraw was queued.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_queued)
    }

    /// Total redraw requests, including coalesced ones.
    #[inline]
    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }

    /// Wake-ups scheduled and neither delivered nor cancelled.
    pub fn live_wakeups(&self) -> usize {
        self.sleepers.values().filter(|h| !h.is_finished()).count()
    }

    /// Forgets a delivered wake-up's task.
    pub fn wakeup_delivered(&mut self, token: WakeupToken) {
        self.sleepers.remove(&token);
    }

    pub fn set_clock(&mut self, clock: WallClock) {
        self.clock = clock;
    }

    /// Samples the UTC offset. Returns `true` when it moved since the last
    /// sample and a subscription is active.
    pub fn poll_time_zone(&mut self) -> bool {
        if !self.tz_subscribed {
            return false;
        }
        let offset = self.clock.now().offset().fix();
        let changed = self.last_offset.is_some_and(|prev| prev != offset);
        if changed {
            debug!("utc offset moved to {offset}");
        }
        self.last_offset = Some(offset);
        changed
    }

    /// Aborts every outstanding wake-up task.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.sleepers.drain() {
            handle.abort();
        }
    }
}

impl Host for StudioHost {
    fn set_face_style(&mut self, style: &FaceStyle) {
        info!(
            "face style: peek {:?}, background {:?}, status bar {:?}, hotword {:?}, system time {}",
            style.card_peek,
            style.card_background,
            style.status_bar,
            style.hotword_indicator,
            style.show_system_time
        );
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
        if !self.redraw_queued {
            self.redraw_queued = true;
            // A closed queue means the loop is gone; nothing left to draw.
            let _ = self.queue.send(HostMessage::Redraw);
        }
    }

    fn schedule_wakeup(&mut self, delay: Duration) -> WakeupToken {
        self.sleepers.retain(|_, h| !h.is_finished());

        let token = WakeupToken(self.next_token);
        self.next_token += 1;

        let queue = self.queue.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = queue.send(HostMessage::Wakeup(token));
        });
        self.sleepers.insert(token, handle);
        trace!("wakeup {token:?} scheduled in {delay:?}");
        token
    }

    fn cancel_wakeup(&mut self, token: WakeupToken) {
        if let Some(handle) = self.sleepers.remove(&token) {
            handle.abort();
            trace!("wakeup {token:?} cancelled");
        }
    }

    fn read_wall_clock(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    fn subscribe_time_zone_changes(&mut self) {
        self.tz_subscribed = true;
        self.last_offset = Some(self.clock.now().offset().fix());
    }

    fn unsubscribe_time_zone_changes(&mut self) {
        self.tz_subscribed = false;
        self.last_offset = None;
    }
}

impl Drop for StudioHost {
    fn drop(&mut self) {
        self.shutdown();
    }
}
