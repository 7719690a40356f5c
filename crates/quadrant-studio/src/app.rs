//! The studio event loop.
//!
//! One task owns the face and drains the host queue, so face callbacks are
//! never concurrent. Minute ticks, Ctrl+C and the run deadline are selected
//! alongside the queue.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Timelike};
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use quadrant_engine::coords::Rect;
use quadrant_engine::scene::DrawList;
use quadrant_engine::Canvas;
use quadrant_face::prelude::*;

use crate::config::{fixed_offset, ScriptAction, ScriptEvent, StudioConfig};
use crate::host::{HostMessage, StudioHost, WallClock};
use crate::svg::FrameWriter;

const MINUTE: Duration = Duration::from_secs(60);

/// Time until the next whole wall-clock minute. A full minute on a boundary.
pub fn delay_to_next_minute(now: DateTime<FixedOffset>) -> Duration {
    let into = Duration::from_secs(u64::from(now.second()))
        + Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    MINUTE - into
}

/// Counters reported when the studio shuts down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub redraw_requests: u64,
    pub wakeups: u64,
}

pub struct Studio {
    face: AnalogFace<StudioHost>,
    queue: UnboundedReceiver<HostMessage>,
    sender: UnboundedSender<HostMessage>,
    bounds: Rect,
    draw_list: DrawList,
    writer: Option<FrameWriter>,
    stats: RunStats,
}

impl Studio {
    /// Creates the face and brings it to the visible, interactive state.
    pub fn start(config: &StudioConfig) -> Result<Self> {
        let theme = ThemeTable::from_spec(&config.theme).context("invalid theme")?;
        let (sender, queue) = mpsc::unbounded_channel();

        let host = StudioHost::new(sender.clone(), config.wall_clock()?);
        let options = FaceOptions {
            background: config.background,
            style: config.face_style,
        };
        let mut face = AnalogFace::with_options(host, options);
        face.on_create(&theme).context("failed to create the watch face")?;
        face.on_properties_reported(DeviceProperties {
            low_fidelity_ambient: config.low_fidelity_ambient,
        });

        let surface = config.surface;
        face.on_surface_resized(surface.width, surface.height);
        face.on_visibility_changed(true);

        Ok(Self {
            face,
            queue,
            sender,
            bounds: Rect::from_size(surface.width as f32, surface.height as f32),
            draw_list: DrawList::new(),
            writer: config.svg_output.clone().map(FrameWriter::new),
            stats: RunStats::default(),
        })
    }

    /// Posts every scripted event onto the queue at its offset.
    pub fn spawn_script(&self, script: &[ScriptEvent]) {
        for &step in script {
            let sender = self.sender.clone();
            tokio::spawn(async move {
                tokio::time::sleep(step.delay()).await;
                let _ = sender.send(HostMessage::Script(step));
            });
        }
    }

    /// Runs until Ctrl+C or `run_for` elapses, then destroys the face.
    pub async fn run(mut self, run_for: Option<Duration>) -> Result<RunStats> {
        let deadline = async {
            match run_for {
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let first = delay_to_next_minute(self.face.host().read_wall_clock());
        let mut minute = interval_at(Instant::now() + first, MINUTE);
        minute.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    info!("run time elapsed");
                    break;
                }
                res = &mut ctrl_c => {
                    res.context("failed to listen for Ctrl+C")?;
                    info!("interrupted");
                    break;
                }
                _ = minute.tick() => self.minute_tick(),
                Some(msg) = self.queue.recv() => self.dispatch(msg)?,
            }
        }

        Ok(self.shutdown())
    }

    /// Handles one queued message.
    pub fn dispatch(&mut self, msg: HostMessage) -> Result<()> {
        match msg {
            HostMessage::Redraw => self.redraw()?,
            HostMessage::Wakeup(token) => {
                self.stats.wakeups += 1;
                self.face.host_mut().wakeup_delivered(token);
                self.face.on_wakeup(token);
            }
            HostMessage::Script(step) => self.apply_script(step)?,
        }
        Ok(())
    }

    fn minute_tick(&mut self) {
        self.face.on_time_tick();
        if self.face.host_mut().poll_time_zone() {
            self.face.on_time_zone_changed();
        }
    }

    fn apply_script(&mut self, step: ScriptEvent) -> Result<()> {
        info!("script: {:?} at {}s", step.event, step.at_secs);
        match step.event {
            ScriptAction::Hide => self.face.on_visibility_changed(false),
            ScriptAction::Show => self.face.on_visibility_changed(true),
            ScriptAction::Ambient => self.face.on_ambient_mode_changed(true),
            ScriptAction::Interactive => self.face.on_ambient_mode_changed(false),
            ScriptAction::TimeZone => {
                let Some(secs) = step.utc_offset_secs else {
                    warn!("time_zone script event without an offset; ignored");
                    return Ok(());
                };
                let host = self.face.host_mut();
                host.set_clock(WallClock::Fixed(fixed_offset(secs)?));
                if host.poll_time_zone() {
                    self.face.on_time_zone_changed();
                }
            }
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        if !self.face.host_mut().take_redraw() {
            return Ok(());
        }

        self.draw_list.clear();
        let drawn = self
            .face
            .on_draw(&mut Canvas::new(&mut self.draw_list), self.bounds);
        if !drawn {
            return Ok(());
        }
        self.stats.frames += 1;

        if let Some(snapshot) = self.face.state().snapshot {
            debug!(
                "frame {}: {:02}:{:02}:{:02} ({} commands, {:?})",
                self.stats.frames,
                snapshot.hour12,
                snapshot.minute,
                snapshot.second,
                self.draw_list.len(),
                self.face.state().mode,
            );
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.write(&mut self.draw_list, self.bounds.width(), self.bounds.height())?;
        }
        Ok(())
    }

    fn shutdown(mut self) -> RunStats {
        self.face.on_destroy();
        let host = self.face.host_mut();
        self.stats.redraw_requests = host.redraw_requests();
        debug!("{} wakeup task(s) still live at shutdown", host.live_wakeups());
        host.shutdown();
        self.stats
    }
}
