//! The analog face engine.
//!
//! `AnalogFace` receives host lifecycle callbacks through [`WatchFace`],
//! keeps the render state, drives the tick scheduler and draws on request.
//! It owns its [`Host`] adapter; every outbound call goes through it.

use quadrant_engine::coords::Rect;
use quadrant_engine::time::FrameClock;
use quadrant_engine::Canvas;

use log::{debug, trace, warn};
use serde::Deserialize;

use crate::background::{BackgroundCache, ResizeOutcome};
use crate::clock::ClockSnapshot;
use crate::error::FaceError;
use crate::host::{FaceStyle, Host, WakeupToken};
use crate::render::{draw_face, FaceFrame};
use crate::scheduler::{should_run, TickScheduler, INTERACTIVE_UPDATE_RATE};
use crate::style::StyleSet;
use crate::theme::{keys, ThemeResources};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DisplayMode {
    #[default]
    Interactive,
    Ambient,
}

/// Display capabilities reported by the host once per surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DeviceProperties {
    /// The ambient display has too few bits for anti-aliased strokes.
    pub low_fidelity_ambient: bool,
}

/// How the interactive background is painted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundFill {
    /// Solid black.
    #[default]
    Flat,
    /// The theme's `background_image`, pre-scaled to the surface. Falls back
    /// to `Flat` when the theme has no image.
    ScaledImage,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceOptions {
    pub background: BackgroundFill,
    /// Declared to the host on create.
    pub style: FaceStyle,
}

/// Mutable per-surface state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    pub mode: DisplayMode,
    pub low_fidelity_ambient: bool,
    pub properties_reported: bool,
    pub visible: bool,
    /// Hands drawn without anti-aliasing (low-fidelity ambient).
    pub hands_aliased: bool,
    /// Last wall-clock reading, refreshed on show, time-zone change and draw.
    pub snapshot: Option<ClockSnapshot>,
}

impl RenderState {
    #[inline]
    pub fn is_ambient(&self) -> bool {
        self.mode == DisplayMode::Ambient
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LifecyclePhase {
    #[default]
    Uncreated,
    Created,
    Destroyed,
}

/// Callbacks a host delivers to a face, all from one event queue.
pub trait WatchFace {
    /// Builds styles from `theme`. A failure leaves the face uncreated.
    fn on_create(&mut self, theme: &dyn ThemeResources) -> Result<(), FaceError>;

    fn on_surface_resized(&mut self, width: i32, height: i32);

    /// Terminal. Cancels the timer and drops subscriptions and bitmaps.
    fn on_destroy(&mut self);

    fn on_properties_reported(&mut self, properties: DeviceProperties);

    fn on_visibility_changed(&mut self, visible: bool);

    fn on_ambient_mode_changed(&mut self, ambient: bool);

    /// Host minute tick.
    fn on_time_tick(&mut self);

    fn on_time_zone_changed(&mut self);

    /// A wake-up scheduled through [`Host::schedule_wakeup`] came due.
    fn on_wakeup(&mut self, token: WakeupToken);

    /// Records one frame into `canvas`. Returns `false` if nothing was drawn.
    fn on_draw(&mut self, canvas: &mut Canvas<'_>, bounds: Rect) -> bool;
}

pub struct AnalogFace<H: Host> {
    host: H,
    options: FaceOptions,
    phase: LifecyclePhase,

    styles: Option<StyleSet>,
    state: RenderState,
    scheduler: TickScheduler,
    background: BackgroundCache,
    tz_subscribed: bool,

    frame_clock: FrameClock,
}

impl<H: Host> AnalogFace<H> {
    pub fn new(host: H) -> Self {
        Self::with_options(host, FaceOptions::default())
    }

    pub fn with_options(host: H, options: FaceOptions) -> Self {
        Self {
            host,
            options,
            phase: LifecyclePhase::Uncreated,
            styles: None,
            state: RenderState::default(),
            scheduler: TickScheduler::new(),
            background: BackgroundCache::default(),
            tz_subscribed: false,
            frame_clock: FrameClock::new(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    #[inline]
    pub fn options(&self) -> FaceOptions {
        self.options
    }

    #[inline]
    pub fn styles(&self) -> Option<&StyleSet> {
        self.styles.as_ref()
    }

    #[inline]
    pub fn background(&self) -> &BackgroundCache {
        &self.background
    }

    #[inline]
    pub fn pending_wakeup(&self) -> Option<WakeupToken> {
        self.scheduler.pending()
    }

    #[inline]
    pub fn is_subscribed_to_time_zone(&self) -> bool {
        self.tz_subscribed
    }

    /// Whether the once-per-second timer should be running right now.
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.phase == LifecyclePhase::Created
            && should_run(self.state.visible, self.state.is_ambient())
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn accepting(&self, callback: &str) -> bool {
        match self.phase {
            LifecyclePhase::Created => true,
            LifecyclePhase::Uncreated => {
                warn!("{callback} before create; ignored");
                false
            }
            LifecyclePhase::Destroyed => {
                warn!("{callback} after destroy; ignored");
                false
            }
        }
    }

    fn update_timer(&mut self) {
        let running = self.is_ticking();
        self.scheduler.reschedule(&mut self.host, running);
    }

    fn refresh_clock(&mut self) {
        let snapshot = ClockSnapshot::from_datetime(&self.host.read_wall_clock());
        if let Some(prev) = self.state.snapshot {
            if prev.utc_offset_secs != snapshot.utc_offset_secs {
                debug!(
                    "utc offset changed: {}s -> {}s",
                    prev.utc_offset_secs, snapshot.utc_offset_secs
                );
            }
        }
        self.state.snapshot = Some(snapshot);
    }

    fn subscribe_time_zone(&mut self) {
        if !self.tz_subscribed {
            self.host.subscribe_time_zone_changes();
            self.tz_subscribed = true;
        }
    }

    fn unsubscribe_time_zone(&mut self) {
        if self.tz_subscribed {
            self.host.unsubscribe_time_zone_changes();
            self.tz_subscribed = false;
        }
    }
}

impl<H: Host> WatchFace for AnalogFace<H> {
    fn on_create(&mut self, theme: &dyn ThemeResources) -> Result<(), FaceError> {
        if self.phase != LifecyclePhase::Uncreated {
            warn!("create while {:?}; ignored", self.phase);
            return Ok(());
        }

        let styles = StyleSet::from_theme(theme)?;
        let source = match self.options.background {
            BackgroundFill::Flat => None,
            BackgroundFill::ScaledImage => match theme.image(keys::BACKGROUND_IMAGE) {
                Ok(image) => Some(image),
                Err(FaceError::MissingResource { .. }) => {
                    warn!("theme has no background image; painting a flat background");
                    None
                }
                Err(e) => return Err(e),
            },
        };

        self.host.set_face_style(&self.options.style);
        self.styles = Some(styles);
        self.background = BackgroundCache::new(source);
        self.state = RenderState::default();
        self.phase = LifecyclePhase::Created;
        debug!("face created ({:?} background)", self.options.background);
        Ok(())
    }

    fn on_surface_resized(&mut self, width: i32, height: i32) {
        if !self.accepting("surface resize") {
            return;
        }
        if self.background.resize(width, height) == ResizeOutcome::Unchanged {
            trace!("surface size unchanged at {width}x{height}");
        }
    }

    fn on_destroy(&mut self) {
        if !self.accepting("destroy") {
            return;
        }
        self.scheduler.cancel(&mut self.host);
        self.unsubscribe_time_zone();
        self.background.release();
        self.styles = None;
        self.state.visible = false;
        self.phase = LifecyclePhase::Destroyed;
        debug!("face destroyed");
    }

    fn on_properties_reported(&mut self, properties: DeviceProperties) {
        if !self.accepting("properties") {
            return;
        }
        if self.state.properties_reported {
            warn!("properties reported again ({properties:?}); keeping the first report");
            return;
        }
        self.state.low_fidelity_ambient = properties.low_fidelity_ambient;
        self.state.properties_reported = true;
        debug!("low-fidelity ambient: {}", properties.low_fidelity_ambient);
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        if !self.accepting("visibility change") {
            return;
        }
        self.state.visible = visible;
        if visible {
            self.subscribe_time_zone();
            self.refresh_clock();
        } else {
            self.unsubscribe_time_zone();
            self.frame_clock.reset();
        }
        debug!("visible: {visible}");
        self.update_timer();
    }

    fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if !self.accepting("ambient change") {
            return;
        }
        let mode = if ambient {
            DisplayMode::Ambient
        } else {
            DisplayMode::Interactive
        };
        if self.state.mode != mode {
            self.state.mode = mode;
            if self.state.low_fidelity_ambient {
                self.state.hands_aliased = ambient;
            }
            debug!("mode: {mode:?} (hands aliased: {})", self.state.hands_aliased);
            self.host.request_redraw();
        }
        self.update_timer();
    }

    fn on_time_tick(&mut self) {
        if !self.accepting("time tick") {
            return;
        }
        trace!("minute tick");
        self.host.request_redraw();
    }

    fn on_time_zone_changed(&mut self) {
        if !self.accepting("time zone change") {
            return;
        }
        if !self.tz_subscribed {
            trace!("time zone change while unsubscribed; ignored");
            return;
        }
        self.refresh_clock();
        self.host.request_redraw();
    }

    fn on_wakeup(&mut self, token: WakeupToken) {
        if !self.accepting("wakeup") {
            return;
        }
        let running = self.is_ticking();
        self.scheduler.on_wakeup(&mut self.host, token, running);
    }

    fn on_draw(&mut self, canvas: &mut Canvas<'_>, bounds: Rect) -> bool {
        if self.phase != LifecyclePhase::Created {
            return false;
        }
        let Some(styles) = self.styles.as_ref() else {
            return false;
        };

        let snapshot = ClockSnapshot::from_datetime(&self.host.read_wall_clock());
        self.state.snapshot = Some(snapshot);

        let background = match self.options.background {
            BackgroundFill::Flat => None,
            BackgroundFill::ScaledImage => self.background.scaled().cloned(),
        };
        let frame = FaceFrame {
            styles,
            snapshot,
            ambient: self.state.is_ambient(),
            hands_aliased: self.state.hands_aliased,
            background,
        };

        let ((), timing) = self.frame_clock.measure(|| draw_face(canvas, bounds, &frame));
        if timing.over_budget {
            warn!(
                "frame {} took {}ms, over the {}ms tick budget",
                timing.frame_index,
                timing.render_time.as_millis(),
                self.frame_clock.budget().as_millis()
            );
        } else {
            trace!("frame {} drawn in {:?}", timing.frame_index, timing.render_time);
        }
        if let Some(gap) = timing.since_previous {
            if self.is_ticking() && gap > 2 * INTERACTIVE_UPDATE_RATE {
                debug!("frame {} came {}ms after the previous one", timing.frame_index, gap.as_millis());
            }
        }
        true
    }
}
