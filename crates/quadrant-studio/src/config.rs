//! Studio configuration.
//!
//! Loaded from an optional TOML file, then `QUADRANT__*` environment
//! variables (`QUADRANT__SURFACE__WIDTH=390`, `QUADRANT__RUN_SECS=10`).
//! Every field has a default, so an empty source is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use quadrant_face::{BackgroundFill, FaceStyle, ThemeSpec};

use crate::host::WallClock;

/// File read when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "quadrant.toml";

/// Latest accepted script time: one week.
pub const MAX_SCRIPT_SECS: f64 = 7.0 * 24.0 * 3600.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub surface: SurfaceConfig,

    /// Simulate a display that cannot anti-alias in ambient mode.
    pub low_fidelity_ambient: bool,

    pub background: BackgroundFill,

    /// System UI hints declared to the host on create.
    pub face_style: FaceStyle,

    /// Show the clock in this fixed UTC offset instead of the local zone.
    pub utc_offset_secs: Option<i32>,

    /// Stop after this many seconds. Runs until Ctrl+C when unset.
    pub run_secs: Option<u64>,

    /// Visibility and mode changes replayed on a timeline.
    pub script: Vec<ScriptEvent>,

    /// Where the latest frame is written as SVG.
    pub svg_output: Option<PathBuf>,

    /// `env_logger` filter; falls back to `RUST_LOG`.
    pub log_filter: Option<String>,

    pub theme: ThemeSpec,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            low_fidelity_ambient: false,
            background: BackgroundFill::Flat,
            face_style: FaceStyle::default(),
            utc_offset_secs: None,
            run_secs: None,
            script: Vec::new(),
            svg_output: None,
            log_filter: None,
            theme: ThemeSpec::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
        }
    }
}

/// One scripted host event.
///
/// ```toml
/// [[script]]
/// at_secs = 5.0
/// event = "ambient"
///
/// [[script]]
/// at_secs = 8.0
/// event = "time_zone"
/// utc_offset_secs = 32400
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct ScriptEvent {
    /// Seconds after startup.
    pub at_secs: f64,
    pub event: ScriptAction,
    /// New offset for `time_zone` events.
    #[serde(default)]
    pub utc_offset_secs: Option<i32>,
}

impl ScriptEvent {
    /// Offset from startup, clamped to [`MAX_SCRIPT_SECS`].
    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.at_secs.min(MAX_SCRIPT_SECS)).unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Hide,
    Show,
    Ambient,
    Interactive,
    /// Move the simulated clock to `utc_offset_secs`.
    TimeZone,
}

impl StudioConfig {
    /// Reads `path` (or [`DEFAULT_CONFIG_FILE`] if it exists) and applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix("QUADRANT")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder).with_context(|| match path {
            Some(p) => format!("failed to load configuration from {}", p.display()),
            None => "failed to load configuration".to_string(),
        })
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// The clock the host reads.
    pub fn wall_clock(&self) -> Result<WallClock> {
        match self.utc_offset_secs {
            None => Ok(WallClock::Local),
            Some(secs) => fixed_offset(secs).map(WallClock::Fixed),
        }
    }

    fn validate(&self) -> Result<()> {
        self.wall_clock().context("utc_offset_secs")?;
        for (i, step) in self.script.iter().enumerate() {
            if !step.at_secs.is_finite() || step.at_secs < 0.0 {
                bail!("script[{i}]: at_secs must be a non-negative number, got {}", step.at_secs);
            }
            if step.at_secs > MAX_SCRIPT_SECS {
                bail!(
                    "script[{i}]: at_secs {} is past the {MAX_SCRIPT_SECS}s limit",
                    step.at_secs
                );
            }
            match (step.event, step.utc_offset_secs) {
                (ScriptAction::TimeZone, None) => {
                    bail!("script[{i}]: time_zone events need utc_offset_secs")
                }
                (ScriptAction::TimeZone, Some(secs)) => {
                    fixed_offset(secs).with_context(|| format!("script[{i}]"))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

pub fn fixed_offset(secs: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(secs)
        .with_context(|| format!("utc offset {secs}s is out of range"))
}
