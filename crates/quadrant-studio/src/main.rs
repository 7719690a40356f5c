//! Quadrant studio: runs the analog face against a simulated host.
//!
//! Usage: `quadrant-studio [config.toml]`

mod app;
mod config;
mod host;
mod svg;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use quadrant_engine::logging::{init_logging, LoggingConfig};

use crate::app::Studio;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = StudioConfig::load(config_path.as_deref())?;

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the tokio runtime")?;

    runtime.block_on(async {
        let studio = Studio::start(&config)?;
        studio.spawn_script(&config.script);
        info!(
            "face running on a {}x{} surface{}",
            config.surface.width,
            config.surface.height,
            match &config.svg_output {
                Some(p) => format!(", frames to {}", p.display()),
                None => String::new(),
            }
        );

        let stats = studio
            .run(config.run_secs.map(std::time::Duration::from_secs))
            .await?;
        info!(
            "stopped after {} frame(s), {} redraw request(s), {} wakeup(s)",
            stats.frames, stats.redraw_requests, stats.wakeups
        );
        Ok(())
    })
}
