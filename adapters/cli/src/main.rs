#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Castle Defence.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use castle_defence_rendering::{
    Color, HeadlessBackend, PointerEvent, Presentation, RenderingBackend,
};
use castle_defence_rendering_macroquad::MacroquadBackend;
use castle_defence_system_bootstrap::Bootstrap;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, Overrides, ScriptedClick};

const WINDOW_TITLE: &str = "Castle Defence";

#[derive(Debug, Parser)]
#[command(name = "castle-defence", about = "Castle Defence tower defence game")]
struct Args {
    /// TOML file with `[engine]` and `[game]` sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Seconds before the first wave starts.
    #[arg(long, value_name = "SECONDS")]
    wave_idle_seconds: Option<f32>,

    /// Show the FPS readout.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    show_fps: bool,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, action = ArgAction::Set)]
    vsync: Option<bool>,

    /// Run this many frames without opening a window.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,

    /// Click delivered before a headless frame, as `FRAME:X:Y`.
    #[arg(long, value_name = "FRAME:X:Y", requires = "headless")]
    click: Vec<ScriptedClick>,
}

/// Entry point for the Castle Defence command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let overrides = Overrides {
        width: args.width,
        height: args.height,
        wave_idle_seconds: args.wave_idle_seconds,
    };
    let config = FileConfig::load(args.config.as_deref())?;
    let config = config.with_overrides(overrides)?;

    let app = Bootstrap::new(config.engine, config.game)?;
    let app = app.with_show_fps(args.show_fps);
    let presentation = Presentation::new(
        WINDOW_TITLE,
        config.engine.width,
        config.engine.height,
        Color::BLACK,
    );

    match args.headless {
        Some(frames) => {
            info!(frames, clicks = args.click.len(), "running headless");
            let backend = args
                .click
                .iter()
                .fold(HeadlessBackend::new(frames), |backend, click| {
                    backend
                        .with_pointer_event(click.frame, PointerEvent::Move(click.position))
                        .with_pointer_event(click.frame, PointerEvent::Down(click.position))
                });
            backend.run(presentation, app)
        }
        None => {
            let mut backend = MacroquadBackend::new();
            if let Some(vsync) = args.vsync {
                backend = backend.with_vsync(vsync);
            }
            backend.run(presentation, app)
        }
    }
}
