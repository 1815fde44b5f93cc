#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wires the engine and the game manager into a frame application.

use std::time::Duration;

use anyhow::{Context as _, Result};
use castle_defence_core::{EngineConfig, GameConfig};
use castle_defence_engine::{Engine, StopToken};
use castle_defence_rendering::{FrameApp, FrameInput, FrameStatus, SurfaceProvider};
use castle_defence_system_game_manager::GameManager;
use tracing::info;

/// Castle Defence as driven by a rendering backend.
#[derive(Debug)]
pub struct Bootstrap {
    engine: Engine,
    game: GameConfig,
    show_fps: bool,
}

impl Bootstrap {
    /// Creates the application from validated configuration records.
    pub fn new(engine: EngineConfig, game: GameConfig) -> Result<Self> {
        game.validate().context("invalid game configuration")?;
        let mut runtime = Engine::new();
        runtime
            .load_configuration(engine)
            .context("invalid engine configuration")?;
        Ok(Self {
            engine: runtime,
            game,
            show_fps: true,
        })
    }

    /// Controls whether the FPS readout is exposed as an overlay.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Token that stops the frame loop.
    #[must_use]
    pub fn stop_token(&self) -> StopToken {
        self.engine.stop_token()
    }

    /// Underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl FrameApp for Bootstrap {
    fn start(&mut self, surfaces: &mut dyn SurfaceProvider) -> Result<()> {
        self.engine
            .start(surfaces)
            .context("failed to start engine")?;
        let manager = GameManager::new(self.engine.context_mut(), self.game)
            .context("failed to create game manager")?;
        let _ = self.engine.add_entity(Box::new(manager));
        info!(
            wave_idle_seconds = self.game.wave_idle_seconds,
            map = self.game.map.get(),
            "castle defence ready"
        );
        Ok(())
    }

    fn frame(&mut self, timestamp: Duration, input: &FrameInput) -> FrameStatus {
        for event in &input.pointer {
            self.engine.dispatch_pointer(*event);
        }
        self.engine.tick(timestamp)
    }

    fn overlay(&self) -> Option<&str> {
        if self.show_fps {
            self.engine.fps_readout()
        } else {
            None
        }
    }
}
