//! Configuration file loading, flag overrides and scripted clicks.

use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use castle_defence_core::{EngineConfig, GameConfig, Vector2};
use serde::Deserialize;

/// Contents of the optional TOML configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) engine: EngineConfig,
    pub(crate) game: GameConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) wave_idle_seconds: Option<f32>,
}

impl FileConfig {
    /// Reads `path`, or returns the defaults when no file was given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse TOML")
    }

    /// Applies `overrides` and validates the result.
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(width) = overrides.width {
            self.engine.width = width;
        }
        if let Some(height) = overrides.height {
            self.engine.height = height;
        }
        if let Some(seconds) = overrides.wave_idle_seconds {
            self.game.wave_idle_seconds = seconds;
        }
        self.engine
            .validate()
            .context("invalid engine configuration")?;
        self.game.validate().context("invalid game configuration")?;
        Ok(self)
    }
}

/// Pointer click delivered before a given headless frame, written `FRAME:X:Y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScriptedClick {
    pub(crate) frame: u32,
    pub(crate) position: Vector2,
}

impl FromStr for ScriptedClick {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(':').collect();
        let [frame, x, y] = parts.as_slice() else {
            return Err(format!("expected FRAME:X:Y, got {value:?}"));
        };
        let frame = frame
            .trim()
            .parse()
            .map_err(|error| format!("invalid frame {frame:?}: {error}"))?;
        let coordinate = |text: &str| -> Result<f32, String> {
            let parsed: f32 = text
                .trim()
                .parse()
                .map_err(|error| format!("invalid coordinate {text:?}: {error}"))?;
            if parsed.is_finite() {
                Ok(parsed)
            } else {
                Err(format!("coordinate {text:?} is not finite"))
            }
        };
        Ok(Self {
            frame,
            position: Vector2::new(coordinate(*x)?, coordinate(*y)?),
        })
    }
}
