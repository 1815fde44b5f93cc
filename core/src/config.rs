use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;
const DEFAULT_WAVE_IDLE_SECONDS: f32 = 30.0;

/// Logical canvas extent consumed once by the engine at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl EngineConfig {
    /// Creates a validated configuration.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let config = Self { width, height };
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero-sized canvases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Identifier of a route definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(u32);

impl MapId {
    /// The only map with a concrete path.
    pub const EASY: Self = Self(1);

    /// Wraps a raw map identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Game rules applied when entering a match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seconds the wave idle timer counts down after entering the game.
    pub wave_idle_seconds: f32,
    /// Map loaded when entering the game.
    pub map: MapId,
}

impl GameConfig {
    /// Rejects negative or non-finite countdowns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wave_idle_seconds.is_finite() || self.wave_idle_seconds < 0.0 {
            return Err(ConfigError::InvalidWaveIdleSeconds {
                seconds: self.wave_idle_seconds,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wave_idle_seconds: DEFAULT_WAVE_IDLE_SECONDS,
            map: MapId::EASY,
        }
    }
}

/// Errors raised while validating configuration records.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Canvas dimensions must both be positive.
    #[error("canvas dimensions must be positive (received {width}x{height})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The wave idle countdown must be a finite, non-negative number of seconds.
    #[error("wave idle seconds must be finite and non-negative (received {seconds})")]
    InvalidWaveIdleSeconds {
        /// Requested countdown.
        seconds: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_rejected() {
        assert_eq!(
            EngineConfig::new(0, 720),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 720
            })
        );
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: EngineConfig = toml::from_str("width = 800").expect("valid toml");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, DEFAULT_HEIGHT);

        let game: GameConfig = toml::from_str("map = 1").expect("valid toml");
        assert_eq!(game.map, MapId::EASY);
        assert_eq!(game.wave_idle_seconds, DEFAULT_WAVE_IDLE_SECONDS);
    }

    #[test]
    fn negative_countdown_is_rejected() {
        let game = GameConfig {
            wave_idle_seconds: -1.0,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());
    }
}
