#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Castle Defence engine.
//!
//! This crate defines the vocabulary that connects adapters, the engine and
//! the game systems. Entities are addressed exclusively by [`Tag`]. Pointer
//! handling never mutates game state directly: it posts [`Envelope`] values
//! carrying a [`Command`] to a tagged root entity, and the engine delivers
//! them at the start of the next frame.

mod config;
mod vector;

use std::{borrow::Borrow, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, EngineConfig, GameConfig, MapId};
pub use vector::Vector2;

/// Tag of the root entity that owns the game state machine.
pub const GAME_MANAGER_TAG: &str = "GAME_MANAGER";

/// String identity of an entity, unique within one registry scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Creates a tag from a caller-supplied identity.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a random tag for entities created without an explicit identity.
    #[must_use]
    pub fn random() -> Self {
        Self(format!("{:016x}", rand::random::<u64>()))
    }

    /// Borrows the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Deref for Tag {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Top-level state of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    /// Title screen with the start button.
    #[default]
    MainMenu,
    /// Active game with a loaded map and the wave idle timer.
    InGame,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainMenu => f.write_str("main-menu"),
            Self::InGame => f.write_str("in-game"),
        }
    }
}

/// Requests emitted by pointer handling and applied during the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests a transition of the game state machine.
    ChangeState {
        /// State the game should enter.
        state: GameState,
    },
    /// Requests that the running wave idle countdown ends immediately.
    SkipWaveIdleTimer,
}

/// A command addressed to a root entity by tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Envelope {
    /// Tag of the root entity that should receive the command.
    pub target: Tag,
    /// Command to deliver.
    pub command: Command,
}

impl Envelope {
    /// Creates a new envelope addressed to `target`.
    #[must_use]
    pub fn new(target: impl Into<Tag>, command: Command) -> Self {
        Self {
            target: target.into(),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_tags_do_not_collide() {
        let tags: HashSet<Tag> = (0..1_000).map(|_| Tag::random()).collect();
        assert_eq!(tags.len(), 1_000);
    }

    #[test]
    fn random_tags_are_sixteen_hex_digits() {
        let tag = Tag::random();
        assert_eq!(tag.as_str().len(), 16);
        assert!(tag.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn game_state_uses_kebab_case_names() {
        assert_eq!(GameState::default(), GameState::MainMenu);
        assert_eq!(GameState::InGame.to_string(), "in-game");
    }

    #[test]
    fn envelope_addresses_game_manager() {
        let envelope = Envelope::new(GAME_MANAGER_TAG, Command::SkipWaveIdleTimer);
        assert_eq!(envelope.target, GAME_MANAGER_TAG);
        assert_eq!(envelope.command, Command::SkipWaveIdleTimer);
    }
}
