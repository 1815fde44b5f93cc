#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame loop, layered redraw and entity registry for Castle Defence.
//!
//! The [`Engine`] owns root entities and a [`Context`] holding the stage and
//! the three stacked layers. Each frame it delivers queued commands and then
//! updates every root entity with the context. Layers redraw only when their
//! redraw flag is raised. Pointer input is routed through stage listeners to
//! the owning layer, which hit-tests its visuals and queues their commands.

mod context;
mod engine;
mod entity;
mod layer;
mod registry;
mod stage;
mod timing;
pub mod visuals;

use thiserror::Error;

use castle_defence_core::ConfigError;

pub use context::Context;
pub use engine::Engine;
pub use entity::{AsEntity, Entity, HitTarget, Hoverable, RootEntity, Styled, TextContent, Visual};
pub use layer::{Layer, BG_LAYER, GAME_LAYER, UI_LAYER};
pub use registry::Registry;
pub use stage::{Cursor, ListenerId, Stage, STAGE_ID};
pub use timing::StopToken;

/// Errors reported by the engine and the systems built on it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// `start` was called before a configuration was loaded.
    #[error("engine configuration must be loaded before start")]
    NotConfigured,
    /// `start` or `load_configuration` was called on a running engine.
    #[error("engine already started")]
    AlreadyStarted,
    /// A required layer does not exist in the context.
    #[error("layer {tag:?} does not exist")]
    MissingLayer {
        /// Tag that was looked up.
        tag: String,
    },
    /// The loaded configuration was rejected.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),
}
