//! Entity capabilities.
//!
//! Every entity exposes a tag and an idempotent `destroy`. Optional
//! capabilities are advertised through accessor methods that return `None`
//! by default, so dispatch only visits entities that opted in.

use std::fmt;

use castle_defence_core::{Command, Envelope, Tag, Vector2};
use castle_defence_rendering::{Canvas, Color};

use crate::Context;

/// Base capability shared by every tagged unit.
pub trait Entity: fmt::Debug {
    /// Identity of the entity within its registry.
    fn tag(&self) -> &Tag;

    /// Releases anything the entity installed. Calling it twice is harmless.
    fn destroy(&mut self) {}

    /// Hit-test capability used by pointer-down dispatch.
    fn hit_target(&self) -> Option<&dyn HitTarget> {
        None
    }

    /// Hover capability used by pointer-move dispatch.
    fn hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        None
    }

    /// Mutable style capability.
    fn styled_mut(&mut self) -> Option<&mut dyn Styled> {
        None
    }

    /// Read access to textual content.
    fn text_content(&self) -> Option<&dyn TextContent> {
        None
    }

    /// Write access to textual content.
    fn text_content_mut(&mut self) -> Option<&mut dyn TextContent> {
        None
    }
}

/// Views any concrete entity through the base [`Entity`] capability.
pub trait AsEntity {
    /// Base entity view.
    fn as_entity(&self) -> &dyn Entity;

    /// Mutable base entity view.
    fn as_entity_mut(&mut self) -> &mut dyn Entity;
}

impl<T: Entity> AsEntity for T {
    fn as_entity(&self) -> &dyn Entity {
        self
    }

    fn as_entity_mut(&mut self) -> &mut dyn Entity {
        self
    }
}

/// Entity owned by a layer. It draws itself while updating.
pub trait Visual: Entity + AsEntity {
    /// Advances the entity by `elapsed` seconds and draws it onto `canvas`.
    fn update(&mut self, elapsed: f32, canvas: &mut dyn Canvas);
}

/// Entity registered directly with the engine.
pub trait RootEntity: Entity + AsEntity {
    /// Advances the entity by `elapsed` seconds.
    fn update(&mut self, elapsed: f32, ctx: &mut Context);

    /// Applies a command addressed to this entity's tag.
    fn handle(&mut self, _command: &Command, _ctx: &mut Context) {}
}

/// Bounding predicate with click handling.
pub trait HitTarget {
    /// Whether `point` lies inside the entity.
    fn contains(&self, point: Vector2) -> bool;

    /// Command posted when the entity is clicked.
    fn click(&self) -> Option<Envelope>;
}

/// Mutable styling that takes effect on the next redraw.
pub trait Styled {
    /// Replaces the current fill color.
    fn set_fill_style(&mut self, color: Color);

    /// Applies the entity's highlight styling.
    fn highlight(&mut self);

    /// Reverts to the styling the entity was created with.
    fn restore(&mut self);
}

/// Hover styling on top of a hit-test.
pub trait Hoverable: HitTarget + Styled {
    /// Whether hover styling is currently applied.
    fn is_hovered(&self) -> bool;

    /// Applies hover styling when the pointer enters the bounds.
    fn on_hover(&mut self);

    /// Tag of a sibling that is highlighted together with this entity.
    fn linked_label(&self) -> Option<&Tag> {
        None
    }
}

/// Textual content that can be replaced.
pub trait TextContent {
    /// Current text.
    fn text(&self) -> &str;

    /// Replaces the text.
    fn set_text(&mut self, text: String);
}
