//! Retained drawing layer with its own entity registry.

use std::collections::VecDeque;

use castle_defence_core::{Envelope, Tag};
use castle_defence_rendering::{Canvas, Color, PointerEvent, PointerKind};
use tracing::{debug, warn};

use crate::{Cursor, Entity, ListenerId, Registry, Stage, Visual};

/// Tag and surface id of the background layer.
pub const BG_LAYER: &str = "background-layer";
/// Tag and surface id of the game layer.
pub const GAME_LAYER: &str = "game-layer";
/// Tag and surface id of the UI layer.
pub const UI_LAYER: &str = "ui-layer";

/// A drawing surface plus the visuals drawn onto it.
///
/// The surface is only cleared and redrawn on frames where the redraw flag is
/// raised; otherwise the previous pixels persist.
#[derive(Debug)]
pub struct Layer {
    tag: Tag,
    surface: Option<Box<dyn Canvas>>,
    background: Option<Color>,
    entities: Registry<Box<dyn Visual>>,
    redraw: bool,
    listeners: Vec<ListenerId>,
}

impl Layer {
    /// Creates a layer. A layer without a surface keeps its bookkeeping but
    /// draws nothing.
    #[must_use]
    pub fn new(tag: impl Into<Tag>, surface: Option<Box<dyn Canvas>>) -> Self {
        Self {
            tag: tag.into(),
            surface,
            background: None,
            entities: Registry::new(),
            redraw: false,
            listeners: Vec::new(),
        }
    }

    /// Tag of the layer.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Whether the layer has a drawing surface.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Background color shown behind the layer's pixels.
    #[must_use]
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Replaces the background color and schedules a redraw.
    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_background(Some(color));
        }
        self.redraw = true;
    }

    /// Requests a clear and redraw on the next update.
    pub fn mark_dirty(&mut self) {
        self.redraw = true;
    }

    /// Whether the next update redraws the layer.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Adds a visual under its own tag. A taken tag keeps the existing visual.
    pub fn add_entity(&mut self, visual: Box<dyn Visual>) -> bool {
        let tag = visual.tag().clone();
        match self.entities.insert(tag, visual) {
            Ok(()) => true,
            Err(rejected) => {
                warn!(layer = %self.tag, tag = %rejected.tag(), "duplicate entity tag rejected");
                false
            }
        }
    }

    /// Destroys and removes the visual registered under `tag`.
    ///
    /// Does not raise the redraw flag; callers mark the layer dirty.
    pub fn remove_entity(&mut self, tag: &str) -> bool {
        match self.entities.remove(tag) {
            Some(mut visual) => {
                visual.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroys and removes every visual.
    pub fn clear_entities(&mut self) {
        for (_, mut visual) in self.entities.take_all() {
            visual.destroy();
        }
    }

    /// Whether a visual is registered under `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entities.contains(tag)
    }

    /// Number of registered visuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the layer holds no visuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Visual registered under `tag`.
    #[must_use]
    pub fn entity(&self, tag: &str) -> Option<&dyn Visual> {
        self.entities.get(tag).map(|visual| &**visual)
    }

    /// Mutable visual registered under `tag`.
    pub fn entity_mut(&mut self, tag: &str) -> Option<&mut (dyn Visual + 'static)> {
        self.entities.get_mut(tag).map(|visual| &mut **visual)
    }

    /// Tags of the registered visuals in draw order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entities.tags()
    }

    /// Clears and redraws the surface when the redraw flag is raised.
    pub fn update(&mut self, elapsed: f32) {
        if !self.redraw {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            let canvas: &mut dyn Canvas = &mut **surface;
            canvas.clear();
            for visual in self.entities.values_mut() {
                visual.update(elapsed, canvas);
            }
        }
        self.redraw = false;
    }

    /// Registers the layer's pointer listeners on `stage`.
    pub fn install_listeners(&mut self, stage: &mut Stage) {
        for kind in [PointerKind::Move, PointerKind::Down] {
            if let Some(id) = stage.add_listener(kind, self.tag.clone()) {
                self.listeners.push(id);
            }
        }
        debug!(layer = %self.tag, listeners = self.listeners.len(), "pointer listeners installed");
    }

    /// Whether the layer currently has listeners installed.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Applies a pointer event to the layer's visuals.
    ///
    /// Movement updates hover styling and the stage cursor. A press runs the
    /// click handling of every visual under the pointer, posting each
    /// resulting envelope to `outbox`.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        stage: &mut Stage,
        outbox: &mut VecDeque<Envelope>,
    ) {
        match event {
            PointerEvent::Move(point) => {
                let mut labels: Vec<(Tag, bool)> = Vec::new();
                let mut any_hovered = false;
                let mut changed = false;
                for visual in self.entities.values_mut() {
                    let Some(hoverable) = visual.hoverable_mut() else {
                        continue;
                    };
                    let inside = hoverable.contains(point);
                    if inside != hoverable.is_hovered() {
                        if inside {
                            hoverable.on_hover();
                        } else {
                            hoverable.restore();
                        }
                        if let Some(label) = hoverable.linked_label() {
                            labels.push((label.clone(), inside));
                        }
                        changed = true;
                    }
                    any_hovered |= inside;
                }
                for (label, highlighted) in labels {
                    let styled = self
                        .entities
                        .get_mut(&label)
                        .and_then(|visual| visual.styled_mut());
                    if let Some(styled) = styled {
                        if highlighted {
                            styled.highlight();
                        } else {
                            styled.restore();
                        }
                    }
                }
                stage.set_cursor(if any_hovered {
                    Cursor::Pointer
                } else {
                    Cursor::Default
                });
                if changed {
                    self.redraw = true;
                }
            }
            PointerEvent::Down(point) => {
                let clicks: Vec<Envelope> = self
                    .entities
                    .values()
                    .filter_map(|visual| visual.hit_target())
                    .filter(|target| target.contains(point))
                    .filter_map(|target| target.click())
                    .collect();
                debug!(layer = %self.tag, clicks = clicks.len(), "pointer down");
                outbox.extend(clicks);
            }
        }
    }

    /// Removes the layer's listeners from `stage`. Calling it twice is harmless.
    pub fn destroy(&mut self, stage: &mut Stage) {
        for id in self.listeners.drain(..) {
            let _ = stage.remove_listener(id);
        }
    }
}
