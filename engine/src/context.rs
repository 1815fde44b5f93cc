//! Shared state handed to root entities every frame.

use std::collections::VecDeque;

use castle_defence_core::{Envelope, Tag};
use castle_defence_rendering::PointerEvent;

use crate::{Layer, Registry, Stage, BG_LAYER};

/// Canvas extent, stage, layers and the command outbox.
///
/// Layers iterate in stacking order, lowest first.
#[derive(Debug)]
pub struct Context {
    width: u32,
    height: u32,
    stage: Stage,
    layers: Registry<Layer>,
    background: Tag,
    outbox: VecDeque<Envelope>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Context {
    /// Creates a context without layers.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stage: Stage::new(width, height),
            layers: Registry::new(),
            background: Tag::new(BG_LAYER),
            outbox: VecDeque::new(),
        }
    }

    /// Logical canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Stage hosting the layers.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Appends a layer on top of the existing ones. A taken tag is rejected.
    pub fn push_layer(&mut self, layer: Layer) -> bool {
        let tag = layer.tag().clone();
        self.layers.insert(tag, layer).is_ok()
    }

    /// Layer registered under `tag`.
    #[must_use]
    pub fn layer(&self, tag: &str) -> Option<&Layer> {
        self.layers.get(tag)
    }

    /// Mutable layer registered under `tag`.
    pub fn layer_mut(&mut self, tag: &str) -> Option<&mut Layer> {
        self.layers.get_mut(tag)
    }

    /// Tags of the layers in stacking order.
    pub fn layer_tags(&self) -> impl Iterator<Item = &Tag> {
        self.layers.tags()
    }

    /// Tag of the background layer.
    #[must_use]
    pub fn background_tag(&self) -> &Tag {
        &self.background
    }

    /// Background layer, when it was created.
    #[must_use]
    pub fn background_layer(&self) -> Option<&Layer> {
        self.layers.get(&self.background)
    }

    /// Mutable background layer, when it was created.
    pub fn background_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(&self.background)
    }

    /// Queues a command for delivery at the start of the next frame.
    pub fn post(&mut self, envelope: Envelope) {
        self.outbox.push_back(envelope);
    }

    /// Number of queued commands.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.outbox.len()
    }

    pub(crate) fn take_outbox(&mut self) -> VecDeque<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn install_listeners(&mut self, tag: &str) -> bool {
        match self.layers.get_mut(tag) {
            Some(layer) => {
                layer.install_listeners(&mut self.stage);
                true
            }
            None => false,
        }
    }

    /// Detaches every layer from the stage and destroys their visuals.
    pub(crate) fn teardown(&mut self) {
        for layer in self.layers.values_mut() {
            layer.destroy(&mut self.stage);
            layer.clear_entities();
        }
    }

    /// Routes a pointer event to every layer listening for its kind.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) {
        for owner in self.stage.listener_owners(event.kind()) {
            if let Some(layer) = self.layers.get_mut(&owner) {
                layer.handle_pointer(event, &mut self.stage, &mut self.outbox);
            }
        }
    }
}
