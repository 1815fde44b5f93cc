//! Stage element that hosts every layer and owns pointer listeners.

use castle_defence_core::Tag;
use castle_defence_rendering::PointerKind;

/// Identifier of the stage element.
pub const STAGE_ID: &str = "game-stage";

/// Pointer affordance shown over the stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Platform default arrow.
    #[default]
    Default,
    /// Hand shown over clickable entities.
    Pointer,
}

/// Handle returned when a listener is installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    kind: PointerKind,
    owner: Tag,
}

/// Container of all layers. Pointer input is routed through its listeners.
#[derive(Debug)]
pub struct Stage {
    id: String,
    width: u32,
    height: u32,
    attached: bool,
    cursor: Cursor,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Stage {
    /// Creates a stage of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: STAGE_ID.to_owned(),
            width,
            height,
            attached: false,
            cursor: Cursor::Default,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Identifier of the stage element.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pixel size of the stage.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the stage was attached to its hosting container.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn mark_attached(&mut self) {
        self.attached = true;
    }

    /// Cursor currently shown over the stage.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Replaces the cursor shown over the stage.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Registers a listener of `kind` on behalf of the layer `owner`.
    ///
    /// Returns `None` when the stage is detached, since no input reaches it.
    pub fn add_listener(&mut self, kind: PointerKind, owner: Tag) -> Option<ListenerId> {
        if !self.attached {
            return None;
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, kind, owner });
        Some(id)
    }

    /// Removes a listener. Returns whether it was installed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// Number of installed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Owners of the listeners of `kind`, in installation order, without repeats.
    #[must_use]
    pub fn listener_owners(&self, kind: PointerKind) -> Vec<Tag> {
        let mut owners: Vec<Tag> = Vec::new();
        for listener in self.listeners.iter().filter(|l| l.kind == kind) {
            if !owners.contains(&listener.owner) {
                owners.push(listener.owner.clone());
            }
        }
        owners
    }
}
