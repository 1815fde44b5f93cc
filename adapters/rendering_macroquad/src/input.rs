//! Translation of raw mouse observations into stage pointer events.

use castle_defence_core::Vector2;
use castle_defence_rendering::PointerEvent;
use glam::Vec2;

/// Maps window pixels onto the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scale: Vec2,
}

impl Viewport {
    /// Viewport for a logical canvas shown in a window of the given size.
    ///
    /// Degenerate window sizes fall back to an identity mapping.
    #[must_use]
    pub fn new(logical: (u32, u32), window: (f32, f32)) -> Self {
        let logical = Vec2::new(logical.0 as f32, logical.1 as f32);
        let window = Vec2::new(window.0, window.1);
        let scale = if window.min_element() <= f32::EPSILON || logical.min_element() <= 0.0 {
            Vec2::ONE
        } else {
            window / logical
        };
        Self { scale }
    }

    /// Window pixels per logical pixel along each axis.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Logical canvas position of a window position.
    #[must_use]
    pub fn to_logical(&self, window: Vec2) -> Vector2 {
        Vector2::from(window / self.scale)
    }

    /// Window position of a logical canvas position.
    #[must_use]
    pub fn to_window(&self, logical: Vector2) -> Vec2 {
        Vec2::from(logical) * self.scale
    }
}

/// Turns per-frame mouse samples into move and press events.
///
/// A move is reported only when the cursor position changed since the
/// previous sample; the first sample always counts as a move.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    last: Option<Vector2>,
}

impl PointerTracker {
    /// Records one frame's observation and returns the resulting events.
    pub fn observe(&mut self, position: Vector2, pressed: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        if self.last != Some(position) {
            events.push(PointerEvent::Move(position));
            self.last = Some(position);
        }
        if pressed {
            events.push(PointerEvent::Down(position));
        }
        events
    }
}
