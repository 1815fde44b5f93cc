//! Frame timing, FPS counting and loop cancellation.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Converts frame timestamps into elapsed seconds.
#[derive(Debug, Default)]
pub(crate) struct FrameClock {
    last: Option<Duration>,
}

impl FrameClock {
    /// Seconds since the previous timestamp. The first frame reports zero.
    pub(crate) fn advance(&mut self, timestamp: Duration) -> f32 {
        let previous = self.last.replace(timestamp).unwrap_or(timestamp);
        timestamp.saturating_sub(previous).as_secs_f32()
    }
}

/// Counts frames over one-second windows.
#[derive(Debug, Default)]
pub(crate) struct FpsCounter {
    window_start: Option<Duration>,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the number of frames rendered in the
    /// window once at least one second has passed since it opened.
    pub(crate) fn record_frame(&mut self, timestamp: Duration) -> Option<u32> {
        let window_start = *self.window_start.get_or_insert(timestamp);
        self.frames = self.frames.saturating_add(1);

        if timestamp.saturating_sub(window_start) < FPS_WINDOW {
            return None;
        }

        let fps = self.frames;
        self.frames = 0;
        self.window_start = Some(timestamp);
        Some(fps)
    }
}

/// Cloneable flag that stops the frame loop at the top of the next frame.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// Creates a token that has not been triggered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
