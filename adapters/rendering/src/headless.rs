//! Fixed-step backend that runs frames without a window.

use std::{collections::BTreeMap, time::Duration};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    FrameApp, FrameInput, FrameStatus, PointerEvent, Presentation, RecordingSurfaces,
    RenderingBackend,
};

const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Backend that advances a fixed number of frames at a fixed interval.
///
/// Layers are recorded rather than rasterised, and scripted pointer events are
/// delivered before the frame they are scheduled for.
#[derive(Debug)]
pub struct HeadlessBackend {
    frames: u32,
    frame_interval: Duration,
    script: BTreeMap<u32, Vec<PointerEvent>>,
}

/// Outcome of a headless run.
#[derive(Debug)]
pub struct HeadlessReport {
    /// Number of frames that ran before the loop ended.
    pub frames_run: u32,
    /// Surfaces handed to the application.
    pub surfaces: RecordingSurfaces,
    /// Overlay text published by the application after the last frame.
    pub overlay: Option<String>,
}

impl HeadlessBackend {
    /// Creates a backend that runs `frames` frames at 60 Hz.
    #[must_use]
    pub fn new(frames: u32) -> Self {
        Self {
            frames,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            script: BTreeMap::new(),
        }
    }

    /// Overrides the simulated time between frames.
    #[must_use]
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Schedules a pointer event to be delivered before frame `frame`.
    #[must_use]
    pub fn with_pointer_event(mut self, frame: u32, event: PointerEvent) -> Self {
        self.script.entry(frame).or_default().push(event);
        self
    }

    /// Runs `app` and returns what happened.
    pub fn run_app<A>(self, app: &mut A) -> Result<HeadlessReport>
    where
        A: FrameApp,
    {
        let mut surfaces = RecordingSurfaces::new();
        app.start(&mut surfaces)
            .context("failed to start application")?;

        let mut frames_run = 0;
        for frame in 0..self.frames {
            let input = FrameInput {
                pointer: self.script.get(&frame).cloned().unwrap_or_default(),
            };
            let timestamp = self.frame_interval * frame;
            if app.frame(timestamp, &input) == FrameStatus::Stopped {
                break;
            }
            frames_run += 1;
        }

        Ok(HeadlessReport {
            frames_run,
            surfaces,
            overlay: app.overlay().map(str::to_owned),
        })
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<A>(self, presentation: Presentation, mut app: A) -> Result<()>
    where
        A: FrameApp + 'static,
    {
        let report = self.run_app(&mut app)?;
        info!(
            title = %presentation.window_title,
            frames = report.frames_run,
            overlay = report.overlay.as_deref().unwrap_or("-"),
            "headless run finished"
        );
        Ok(())
    }
}
