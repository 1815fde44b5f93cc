#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Castle Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the crate depends on macroquad without its default `audio` feature.
//!
//! Layers are retained as recorded draw lists. Each displayed frame replays
//! every layer's list in stacking order on top of its background color, which
//! keeps the engine's "pixels persist until cleared" contract without
//! allocating render targets.

mod draw;
mod input;

use std::{sync::mpsc, time::Duration};

use anyhow::Result;
use castle_defence_core::Vector2;
use castle_defence_rendering::{
    FrameApp, FrameInput, FrameStatus, Presentation, RecordingCanvas, RecordingSurfaces,
    RenderingBackend,
};
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use tracing::info;

pub use draw::rounded_rect_outline;
pub use input::{PointerTracker, Viewport};

const OVERLAY_FONT_SIZE: f32 = 20.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

fn stacked_layers(surfaces: &RecordingSurfaces) -> Vec<RecordingCanvas> {
    let mut specs: Vec<_> = surfaces.layer_specs().cloned().collect();
    specs.sort_by_key(|spec| spec.z_index);
    specs
        .iter()
        .filter_map(|spec| surfaces.canvas(&spec.id))
        .collect()
}

impl RenderingBackend for MacroquadBackend {
    fn run<A>(self, presentation: Presentation, mut app: A) -> Result<()>
    where
        A: FrameApp + 'static,
    {
        let Presentation {
            window_title,
            width,
            height,
            clear_color,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(width).unwrap_or(i32::MAX),
            window_height: i32::try_from(height).unwrap_or(i32::MAX),
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut surfaces = RecordingSurfaces::new();
            if let Err(error) = app.start(&mut surfaces) {
                let _ = init_sender.send(Err(error));
                return;
            }
            let _ = init_sender.send(Ok(()));

            let layers = stacked_layers(&surfaces);
            let background = draw::to_macroquad_color(clear_color);
            let mut pointer = PointerTracker::default();
            info!(layers = layers.len(), "window opened");

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    info!("escape pressed, closing window");
                    break;
                }

                let viewport = Viewport::new(
                    (width, height),
                    (
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    ),
                );
                let (cursor_x, cursor_y) = mouse_position();
                let position = viewport.to_logical(Vec2::new(cursor_x, cursor_y));
                let input = FrameInput {
                    pointer: pointer.observe(
                        clamp_to_canvas(position, width, height),
                        is_mouse_button_pressed(MouseButton::Left),
                    ),
                };

                let timestamp = Duration::from_secs_f64(macroquad::time::get_time().max(0.0));
                if app.frame(timestamp, &input) == FrameStatus::Stopped {
                    break;
                }

                macroquad::window::clear_background(background);
                for layer in &layers {
                    if let Some(color) = layer.background() {
                        draw::fill_background(color, &viewport, (width, height));
                    }
                    draw::replay(&layer.commands(), &viewport);
                }
                if let Some(overlay) = app.overlay() {
                    let _ = macroquad::text::draw_text(
                        overlay,
                        8.0,
                        macroquad::window::screen_height() - 8.0,
                        OVERLAY_FONT_SIZE,
                        macroquad::color::WHITE,
                    );
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn clamp_to_canvas(position: Vector2, width: u32, height: u32) -> Vector2 {
    Vector2::new(
        position.x.clamp(0.0, width as f32),
        position.y.clamp(0.0, height as f32),
    )
}
