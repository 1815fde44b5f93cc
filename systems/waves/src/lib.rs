#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave idle countdown and the UI that announces it.
//!
//! The countdown is counting down while its value is positive and inactive
//! otherwise. The timer text, the skip button and its caption live in the
//! background layer and exist exactly while the countdown is running.

use castle_defence_core::{Command, Tag, Vector2, GAME_MANAGER_TAG};
use castle_defence_engine::{
    visuals::{RoundedRectangle, Text},
    Context, Cursor, EngineError, Layer,
};
use castle_defence_rendering::{Color, Font, FontWeight};
use tracing::debug;

/// Tag of the countdown text.
pub const WAVE_IDLE_TIMER: &str = "WAVE_IDLE_TIMER";
/// Tag of the skip button.
pub const WAVE_IDLE_TIMER_BUTTON: &str = "WAVE_IDLE_TIMER_BUTTON";
/// Tag of the skip button caption.
pub const WAVE_IDLE_TIMER_BUTTON_TEXT: &str = "WAVE_IDLE_TIMER_BUTTON_TEXT";

const INACTIVE: f32 = -1.0;
const FONT_FAMILY: &str = "MedievalSharp";
const HOVER_FILL: Color = Color::from_rgb_u8(0x56, 0x79, 0x5e);

/// Drives the countdown between waves.
#[derive(Debug)]
pub struct WaveManager {
    wave_idle_timer: f32,
    background: Tag,
}

impl WaveManager {
    /// Creates an inactive manager bound to the layer tagged `background`.
    ///
    /// Fails when the context has no such layer.
    pub fn new(ctx: &Context, background: &Tag) -> Result<Self, EngineError> {
        if ctx.layer(background).is_none() {
            return Err(EngineError::MissingLayer {
                tag: background.to_string(),
            });
        }
        Ok(Self {
            wave_idle_timer: INACTIVE,
            background: background.clone(),
        })
    }

    /// Arms the countdown with `seconds`.
    pub fn set_wave_idle_timer(&mut self, seconds: f32) {
        self.wave_idle_timer = seconds;
    }

    /// Subtracts `elapsed` seconds from the countdown.
    pub fn reduce_wave_idle_timer(&mut self, elapsed: f32) {
        self.wave_idle_timer -= elapsed;
    }

    /// Ends the countdown immediately.
    pub fn skip_wave_idle_timer(&mut self) {
        self.set_wave_idle_timer(INACTIVE);
    }

    /// Remaining seconds. Zero or less means inactive.
    #[must_use]
    pub fn wave_idle_timer(&self) -> f32 {
        self.wave_idle_timer
    }

    /// Whether the countdown is running.
    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        self.wave_idle_timer > 0.0
    }

    /// Brings the timer UI in line with the countdown.
    ///
    /// While counting down the three timer entities are created when missing
    /// and the text shows the whole seconds left. Otherwise they are removed.
    pub fn check_for_wave_idle_timer(&self, ctx: &mut Context) {
        let released_pointer = {
            let Some(layer) = ctx.layer_mut(&self.background) else {
                return;
            };
            if self.is_counting_down() {
                show_countdown(layer, self.wave_idle_timer);
                false
            } else {
                remove_timer(layer)
            }
        };
        if released_pointer {
            ctx.stage_mut().set_cursor(Cursor::Default);
        }
    }
}

fn show_countdown(layer: &mut Layer, seconds: f32) {
    create_timer_if_missing(layer);
    let text = format!("Next wave starts in: {}s", seconds.floor() as i64);
    if let Some(content) = layer
        .entity_mut(WAVE_IDLE_TIMER)
        .and_then(|timer| timer.text_content_mut())
    {
        content.set_text(text);
    }
    layer.mark_dirty();
}

/// Removes the timer UI. Returns whether the skip button was hovered.
fn remove_timer(layer: &mut Layer) -> bool {
    let hovered = layer
        .entity_mut(WAVE_IDLE_TIMER_BUTTON)
        .and_then(|button| button.hoverable_mut())
        .is_some_and(|button| button.is_hovered());
    let mut removed = false;
    for tag in [
        WAVE_IDLE_TIMER,
        WAVE_IDLE_TIMER_BUTTON,
        WAVE_IDLE_TIMER_BUTTON_TEXT,
    ] {
        removed |= layer.remove_entity(tag);
    }
    if removed {
        debug!("wave idle timer removed");
        layer.mark_dirty();
    }
    hovered
}

fn create_timer_if_missing(layer: &mut Layer) {
    if !layer.contains(WAVE_IDLE_TIMER) {
        let _ = layer.add_entity(Box::new(
            Text::new(
                WAVE_IDLE_TIMER,
                "Next wave starts in:",
                Font::new(20.0, FontWeight::Bold, FONT_FAMILY),
                Vector2::new(5.0, 30.0),
            )
            .with_fill(Color::BLACK),
        ));
        layer.mark_dirty();
    }

    if !layer.contains(WAVE_IDLE_TIMER_BUTTON) {
        let _ = layer.add_entity(Box::new(
            RoundedRectangle::new(
                WAVE_IDLE_TIMER_BUTTON,
                Vector2::new(100.0, 25.0),
                8.0,
                Vector2::new(240.0, 10.0),
            )
            .with_stroke(Color::BLACK)
            .with_fill(Color::WHITE)
            .with_hover_fill(HOVER_FILL)
            .with_label(WAVE_IDLE_TIMER_BUTTON_TEXT)
            .on_click(GAME_MANAGER_TAG, Command::SkipWaveIdleTimer),
        ));
        let _ = layer.add_entity(Box::new(
            Text::new(
                WAVE_IDLE_TIMER_BUTTON_TEXT,
                "Skip",
                Font::new(16.0, FontWeight::Bold, FONT_FAMILY),
                Vector2::new(270.0, 28.0),
            )
            .with_fill(Color::BLACK)
            .with_highlight(Color::WHITE),
        ));
        debug!("wave idle timer created");
        layer.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_defence_engine::BG_LAYER;

    #[test]
    fn construction_requires_the_layer() {
        let ctx = Context::new(1280, 720);
        let error = WaveManager::new(&ctx, &Tag::new(BG_LAYER)).expect_err("no layers yet");
        assert_eq!(
            error,
            EngineError::MissingLayer {
                tag: BG_LAYER.to_owned()
            }
        );
    }

    #[test]
    fn starts_inactive_and_skip_deactivates() {
        let mut ctx = Context::new(1280, 720);
        assert!(ctx.push_layer(Layer::new(BG_LAYER, None)));
        let mut waves = WaveManager::new(&ctx, &Tag::new(BG_LAYER)).expect("layer exists");
        assert!(!waves.is_counting_down());
        waves.set_wave_idle_timer(0.5);
        assert!(waves.is_counting_down());
        waves.skip_wave_idle_timer();
        assert_eq!(waves.wave_idle_timer(), -1.0);
    }
}
