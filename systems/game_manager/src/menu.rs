use castle_defence_core::{Command, GameState, Vector2, GAME_MANAGER_TAG};
use castle_defence_engine::{
    visuals::{RoundedRectangle, Text},
    Layer,
};
use castle_defence_rendering::{Color, Font, FontWeight};

/// Tag of the game title.
pub const TITLE: &str = "TITLE";
/// Tag of the start button.
pub const START_BUTTON: &str = "START_BUTTON";
/// Tag of the start button caption.
pub const START_BUTTON_TEXT: &str = "START_BUTTON_TEXT";

const FONT_FAMILY: &str = "MedievalSharp";
const HOVER_FILL: Color = Color::from_rgb_u8(0x56, 0x79, 0x5e);

pub(crate) fn populate(layer: &mut Layer) {
    let _ = layer.add_entity(Box::new(
        Text::new(
            TITLE,
            "Castle Defence",
            Font::new(50.0, FontWeight::Normal, FONT_FAMILY),
            Vector2::new(470.0, 200.0),
        )
        .with_fill(Color::BLACK),
    ));
    let _ = layer.add_entity(Box::new(
        RoundedRectangle::new(
            START_BUTTON,
            Vector2::new(150.0, 35.0),
            8.0,
            Vector2::new(560.0, 250.0),
        )
        .with_stroke(Color::BLACK)
        .with_fill(Color::WHITE)
        .with_hover_fill(HOVER_FILL)
        .with_label(START_BUTTON_TEXT)
        .on_click(
            GAME_MANAGER_TAG,
            Command::ChangeState {
                state: GameState::InGame,
            },
        ),
    ));
    let _ = layer.add_entity(Box::new(
        Text::new(
            START_BUTTON_TEXT,
            "Start Game",
            Font::new(20.0, FontWeight::Bold, FONT_FAMILY),
            Vector2::new(580.0, 275.0),
        )
        .with_fill(Color::BLACK)
        .with_highlight(Color::WHITE),
    ));
}
