use castle_defence_core::{Tag, Vector2};
use castle_defence_rendering::{Canvas, Color, Font};

use crate::{Entity, Styled, TextContent, Visual};

/// Single line of text drawn from its baseline.
#[derive(Clone, Debug)]
pub struct Text {
    tag: Tag,
    text: String,
    position: Vector2,
    font: Font,
    fill: Color,
    original_fill: Color,
    highlight: Color,
}

impl Text {
    /// Creates black text. Highlighting turns it white unless overridden.
    #[must_use]
    pub fn new(
        tag: impl Into<Tag>,
        text: impl Into<String>,
        font: Font,
        position: Vector2,
    ) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            position,
            font,
            fill: Color::BLACK,
            original_fill: Color::BLACK,
            highlight: Color::WHITE,
        }
    }

    /// Creates black text under a generated tag.
    #[must_use]
    pub fn untagged(text: impl Into<String>, font: Font, position: Vector2) -> Self {
        Self::new(Tag::random(), text, font, position)
    }

    /// Uses `color` as the fill the text is created and restored with.
    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = color;
        self.original_fill = color;
        self
    }

    /// Uses `color` while the text is highlighted.
    #[must_use]
    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = color;
        self
    }

    /// Current fill color.
    #[must_use]
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Baseline start of the text.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Font the text is drawn with.
    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }
}

impl Entity for Text {
    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn styled_mut(&mut self) -> Option<&mut dyn Styled> {
        Some(self)
    }

    fn text_content(&self) -> Option<&dyn TextContent> {
        Some(self)
    }

    fn text_content_mut(&mut self) -> Option<&mut dyn TextContent> {
        Some(self)
    }
}

impl Visual for Text {
    fn update(&mut self, _elapsed: f32, canvas: &mut dyn Canvas) {
        canvas.fill_text(&self.text, self.position, &self.font, self.fill);
    }
}

impl Styled for Text {
    fn set_fill_style(&mut self, color: Color) {
        self.fill = color;
    }

    fn highlight(&mut self) {
        self.fill = self.highlight;
    }

    fn restore(&mut self) {
        self.fill = self.original_fill;
    }
}

impl TextContent for Text {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
