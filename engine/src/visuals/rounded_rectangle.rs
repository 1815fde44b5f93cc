use castle_defence_core::{Command, Envelope, Tag, Vector2};
use castle_defence_rendering::{Canvas, Color, RoundedRect};

use crate::{Entity, HitTarget, Hoverable, Styled, Visual};

const LINE_WIDTH: f32 = 2.0;

/// Rectangle with rounded corners that can react to hover and clicks.
#[derive(Clone, Debug)]
pub struct RoundedRectangle {
    tag: Tag,
    position: Vector2,
    size: Vector2,
    radius: f32,
    stroke: Color,
    fill: Color,
    original_stroke: Color,
    original_fill: Color,
    hover_fill: Option<Color>,
    label: Option<Tag>,
    on_click: Option<Envelope>,
    hovered: bool,
}

impl RoundedRectangle {
    /// Creates a white rectangle with a black outline.
    #[must_use]
    pub fn new(tag: impl Into<Tag>, size: Vector2, radius: f32, position: Vector2) -> Self {
        Self {
            tag: tag.into(),
            position,
            size,
            radius,
            stroke: Color::BLACK,
            fill: Color::WHITE,
            original_stroke: Color::BLACK,
            original_fill: Color::WHITE,
            hover_fill: None,
            label: None,
            on_click: None,
            hovered: false,
        }
    }

    /// Creates a rectangle under a generated tag.
    #[must_use]
    pub fn untagged(size: Vector2, radius: f32, position: Vector2) -> Self {
        Self::new(Tag::random(), size, radius, position)
    }

    /// Outline color the rectangle is created and restored with.
    #[must_use]
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = color;
        self.original_stroke = color;
        self
    }

    /// Fill color the rectangle is created and restored with.
    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = color;
        self.original_fill = color;
        self
    }

    /// Fill applied while the pointer is inside the rectangle.
    #[must_use]
    pub fn with_hover_fill(mut self, color: Color) -> Self {
        self.hover_fill = Some(color);
        self
    }

    /// Sibling highlighted together with the rectangle, usually its caption.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Tag>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Command sent to `target` when the rectangle is clicked.
    #[must_use]
    pub fn on_click(mut self, target: impl Into<Tag>, command: Command) -> Self {
        self.on_click = Some(Envelope::new(target, command));
        self
    }

    /// Replaces the outline color.
    pub fn set_stroke_style(&mut self, color: Color) {
        self.stroke = color;
    }

    /// Current fill color.
    #[must_use]
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Current outline color.
    #[must_use]
    pub fn stroke(&self) -> Color {
        self.stroke
    }
}

impl Entity for RoundedRectangle {
    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn hit_target(&self) -> Option<&dyn HitTarget> {
        Some(self)
    }

    fn hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        if self.hover_fill.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn styled_mut(&mut self) -> Option<&mut dyn Styled> {
        Some(self)
    }
}

impl Visual for RoundedRectangle {
    fn update(&mut self, _elapsed: f32, canvas: &mut dyn Canvas) {
        canvas.draw_rounded_rect(&RoundedRect {
            position: self.position,
            size: self.size,
            radius: self.radius,
            line_width: LINE_WIDTH,
            stroke: self.stroke,
            fill: self.fill,
        });
    }
}

impl HitTarget for RoundedRectangle {
    fn contains(&self, point: Vector2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    fn click(&self) -> Option<Envelope> {
        self.on_click.clone()
    }
}

impl Styled for RoundedRectangle {
    fn set_fill_style(&mut self, color: Color) {
        self.fill = color;
    }

    fn highlight(&mut self) {
        if let Some(color) = self.hover_fill {
            self.fill = color;
        }
    }

    fn restore(&mut self) {
        self.stroke = self.original_stroke;
        self.fill = self.original_fill;
        self.hovered = false;
    }
}

impl Hoverable for RoundedRectangle {
    fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn on_hover(&mut self) {
        self.highlight();
        self.hovered = true;
    }

    fn linked_label(&self) -> Option<&Tag> {
        self.label.as_ref()
    }
}
