use castle_defence_core::{Tag, Vector2};
use castle_defence_rendering::{Canvas, Color};

use crate::{Entity, Visual};

const FILL: Color = Color::from_rgb_u8(0xd9, 0xd9, 0xd9);
const FILL_RATIO: f32 = 0.85;

/// Path drawn as a black border with a light grey center.
#[derive(Clone, Debug)]
pub struct Route {
    tag: Tag,
    points: Vec<Vector2>,
    width: f32,
}

impl Route {
    /// Creates a route through `points` that is `width` pixels wide.
    #[must_use]
    pub fn new(tag: impl Into<Tag>, points: Vec<Vector2>, width: f32) -> Self {
        Self {
            tag: tag.into(),
            points,
            width,
        }
    }

    /// Creates a route under a generated tag.
    #[must_use]
    pub fn untagged(points: Vec<Vector2>, width: f32) -> Self {
        Self::new(Tag::random(), points, width)
    }

    /// Ordered points of the route.
    #[must_use]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Border width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Entity for Route {
    fn tag(&self) -> &Tag {
        &self.tag
    }
}

impl Visual for Route {
    fn update(&mut self, _elapsed: f32, canvas: &mut dyn Canvas) {
        canvas.stroke_polyline(&self.points, self.width, Color::BLACK);
        canvas.stroke_polyline(&self.points, self.width * FILL_RATIO, FILL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_defence_rendering::{DrawCommand, RecordingCanvas};

    #[test]
    fn draws_border_before_fill() {
        let recording = RecordingCanvas::new(100, 100);
        let mut canvas = recording.clone();
        let mut route = Route::new(
            "R",
            vec![Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0)],
            50.0,
        );
        route.update(0.0, &mut canvas);

        let passes: Vec<(f32, Color)> = recording
            .commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::Polyline { width, color, .. } => Some((width, color)),
                _ => None,
            })
            .collect();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0], (50.0, Color::BLACK));
        assert!((passes[1].0 - 42.5).abs() < 1e-4);
        assert_eq!(passes[1].1, FILL);
    }
}
