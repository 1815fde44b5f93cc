//! In-memory drawing surfaces used by headless runs and tests.

use std::{cell::RefCell, rc::Rc};

use castle_defence_core::Vector2;

use crate::{Canvas, Color, Font, LayerSpec, RoundedRect, StageSpec, SurfaceError, SurfaceProvider};

/// Draw operation captured by a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Text drawn at a baseline position.
    Text {
        /// Drawn string.
        text: String,
        /// Baseline start.
        position: Vector2,
        /// Font used.
        font: Font,
        /// Fill color.
        color: Color,
    },
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
    /// Stroked polyline.
    Polyline {
        /// Points joined by the stroke.
        points: Vec<Vector2>,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
    },
}

#[derive(Debug, Default)]
struct Recorded {
    width: u32,
    height: u32,
    background: Option<Color>,
    commands: Vec<DrawCommand>,
    clears: u32,
}

/// Canvas that records draw operations instead of rasterising them.
///
/// Clones share the same recording, so a test can keep a handle to a canvas
/// after moving it into a layer.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    recorded: Rc<RefCell<Recorded>>,
}

impl RecordingCanvas {
    /// Creates an empty recording surface with the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            recorded: Rc::new(RefCell::new(Recorded {
                width,
                height,
                ..Recorded::default()
            })),
        }
    }

    /// Operations drawn since the last clear, in draw order.
    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.recorded.borrow().commands.clone()
    }

    /// Number of times the surface has been cleared.
    #[must_use]
    pub fn clear_count(&self) -> u32 {
        self.recorded.borrow().clears
    }

    /// Background color shown behind cleared pixels.
    #[must_use]
    pub fn background(&self) -> Option<Color> {
        self.recorded.borrow().background
    }

    /// Strings drawn since the last clear, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.recorded
            .borrow()
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        let recorded = self.recorded.borrow();
        (recorded.width, recorded.height)
    }

    fn clear(&mut self) {
        let mut recorded = self.recorded.borrow_mut();
        recorded.commands.clear();
        recorded.clears += 1;
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.recorded.borrow_mut().background = color;
    }

    fn fill_text(&mut self, text: &str, position: Vector2, font: &Font, color: Color) {
        self.recorded.borrow_mut().commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            font: font.clone(),
            color,
        });
    }

    fn draw_rounded_rect(&mut self, rect: &RoundedRect) {
        self.recorded
            .borrow_mut()
            .commands
            .push(DrawCommand::RoundedRect(*rect));
    }

    fn stroke_polyline(&mut self, points: &[Vector2], width: f32, color: Color) {
        self.recorded
            .borrow_mut()
            .commands
            .push(DrawCommand::Polyline {
                points: points.to_vec(),
                width,
                color,
            });
    }
}

/// Surface provider handing out [`RecordingCanvas`] layers.
#[derive(Debug)]
pub struct RecordingSurfaces {
    layers: Vec<(LayerSpec, RecordingCanvas)>,
    container_present: bool,
    unavailable: Vec<String>,
}

impl Default for RecordingSurfaces {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            container_present: true,
            unavailable: Vec::new(),
        }
    }
}

impl RecordingSurfaces {
    /// Creates a provider whose stage container exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a document without a stage container.
    #[must_use]
    pub fn without_container(mut self) -> Self {
        self.container_present = false;
        self
    }

    /// Simulates a platform that cannot create the layer with `id`.
    #[must_use]
    pub fn with_unavailable_layer(mut self, id: impl Into<String>) -> Self {
        self.unavailable.push(id.into());
        self
    }

    /// Shared handle to the canvas created for the layer with `id`.
    #[must_use]
    pub fn canvas(&self, id: &str) -> Option<RecordingCanvas> {
        self.layers
            .iter()
            .find(|(spec, _)| spec.id == id)
            .map(|(_, canvas)| canvas.clone())
    }

    /// Specs of every created layer, in creation order.
    pub fn layer_specs(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().map(|(spec, _)| spec)
    }
}

impl SurfaceProvider for RecordingSurfaces {
    fn create_layer(&mut self, spec: &LayerSpec) -> Result<Box<dyn Canvas>, SurfaceError> {
        if self.unavailable.iter().any(|id| *id == spec.id) {
            return Err(SurfaceError::Unavailable {
                layer: spec.id.clone(),
            });
        }

        let canvas = RecordingCanvas::new(spec.width, spec.height);
        self.layers.push((spec.clone(), canvas.clone()));
        Ok(Box::new(canvas))
    }

    fn attach_stage(&mut self, spec: &StageSpec) -> Result<(), SurfaceError> {
        if self.container_present {
            Ok(())
        } else {
            Err(SurfaceError::ContainerMissing {
                stage: spec.id.clone(),
            })
        }
    }
}
