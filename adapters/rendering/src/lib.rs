#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Castle Defence adapters.
//!
//! The engine only ever talks to a [`Canvas`] handed out by a
//! [`SurfaceProvider`]. Backends own the platform loop and drive a
//! [`FrameApp`] once per displayed frame.

mod headless;
mod recording;

use anyhow::Result as AnyResult;
use castle_defence_core::Vector2;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use thiserror::Error;

pub use headless::{HeadlessBackend, HeadlessReport};
pub use recording::{DrawCommand, RecordingCanvas, RecordingSurfaces};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(0xff, 0xff, 0xff);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Parses a `#rrggbb` hex string.
    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the color as a `#rrggbb` hex string, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Error returned when a color string is not `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected a #rrggbb color, received {value:?}")]
pub struct ColorParseError {
    value: String,
}

/// Stroke weight of a font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Bold => f.write_str("bold"),
        }
    }
}

/// Font used to draw text.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Size in pixels.
    pub size: f32,
    /// Stroke weight.
    pub weight: FontWeight,
    /// Family name. Backends without font loading fall back to a built-in face.
    pub family: String,
}

impl Font {
    /// Creates a new font descriptor.
    #[must_use]
    pub fn new(size: f32, weight: FontWeight, family: impl Into<String>) -> Self {
        Self {
            size,
            weight,
            family: family.into(),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}

/// Rounded rectangle with a stroked outline and a solid fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    /// Top-left corner.
    pub position: Vector2,
    /// Width and height.
    pub size: Vector2,
    /// Corner radius applied to all four corners.
    pub radius: f32,
    /// Outline thickness.
    pub line_width: f32,
    /// Outline color.
    pub stroke: Color,
    /// Interior color.
    pub fill: Color,
}

/// Retained 2D drawing surface owned by a single layer.
///
/// Pixels persist between frames until [`Canvas::clear`] is called.
pub trait Canvas: fmt::Debug {
    /// Pixel dimensions of the surface.
    fn size(&self) -> (u32, u32);

    /// Erases the whole surface.
    fn clear(&mut self);

    /// Sets the color shown behind cleared pixels. `None` leaves them transparent.
    fn set_background(&mut self, color: Option<Color>);

    /// Draws `text` with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Vector2, font: &Font, color: Color);

    /// Draws a rounded rectangle.
    fn draw_rounded_rect(&mut self, rect: &RoundedRect);

    /// Strokes connected line segments through `points` with round caps.
    fn stroke_polyline(&mut self, points: &[Vector2], width: f32, color: Color);
}

/// Requested layer surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSpec {
    /// Identifier of the surface element.
    pub id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Stacking order; higher values are composited on top.
    pub z_index: i32,
}

/// Requested stage element that contains every layer and receives pointer input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageSpec {
    /// Identifier of the stage element.
    pub id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Creates drawing surfaces for the engine.
pub trait SurfaceProvider {
    /// Produces a drawing surface for one layer.
    fn create_layer(&mut self, spec: &LayerSpec) -> Result<Box<dyn Canvas>, SurfaceError>;

    /// Attaches the stage to its hosting container.
    fn attach_stage(&mut self, spec: &StageSpec) -> Result<(), SurfaceError>;
}

/// Errors reported while provisioning drawing surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The container that should host the stage does not exist.
    #[error("stage container for {stage:?} is missing")]
    ContainerMissing {
        /// Stage that could not be attached.
        stage: String,
    },
    /// The platform could not produce a 2D context for a layer.
    #[error("drawing surface {layer:?} is unavailable")]
    Unavailable {
        /// Layer that has no surface.
        layer: String,
    },
}

/// Pointer input observed on the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to the contained stage position.
    Move(Vector2),
    /// Primary button pressed at the contained stage position.
    Down(Vector2),
}

impl PointerEvent {
    /// Stage position of the event.
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        match self {
            Self::Move(position) | Self::Down(position) => *position,
        }
    }

    /// Listener category the event is routed to.
    #[must_use]
    pub const fn kind(&self) -> PointerKind {
        match self {
            Self::Move(_) => PointerKind::Move,
            Self::Down(_) => PointerKind::Down,
        }
    }
}

/// Listener category for pointer events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer movement.
    Move,
    /// Primary button press.
    Down,
}

/// Input snapshot gathered by adapters before a frame runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer events in the order they were observed.
    pub pointer: Vec<PointerEvent>,
}

/// Whether the frame loop should keep scheduling frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule the next frame.
    Continue,
    /// Stop the loop; no further frames are requested.
    Stopped,
}

/// Application driven by a rendering backend.
pub trait FrameApp {
    /// Builds the application's surfaces before the first frame.
    fn start(&mut self, surfaces: &mut dyn SurfaceProvider) -> AnyResult<()>;

    /// Runs one frame. `timestamp` is measured from an arbitrary fixed origin.
    fn frame(&mut self, timestamp: Duration, input: &FrameInput) -> FrameStatus;

    /// Text overlay shown on top of every layer, such as an FPS readout.
    fn overlay(&self) -> Option<&str> {
        None
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Solid color used behind all layers.
    pub clear_color: Color,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, width: u32, height: u32, clear_color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            width,
            height,
            clear_color,
        }
    }
}

/// Rendering backend capable of running a Castle Defence frame loop.
pub trait RenderingBackend {
    /// Starts `app` and drives it one frame per display refresh until it
    /// reports [`FrameStatus::Stopped`] or the backend is asked to exit.
    fn run<A>(self, presentation: Presentation, app: A) -> AnyResult<()>
    where
        A: FrameApp + 'static;
}
