//! Replays recorded layer commands through macroquad's immediate-mode shapes.

use std::f32::consts::{FRAC_PI_2, PI};

use castle_defence_core::Vector2;
use castle_defence_rendering::{Color, DrawCommand, FontWeight, RoundedRect};
use glam::Vec2;
use macroquad::{
    math::vec2,
    shapes::{draw_circle, draw_line, draw_rectangle, draw_triangle},
    text::draw_text,
};

use crate::Viewport;

const CORNER_SEGMENTS: usize = 6;

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

/// Outline of a rounded rectangle, clockwise from the end of the top edge.
///
/// The radius is clamped to half the shorter side.
#[must_use]
pub fn rounded_rect_outline(rect: &RoundedRect, segments_per_corner: usize) -> Vec<Vector2> {
    let half_side = rect.size.x.min(rect.size.y) / 2.0;
    let radius = rect.radius.max(0.0).min(half_side);
    let min = Vec2::from(rect.position);
    let max = min + Vec2::from(rect.size);
    let corners = [
        (Vec2::new(max.x - radius, min.y + radius), -FRAC_PI_2),
        (Vec2::new(max.x - radius, max.y - radius), 0.0),
        (Vec2::new(min.x + radius, max.y - radius), FRAC_PI_2),
        (Vec2::new(min.x + radius, min.y + radius), PI),
    ];

    let segments = segments_per_corner.max(1);
    let mut points = Vec::with_capacity(corners.len() * (segments + 1));
    for (center, start) in corners {
        for step in 0..=segments {
            let angle = start + FRAC_PI_2 * step as f32 / segments as f32;
            let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
            points.push(Vector2::from(center + offset));
        }
    }
    points
}

pub(crate) fn fill_background(color: Color, viewport: &Viewport, logical: (u32, u32)) {
    let size = viewport.to_window(Vector2::new(logical.0 as f32, logical.1 as f32));
    draw_rectangle(0.0, 0.0, size.x, size.y, to_macroquad_color(color));
}

pub(crate) fn replay(commands: &[DrawCommand], viewport: &Viewport) {
    for command in commands {
        match command {
            DrawCommand::Text {
                text,
                position,
                font,
                color,
            } => {
                let origin = viewport.to_window(*position);
                let size = font.size * viewport.scale().y;
                let color = to_macroquad_color(*color);
                let _ = draw_text(text, origin.x, origin.y, size, color);
                if font.weight == FontWeight::Bold {
                    let _ = draw_text(text, origin.x + 1.0, origin.y, size, color);
                }
            }
            DrawCommand::RoundedRect(rect) => draw_rounded_rect(rect, viewport),
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => draw_polyline(
                points,
                *width * viewport.scale().min_element(),
                *color,
                viewport,
            ),
        }
    }
}

fn draw_rounded_rect(rect: &RoundedRect, viewport: &Viewport) {
    let outline: Vec<Vec2> = rounded_rect_outline(rect, CORNER_SEGMENTS)
        .into_iter()
        .map(|point| viewport.to_window(point))
        .collect();
    let center = viewport.to_window(Vector2::from(
        Vec2::from(rect.position) + Vec2::from(rect.size) / 2.0,
    ));

    let fill = to_macroquad_color(rect.fill);
    for (index, point) in outline.iter().enumerate() {
        let next = outline[(index + 1) % outline.len()];
        draw_triangle(
            vec2(center.x, center.y),
            vec2(point.x, point.y),
            vec2(next.x, next.y),
            fill,
        );
    }

    let stroke = to_macroquad_color(rect.stroke);
    let thickness = rect.line_width * viewport.scale().min_element();
    for (index, point) in outline.iter().enumerate() {
        let next = outline[(index + 1) % outline.len()];
        draw_line(point.x, point.y, next.x, next.y, thickness, stroke);
    }
}

fn draw_polyline(points: &[Vector2], width: f32, color: Color, viewport: &Viewport) {
    let color = to_macroquad_color(color);
    let window: Vec<Vec2> = points
        .iter()
        .map(|point| viewport.to_window(*point))
        .collect();
    for pair in window.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, width, color);
    }
    for point in &window {
        draw_circle(point.x, point.y, width / 2.0, color);
    }
}
