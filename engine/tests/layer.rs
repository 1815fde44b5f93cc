use std::collections::VecDeque;

use castle_defence_core::{Command, Vector2, GAME_MANAGER_TAG};
use castle_defence_engine::{
    visuals::{RoundedRectangle, Route, Text},
    Entity, Layer, Stage,
};
use castle_defence_rendering::{
    Color, DrawCommand, Font, FontWeight, PointerEvent, RecordingCanvas,
};

fn recorded_layer() -> (Layer, RecordingCanvas) {
    let canvas = RecordingCanvas::new(1280, 720);
    (
        Layer::new("background-layer", Some(Box::new(canvas.clone()))),
        canvas,
    )
}

fn caption(tag: &str) -> Box<Text> {
    Box::new(Text::new(
        tag,
        "Skip",
        Font::new(16.0, FontWeight::Bold, "MedievalSharp"),
        Vector2::new(270.0, 28.0),
    ))
}

#[test]
fn clean_layer_leaves_surface_untouched() {
    let (mut layer, canvas) = recorded_layer();
    assert!(layer.add_entity(caption("LABEL")));
    layer.mark_dirty();
    layer.update(0.0);
    let drawn = canvas.commands();
    let clears = canvas.clear_count();

    for _ in 0..5 {
        layer.update(0.016);
    }
    assert_eq!(canvas.commands(), drawn);
    assert_eq!(canvas.clear_count(), clears);
}

#[test]
fn dirty_layer_redraws_in_insertion_order_once() {
    let (mut layer, canvas) = recorded_layer();
    assert!(layer.add_entity(Box::new(Route::new(
        "R_EASY",
        vec![Vector2::new(0.0, 360.0), Vector2::new(300.0, 360.0)],
        50.0,
    ))));
    assert!(layer.add_entity(caption("LABEL")));
    layer.mark_dirty();
    layer.update(0.0);

    assert!(!layer.needs_redraw());
    assert_eq!(canvas.clear_count(), 1);
    let kinds: Vec<&str> = canvas
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::Polyline { .. } => "route",
            DrawCommand::Text { .. } => "text",
            DrawCommand::RoundedRect(_) => "rect",
        })
        .collect();
    assert_eq!(kinds, vec!["route", "route", "text"]);
}

#[test]
fn layer_without_surface_still_clears_its_flag() {
    let mut layer = Layer::new("ui-layer", None);
    assert!(layer.add_entity(caption("LABEL")));
    layer.mark_dirty();
    layer.update(0.0);
    assert!(!layer.needs_redraw());
}

#[test]
fn duplicate_visual_is_rejected() {
    let (mut layer, _canvas) = recorded_layer();
    assert!(layer.add_entity(caption("LABEL")));
    assert!(!layer.add_entity(caption("LABEL")));
    assert_eq!(layer.len(), 1);
}

#[test]
fn untagged_visuals_get_distinct_generated_tags() {
    let (mut layer, _canvas) = recorded_layer();
    let points = vec![Vector2::new(0.0, 360.0), Vector2::new(300.0, 360.0)];
    let first = Route::untagged(points.clone(), 50.0);
    let second = Route::untagged(points, 50.0);
    let first_tag = first.tag().clone();
    let second_tag = second.tag().clone();
    assert_ne!(first_tag, second_tag);

    assert!(layer.add_entity(Box::new(first)));
    assert!(layer.add_entity(Box::new(second)));
    assert_eq!(layer.len(), 2);
    for tag in [&first_tag, &second_tag] {
        let found = layer.entity(tag.as_str()).expect("generated tag resolves");
        assert_eq!(found.tag(), tag);
    }
}

#[test]
fn remove_is_idempotent_and_leaves_flag_alone() {
    let (mut layer, _canvas) = recorded_layer();
    assert!(layer.add_entity(caption("LABEL")));
    assert!(layer.remove_entity("LABEL"));
    assert!(!layer.remove_entity("LABEL"));
    assert!(!layer.contains("LABEL"));
    assert!(!layer.needs_redraw());
}

fn drawn_colors(canvas: &RecordingCanvas) -> Vec<Color> {
    canvas
        .commands()
        .into_iter()
        .map(|command| match command {
            DrawCommand::Text { color, .. } | DrawCommand::Polyline { color, .. } => color,
            DrawCommand::RoundedRect(rect) => rect.fill,
        })
        .collect()
}

#[test]
fn hover_highlights_linked_label_and_restores_it() {
    let (mut layer, canvas) = recorded_layer();
    let hover = Color::from_rgb_u8(0x56, 0x79, 0x5e);
    assert!(layer.add_entity(Box::new(
        RoundedRectangle::new(
            "BUTTON",
            Vector2::new(100.0, 25.0),
            8.0,
            Vector2::new(240.0, 10.0),
        )
        .with_hover_fill(hover)
        .with_label("LABEL"),
    )));
    assert!(layer.add_entity(caption("LABEL")));

    let mut stage = Stage::new(1280, 720);
    let mut outbox = VecDeque::new();
    layer.handle_pointer(
        PointerEvent::Move(Vector2::new(250.0, 20.0)),
        &mut stage,
        &mut outbox,
    );
    assert!(layer.needs_redraw());
    layer.update(0.0);
    assert_eq!(drawn_colors(&canvas), vec![hover, Color::WHITE]);

    layer.handle_pointer(
        PointerEvent::Move(Vector2::new(250.0, 30.0)),
        &mut stage,
        &mut outbox,
    );
    assert!(!layer.needs_redraw());

    layer.handle_pointer(
        PointerEvent::Move(Vector2::new(0.0, 0.0)),
        &mut stage,
        &mut outbox,
    );
    assert!(layer.needs_redraw());
    layer.update(0.0);
    assert_eq!(drawn_colors(&canvas), vec![Color::WHITE, Color::BLACK]);
    assert!(outbox.is_empty());
}

#[test]
fn pointer_down_collects_every_hit() {
    let (mut layer, _canvas) = recorded_layer();
    for tag in ["A", "B"] {
        assert!(layer.add_entity(Box::new(
            RoundedRectangle::new(tag, Vector2::new(10.0, 10.0), 2.0, Vector2::ZERO)
                .on_click(GAME_MANAGER_TAG, Command::SkipWaveIdleTimer),
        )));
    }
    assert!(layer.add_entity(Box::new(
        RoundedRectangle::new("FAR", Vector2::new(10.0, 10.0), 2.0, Vector2::new(100.0, 100.0))
            .on_click(GAME_MANAGER_TAG, Command::SkipWaveIdleTimer),
    )));

    let mut stage = Stage::new(1280, 720);
    let mut outbox = VecDeque::new();
    layer.handle_pointer(
        PointerEvent::Down(Vector2::new(5.0, 5.0)),
        &mut stage,
        &mut outbox,
    );
    assert_eq!(outbox.len(), 2);
    assert!(outbox
        .iter()
        .all(|envelope| envelope.target == GAME_MANAGER_TAG));
}
