use std::{cell::RefCell, rc::Rc, time::Duration};

use castle_defence_core::{Command, EngineConfig, GameState, Tag, Vector2};
use castle_defence_engine::{
    visuals::{RoundedRectangle, Text},
    Context, Cursor, Engine, EngineError, Entity, RootEntity, BG_LAYER, GAME_LAYER, UI_LAYER,
};
use castle_defence_rendering::{Font, FontWeight, FrameStatus, PointerEvent, RecordingSurfaces};

#[derive(Debug, Default)]
struct Journal {
    updates: Vec<f32>,
    commands: Vec<Command>,
    destroyed: u32,
}

#[derive(Debug)]
struct Recorder {
    tag: Tag,
    journal: Rc<RefCell<Journal>>,
}

impl Recorder {
    fn new(tag: &str) -> (Self, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        (
            Self {
                tag: Tag::new(tag),
                journal: Rc::clone(&journal),
            },
            journal,
        )
    }
}

impl Entity for Recorder {
    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn destroy(&mut self) {
        self.journal.borrow_mut().destroyed += 1;
    }
}

impl RootEntity for Recorder {
    fn update(&mut self, elapsed: f32, _ctx: &mut Context) {
        self.journal.borrow_mut().updates.push(elapsed);
    }

    fn handle(&mut self, command: &Command, _ctx: &mut Context) {
        self.journal.borrow_mut().commands.push(*command);
    }
}

fn started_engine() -> (Engine, RecordingSurfaces) {
    let mut engine = Engine::new();
    engine
        .load_configuration(EngineConfig::default())
        .expect("default configuration is valid");
    let mut surfaces = RecordingSurfaces::new();
    engine.start(&mut surfaces).expect("engine starts");
    (engine, surfaces)
}

fn button(tag: &str, target: &str) -> Box<RoundedRectangle> {
    Box::new(
        RoundedRectangle::new(
            tag,
            Vector2::new(100.0, 40.0),
            8.0,
            Vector2::new(10.0, 10.0),
        )
        .on_click(
            target,
            Command::ChangeState {
                state: GameState::InGame,
            },
        ),
    )
}

#[test]
fn start_requires_configuration() {
    let mut engine = Engine::new();
    let mut surfaces = RecordingSurfaces::new();
    assert_eq!(engine.start(&mut surfaces), Err(EngineError::NotConfigured));
}

#[test]
fn second_start_is_rejected() {
    let (mut engine, mut surfaces) = started_engine();
    assert_eq!(
        engine.start(&mut surfaces),
        Err(EngineError::AlreadyStarted)
    );
}

#[test]
fn start_creates_layers_in_stacking_order() {
    let (engine, surfaces) = started_engine();
    let specs: Vec<(String, i32)> = surfaces
        .layer_specs()
        .map(|spec| (spec.id.clone(), spec.z_index))
        .collect();
    assert_eq!(
        specs,
        vec![
            (BG_LAYER.to_owned(), 10),
            (GAME_LAYER.to_owned(), 20),
            (UI_LAYER.to_owned(), 30),
        ]
    );
    let tags: Vec<&str> = engine.context().layer_tags().map(Tag::as_str).collect();
    assert_eq!(tags, vec![BG_LAYER, GAME_LAYER, UI_LAYER]);
    assert_eq!(engine.context().stage().listener_count(), 2);
}

#[test]
fn missing_container_does_not_fail_start() {
    let mut engine = Engine::new();
    engine
        .load_configuration(EngineConfig::default())
        .expect("default configuration is valid");
    let mut surfaces = RecordingSurfaces::new().without_container();
    engine
        .start(&mut surfaces)
        .expect("start absorbs a missing container");

    assert!(!engine.context().stage().is_attached());
    assert_eq!(engine.context().stage().listener_count(), 0);
    assert_eq!(engine.tick(Duration::ZERO), FrameStatus::Continue);
}

#[test]
fn unavailable_surface_leaves_layer_without_drawing() {
    let mut engine = Engine::new();
    engine
        .load_configuration(EngineConfig::default())
        .expect("default configuration is valid");
    let mut surfaces = RecordingSurfaces::new().with_unavailable_layer(UI_LAYER);
    engine
        .start(&mut surfaces)
        .expect("start absorbs missing surfaces");

    let ui = engine.context().layer(UI_LAYER).expect("layer still exists");
    assert!(!ui.has_surface());
    let background = engine.context().layer(BG_LAYER).expect("background exists");
    assert!(background.has_surface());
}

#[test]
fn tick_updates_root_entities_with_elapsed_seconds() {
    let (mut engine, _surfaces) = started_engine();
    let (recorder, journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(recorder)));

    assert_eq!(
        engine.tick(Duration::from_millis(1_000)),
        FrameStatus::Continue
    );
    assert_eq!(
        engine.tick(Duration::from_millis(1_500)),
        FrameStatus::Continue
    );

    let updates = journal.borrow().updates.clone();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], 0.0);
    assert!((updates[1] - 0.5).abs() < 1e-6);
}

#[test]
fn empty_registry_ticks_without_effect() {
    let (mut engine, _surfaces) = started_engine();
    assert_eq!(engine.tick(Duration::ZERO), FrameStatus::Continue);
    assert_eq!(engine.entity_count(), 0);
}

#[test]
fn duplicate_root_tag_keeps_the_first_entity() {
    let (mut engine, _surfaces) = started_engine();
    let (first, first_journal) = Recorder::new("RECORDER");
    let (second, second_journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(first)));
    assert!(!engine.add_entity(Box::new(second)));

    let _ = engine.tick(Duration::ZERO);
    assert_eq!(first_journal.borrow().updates.len(), 1);
    assert!(second_journal.borrow().updates.is_empty());
}

#[test]
fn removing_twice_is_a_no_op() {
    let (mut engine, _surfaces) = started_engine();
    let (recorder, journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(recorder)));

    assert!(engine.remove_entity("RECORDER"));
    assert!(!engine.remove_entity("RECORDER"));
    assert_eq!(journal.borrow().destroyed, 1);
    assert!(engine.find_entity_by_tag("RECORDER").is_none());
}

#[test]
fn find_falls_through_to_the_background_layer_only() {
    let (mut engine, _surfaces) = started_engine();
    let (recorder, _journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(recorder)));
    let font = Font::new(20.0, FontWeight::Bold, "MedievalSharp");
    let title = Text::new("TITLE", "Castle Defence", font.clone(), Vector2::ZERO);
    let context = engine.context_mut();
    assert!(context
        .layer_mut(BG_LAYER)
        .expect("background layer")
        .add_entity(Box::new(title)));
    assert!(context
        .layer_mut(UI_LAYER)
        .expect("ui layer")
        .add_entity(Box::new(Text::new("HIDDEN", "x", font, Vector2::ZERO))));

    let recorder = engine.find_entity_by_tag("RECORDER").expect("root entity");
    assert_eq!(recorder.tag(), "RECORDER");
    let title = engine
        .find_entity_by_tag("TITLE")
        .and_then(|title| title.text_content())
        .map(|content| content.text().to_owned());
    assert_eq!(title.as_deref(), Some("Castle Defence"));
    assert!(engine.find_entity_by_tag("HIDDEN").is_none());
    assert!(engine.find_entity_by_tag("MISSING").is_none());
}

#[test]
fn overlapping_clicks_all_reach_their_targets_next_frame() {
    let (mut engine, _surfaces) = started_engine();
    let (recorder, journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(recorder)));
    let background = engine
        .context_mut()
        .background_layer_mut()
        .expect("background layer");
    assert!(background.add_entity(button("FIRST", "RECORDER")));
    assert!(background.add_entity(button("SECOND", "RECORDER")));

    engine.dispatch_pointer(PointerEvent::Down(Vector2::new(50.0, 20.0)));
    assert_eq!(engine.context().pending_commands(), 2);
    assert!(journal.borrow().commands.is_empty());

    let _ = engine.tick(Duration::ZERO);
    assert_eq!(journal.borrow().commands.len(), 2);
    assert_eq!(engine.context().pending_commands(), 0);
}

#[test]
fn commands_for_unknown_targets_are_dropped() {
    let (mut engine, _surfaces) = started_engine();
    let background = engine
        .context_mut()
        .background_layer_mut()
        .expect("background layer");
    assert!(background.add_entity(button("ORPHAN", "NOBODY")));

    engine.dispatch_pointer(PointerEvent::Down(Vector2::new(10.0, 10.0)));
    assert_eq!(engine.tick(Duration::ZERO), FrameStatus::Continue);
    assert_eq!(engine.context().pending_commands(), 0);
}

#[test]
fn hover_switches_cursor_and_marks_layer_dirty() {
    let (mut engine, _surfaces) = started_engine();
    let background = engine
        .context_mut()
        .background_layer_mut()
        .expect("background layer");
    assert!(background.add_entity(Box::new(
        RoundedRectangle::new("BUTTON", Vector2::new(100.0, 40.0), 8.0, Vector2::ZERO)
            .with_hover_fill(castle_defence_rendering::Color::WHITE)
            .with_label("CAPTION"),
    )));
    assert!(background.add_entity(Box::new(Text::new(
        "CAPTION",
        "Go",
        Font::new(20.0, FontWeight::Bold, "MedievalSharp"),
        Vector2::new(10.0, 25.0),
    ))));
    background.update(0.0);

    engine.dispatch_pointer(PointerEvent::Move(Vector2::new(20.0, 20.0)));
    assert_eq!(engine.context().stage().cursor(), Cursor::Pointer);
    let background = engine.context().background_layer().expect("background");
    assert!(background.needs_redraw());

    engine.dispatch_pointer(PointerEvent::Move(Vector2::new(500.0, 500.0)));
    assert_eq!(engine.context().stage().cursor(), Cursor::Default);
}

#[test]
fn stop_token_halts_before_any_update() {
    let (mut engine, _surfaces) = started_engine();
    let (recorder, journal) = Recorder::new("RECORDER");
    assert!(engine.add_entity(Box::new(recorder)));
    let token = engine.stop_token();

    assert_eq!(engine.tick(Duration::ZERO), FrameStatus::Continue);
    token.stop();
    assert_eq!(engine.tick(Duration::from_millis(16)), FrameStatus::Stopped);
    assert_eq!(engine.tick(Duration::from_millis(32)), FrameStatus::Stopped);

    let journal = journal.borrow();
    assert_eq!(journal.updates.len(), 1);
    assert_eq!(journal.destroyed, 1);
    assert_eq!(engine.context().stage().listener_count(), 0);
}

#[test]
fn fps_readout_appears_after_one_second() {
    let (mut engine, _surfaces) = started_engine();
    for frame in 0..60u32 {
        let _ = engine.tick(Duration::from_micros(16_667) * frame);
        assert!(engine.fps_readout().is_none());
    }
    let _ = engine.tick(Duration::from_micros(16_667) * 60);
    assert_eq!(
        engine.fps_readout(),
        Some("FPS: 61 (max FPS is monitor's refresh rate)")
    );
}
