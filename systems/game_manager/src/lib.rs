#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-level game state machine.
//!
//! [`GameManager`] is the root entity tagged `GAME_MANAGER`. State changes
//! only raise a flag; the entry side effects of the new state run once on the
//! following update.

mod menu;

use castle_defence_core::{Command, GameConfig, GameState, Tag, GAME_MANAGER_TAG};
use castle_defence_engine::{Context, Cursor, EngineError, Entity, RootEntity, Stage};
use castle_defence_rendering::Color;
use castle_defence_system_maps::MapManager;
use castle_defence_system_waves::WaveManager;
use tracing::{info, warn};

pub use menu::{START_BUTTON, START_BUTTON_TEXT, TITLE};

const MENU_BACKGROUND: Color = Color::from_rgb_u8(0xe7, 0xe7, 0xe7);
const GAME_BACKGROUND: Color = Color::from_rgb_u8(0x54, 0x54, 0x54);

/// Root entity that owns the game state and the wave countdown.
#[derive(Debug)]
pub struct GameManager {
    tag: Tag,
    state: GameState,
    state_changed: bool,
    background: Tag,
    waves: WaveManager,
    maps: MapManager,
    config: GameConfig,
}

impl GameManager {
    /// Creates the manager in the main menu state and schedules a redraw of
    /// the background layer.
    ///
    /// Fails when the context has no background layer.
    pub fn new(ctx: &mut Context, config: GameConfig) -> Result<Self, EngineError> {
        let background = ctx.background_tag().clone();
        let waves = WaveManager::new(ctx, &background)?;
        if let Some(layer) = ctx.layer_mut(&background) {
            layer.mark_dirty();
        }
        Ok(Self {
            tag: Tag::new(GAME_MANAGER_TAG),
            state: GameState::MainMenu,
            state_changed: true,
            maps: MapManager::new(&background),
            background,
            waves,
            config,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the entry side effects of the current state are still pending.
    #[must_use]
    pub fn is_state_change_pending(&self) -> bool {
        self.state_changed
    }

    /// Wave countdown driven by the manager.
    #[must_use]
    pub fn wave_manager(&self) -> &WaveManager {
        &self.waves
    }

    /// Switches to `state`. Its entry side effects run on the next update.
    pub fn change_state(&mut self, state: GameState, stage: &mut Stage) {
        info!(from = %self.state, to = %state, "game state changed");
        self.state = state;
        self.state_changed = true;
        stage.set_cursor(Cursor::Default);
    }

    fn on_state_change(&mut self, ctx: &mut Context) {
        if !self.state_changed {
            return;
        }
        match self.state {
            GameState::MainMenu => self.enter_main_menu(ctx),
            GameState::InGame => self.enter_game(ctx),
        }
        self.state_changed = false;
    }

    fn enter_main_menu(&mut self, ctx: &mut Context) {
        self.waves.skip_wave_idle_timer();
        let Some(layer) = ctx.layer_mut(&self.background) else {
            warn!(layer = %self.background, "main menu has no background layer");
            return;
        };
        layer.set_background(MENU_BACKGROUND);
        layer.clear_entities();
        menu::populate(layer);
        layer.mark_dirty();
    }

    fn enter_game(&mut self, ctx: &mut Context) {
        match ctx.layer_mut(&self.background) {
            Some(layer) => {
                layer.set_background(GAME_BACKGROUND);
                layer.clear_entities();
            }
            None => {
                warn!(layer = %self.background, "game has no background layer");
                return;
            }
        }
        let _ = self.maps.load_map(ctx, self.config.map);
        self.waves.set_wave_idle_timer(self.config.wave_idle_seconds);
        if let Some(layer) = ctx.layer_mut(&self.background) {
            layer.mark_dirty();
        }
    }
}

impl Entity for GameManager {
    fn tag(&self) -> &Tag {
        &self.tag
    }
}

impl RootEntity for GameManager {
    fn update(&mut self, elapsed: f32, ctx: &mut Context) {
        self.on_state_change(ctx);
        self.waves.reduce_wave_idle_timer(elapsed);
        self.waves.check_for_wave_idle_timer(ctx);
        if let Some(layer) = ctx.layer_mut(&self.background) {
            layer.update(elapsed);
        }
    }

    fn handle(&mut self, command: &Command, ctx: &mut Context) {
        match *command {
            Command::ChangeState { state } => self.change_state(state, ctx.stage_mut()),
            Command::SkipWaveIdleTimer => self.waves.skip_wave_idle_timer(),
        }
    }
}
