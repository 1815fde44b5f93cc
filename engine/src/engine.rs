//! Frame scheduler and root entity registry.

use std::time::Duration;

use castle_defence_core::EngineConfig;
use castle_defence_rendering::{FrameStatus, LayerSpec, PointerEvent, StageSpec, SurfaceProvider};
use tracing::{debug, info, warn};

use crate::{
    timing::{FpsCounter, FrameClock},
    AsEntity, Context, EngineError, Entity, Layer, Registry, RootEntity, StopToken, BG_LAYER,
    GAME_LAYER, UI_LAYER,
};

const LAYERS: [(&str, i32); 3] = [(BG_LAYER, 10), (GAME_LAYER, 20), (UI_LAYER, 30)];

/// Owns the layers and root entities and advances them once per frame.
#[derive(Debug, Default)]
pub struct Engine {
    config: Option<EngineConfig>,
    context: Context,
    entities: Registry<Box<dyn RootEntity>>,
    clock: FrameClock,
    fps: FpsCounter,
    fps_readout: Option<String>,
    stop: StopToken,
    started: bool,
    torn_down: bool,
}

impl Engine {
    /// Creates an engine that still needs a configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logical canvas extent used by [`Engine::start`].
    pub fn load_configuration(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        config.validate()?;
        self.context = Context::new(config.width, config.height);
        self.config = Some(config);
        Ok(())
    }

    /// Builds the stage and the three layers, then arms the frame loop.
    ///
    /// Missing surfaces are logged and the affected layer draws nothing.
    pub fn start(&mut self, surfaces: &mut dyn SurfaceProvider) -> Result<(), EngineError> {
        let config = self.config.ok_or(EngineError::NotConfigured)?;
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }

        let stage = StageSpec {
            id: self.context.stage().id().to_owned(),
            width: config.width,
            height: config.height,
        };
        match surfaces.attach_stage(&stage) {
            Ok(()) => self.context.stage_mut().mark_attached(),
            Err(error) => warn!(%error, "stage not attached, pointer input disabled"),
        }

        for (id, z_index) in LAYERS {
            let spec = LayerSpec {
                id: id.to_owned(),
                width: config.width,
                height: config.height,
                z_index,
            };
            let surface = match surfaces.create_layer(&spec) {
                Ok(surface) => Some(surface),
                Err(error) => {
                    warn!(%error, layer = id, "layer has no drawing surface");
                    None
                }
            };
            let _ = self.context.push_layer(Layer::new(id, surface));
        }
        let _ = self.context.install_listeners(BG_LAYER);

        self.started = true;
        info!(
            width = config.width,
            height = config.height,
            attached = self.context.stage().is_attached(),
            "engine started"
        );
        Ok(())
    }

    /// Whether [`Engine::start`] succeeded.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Registers a root entity. A taken tag keeps the existing entity.
    pub fn add_entity(&mut self, entity: Box<dyn RootEntity>) -> bool {
        let tag = entity.tag().clone();
        match self.entities.insert(tag, entity) {
            Ok(()) => true,
            Err(rejected) => {
                warn!(tag = %rejected.tag(), "duplicate root entity tag rejected");
                false
            }
        }
    }

    /// Destroys and removes the root entity registered under `tag`.
    pub fn remove_entity(&mut self, tag: &str) -> bool {
        match self.entities.remove(tag) {
            Some(mut entity) => {
                entity.destroy();
                true
            }
            None => false,
        }
    }

    /// Number of root entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Looks `tag` up among the root entities, then the background layer.
    #[must_use]
    pub fn find_entity_by_tag(&self, tag: &str) -> Option<&dyn Entity> {
        if let Some(entity) = self.entities.get(tag) {
            return Some(entity.as_entity());
        }
        self.context
            .background_layer()
            .and_then(|layer| layer.entity(tag))
            .map(|visual| visual.as_entity())
    }

    /// Runs one frame.
    ///
    /// Queued commands are delivered before root entities update, so state
    /// changes requested by pointer input take effect on the next frame.
    pub fn tick(&mut self, timestamp: Duration) -> FrameStatus {
        if self.stop.is_stopped() {
            self.teardown();
            return FrameStatus::Stopped;
        }

        let elapsed = self.clock.advance(timestamp);
        if let Some(fps) = self.fps.record_frame(timestamp) {
            debug!(fps, "fps readout");
            self.fps_readout = Some(format!("FPS: {fps} (max FPS is monitor's refresh rate)"));
        }

        for envelope in self.context.take_outbox() {
            match self.entities.get_mut(&envelope.target) {
                Some(entity) => entity.handle(&envelope.command, &mut self.context),
                None => debug!(entity = %envelope.target, "command dropped, no such entity"),
            }
        }

        for entity in self.entities.values_mut() {
            entity.update(elapsed, &mut self.context);
        }
        FrameStatus::Continue
    }

    /// Routes a pointer event to the listening layers.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) {
        self.context.dispatch_pointer(event);
    }

    /// Shared frame state.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable shared frame state.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Token that stops the loop at the top of the next frame.
    #[must_use]
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Latest FPS readout, published at most once per second.
    #[must_use]
    pub fn fps_readout(&self) -> Option<&str> {
        self.fps_readout.as_deref()
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for (_, mut entity) in self.entities.take_all() {
            entity.destroy();
        }
        self.context.teardown();
        self.torn_down = true;
        info!("engine stopped");
    }
}
