#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map routes and their placement on the background layer.

mod paths;

use castle_defence_core::{MapId, Tag, Vector2};
use castle_defence_engine::{visuals::Route, Context};
use tracing::{info, warn};

pub use paths::EASY_PATH;

/// Tag of the route drawn for the easy map.
pub const EASY_ROUTE: &str = "R_EASY";

const ROUTE_WIDTH: f32 = 50.0;

/// Loads map routes into the layer it is bound to.
#[derive(Clone, Debug)]
pub struct MapManager {
    background: Tag,
}

impl MapManager {
    /// Creates a manager that draws routes onto the layer tagged `background`.
    #[must_use]
    pub fn new(background: &Tag) -> Self {
        Self {
            background: background.clone(),
        }
    }

    /// Ordered path points of `map`, when the map is known.
    #[must_use]
    pub fn route(map: MapId) -> Option<&'static [Vector2]> {
        match map {
            MapId::EASY => Some(&EASY_PATH),
            _ => None,
        }
    }

    /// Adds the route of `map` to the background layer.
    ///
    /// Unknown maps and a missing layer leave everything untouched.
    pub fn load_map(&self, ctx: &mut Context, map: MapId) -> bool {
        let Some(points) = Self::route(map) else {
            warn!(map = map.get(), "unknown map");
            return false;
        };
        let Some(layer) = ctx.layer_mut(&self.background) else {
            return false;
        };

        let route = Route::new(EASY_ROUTE, points.to_vec(), ROUTE_WIDTH);
        if !layer.add_entity(Box::new(route)) {
            return false;
        }
        layer.mark_dirty();
        info!(map = map.get(), route = EASY_ROUTE, "map loaded");
        true
    }
}
