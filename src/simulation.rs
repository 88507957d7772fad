//! Simulation plugin: world resources, startup seeding, and the per-frame tick.
//!
//! ## Frame order (`Update`, while `GameState::Running`)
//!
//! 1. `keyboard_to_thrust_system`: held keys → [`ThrustInput`]
//! 2. `ship_motion_system`: accelerate, friction, clamp, move; stats
//! 3. `camera_follow_system`: ease the camera toward the ship
//! 4. `chunk_streaming_system`: evict (if configured) and load the 3×3 block
//! 5. `proximity_system`: nearby object + first-contact discovery
//!
//! HUD refresh and rendering are ordered `.after(SimulationSet)` by their own
//! plugins.  Wheel zoom is not gated on the state, so the start screen can be
//! zoomed too.

use crate::camera::{camera_follow_system, camera_zoom_system, CosmosCamera};
use crate::chunk::{chunk_streaming_system, generate_initial_field, ChunkManager};
use crate::config::{ConfigSet, CosmosConfig};
use crate::cosmos::Cosmos;
use crate::menu::GameState;
use crate::player::{keyboard_to_thrust_system, ship_motion_system, Ship, ThrustInput};
use crate::proximity::{proximity_system, Nearby};
use crate::stats::Stats;
use bevy::input::mouse::MouseWheel;
use bevy::input::ButtonInput;
use bevy::prelude::*;

/// The chained tick systems.  Everything that reads their output orders itself after this.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSet;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CosmosConfig>()
            .init_resource::<Cosmos>()
            .init_resource::<ChunkManager>()
            .init_resource::<Ship>()
            .init_resource::<ThrustInput>()
            .init_resource::<CosmosCamera>()
            .init_resource::<Stats>()
            .init_resource::<Nearby>()
            // Provided by InputPlugin in the real app; registered here so the
            // plugin also runs headless.
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<MouseWheel>()
            .add_systems(Startup, seed_cosmos_system.after(ConfigSet))
            .add_systems(
                Update,
                (
                    keyboard_to_thrust_system,
                    ship_motion_system,
                    camera_follow_system,
                    chunk_streaming_system,
                    proximity_system,
                )
                    .chain()
                    .in_set(SimulationSet)
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(Update, camera_zoom_system.before(SimulationSet));
    }
}

/// Populate the world before the first frame: the initial field (if enabled)
/// plus the chunks around the spawn point.
pub fn seed_cosmos_system(
    config: Res<CosmosConfig>,
    ship: Res<Ship>,
    mut cosmos: ResMut<Cosmos>,
    mut chunks: ResMut<ChunkManager>,
) {
    if config.initial_field {
        let field = generate_initial_field(&config);
        info!("Seeded initial field with {} objects", field.len());
        cosmos.insert_batch(field);
    }
    let loaded = chunks.ensure_loaded(ship.position, &mut cosmos, &config);
    info!(
        "Pre-loaded {} chunks; {} objects in the cosmos",
        loaded.len(),
        cosmos.object_count()
    );
}
