use bevy::prelude::*;
use bevy::window::WindowResolution;

use infinite_cosmos::config::{self, ConfigSet, CosmosConfig};
use infinite_cosmos::hud::HudPlugin;
use infinite_cosmos::menu::MainMenuPlugin;
use infinite_cosmos::render::CosmosRenderPlugin;
use infinite_cosmos::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Infinite Cosmos".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_cosmos_config overwrites them from
        // assets/cosmos.toml (if present) before any other startup system reads them.
        .insert_resource(CosmosConfig::default())
        .add_systems(Startup, config::load_cosmos_config.in_set(ConfigSet))
        // MainMenuPlugin registers GameState, so it goes first.
        .add_plugins(MainMenuPlugin)
        .add_plugins(SimulationPlugin)
        .add_plugins(HudPlugin)
        .add_plugins(CosmosRenderPlugin)
        .run();
}
