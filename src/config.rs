//! Runtime configuration loaded from `assets/cosmos.toml`.
//!
//! [`CosmosConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup, [`load_cosmos_config`] reads
//! `assets/cosmos.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! world_seed = 42
//! eviction_radius = 3
//! proximity_policy = "nearest"
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `CosmosConfig::default()`.

use crate::constants::*;
use crate::error::{
    require_non_negative, require_positive, require_probability, require_unit_interval,
    CosmosError, CosmosResult,
};
use crate::proximity::ProximityPolicy;
use bevy::prelude::*;
use serde::Deserialize;

/// Where [`load_cosmos_config`] looks for overrides, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/cosmos.toml";

/// Startup set containing [`load_cosmos_config`].  Anything that reads
/// [`CosmosConfig`] during `Startup` orders itself after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigSet;

/// Runtime-tunable generation, movement and rendering configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CosmosConfig {
    // ── World Generation ─────────────────────────────────────────────────────
    pub world_seed: u64,
    pub chunk_size: f32,
    pub stars_per_chunk_min: u32,
    pub stars_per_chunk_max: u32,
    pub planet_chance: f64,
    pub nebula_chance: f64,
    pub black_hole_chance: f64,
    /// Seed the scattered field around the origin at startup.
    pub initial_field: bool,
    /// Chebyshev radius (in chunks) beyond which chunks are dropped.
    /// `None` keeps every chunk forever.
    pub eviction_radius: Option<u32>,

    // ── Player: Movement ──────────────────────────────────────────────────────
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub boost_max_speed: f32,
    pub distance_per_speed: f32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_smoothing: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,

    // ── Proximity ─────────────────────────────────────────────────────────────
    pub detection_radius: f32,
    pub proximity_policy: ProximityPolicy,

    // ── Rendering ─────────────────────────────────────────────────────────────
    pub star_view_distance: f32,
    pub nebula_view_distance: f32,
    pub planet_view_distance: f32,
    pub black_hole_view_distance: f32,

    // ── UI ────────────────────────────────────────────────────────────────────
    pub start_button_delay_secs: f32,
    pub explore_toast_secs: f32,
    pub hud_font_size: f32,
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            // World Generation
            world_seed: WORLD_SEED,
            chunk_size: CHUNK_SIZE,
            stars_per_chunk_min: STARS_PER_CHUNK_MIN,
            stars_per_chunk_max: STARS_PER_CHUNK_MAX,
            planet_chance: PLANET_CHANCE,
            nebula_chance: NEBULA_CHANCE,
            black_hole_chance: BLACK_HOLE_CHANCE,
            initial_field: true,
            eviction_radius: None,
            // Player: Movement
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            boost_max_speed: BOOST_MAX_SPEED,
            distance_per_speed: DISTANCE_PER_SPEED,
            // Camera
            camera_smoothing: CAMERA_SMOOTHING,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            // Proximity
            detection_radius: DETECTION_RADIUS,
            proximity_policy: ProximityPolicy::default(),
            // Rendering
            star_view_distance: STAR_VIEW_DISTANCE,
            nebula_view_distance: NEBULA_VIEW_DISTANCE,
            planet_view_distance: PLANET_VIEW_DISTANCE,
            black_hole_view_distance: BLACK_HOLE_VIEW_DISTANCE,
            // UI
            start_button_delay_secs: START_BUTTON_DELAY_SECS,
            explore_toast_secs: EXPLORE_TOAST_SECS,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl CosmosConfig {
    /// Parse and validate a TOML document.  `path` is only used in error messages.
    pub fn from_toml_str(path: &str, contents: &str) -> CosmosResult<Self> {
        let config: CosmosConfig =
            toml::from_str(contents).map_err(|err| CosmosError::ConfigParse {
                path: path.to_string(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> CosmosResult<()> {
        require_positive("chunk_size", self.chunk_size)?;
        if self.stars_per_chunk_min > self.stars_per_chunk_max {
            return Err(CosmosError::InvalidConfig {
                name: "stars_per_chunk_min",
                value: self.stars_per_chunk_min.to_string(),
                expected: "<= stars_per_chunk_max",
            });
        }
        require_probability("planet_chance", self.planet_chance)?;
        require_probability("nebula_chance", self.nebula_chance)?;
        require_probability("black_hole_chance", self.black_hole_chance)?;
        // The 3×3 neighbourhood sits at radius 1; anything tighter would evict
        // and regenerate it every frame.
        if self.eviction_radius == Some(0) {
            return Err(CosmosError::InvalidConfig {
                name: "eviction_radius",
                value: "0".to_string(),
                expected: ">= 1",
            });
        }

        require_positive("acceleration", self.acceleration)?;
        require_unit_interval("friction", self.friction)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("boost_max_speed", self.boost_max_speed)?;
        require_non_negative("distance_per_speed", self.distance_per_speed)?;

        require_unit_interval("camera_smoothing", self.camera_smoothing)?;
        require_positive("min_zoom", self.min_zoom)?;
        require_positive("max_zoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(CosmosError::InvalidConfig {
                name: "min_zoom",
                value: self.min_zoom.to_string(),
                expected: "<= max_zoom",
            });
        }
        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(CosmosError::InvalidConfig {
                name: "zoom_step",
                value: self.zoom_step.to_string(),
                expected: "(0, 1)",
            });
        }

        require_positive("detection_radius", self.detection_radius)?;
        require_positive("star_view_distance", self.star_view_distance)?;
        require_positive("nebula_view_distance", self.nebula_view_distance)?;
        require_positive("planet_view_distance", self.planet_view_distance)?;
        require_positive("black_hole_view_distance", self.black_hole_view_distance)?;

        require_non_negative("start_button_delay_secs", self.start_button_delay_secs)?;
        require_non_negative("explore_toast_secs", self.explore_toast_secs)?;
        require_positive("hud_font_size", self.hud_font_size)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/cosmos.toml` and overwrite the
/// `CosmosConfig` resource with the validated result.
///
/// A missing file keeps the compiled defaults.  Parse and validation errors
/// are logged and also keep the defaults; they never abort startup.
pub fn load_cosmos_config(mut config: ResMut<CosmosConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match CosmosConfig::from_toml_str(CONFIG_PATH, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded cosmos config from {CONFIG_PATH}");
            }
            Err(err) => warn!("{err}; using defaults"),
        },
        Err(_) => info!("No {CONFIG_PATH} found; using compiled defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CosmosConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = CosmosConfig::from_toml_str("test.toml", "").expect("empty TOML is valid");
        assert_eq!(config, CosmosConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let config = CosmosConfig::from_toml_str(
            "test.toml",
            "world_seed = 7\neviction_radius = 3\nproximity_policy = \"nearest\"\n",
        )
        .expect("valid override");

        assert_eq!(config.world_seed, 7);
        assert_eq!(config.eviction_radius, Some(3));
        assert_eq!(config.proximity_policy, ProximityPolicy::Nearest);
        assert_eq!(config.chunk_size, CHUNK_SIZE);
        assert_eq!(config.max_speed, MAX_SPEED);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = CosmosConfig::from_toml_str("test.toml", "chunk_size = \"wide\"")
            .expect_err("string is not a float");
        assert!(matches!(err, CosmosError::ConfigParse { .. }));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let err = CosmosConfig::from_toml_str("test.toml", "min_zoom = 6.0")
            .expect_err("min above max");
        assert!(matches!(
            err,
            CosmosError::InvalidConfig {
                name: "min_zoom",
                ..
            }
        ));
    }

    #[test]
    fn ui_timings_and_font_size_are_checked() {
        for (doc, field) in [
            ("hud_font_size = -4.0", "hud_font_size"),
            ("hud_font_size = 0.0", "hud_font_size"),
            ("explore_toast_secs = -1.0", "explore_toast_secs"),
            ("start_button_delay_secs = -0.5", "start_button_delay_secs"),
            ("distance_per_speed = -0.01", "distance_per_speed"),
        ] {
            let err = CosmosConfig::from_toml_str("test.toml", doc).expect_err(doc);
            assert!(
                matches!(err, CosmosError::InvalidConfig { name, .. } if name == field),
                "{doc}: {err}"
            );
        }

        let zero_delay = CosmosConfig::from_toml_str("test.toml", "start_button_delay_secs = 0.0")
            .expect("an immediate start button is allowed");
        assert_eq!(zero_delay.start_button_delay_secs, 0.0);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = CosmosConfig::from_toml_str("test.toml", "planet_chance = 1.5")
            .expect_err("probability above one");
        assert!(matches!(
            err,
            CosmosError::InvalidConfig {
                name: "planet_chance",
                ..
            }
        ));
    }
}
