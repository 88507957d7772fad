//! Player input and movement systems.
//!
//! ## Pipeline (runs in order every `Update` frame while Running)
//!
//! 1. [`keyboard_to_thrust_system`]: snapshots WASD / arrow / Space into [`ThrustInput`].
//! 2. [`ship_motion_system`]: integrates [`ThrustInput`] into the [`Ship`] and
//!    accrues [`Stats`].
//!
//! The movement math itself is [`step_ship`], a plain function so it can be
//! tested without an `App`.

use super::state::{Ship, ThrustInput};
use crate::config::CosmosConfig;
use crate::constants::HEADING_MIN_SPEED;
use crate::stats::Stats;
use bevy::prelude::*;

// ── Step 1: Keyboard → Input ──────────────────────────────────────────────────

/// Translate held keys into [`ThrustInput`].
///
/// - **W / ↑** → up, **S / ↓** → down, **A / ←** → left, **D / →** → right
/// - **Space** → boost
pub fn keyboard_to_thrust_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<ThrustInput>) {
    *input = ThrustInput {
        up: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        down: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        boost: keys.pressed(KeyCode::Space),
    };
}

// ── Step 2: Integrate ─────────────────────────────────────────────────────────

/// Advance the ship by one frame.
///
/// Order matters and mirrors the frame contract:
/// accelerate → pick speed cap → friction → clamp → integrate position.
pub fn step_ship(ship: &mut Ship, input: &ThrustInput, config: &CosmosConfig) {
    ship.velocity += input.direction() * config.acceleration;

    ship.max_speed = if input.boost {
        config.boost_max_speed
    } else {
        config.max_speed
    };

    ship.velocity *= config.friction;

    let speed = ship.velocity.length();
    if speed > ship.max_speed {
        ship.velocity *= ship.max_speed / speed;
        ship.speed = ship.max_speed;
    } else {
        ship.speed = speed;
    }

    if ship.speed > HEADING_MIN_SPEED {
        // atan2(-vx, vy) maps (0,1)→0, (1,0)→−π/2, (−1,0)→+π/2
        ship.heading = (-ship.velocity.x).atan2(ship.velocity.y);
    }

    ship.position += ship.velocity;
}

/// Apply [`step_ship`] to the ship resource and record speed/distance stats.
pub fn ship_motion_system(
    mut ship: ResMut<Ship>,
    input: Res<ThrustInput>,
    config: Res<CosmosConfig>,
    mut stats: ResMut<Stats>,
) {
    step_ship(&mut ship, &input, &config);
    stats.record_motion(ship.speed, config.distance_per_speed);
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ACCELERATION, BOOST_MAX_SPEED, FRICTION, MAX_SPEED};

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Build a minimal Bevy `App` with just the resources and systems needed to
    /// test the keyboard → ship pipeline, without rendering.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ThrustInput>();
        app.init_resource::<Ship>();
        app.init_resource::<Stats>();
        app.insert_resource(CosmosConfig::default());
        app.add_systems(
            Update,
            (keyboard_to_thrust_system, ship_motion_system).chain(),
        );
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    fn release(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    // ── step_ship ─────────────────────────────────────────────────────────────

    #[test]
    fn single_step_applies_acceleration_then_friction() {
        let mut ship = Ship::default();
        let input = ThrustInput {
            right: true,
            ..Default::default()
        };
        step_ship(&mut ship, &input, &CosmosConfig::default());

        let expected = ACCELERATION * FRICTION;
        assert!((ship.velocity.x - expected).abs() < 1e-6);
        assert_eq!(ship.velocity.y, 0.0);
        assert!((ship.position.x - expected).abs() < 1e-6);
    }

    #[test]
    fn friction_applies_without_input() {
        let mut ship = Ship {
            velocity: Vec2::new(4.0, -2.0),
            ..Default::default()
        };
        step_ship(&mut ship, &ThrustInput::default(), &CosmosConfig::default());
        assert!((ship.velocity - Vec2::new(4.0, -2.0) * FRICTION).length() < 1e-6);
    }

    #[test]
    fn clamp_preserves_direction_and_hits_cap() {
        let mut ship = Ship {
            velocity: Vec2::new(30.0, 40.0),
            ..Default::default()
        };
        let before_dir = ship.velocity.normalize();

        step_ship(&mut ship, &ThrustInput::default(), &CosmosConfig::default());

        assert!((ship.velocity.length() - MAX_SPEED).abs() < 1e-4);
        assert_eq!(ship.speed, MAX_SPEED);
        assert!((ship.velocity.normalize() - before_dir).length() < 1e-5);
    }

    #[test]
    fn speed_never_exceeds_cap_under_sustained_thrust() {
        let mut ship = Ship::default();
        let config = CosmosConfig::default();
        let input = ThrustInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..500 {
            step_ship(&mut ship, &input, &config);
            assert!(ship.speed <= ship.max_speed);
        }
    }

    #[test]
    fn heading_follows_velocity() {
        let mut ship = Ship {
            velocity: Vec2::new(5.0, 0.0),
            ..Default::default()
        };
        step_ship(&mut ship, &ThrustInput::default(), &CosmosConfig::default());
        assert!((ship.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn heading_holds_when_nearly_stopped() {
        let mut ship = Ship {
            velocity: Vec2::new(0.01, 0.0),
            heading: 1.0,
            ..Default::default()
        };
        step_ship(&mut ship, &ThrustInput::default(), &CosmosConfig::default());
        assert_eq!(ship.heading, 1.0);
    }

    // ── systems ───────────────────────────────────────────────────────────────

    #[test]
    fn boost_raises_cap_and_release_restores_it_next_tick() {
        let mut app = build_test_app();

        press(&mut app, KeyCode::Space);
        app.update();
        assert_eq!(app.world().resource::<Ship>().max_speed, BOOST_MAX_SPEED);

        release(&mut app, KeyCode::Space);
        app.update();
        assert_eq!(app.world().resource::<Ship>().max_speed, MAX_SPEED);
    }

    #[test]
    fn arrow_keys_and_wasd_are_equivalent() {
        let mut wasd = build_test_app();
        press(&mut wasd, KeyCode::KeyW);
        wasd.update();

        let mut arrows = build_test_app();
        press(&mut arrows, KeyCode::ArrowUp);
        arrows.update();

        let a = wasd.world().resource::<Ship>().velocity;
        let b = arrows.world().resource::<Ship>().velocity;
        assert!(a.y > 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn motion_accrues_distance_stat() {
        let mut app = build_test_app();
        press(&mut app, KeyCode::KeyD);
        for _ in 0..10 {
            app.update();
        }
        let stats = app.world().resource::<Stats>();
        let ship = app.world().resource::<Ship>();
        assert!(stats.distance_traveled > 0.0);
        assert_eq!(stats.current_speed, ship.speed);
    }
}
