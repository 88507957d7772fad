//! Player ship state and the per-frame input snapshot.
//!
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input + movement
//! - [`super::rendering`]: ship glyph + engine trail

use crate::constants::MAX_SPEED;
use bevy::prelude::*;

// ── Resources ──────────────────────────────────────────────────────────────────

/// The player's ship.
///
/// There is exactly one ship, so it lives in a resource rather than on an
/// entity; every system that needs it reads it directly.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub position: Vec2,
    /// World units per frame.
    pub velocity: Vec2,
    /// Magnitude of `velocity` after the speed clamp.
    pub speed: f32,
    /// Current cap; raised while boosting.
    pub max_speed: f32,
    /// Glyph orientation in radians, 0 = nose toward +Y, counter-clockwise positive.
    pub heading: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 0.0,
            max_speed: MAX_SPEED,
            heading: 0.0,
        }
    }
}

// ── Input Abstraction ──────────────────────────────────────────────────────────

/// Held movement keys for the current frame.
///
/// [`super::control::keyboard_to_thrust_system`] overwrites this from the
/// keyboard every frame; [`super::control::ship_motion_system`] only reads it.
/// Tests can populate this directly to drive the ship without a keyboard.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrustInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Raises the speed cap to `boost_max_speed` while held.
    pub boost: bool,
}

impl ThrustInput {
    /// Sum of the held directions as unit steps (world y-up).
    ///
    /// Opposite keys cancel; diagonals are not normalised, matching how each
    /// key adds its own acceleration.
    pub fn direction(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.up, self.down))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let input = ThrustInput {
            up: true,
            down: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn diagonal_is_not_normalised() {
        let input = ThrustInput {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn ship_starts_at_rest_with_normal_cap() {
        let ship = Ship::default();
        assert_eq!(ship.velocity, Vec2::ZERO);
        assert_eq!(ship.max_speed, MAX_SPEED);
    }
}
