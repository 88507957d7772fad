//! Ship glyph and engine trail.
//!
//! Both shapes are defined in ship-local space with the nose along +Y and are
//! rotated by [`Ship::heading`] before being handed to a [`DrawSurface`].

use super::state::Ship;
use crate::constants::ENGINE_TRAIL_MIN_SPEED;
use crate::render::DrawSurface;
use bevy::prelude::*;

const SHIP_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);

/// Local-space vertices of the ship (dart / arrowhead shape).
const SHIP_VERTICES: [Vec2; 4] = [
    Vec2::new(0.0, 10.0),  // nose
    Vec2::new(-6.0, -8.0), // left fin
    Vec2::new(0.0, -4.0),  // tail notch
    Vec2::new(6.0, -8.0),  // right fin
];

fn to_world(ship: &Ship, local: Vec2) -> Vec2 {
    ship.position + Vec2::from_angle(ship.heading).rotate(local)
}

/// World-space outline of the ship glyph.
pub fn ship_outline(ship: &Ship) -> [Vec2; 4] {
    SHIP_VERTICES.map(|v| to_world(ship, v))
}

/// World-space engine trail triangle and its colour, or `None` when the ship
/// is too slow to show one.
///
/// The trail extends `speed * 2` behind the fins and fades in with speed,
/// reaching full opacity at 10 u/frame.
pub fn engine_trail(ship: &Ship) -> Option<([Vec2; 3], Color)> {
    if ship.speed <= ENGINE_TRAIL_MIN_SPEED {
        return None;
    }
    let local = [
        Vec2::new(-3.0, -8.0),
        Vec2::new(0.0, -8.0 - ship.speed * 2.0),
        Vec2::new(3.0, -8.0),
    ];
    let alpha = (ship.speed / 10.0).min(1.0);
    Some((local.map(|v| to_world(ship, v)), SHIP_COLOR.with_alpha(alpha)))
}

/// Draw the ship and, when moving, its engine trail.
pub fn draw_ship<S: DrawSurface + ?Sized>(surface: &mut S, ship: &Ship) {
    surface.fill_polygon(&ship_outline(ship), SHIP_COLOR);
    if let Some((trail, color)) = engine_trail(ship) {
        surface.fill_polygon(&trail, color);
    }
}
