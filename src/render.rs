//! World rendering: distance culling plus draw calls through [`DrawSurface`].
//!
//! ## Draw order (back to front)
//!
//! | Layer       | Cull distance (zoom 1.0) | Shape |
//! |-------------|--------------------------|-------|
//! | Nebulae     | `nebula_view_distance`   | radial gradient, colour → transparent |
//! | Stars       | `star_view_distance`     | filled disc, twinkling alpha |
//! | Planets     | `planet_view_distance`   | filled disc, ring, discovery halo |
//! | Black holes | `black_hole_view_distance` | accretion gradient, body, horizon, halo |
//! | Ship        | never culled             | dart glyph + engine trail |
//!
//! Each object farther than `view_distance / zoom` from the camera is skipped.
//! [`render_cosmos`] does not know about Bevy's renderer; [`GizmoSurface`]
//! adapts it onto immediate-mode gizmos and the camera transform is applied by
//! the `Camera2d` (see [`crate::camera`]).

use crate::camera::{self, CosmosCamera};
use crate::config::CosmosConfig;
use crate::constants::{
    ACCRETION_DISK_SCALE, BLACK_HOLE_HALO_OFFSET, PLANET_HALO_OFFSET, PLANET_RING_SCALE,
    TWINKLE_DEPTH,
};
use crate::cosmos::Cosmos;
use crate::menu::GameState;
use crate::player::{self, Ship};
use crate::simulation::SimulationSet;
use bevy::color::Mix;
use bevy::prelude::*;

// ── Surface abstraction ───────────────────────────────────────────────────────

/// One colour stop of a radial gradient; `offset` runs 0 (inner) → 1 (outer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Interpolate `stops` at `offset` (clamped to the first / last stop).
///
/// Stops must be sorted by offset.  An empty slice yields transparent black.
pub fn sample_gradient(stops: &[GradientStop], offset: f32) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::NONE;
    };
    if offset <= first.offset {
        return first.color;
    }
    if offset >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if offset <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            let t = (offset - a.offset) / span;
            return Color::from(a.color.to_srgba().mix(&b.color.to_srgba(), t));
        }
    }
    last.color
}

/// The drawing primitives the world renderer needs, in world coordinates.
pub trait DrawSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Fill the annulus `inner..outer` with a gradient that runs from `stops`
    /// offset 0 at `inner` to offset 1 at `outer`.
    fn radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, stops: &[GradientStop]);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}

// ── Gizmo backend ─────────────────────────────────────────────────────────────

/// World units between the concentric rings used to approximate a fill.
const FILL_RING_SPACING: f32 = 1.5;
/// Upper bound on rings per fill so huge nebulae stay cheap.
const MAX_FILL_RINGS: usize = 48;

/// [`DrawSurface`] over Bevy gizmos.
///
/// Gizmos only draw lines, so fills are concentric rings and polygons are
/// fanned out from their first vertex.
pub struct GizmoSurface<'a, 'w, 's> {
    pub gizmos: &'a mut Gizmos<'w, 's>,
}

fn ring_count(extent: f32) -> usize {
    ((extent / FILL_RING_SPACING).ceil() as usize).clamp(1, MAX_FILL_RINGS)
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let rings = ring_count(radius);
        for i in 1..=rings {
            let r = radius * i as f32 / rings as f32;
            self.gizmos.circle_2d(center, r, color);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.gizmos.circle_2d(center, radius, color);
    }

    fn radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, stops: &[GradientStop]) {
        let rings = ring_count(outer - inner);
        for i in 0..=rings {
            let t = i as f32 / rings as f32;
            let r = inner + (outer - inner) * t;
            if r <= 0.0 {
                continue;
            }
            self.gizmos.circle_2d(center, r, sample_gradient(stops, t));
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some(&anchor) = points.first() else {
            return;
        };
        self.gizmos
            .linestrip_2d(points.iter().copied().chain(std::iter::once(anchor)), color);
        for &p in points.iter().skip(2).take(points.len().saturating_sub(3)) {
            self.gizmos.line_2d(anchor, p, color);
        }
    }
}

// ── Culling ───────────────────────────────────────────────────────────────────

/// `true` when `position` is within `view_distance / zoom` of the camera.
pub fn in_view(camera: &CosmosCamera, position: Vec2, view_distance: f32) -> bool {
    camera.position.distance(position) <= view_distance / camera.zoom
}

// ── Palette ───────────────────────────────────────────────────────────────────

const RING_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);
const PLANET_HALO_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
const HORIZON_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);
const BLACK_HOLE_HALO_COLOR: Color = Color::srgb(1.0, 0.0, 1.0);

const ACCRETION_GRADIENT: [GradientStop; 3] = [
    GradientStop::new(0.0, Color::srgba(1.0, 100.0 / 255.0, 0.0, 0.8)),
    GradientStop::new(0.5, Color::srgba(1.0, 200.0 / 255.0, 0.0, 0.4)),
    GradientStop::new(1.0, Color::srgba(0.0, 0.0, 0.0, 0.0)),
];

/// Star alpha at time `t` (seconds).
pub fn twinkle_alpha(brightness: f32, twinkle: f32, t: f32) -> f32 {
    brightness * (1.0 - (t + twinkle).sin() * TWINKLE_DEPTH)
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Issue every draw call for one frame.  `t` is the elapsed time in seconds.
pub fn render_cosmos<S: DrawSurface + ?Sized>(
    surface: &mut S,
    cosmos: &Cosmos,
    camera: &CosmosCamera,
    ship: &Ship,
    t: f32,
    config: &CosmosConfig,
) {
    for nebula in &cosmos.nebulae {
        if !in_view(camera, nebula.position, config.nebula_view_distance) {
            continue;
        }
        let core = nebula.color.with_alpha(nebula.opacity);
        let stops = [
            GradientStop::new(0.0, core),
            GradientStop::new(1.0, nebula.color.with_alpha(0.0)),
        ];
        surface.radial_gradient(nebula.position, 0.0, nebula.size, &stops);
    }

    for star in &cosmos.stars {
        if !in_view(camera, star.position, config.star_view_distance) {
            continue;
        }
        let alpha = twinkle_alpha(star.brightness, star.twinkle, t);
        surface.fill_circle(star.position, star.size, star.color.with_alpha(alpha));
    }

    for planet in &cosmos.planets {
        if !in_view(camera, planet.position, config.planet_view_distance) {
            continue;
        }
        surface.fill_circle(planet.position, planet.size, planet.color);
        if planet.has_rings {
            surface.stroke_circle(planet.position, planet.size * PLANET_RING_SCALE, RING_COLOR);
        }
        if planet.discovered {
            surface.stroke_circle(
                planet.position,
                planet.size + PLANET_HALO_OFFSET,
                PLANET_HALO_COLOR,
            );
        }
    }

    for hole in &cosmos.black_holes {
        if !in_view(camera, hole.position, config.black_hole_view_distance) {
            continue;
        }
        if hole.accretion_disk {
            surface.radial_gradient(
                hole.position,
                hole.size,
                hole.size * ACCRETION_DISK_SCALE,
                &ACCRETION_GRADIENT,
            );
        }
        surface.fill_circle(hole.position, hole.size, Color::BLACK);
        surface.stroke_circle(hole.position, hole.size, HORIZON_COLOR);
        if hole.discovered {
            surface.stroke_circle(
                hole.position,
                hole.size + BLACK_HOLE_HALO_OFFSET,
                BLACK_HOLE_HALO_COLOR,
            );
        }
    }

    player::draw_ship(surface, ship);
}

/// Draw the frame through gizmos.
pub fn render_system(
    mut gizmos: Gizmos,
    cosmos: Res<Cosmos>,
    camera: Res<CosmosCamera>,
    ship: Res<Ship>,
    time: Res<Time>,
    config: Res<CosmosConfig>,
) {
    let mut surface = GizmoSurface {
        gizmos: &mut gizmos,
    };
    render_cosmos(
        &mut surface,
        &cosmos,
        &camera,
        &ship,
        time.elapsed_secs(),
        &config,
    );
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Camera setup plus the per-frame world draw.
pub struct CosmosRenderPlugin;

impl Plugin for CosmosRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (camera::setup_camera, camera::verify_camera).chain(),
        )
        .add_systems(
            Update,
            (camera::sync_camera_transform_system, render_system)
                .chain()
                .after(SimulationSet)
                .run_if(in_state(GameState::Running)),
        );
    }
}
