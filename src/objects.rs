//! Celestial object records and their generators.
//!
//! Every generator takes the [`Region`] to place the object in, the random
//! source to draw from, and the [`ObjectKey`] the caller assigned, and returns
//! a fully-formed record.  Generators never fail: all draws come from fixed,
//! non-empty ranges.

use crate::constants::*;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

// ── Identity ──────────────────────────────────────────────────────────────────

/// Category of a generated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Star,
    Planet,
    Nebula,
    BlackHole,
}

/// Where an object was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectOrigin {
    /// The scattered field seeded once at startup.  Never evicted.
    InitialField,
    /// A streamed chunk at the given chunk coordinate.
    Chunk(IVec2),
}

/// Stable identity of a generated object.
///
/// Generation is deterministic per origin, so the same key always names the
/// same object, even after its chunk has been evicted and regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub kind: ObjectKind,
    pub origin: ObjectOrigin,
    /// Draw order of this object among objects of the same kind and origin.
    pub ordinal: u32,
}

impl ObjectKey {
    pub fn new(kind: ObjectKind, origin: ObjectOrigin, ordinal: u32) -> Self {
        Self {
            kind,
            origin,
            ordinal,
        }
    }
}

/// Axis-aligned square an object is placed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Minimum corner.
    pub origin: Vec2,
    /// Side length.
    pub size: f32,
}

impl Region {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    /// A square of side `size` centred on the world origin.
    pub fn centered(size: f32) -> Self {
        Self {
            origin: Vec2::splat(-size * 0.5),
            size,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size
            && point.y < self.origin.y + self.size
    }

    /// Uniform random point inside the square.
    ///
    /// The far edges are excluded, matching [`Region::contains`]: a draw that
    /// rounds up onto `origin + size` is pulled back by one ulp.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let end = self.origin + Vec2::splat(self.size);
        let point = self.origin + Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()) * self.size;
        Vec2::new(point.x.min(end.x.next_down()), point.y.min(end.y.next_down()))
    }
}

// ── Palettes ──────────────────────────────────────────────────────────────────

const STAR_PALETTE: [[u8; 3]; 6] = [
    [0xff, 0xff, 0xff],
    [0xff, 0xff, 0xcc],
    [0xff, 0xcc, 0x99],
    [0xff, 0x99, 0x99],
    [0x99, 0xcc, 0xff],
    [0xcc, 0xcc, 0xff],
];

const PLANET_PALETTE: [[u8; 3]; 7] = [
    [0x8b, 0x45, 0x13], // saddle brown
    [0x22, 0x8b, 0x22], // forest green
    [0x41, 0x69, 0xe1], // royal blue
    [0xdc, 0x14, 0x3c], // crimson
    [0xff, 0xd7, 0x00], // gold
    [0x93, 0x70, 0xdb], // medium purple
    [0xff, 0x63, 0x47], // tomato
];

const NEBULA_PALETTE: [[u8; 3]; 6] = [
    [0xff, 0x14, 0x93], // deep pink
    [0x00, 0xce, 0xd1], // dark turquoise
    [0x93, 0x70, 0xdb], // medium purple
    [0xff, 0x63, 0x47], // tomato
    [0x32, 0xcd, 0x32], // lime green
    [0xff, 0xd7, 0x00], // gold
];

fn pick_color<R: Rng + ?Sized, const N: usize>(palette: &[[u8; 3]; N], rng: &mut R) -> Color {
    let [r, g, b] = palette[rng.gen_range(0..N)];
    Color::srgb_u8(r, g, b)
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Planet surface classification, shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetType {
    Rocky,
    GasGiant,
    IceWorld,
    Desert,
    Ocean,
    Volcanic,
    Crystal,
}

impl PlanetType {
    pub const ALL: [PlanetType; 7] = [
        PlanetType::Rocky,
        PlanetType::GasGiant,
        PlanetType::IceWorld,
        PlanetType::Desert,
        PlanetType::Ocean,
        PlanetType::Volcanic,
        PlanetType::Crystal,
    ];

    /// Display name ("Gas Giant", "Ice World", ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Rocky => "Rocky",
            Self::GasGiant => "Gas Giant",
            Self::IceWorld => "Ice World",
            Self::Desert => "Desert",
            Self::Ocean => "Ocean",
            Self::Volcanic => "Volcanic",
            Self::Crystal => "Crystal",
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub key: ObjectKey,
    pub position: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub color: Color,
    /// Phase offset of the twinkle animation (radians).
    pub twinkle: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub key: ObjectKey,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
    pub planet_type: PlanetType,
    /// Set once, by the proximity detector.
    pub discovered: bool,
    pub has_rings: bool,
    pub moon_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub key: ObjectKey,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    /// Swirl phase (radians).
    pub swirl: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlackHole {
    pub key: ObjectKey,
    pub position: Vec2,
    pub size: f32,
    pub accretion_disk: bool,
    /// Set once, by the proximity detector.
    pub discovered: bool,
}

// ── Generators ────────────────────────────────────────────────────────────────

pub fn generate_star<R: Rng + ?Sized>(region: Region, rng: &mut R, key: ObjectKey) -> Star {
    Star {
        key,
        position: region.sample(rng),
        size: rng.gen_range(STAR_SIZE_MIN..STAR_SIZE_MAX),
        brightness: rng.gen_range(STAR_BRIGHTNESS_MIN..STAR_BRIGHTNESS_MAX),
        color: pick_color(&STAR_PALETTE, rng),
        twinkle: rng.gen_range(0.0..TAU),
    }
}

pub fn generate_planet<R: Rng + ?Sized>(region: Region, rng: &mut R, key: ObjectKey) -> Planet {
    Planet {
        key,
        position: region.sample(rng),
        size: rng.gen_range(PLANET_SIZE_MIN..PLANET_SIZE_MAX),
        color: pick_color(&PLANET_PALETTE, rng),
        planet_type: PlanetType::random(rng),
        discovered: false,
        has_rings: rng.gen_bool(PLANET_RING_CHANCE),
        moon_count: rng.gen_range(0..PLANET_MOONS_MAX),
    }
}

pub fn generate_nebula<R: Rng + ?Sized>(region: Region, rng: &mut R, key: ObjectKey) -> Nebula {
    Nebula {
        key,
        position: region.sample(rng),
        size: rng.gen_range(NEBULA_SIZE_MIN..NEBULA_SIZE_MAX),
        color: pick_color(&NEBULA_PALETTE, rng),
        opacity: rng.gen_range(NEBULA_OPACITY_MIN..NEBULA_OPACITY_MAX),
        swirl: rng.gen_range(0.0..TAU),
    }
}

pub fn generate_black_hole<R: Rng + ?Sized>(
    region: Region,
    rng: &mut R,
    key: ObjectKey,
) -> BlackHole {
    BlackHole {
        key,
        position: region.sample(rng),
        size: rng.gen_range(BLACK_HOLE_SIZE_MIN..BLACK_HOLE_SIZE_MAX),
        accretion_disk: rng.gen_bool(ACCRETION_DISK_CHANCE),
        discovered: false,
    }
}
