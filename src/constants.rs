//! Centralised generation, movement, and rendering constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::CosmosConfig`] mirrors most of them
//! and uses these as its compiled defaults; `assets/cosmos.toml` may override
//! any subset at startup.
//!
//! Units: world units are canvas pixels at zoom 1.0; every "per frame" value
//! is applied once per `Update` tick.

// ── World Generation ──────────────────────────────────────────────────────────

/// Seed mixed into every per-chunk RNG.
///
/// Changing it produces an entirely different universe; keeping it fixed
/// makes every chunk reproducible across evictions and restarts.
pub const WORLD_SEED: u64 = 0x00C0_5A05;

/// Side length of one square generation chunk (world units).
///
/// The player always has its own chunk plus the eight neighbours loaded, so a
/// 2000-unit chunk keeps at least 2000 units of populated space in every
/// direction.
pub const CHUNK_SIZE: f32 = 2000.0;

/// Inclusive lower bound of stars generated per chunk.
pub const STARS_PER_CHUNK_MIN: u32 = 50;

/// Exclusive upper bound of stars generated per chunk.
pub const STARS_PER_CHUNK_MAX: u32 = 100;

/// Probability that a chunk receives one planet.
pub const PLANET_CHANCE: f64 = 0.3;

/// Probability that a chunk receives one nebula.
pub const NEBULA_CHANCE: f64 = 0.1;

/// Probability that a chunk receives one black hole.
pub const BLACK_HOLE_CHANCE: f64 = 0.02;

// ── Initial Field ─────────────────────────────────────────────────────────────
//
// Scattered once at startup around the origin, independent of chunks.
// Each entry is (count, side length of the square centred on the origin).

pub const INITIAL_STAR_COUNT: usize = 1000;
pub const INITIAL_STAR_SPREAD: f32 = 10_000.0;
pub const INITIAL_PLANET_COUNT: usize = 50;
pub const INITIAL_PLANET_SPREAD: f32 = 8_000.0;
pub const INITIAL_NEBULA_COUNT: usize = 20;
pub const INITIAL_NEBULA_SPREAD: f32 = 12_000.0;
pub const INITIAL_BLACK_HOLE_COUNT: usize = 5;
pub const INITIAL_BLACK_HOLE_SPREAD: f32 = 15_000.0;

// ── Object Attribute Ranges ───────────────────────────────────────────────────

pub const STAR_SIZE_MIN: f32 = 0.5;
pub const STAR_SIZE_MAX: f32 = 2.5;
pub const STAR_BRIGHTNESS_MIN: f32 = 0.2;
pub const STAR_BRIGHTNESS_MAX: f32 = 1.0;

pub const PLANET_SIZE_MIN: f32 = 20.0;
pub const PLANET_SIZE_MAX: f32 = 100.0;
/// Probability that a planet carries a ring system.
pub const PLANET_RING_CHANCE: f64 = 0.3;
/// Exclusive upper bound on moon count (moons are drawn from `0..PLANET_MOONS_MAX`).
pub const PLANET_MOONS_MAX: u32 = 4;

pub const NEBULA_SIZE_MIN: f32 = 200.0;
pub const NEBULA_SIZE_MAX: f32 = 600.0;
pub const NEBULA_OPACITY_MIN: f32 = 0.1;
pub const NEBULA_OPACITY_MAX: f32 = 0.4;

pub const BLACK_HOLE_SIZE_MIN: f32 = 40.0;
pub const BLACK_HOLE_SIZE_MAX: f32 = 100.0;
/// Every black hole generated so far has carried a disk.
pub const ACCRETION_DISK_CHANCE: f64 = 1.0;

// ── Player: Movement ──────────────────────────────────────────────────────────

/// Velocity added per frame per held direction key.
pub const ACCELERATION: f32 = 0.5;

/// Multiplicative velocity decay applied every frame, input or not.
///
/// At 0.95 a ship coasting at max speed drops below 1 u/frame in ~45 frames.
pub const FRICTION: f32 = 0.95;

/// Speed cap while the boost key is released (world units / frame).
pub const MAX_SPEED: f32 = 10.0;

/// Speed cap while the boost key is held.
pub const BOOST_MAX_SPEED: f32 = 20.0;

/// Speeds below this leave the ship heading unchanged, so the glyph does not
/// spin when velocity decays toward zero.
pub const HEADING_MIN_SPEED: f32 = 0.05;

/// Distance-traveled stat accrued per unit of speed each frame.
pub const DISTANCE_PER_SPEED: f32 = 0.01;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Fraction of the camera→ship gap closed every frame.
pub const CAMERA_SMOOTHING: f32 = 0.1;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Relative zoom change per wheel notch (0.1 → ×0.9 out, ×1.1 in).
pub const ZOOM_STEP: f32 = 0.1;

// ── Proximity ─────────────────────────────────────────────────────────────────

/// Objects strictly closer than this to the ship count as "nearby".
pub const DETECTION_RADIUS: f32 = 150.0;

// ── Rendering ─────────────────────────────────────────────────────────────────
//
// Base view distances at zoom 1.0.  The effective cull radius is
// `view_distance / zoom`, so zooming out widens what is drawn.

pub const STAR_VIEW_DISTANCE: f32 = 3000.0;
pub const NEBULA_VIEW_DISTANCE: f32 = 4000.0;
pub const PLANET_VIEW_DISTANCE: f32 = 2000.0;
pub const BLACK_HOLE_VIEW_DISTANCE: f32 = 2000.0;

/// Twinkle modulation depth: alpha swings by ±20 % of brightness.
pub const TWINKLE_DEPTH: f32 = 0.2;

/// Ring radius as a multiple of the planet radius.
pub const PLANET_RING_SCALE: f32 = 1.5;
/// Gap between a discovered planet's surface and its halo.
pub const PLANET_HALO_OFFSET: f32 = 10.0;
/// Gap between a discovered black hole's horizon and its halo.
pub const BLACK_HOLE_HALO_OFFSET: f32 = 15.0;
/// Accretion disk outer radius as a multiple of the horizon radius.
pub const ACCRETION_DISK_SCALE: f32 = 2.0;

/// Ship speeds above this show an engine trail.
pub const ENGINE_TRAIL_MIN_SPEED: f32 = 1.0;

// ── UI ────────────────────────────────────────────────────────────────────────

/// Seconds the start button stays hidden after launch.
pub const START_BUTTON_DELAY_SECS: f32 = 2.0;

/// Seconds the explore acknowledgement stays on screen.
pub const EXPLORE_TOAST_SECS: f32 = 3.0;

pub const HUD_FONT_SIZE: f32 = 18.0;
