//! Chunked world streaming.
//!
//! The plane is cut into `chunk_size` squares addressed by integer
//! coordinates (`floor(position / chunk_size)`).  Every frame the 3×3
//! neighbourhood around the ship is populated if missing, and, when an
//! eviction radius is configured, chunks too far away are dropped.
//!
//! ## Determinism
//!
//! A chunk's contents depend only on its coordinate and the world seed: each
//! chunk draws from its own `StdRng` seeded with [`chunk_seed`].  Evicting a
//! chunk and walking back therefore rebuilds exactly the same objects, and
//! [`ObjectKey`]s line up with the discoveries recorded in [`Cosmos`].

use crate::config::CosmosConfig;
use crate::constants::*;
use crate::cosmos::{Cosmos, ObjectBatch};
use crate::objects::{
    generate_black_hole, generate_nebula, generate_planet, generate_star, ObjectKey, ObjectKind,
    ObjectOrigin, Region,
};
use crate::player::Ship;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Salt separating the initial-field stream from every chunk stream.
const INITIAL_FIELD_SALT: u64 = 0x1F1E_1D00_0000_0001;

// ── Coordinates & seeding ─────────────────────────────────────────────────────

/// Chunk containing `position`.
pub fn chunk_coord(position: Vec2, chunk_size: f32) -> IVec2 {
    (position / chunk_size).floor().as_ivec2()
}

/// World-space square covered by chunk `coord`.
pub fn chunk_region(coord: IVec2, chunk_size: f32) -> Region {
    Region::new(coord.as_vec2() * chunk_size, chunk_size)
}

/// SplitMix64 finaliser.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// 64-bit seed for chunk `coord` under `world_seed`.
pub fn chunk_seed(coord: IVec2, world_seed: u64) -> u64 {
    let packed = ((coord.x as u32 as u64) << 32) | coord.y as u32 as u64;
    mix64(mix64(world_seed) ^ packed)
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Generate the contents of one chunk.
///
/// Draw order: star count, each star, then one roll each for a planet, a
/// nebula and a black hole.
pub fn populate_chunk(coord: IVec2, config: &CosmosConfig) -> ObjectBatch {
    let origin = ObjectOrigin::Chunk(coord);
    let region = chunk_region(coord, config.chunk_size);
    let mut rng = StdRng::seed_from_u64(chunk_seed(coord, config.world_seed));
    let mut batch = ObjectBatch::default();

    let star_count = if config.stars_per_chunk_min >= config.stars_per_chunk_max {
        config.stars_per_chunk_min
    } else {
        rng.gen_range(config.stars_per_chunk_min..config.stars_per_chunk_max)
    };
    batch.stars = (0..star_count)
        .map(|i| generate_star(region, &mut rng, ObjectKey::new(ObjectKind::Star, origin, i)))
        .collect();

    if rng.gen_bool(config.planet_chance) {
        let key = ObjectKey::new(ObjectKind::Planet, origin, 0);
        batch.planets.push(generate_planet(region, &mut rng, key));
    }
    if rng.gen_bool(config.nebula_chance) {
        let key = ObjectKey::new(ObjectKind::Nebula, origin, 0);
        batch.nebulae.push(generate_nebula(region, &mut rng, key));
    }
    if rng.gen_bool(config.black_hole_chance) {
        let key = ObjectKey::new(ObjectKind::BlackHole, origin, 0);
        batch.black_holes.push(generate_black_hole(region, &mut rng, key));
    }

    batch
}

/// The scattered field around the origin seeded once at startup.
pub fn generate_initial_field(config: &CosmosConfig) -> ObjectBatch {
    let origin = ObjectOrigin::InitialField;
    let mut rng = StdRng::seed_from_u64(mix64(config.world_seed ^ INITIAL_FIELD_SALT));
    let mut batch = ObjectBatch::default();
    let key = |kind, i: usize| ObjectKey::new(kind, origin, i as u32);

    let region = Region::centered(INITIAL_STAR_SPREAD);
    batch.stars = (0..INITIAL_STAR_COUNT)
        .map(|i| generate_star(region, &mut rng, key(ObjectKind::Star, i)))
        .collect();

    let region = Region::centered(INITIAL_PLANET_SPREAD);
    batch.planets = (0..INITIAL_PLANET_COUNT)
        .map(|i| generate_planet(region, &mut rng, key(ObjectKind::Planet, i)))
        .collect();

    let region = Region::centered(INITIAL_NEBULA_SPREAD);
    batch.nebulae = (0..INITIAL_NEBULA_COUNT)
        .map(|i| generate_nebula(region, &mut rng, key(ObjectKind::Nebula, i)))
        .collect();

    let region = Region::centered(INITIAL_BLACK_HOLE_SPREAD);
    batch.black_holes = (0..INITIAL_BLACK_HOLE_COUNT)
        .map(|i| generate_black_hole(region, &mut rng, key(ObjectKind::BlackHole, i)))
        .collect();

    batch
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Tracks which chunk coordinates are currently populated.
#[derive(Resource, Debug, Default)]
pub struct ChunkManager {
    loaded: HashSet<IVec2>,
}

impl ChunkManager {
    /// Populate any missing chunk in the 3×3 block around `position`.
    ///
    /// Returns the coordinates generated by this call (empty when the block
    /// was already loaded).
    pub fn ensure_loaded(
        &mut self,
        position: Vec2,
        cosmos: &mut Cosmos,
        config: &CosmosConfig,
    ) -> Vec<IVec2> {
        let center = chunk_coord(position, config.chunk_size);
        let mut generated = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let coord = center + IVec2::new(dx, dy);
                if self.loaded.insert(coord) {
                    cosmos.insert_batch(populate_chunk(coord, config));
                    generated.push(coord);
                }
            }
        }
        generated
    }

    /// Forget every chunk farther than `radius` (Chebyshev) from `center`.
    ///
    /// Returns the forgotten coordinates; the caller drops their objects.
    pub fn evict_beyond(&mut self, center: IVec2, radius: u32) -> Vec<IVec2> {
        let radius = radius as i32;
        let mut evicted = Vec::new();
        self.loaded.retain(|&coord| {
            let d = (coord - center).abs();
            let keep = d.x.max(d.y) <= radius;
            if !keep {
                evicted.push(coord);
            }
            keep
        });
        evicted
    }

    pub fn is_loaded(&self, coord: IVec2) -> bool {
        self.loaded.contains(&coord)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

/// Evict distant chunks (when configured), then load the ship's neighbourhood.
pub fn chunk_streaming_system(
    mut chunks: ResMut<ChunkManager>,
    mut cosmos: ResMut<Cosmos>,
    ship: Res<Ship>,
    config: Res<CosmosConfig>,
) {
    if let Some(radius) = config.eviction_radius {
        let center = chunk_coord(ship.position, config.chunk_size);
        let evicted = chunks.evict_beyond(center, radius);
        if !evicted.is_empty() {
            let set: HashSet<IVec2> = evicted.iter().copied().collect();
            let removed = cosmos.evict_chunks(&set);
            info!(
                "Evicted {} chunks ({} objects) around {}",
                evicted.len(),
                removed,
                center
            );
        }
    }

    for coord in chunks.ensure_loaded(ship.position, &mut cosmos, &config) {
        debug!("Generated chunk {coord}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_floor_toward_negative_infinity() {
        assert_eq!(chunk_coord(Vec2::new(0.0, 1999.9), 2000.0), IVec2::new(0, 0));
        assert_eq!(chunk_coord(Vec2::new(-0.1, 2000.0), 2000.0), IVec2::new(-1, 1));
        assert_eq!(chunk_coord(Vec2::new(-4000.0, -4000.1), 2000.0), IVec2::new(-2, -3));
    }

    #[test]
    fn seeds_differ_between_neighbours_and_worlds() {
        let a = chunk_seed(IVec2::new(0, 1), 7);
        let b = chunk_seed(IVec2::new(1, 0), 7);
        let c = chunk_seed(IVec2::new(0, 1), 8);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn same_chunk_same_contents() {
        let config = CosmosConfig::default();
        let coord = IVec2::new(-3, 12);
        assert_eq!(populate_chunk(coord, &config), populate_chunk(coord, &config));
    }

    #[test]
    fn chunk_contents_stay_in_chunk_and_in_range() {
        let config = CosmosConfig::default();
        for x in -2..2 {
            for y in -2..2 {
                let coord = IVec2::new(x, y);
                let region = chunk_region(coord, config.chunk_size);
                let batch = populate_chunk(coord, &config);
                let stars = batch.stars.len() as u32;
                assert!((STARS_PER_CHUNK_MIN..STARS_PER_CHUNK_MAX).contains(&stars));
                assert!(batch.planets.len() <= 1);
                assert!(batch.nebulae.len() <= 1);
                assert!(batch.black_holes.len() <= 1);
                assert!(batch.stars.iter().all(|s| region.contains(s.position)));
            }
        }
    }

    #[test]
    fn spawn_rates_match_configured_chances() {
        let config = CosmosConfig {
            stars_per_chunk_min: 0,
            stars_per_chunk_max: 0,
            ..Default::default()
        };
        let (mut planets, mut nebulae, mut holes) = (0usize, 0usize, 0usize);
        for x in -50..50 {
            for y in -50..50 {
                let batch = populate_chunk(IVec2::new(x, y), &config);
                planets += batch.planets.len();
                nebulae += batch.nebulae.len();
                holes += batch.black_holes.len();
            }
        }

        let rate = |n: usize| n as f64 / 10_000.0;
        assert!((rate(planets) - PLANET_CHANCE).abs() < 0.03, "planets {planets}");
        assert!((rate(nebulae) - NEBULA_CHANCE).abs() < 0.02, "nebulae {nebulae}");
        assert!((rate(holes) - BLACK_HOLE_CHANCE).abs() < 0.01, "black holes {holes}");
    }

    #[test]
    fn fixed_star_count_when_range_is_empty() {
        let config = CosmosConfig {
            stars_per_chunk_min: 7,
            stars_per_chunk_max: 7,
            ..Default::default()
        };
        assert_eq!(populate_chunk(IVec2::ZERO, &config).stars.len(), 7);
    }

    #[test]
    fn ensure_loaded_is_idempotent() {
        let config = CosmosConfig::default();
        let mut chunks = ChunkManager::default();
        let mut cosmos = Cosmos::default();

        let first = chunks.ensure_loaded(Vec2::new(10.0, 10.0), &mut cosmos, &config);
        let count = cosmos.object_count();
        let second = chunks.ensure_loaded(Vec2::new(1500.0, 20.0), &mut cosmos, &config);

        assert_eq!(first.len(), 9);
        assert!(second.is_empty());
        assert_eq!(cosmos.object_count(), count);
        assert!(chunks.is_loaded(IVec2::new(-1, -1)));
        assert!(chunks.is_loaded(IVec2::new(1, 1)));
    }

    #[test]
    fn crossing_a_border_loads_one_new_column() {
        let config = CosmosConfig::default();
        let mut chunks = ChunkManager::default();
        let mut cosmos = Cosmos::default();
        chunks.ensure_loaded(Vec2::new(1000.0, 1000.0), &mut cosmos, &config);

        let mut generated = chunks.ensure_loaded(Vec2::new(2100.0, 1000.0), &mut cosmos, &config);
        generated.sort_by_key(|c| c.y);

        assert_eq!(
            generated,
            vec![IVec2::new(2, -1), IVec2::new(2, 0), IVec2::new(2, 1)]
        );
        assert_eq!(chunks.loaded_count(), 12);
    }

    #[test]
    fn eviction_uses_chebyshev_distance() {
        let config = CosmosConfig::default();
        let mut chunks = ChunkManager::default();
        let mut cosmos = Cosmos::default();
        chunks.ensure_loaded(Vec2::ZERO, &mut cosmos, &config);

        let mut evicted = chunks.evict_beyond(IVec2::new(2, 0), 2);
        evicted.sort_by_key(|c| c.y);

        assert_eq!(
            evicted,
            vec![IVec2::new(-1, -1), IVec2::new(-1, 0), IVec2::new(-1, 1)]
        );
        assert_eq!(chunks.loaded_count(), 6);
    }

    #[test]
    fn initial_field_has_the_configured_counts() {
        let batch = generate_initial_field(&CosmosConfig::default());
        assert_eq!(batch.stars.len(), INITIAL_STAR_COUNT);
        assert_eq!(batch.planets.len(), INITIAL_PLANET_COUNT);
        assert_eq!(batch.nebulae.len(), INITIAL_NEBULA_COUNT);
        assert_eq!(batch.black_holes.len(), INITIAL_BLACK_HOLE_COUNT);
        assert!(batch
            .planets
            .iter()
            .all(|p| Region::centered(INITIAL_PLANET_SPREAD).contains(p.position)));
    }
}
