//! World state: every generated object plus discovery bookkeeping.
//!
//! [`Cosmos`] is the single owner of object data.  Collections keep insertion
//! order, which the proximity detector relies on; eviction removes whole
//! chunks with `retain`, so surviving objects never reorder.

use crate::objects::{BlackHole, Nebula, ObjectKey, ObjectOrigin, Planet, Star};
use bevy::prelude::*;
use std::collections::HashSet;

/// Objects produced by one generation pass (a chunk or the initial field).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectBatch {
    pub stars: Vec<Star>,
    pub planets: Vec<Planet>,
    pub nebulae: Vec<Nebula>,
    pub black_holes: Vec<BlackHole>,
}

impl ObjectBatch {
    pub fn len(&self) -> usize {
        self.stars.len() + self.planets.len() + self.nebulae.len() + self.black_holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All loaded objects, grouped by category.
#[derive(Resource, Debug, Default)]
pub struct Cosmos {
    pub stars: Vec<Star>,
    pub planets: Vec<Planet>,
    pub nebulae: Vec<Nebula>,
    pub black_holes: Vec<BlackHole>,
    /// Keys of every object ever discovered.  Outlives eviction, so a
    /// regenerated chunk comes back with its discoveries intact.
    discovered: HashSet<ObjectKey>,
}

impl Cosmos {
    /// Append a generated batch, restoring discovery flags for objects seen before.
    pub fn insert_batch(&mut self, batch: ObjectBatch) {
        let ObjectBatch {
            stars,
            mut planets,
            nebulae,
            mut black_holes,
        } = batch;

        for planet in &mut planets {
            planet.discovered = self.discovered.contains(&planet.key);
        }
        for hole in &mut black_holes {
            hole.discovered = self.discovered.contains(&hole.key);
        }

        self.stars.extend(stars);
        self.planets.extend(planets);
        self.nebulae.extend(nebulae);
        self.black_holes.extend(black_holes);
    }

    /// Drop every object generated by one of `chunks`.  Returns how many objects were removed.
    pub fn evict_chunks(&mut self, chunks: &HashSet<IVec2>) -> usize {
        let before = self.object_count();
        let keep = |key: &ObjectKey| match key.origin {
            ObjectOrigin::InitialField => true,
            ObjectOrigin::Chunk(coord) => !chunks.contains(&coord),
        };
        self.stars.retain(|o| keep(&o.key));
        self.planets.retain(|o| keep(&o.key));
        self.nebulae.retain(|o| keep(&o.key));
        self.black_holes.retain(|o| keep(&o.key));
        before - self.object_count()
    }

    /// Flip the planet at `index` to discovered.  Returns `true` only on the
    /// first discovery of that object.
    pub fn discover_planet(&mut self, index: usize) -> bool {
        let Some(planet) = self.planets.get_mut(index) else {
            return false;
        };
        if planet.discovered {
            return false;
        }
        planet.discovered = true;
        self.discovered.insert(planet.key)
    }

    /// Flip the black hole at `index` to discovered.  Returns `true` only on
    /// the first discovery of that object.
    pub fn discover_black_hole(&mut self, index: usize) -> bool {
        let Some(hole) = self.black_holes.get_mut(index) else {
            return false;
        };
        if hole.discovered {
            return false;
        }
        hole.discovered = true;
        self.discovered.insert(hole.key)
    }

    /// Number of distinct objects discovered so far, loaded or not.
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn object_count(&self) -> usize {
        self.stars.len() + self.planets.len() + self.nebulae.len() + self.black_holes.len()
    }
}
