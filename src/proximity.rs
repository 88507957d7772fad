//! Proximity detection and first-contact discovery.
//!
//! Each frame the detector looks for an object strictly inside
//! `detection_radius` of the ship.  Only planets and black holes are
//! candidates; stars and nebulae are scenery.  The result is published in the
//! [`Nearby`] resource for the HUD, and the first time an object is found its
//! `discovered` flag flips and [`Stats::objects_discovered`] goes up by one.

use crate::config::CosmosConfig;
use crate::cosmos::Cosmos;
use crate::objects::ObjectKey;
use crate::player::Ship;
use crate::stats::Stats;
use bevy::prelude::*;
use serde::Deserialize;

/// How the detector chooses between several objects in range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityPolicy {
    /// Planets first, then black holes, in collection order; the first hit wins.
    #[default]
    ScanOrder,
    /// The closest candidate across both categories.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyKind {
    Planet,
    BlackHole,
}

/// The object the ship is currently near.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyObject {
    pub kind: NearbyKind,
    /// Index into the matching `Cosmos` collection, valid for this frame.
    pub index: usize,
    pub key: ObjectKey,
    pub distance: f32,
}

/// Detector output for the current frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Nearby(pub Option<NearbyObject>);

fn candidates(cosmos: &Cosmos, from: Vec2) -> impl Iterator<Item = NearbyObject> + '_ {
    let planets = cosmos
        .planets
        .iter()
        .enumerate()
        .map(move |(index, p)| NearbyObject {
            kind: NearbyKind::Planet,
            index,
            key: p.key,
            distance: from.distance(p.position),
        });
    let holes = cosmos
        .black_holes
        .iter()
        .enumerate()
        .map(move |(index, h)| NearbyObject {
            kind: NearbyKind::BlackHole,
            index,
            key: h.key,
            distance: from.distance(h.position),
        });
    planets.chain(holes)
}

/// Find the nearby object around `from` without touching any state.
pub fn find_nearby(
    cosmos: &Cosmos,
    from: Vec2,
    radius: f32,
    policy: ProximityPolicy,
) -> Option<NearbyObject> {
    let mut in_range = candidates(cosmos, from).filter(|c| c.distance < radius);
    match policy {
        ProximityPolicy::ScanOrder => in_range.next(),
        ProximityPolicy::Nearest => in_range.min_by(|a, b| a.distance.total_cmp(&b.distance)),
    }
}

/// Find the nearby object and discover it if this is the first contact.
pub fn detect_nearby(
    cosmos: &mut Cosmos,
    stats: &mut Stats,
    from: Vec2,
    config: &CosmosConfig,
) -> Option<NearbyObject> {
    let found = find_nearby(cosmos, from, config.detection_radius, config.proximity_policy)?;
    let first_contact = match found.kind {
        NearbyKind::Planet => cosmos.discover_planet(found.index),
        NearbyKind::BlackHole => cosmos.discover_black_hole(found.index),
    };
    if first_contact {
        stats.record_discovery();
        info!(
            "Discovered {:?} at distance {:.1} ({} total)",
            found.kind, found.distance, stats.objects_discovered
        );
    }
    Some(found)
}

pub fn proximity_system(
    mut cosmos: ResMut<Cosmos>,
    mut stats: ResMut<Stats>,
    mut nearby: ResMut<Nearby>,
    ship: Res<Ship>,
    config: Res<CosmosConfig>,
) {
    nearby.0 = detect_nearby(&mut cosmos, &mut stats, ship.position, &config);
}
