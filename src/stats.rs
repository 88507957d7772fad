//! Running exploration statistics shown in the HUD.

use bevy::prelude::*;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Distinct planets and black holes discovered.
    pub objects_discovered: u32,
    /// Accumulated `speed * distance_per_speed` over every frame.
    pub distance_traveled: f32,
    /// Post-clamp ship speed of the last frame.
    pub current_speed: f32,
}

impl Stats {
    pub fn record_motion(&mut self, speed: f32, distance_per_speed: f32) {
        self.current_speed = speed;
        self.distance_traveled += speed * distance_per_speed;
    }

    pub fn record_discovery(&mut self) {
        self.objects_discovered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_accumulates_scaled_distance() {
        let mut stats = Stats::default();
        stats.record_motion(10.0, 0.01);
        stats.record_motion(5.0, 0.01);
        assert!((stats.distance_traveled - 0.15).abs() < 1e-6);
        assert_eq!(stats.current_speed, 5.0);
    }
}
