//! Procedural obstacle spawning
//!
//! One type roll and one world roll per spawn, in that order.

use glam::Vec2;
use rand::Rng;

use super::difficulty::spawn_interval;
use super::entity::{Affinity, Obstacle, ObstacleType};
use crate::consts::{CANVAS_WIDTH, GROUND_Y};
use crate::tuning::Tuning;

/// Fixed footprint for an obstacle type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleProfile {
    pub width: f32,
    pub height: f32,
    /// Distance from the ground line up to the obstacle's top edge
    pub ground_offset: f32,
}

impl ObstacleType {
    pub fn profile(self) -> ObstacleProfile {
        let (width, height, ground_offset) = match self {
            ObstacleType::Spike => (40.0, 40.0, 40.0),
            ObstacleType::Wall => (30.0, 100.0, 100.0),
            // Hovers 10px off the ground
            ObstacleType::Enemy => (40.0, 40.0, 50.0),
            // Zero-sized, so it can never overlap anything
            ObstacleType::Gap => (0.0, 0.0, 0.0),
        };
        ObstacleProfile {
            width,
            height,
            ground_offset,
        }
    }
}

/// Map a uniform roll in [0, 1) to an obstacle type
///
/// The ENEMY threshold is the higher one and must be tested first, otherwise
/// every roll above the WALL threshold would swallow it.
pub fn obstacle_type_for_roll(roll: f32, tuning: &Tuning) -> ObstacleType {
    if roll > tuning.enemy_threshold {
        ObstacleType::Enemy
    } else if roll > tuning.wall_threshold {
        ObstacleType::Wall
    } else {
        ObstacleType::Spike
    }
}

/// Build an obstacle of `kind` at the right edge of the viewport
pub fn spawn_obstacle(kind: ObstacleType, affinity: Affinity) -> Obstacle {
    let profile = kind.profile();
    Obstacle {
        kind,
        pos: Vec2::new(CANVAS_WIDTH, GROUND_Y - profile.ground_offset),
        size: Vec2::new(profile.width, profile.height),
        affinity,
        active: true,
        passed: false,
    }
}

/// Spawn an obstacle if `frame` lands on the current cadence
pub fn maybe_spawn<R: Rng>(
    frame: u64,
    distance: f64,
    rng: &mut R,
    tuning: &Tuning,
) -> Option<Obstacle> {
    let interval = spawn_interval(distance, tuning);
    if frame % interval != 0 {
        return None;
    }

    let kind = obstacle_type_for_roll(rng.random::<f32>(), tuning);
    let affinity = if rng.random::<f32>() > 0.5 {
        Affinity::Bright
    } else {
        Affinity::Dark
    };

    log::trace!(
        "Spawn {:?} ({:?}) at frame {} (interval {})",
        kind,
        affinity,
        frame,
        interval
    );
    Some(spawn_obstacle(kind, affinity))
}
