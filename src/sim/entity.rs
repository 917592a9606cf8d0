//! Entity records
//!
//! Plain data for the player, obstacles and particles. Behaviour lives in the
//! physics, spawner, collision and feedback modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two parallel hazard layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum World {
    #[default]
    Bright,
    Dark,
}

impl World {
    /// The other world
    pub fn toggled(self) -> Self {
        match self {
            World::Bright => World::Dark,
            World::Dark => World::Bright,
        }
    }

    /// Accent color (0xRRGGBB) used for the player and switch bursts
    pub fn primary_color(self) -> u32 {
        match self {
            World::Bright => 0x00FFFF,
            World::Dark => 0x4B0082,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            World::Bright => "BRIGHT",
            World::Dark => "DARK",
        }
    }
}

/// World tag carried by an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affinity {
    Bright,
    Dark,
    /// Dangerous in either world. Reserved for scripted hazards; the
    /// random spawner never produces it.
    Both,
}

impl From<World> for Affinity {
    fn from(world: World) -> Self {
        match world {
            World::Bright => Affinity::Bright,
            World::Dark => Affinity::Dark,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleType {
    #[default]
    Spike,
    Wall,
    Enemy,
    /// Reserved, never spawned
    Gap,
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub grounded: bool,
    pub dashing: bool,
    /// Ticks of dash remaining
    pub dash_timer: u32,
    /// Ticks of hit immunity remaining
    pub invincible_timer: u32,
    pub world: World,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vy: 0.0,
            grounded: true,
            dashing: false,
            dash_timer: 0,
            invincible_timer: 0,
            world: World::Bright,
        }
    }
}

impl Player {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Midpoint of the bottom edge
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A scrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleType,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub affinity: Affinity,
    /// Cleared when this obstacle ended the run
    pub active: bool,
    /// Set once the obstacle is fully behind the player
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub color: u32, // 0xRRGGBB
    pub size: f32,
}
