//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Wall-clock time only enters through the world-switch cooldown
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod driver;
pub mod entity;
pub mod feedback;
pub mod input;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Hit, is_dangerous, resolve_obstacles};
pub use difficulty::{Progress, scroll_speed, spawn_interval};
pub use driver::{Frame, Game};
pub use entity::{Affinity, Obstacle, ObstacleType, Particle, Player, World};
pub use feedback::{MAX_PARTICLES, ScreenShake};
pub use input::{Action, InputState};
pub use state::{Cue, GameEvent, GameStatus, RunState, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
