//! Rift Runner - a dual-world side-scrolling survival runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, affinity collisions, run state)
//! - `renderer`: Display list generation and the canvas backend
//! - `audio`: Fire-and-forget cue sink (Web Audio synth on wasm32)
//! - `platform`: Browser/native input adapters
//! - `persistence`: Key-value storage used by settings and the high score
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the compile-time defaults; [`Tuning`] mirrors the gameplay
/// subset so it can be overridden from JSON.
pub mod consts {
    /// Logical render surface
    pub const CANVAS_WIDTH: f32 = 1280.0;
    pub const CANVAS_HEIGHT: f32 = 720.0;

    /// Top of the floor strip; nothing stands below this line
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - 100.0;

    /// Player physics (pixels per tick)
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_FORCE: f32 = -16.0;

    /// Player box
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 150.0;

    /// Scroll speed ramp
    pub const RUN_SPEED_BASE: f32 = 8.0;
    pub const MAX_RUN_SPEED: f32 = 16.0;
    /// Distance units per +1 scroll speed
    pub const SPEED_RAMP_DISTANCE: f32 = 1000.0;
    /// distance += speed / DISTANCE_DIVISOR each tick
    pub const DISTANCE_DIVISOR: f32 = 10.0;

    /// Spawn cadence (frames)
    pub const SPAWN_INTERVAL_INITIAL: u64 = 90;
    pub const SPAWN_INTERVAL_MIN: u64 = 30;
    pub const SPAWN_STEP_DISTANCE: f32 = 500.0;
    pub const SPAWN_STEP_FRAMES: u64 = 5;

    /// Spawn type thresholds, checked highest first
    pub const ENEMY_THRESHOLD: f32 = 0.9;
    pub const WALL_THRESHOLD: f32 = 0.7;

    /// Resources
    pub const MAX_HEALTH: u8 = 3;
    pub const MAX_ENERGY: u32 = 100;
    pub const DASH_COST: u32 = 25;
    pub const DASH_DURATION: u32 = 15;
    pub const DASH_SPEED_MULT: f32 = 2.5;

    /// Minimum wall-clock gap between accepted world switches
    pub const SWITCH_COOLDOWN_MS: f64 = 200.0;

    /// Snapshot emitted every N ticks
    pub const STATS_INTERVAL: u64 = 10;

    /// Feedback
    pub const PARTICLE_DECAY: f32 = 0.05;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_SNAP: f32 = 0.5;
    pub const SHAKE_SWITCH: f32 = 5.0;
    pub const SHAKE_HIT: f32 = 15.0;
}
