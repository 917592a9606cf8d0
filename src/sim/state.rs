//! Run state and outward-facing types
//!
//! [`RunState`] is the single authoritative copy of a run. Observers only
//! ever see [`Snapshot`] copies of it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Progress;
use super::entity::{Obstacle, Particle, Player, World};
use super::feedback::ScreenShake;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Discrete audio cues, fire-and-forget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    WorldSwitch,
    Dash,
    Hit,
    /// Reserved for collectibles
    Collect,
}

/// Throttled copy of run statistics for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub distance: u64,
    /// 0-100
    pub energy: u32,
    /// 0-3
    pub health: u8,
    /// Always >= 1.0
    pub combo: f32,
    pub status: GameStatus,
    pub high_score: u64,
    /// The player's current world, for HUD theming
    pub world: World,
}

/// Events produced by the simulation for the outside world
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Play a sound
    Cue(Cue),
    /// Updated statistics
    Stats(Snapshot),
    /// The run ended. Fires exactly once per run.
    GameOver {
        score: u64,
        distance: u64,
        new_high_score: bool,
    },
}

/// Everything that changes during a run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub frame: u64,
    pub progress: Progress,
    pub shake: ScreenShake,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub energy: u32,
    pub health: u8,
    pub combo: f32,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl RunState {
    /// Fresh run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            frame: 0,
            progress: Progress::new(&tuning),
            shake: ScreenShake::default(),
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            energy: MAX_ENERGY,
            health: MAX_HEALTH,
            combo: 1.0,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Scroll speed this tick, including any dash boost
    pub fn effective_speed(&self) -> f32 {
        if self.player.dashing {
            self.progress.speed * self.tuning.dash_speed_mult
        } else {
            self.progress.speed
        }
    }

    /// Copy out the outward-facing statistics
    pub fn snapshot(&self, status: GameStatus, high_score: u64) -> Snapshot {
        Snapshot {
            score: self.progress.reported_score(),
            distance: self.progress.reported_distance(),
            energy: self.energy.min(MAX_ENERGY),
            health: self.health.min(MAX_HEALTH),
            combo: self.combo.max(1.0),
            status,
            high_score,
            world: self.player.world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let run = RunState::new(5, Tuning::default());
        assert_eq!(run.frame, 0);
        assert_eq!(run.progress.speed, RUN_SPEED_BASE);
        assert!(run.obstacles.is_empty());
        assert!(run.player.grounded);
        assert_eq!(run.player.world, World::Bright);

        let snap = run.snapshot(GameStatus::Playing, 77);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.distance, 0);
        assert_eq!(snap.energy, 100);
        assert_eq!(snap.health, 3);
        assert_eq!(snap.combo, 1.0);
        assert_eq!(snap.high_score, 77);
    }

    #[test]
    fn test_snapshot_serializes() {
        let run = RunState::new(5, Tuning::default());
        let json = serde_json::to_string(&run.snapshot(GameStatus::Menu, 0)).unwrap();
        assert!(json.contains("\"status\":\"Menu\""));
        assert!(json.contains("\"world\":\"Bright\""));
    }

    #[test]
    fn test_dash_multiplies_speed() {
        let mut run = RunState::new(5, Tuning::default());
        assert_eq!(run.effective_speed(), 8.0);
        run.player.dashing = true;
        assert_eq!(run.effective_speed(), 20.0);
    }
}
