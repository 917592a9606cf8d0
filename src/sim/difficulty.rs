//! Difficulty ramp and scoring
//!
//! Everything here is a function of cumulative distance. Score counts
//! elapsed ticks, not distance.

use serde::{Deserialize, Serialize};

use crate::consts::DISTANCE_DIVISOR;
use crate::tuning::Tuning;

/// Scroll speed for a given distance, capped at `max_speed`
pub fn scroll_speed(distance: f64, tuning: &Tuning) -> f32 {
    let ramp = distance / tuning.speed_ramp_distance as f64;
    (tuning.base_speed as f64 + ramp).min(tuning.max_speed as f64) as f32
}

/// Frames between spawns for a given distance, floored at `spawn_interval_min`
pub fn spawn_interval(distance: f64, tuning: &Tuning) -> u64 {
    let steps = (distance.max(0.0) / tuning.spawn_step_distance as f64).floor() as u64;
    tuning
        .spawn_interval_initial
        .saturating_sub(steps.saturating_mul(tuning.spawn_step_frames))
        .max(tuning.spawn_interval_min)
}

/// Run progress counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Ticks survived
    pub score: u64,
    /// Cumulative distance (speed / 10 per tick). Double precision so long
    /// runs keep accruing.
    pub distance: f64,
    /// Current base scroll speed
    pub speed: f32,
}

impl Progress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            distance: 0.0,
            speed: tuning.base_speed,
        }
    }

    /// Recompute the base scroll speed from distance covered so far
    pub fn update_speed(&mut self, tuning: &Tuning) {
        self.speed = scroll_speed(self.distance, tuning);
    }

    /// Accrue one tick of distance and score at the given effective speed
    pub fn advance(&mut self, effective_speed: f32) {
        self.distance += effective_speed as f64 / DISTANCE_DIVISOR as f64;
        self.score += 1;
    }

    /// Score as reported outward
    pub fn reported_score(&self) -> u64 {
        self.score
    }

    /// Floored distance as reported outward
    pub fn reported_distance(&self) -> u64 {
        self.distance.floor().max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_ramp_points() {
        let tuning = Tuning::default();
        assert_eq!(scroll_speed(0.0, &tuning), RUN_SPEED_BASE);
        assert_eq!(scroll_speed(4000.0, &tuning), 12.0);
        assert_eq!(scroll_speed(8000.0, &tuning), MAX_RUN_SPEED);
        assert_eq!(scroll_speed(1.0e9, &tuning), MAX_RUN_SPEED);
    }

    #[test]
    fn test_spawn_interval_steps() {
        let tuning = Tuning::default();
        assert_eq!(spawn_interval(0.0, &tuning), 90);
        assert_eq!(spawn_interval(499.9, &tuning), 90);
        assert_eq!(spawn_interval(500.0, &tuning), 85);
        assert_eq!(spawn_interval(2600.0, &tuning), 65);
        assert_eq!(spawn_interval(6000.0, &tuning), 30);
        assert_eq!(spawn_interval(1.0e12, &tuning), 30);
    }

    #[test]
    fn test_progress_reports_floored_values() {
        let tuning = Tuning::default();
        let mut progress = Progress::new(&tuning);
        for _ in 0..3 {
            progress.update_speed(&tuning);
            progress.advance(progress.speed);
        }
        assert_eq!(progress.reported_score(), 3);
        // 3 ticks at just over 8.0 -> 2.4..
        assert_eq!(progress.reported_distance(), 2);
        assert!(progress.distance > 2.4);
    }

    #[test]
    fn test_distance_keeps_growing_on_long_runs() {
        // Past 2^25 an f32 accumulator would stop moving at +1.6 per tick
        let mut progress = Progress {
            score: 0,
            distance: 40_000_000.0,
            speed: MAX_RUN_SPEED,
        };
        let before = progress.distance;
        progress.advance(MAX_RUN_SPEED);
        assert!((progress.distance - before - 1.6).abs() < 1e-6);
        assert_eq!(progress.reported_distance(), 40_000_001);
    }

    proptest! {
        #[test]
        fn prop_speed_monotone_and_capped(a in 0.0f64..1.0e12, b in 0.0f64..1.0e12) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let s_lo = scroll_speed(lo, &tuning);
            let s_hi = scroll_speed(hi, &tuning);
            prop_assert!(s_lo <= s_hi);
            prop_assert!(s_hi <= MAX_RUN_SPEED);
            prop_assert!(s_lo >= RUN_SPEED_BASE);
        }

        #[test]
        fn prop_spawn_interval_monotone_and_floored(a in 0.0f64..1.0e12, b in 0.0f64..1.0e12) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let i_lo = spawn_interval(lo, &tuning);
            let i_hi = spawn_interval(hi, &tuning);
            prop_assert!(i_lo >= i_hi);
            prop_assert!(i_hi >= SPAWN_INTERVAL_MIN);
            prop_assert!(i_lo <= SPAWN_INTERVAL_INITIAL);
        }
    }
}
