//! Data-driven game balance
//!
//! [`Tuning`] mirrors the gameplay constants in [`crate::consts`]. Any subset
//! can be overridden from JSON; missing keys keep the compile-time default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Player physics
    pub gravity: f32,
    pub jump_force: f32,

    // Scroll speed
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_ramp_distance: f32,

    // Spawn cadence
    pub spawn_interval_initial: u64,
    pub spawn_interval_min: u64,
    pub spawn_step_distance: f32,
    pub spawn_step_frames: u64,
    pub enemy_threshold: f32,
    pub wall_threshold: f32,

    // Dash
    pub dash_cost: u32,
    pub dash_duration: u32,
    pub dash_speed_mult: f32,

    // Input
    pub switch_cooldown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            base_speed: RUN_SPEED_BASE,
            max_speed: MAX_RUN_SPEED,
            speed_ramp_distance: SPEED_RAMP_DISTANCE,
            spawn_interval_initial: SPAWN_INTERVAL_INITIAL,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_step_distance: SPAWN_STEP_DISTANCE,
            spawn_step_frames: SPAWN_STEP_FRAMES,
            enemy_threshold: ENEMY_THRESHOLD,
            wall_threshold: WALL_THRESHOLD,
            dash_cost: DASH_COST,
            dash_duration: DASH_DURATION,
            dash_speed_mult: DASH_SPEED_MULT,
            switch_cooldown_ms: SWITCH_COOLDOWN_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and sanitize the result
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace values that would break the simulation's numeric bounds
    ///
    /// Non-finite floats fall back to their defaults, the spawn interval floor
    /// is at least one frame and the speed cap never sits below the base speed.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn fix(name: &str, value: &mut f32, fallback: f32, positive: bool) {
            if !value.is_finite() || (positive && *value <= 0.0) {
                log::warn!("Tuning: invalid {} ({}), using {}", name, value, fallback);
                *value = fallback;
            }
        }
        fix("gravity", &mut self.gravity, defaults.gravity, false);
        fix("jump_force", &mut self.jump_force, defaults.jump_force, false);
        fix("base_speed", &mut self.base_speed, defaults.base_speed, true);
        fix("max_speed", &mut self.max_speed, defaults.max_speed, true);
        fix(
            "speed_ramp_distance",
            &mut self.speed_ramp_distance,
            defaults.speed_ramp_distance,
            true,
        );
        fix(
            "spawn_step_distance",
            &mut self.spawn_step_distance,
            defaults.spawn_step_distance,
            true,
        );
        fix("enemy_threshold", &mut self.enemy_threshold, defaults.enemy_threshold, false);
        fix("wall_threshold", &mut self.wall_threshold, defaults.wall_threshold, false);
        fix("dash_speed_mult", &mut self.dash_speed_mult, defaults.dash_speed_mult, true);

        if !self.switch_cooldown_ms.is_finite() || self.switch_cooldown_ms < 0.0 {
            log::warn!("Tuning: invalid switch_cooldown_ms, using default");
            self.switch_cooldown_ms = defaults.switch_cooldown_ms;
        }

        if self.max_speed < self.base_speed {
            log::warn!(
                "Tuning: max_speed {} below base_speed {}, raising",
                self.max_speed,
                self.base_speed
            );
            self.max_speed = self.base_speed;
        }

        self.spawn_interval_min = self.spawn_interval_min.max(1);
        self.spawn_interval_initial = self.spawn_interval_initial.max(self.spawn_interval_min);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.2, "spawn_interval_min": 20 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.2);
        assert_eq!(tuning.spawn_interval_min, 20);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
        assert_eq!(tuning.max_speed, MAX_RUN_SPEED);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }

    #[test]
    fn test_sanitize_bounds() {
        let tuning = Tuning {
            spawn_interval_min: 0,
            spawn_interval_initial: 0,
            max_speed: 2.0,
            base_speed: 8.0,
            speed_ramp_distance: 0.0,
            gravity: f32::NAN,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.spawn_interval_min, 1);
        assert_eq!(tuning.spawn_interval_initial, 1);
        assert_eq!(tuning.max_speed, 8.0);
        assert_eq!(tuning.speed_ramp_distance, SPEED_RAMP_DISTANCE);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_defaults_are_already_sane() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }
}
