//! One simulation step
//!
//! Core game loop that advances a run deterministically. The step order is
//! fixed: player physics, world switch, dash, speed + spawn, scoring,
//! obstacle advance + collision, then feedback decay.

use super::collision::resolve_obstacles;
use super::entity::Player;
use super::feedback::{HIT_COLOR, JUMP_DUST_COLOR, emit_particles, integrate_particles};
use super::physics::{integrate_player, tick_timers};
use super::spawner::maybe_spawn;
use super::state::{Cue, GameEvent, RunState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Resolved intents for a single tick (deterministic)
///
/// These are already edge-detected and cooldown-gated by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (only takes while grounded)
    pub jump: bool,
    /// Flip to the other world
    pub switch_world: bool,
    /// Start a dash (needs energy)
    pub dash: bool,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Terminal hit; carries the floored final score and distance
    Terminal { score: u64, distance: u64 },
}

/// Advance the run by one tick
///
/// Cues are appended to `events`. On a terminal hit the tick stops right
/// there: shake and particles from the hit are left undecayed for the final
/// frame.
pub fn tick(state: &mut RunState, input: &TickInput, events: &mut Vec<GameEvent>) -> TickOutcome {
    state.frame += 1;

    // --- Player ---
    let step = integrate_player(&mut state.player, input.jump, &state.tuning);
    if step.jumped {
        events.push(GameEvent::Cue(Cue::Jump));
        let feet = state.player.feet();
        emit_particles(&mut state.particles, &mut state.rng, feet, JUMP_DUST_COLOR, 10, 5.0);
    }

    if input.switch_world {
        switch_world(state);
        events.push(GameEvent::Cue(Cue::WorldSwitch));
    }

    if input.dash && try_dash(&mut state.player, &mut state.energy, &state.tuning) {
        log::debug!("Dash at frame {}, energy left {}", state.frame, state.energy);
        events.push(GameEvent::Cue(Cue::Dash));
    }

    // --- Difficulty + spawning ---
    state.progress.update_speed(&state.tuning);
    let distance = state.progress.distance;
    if let Some(obstacle) = maybe_spawn(state.frame, distance, &mut state.rng, &state.tuning) {
        state.obstacles.push(obstacle);
    }

    // --- Scoring ---
    let speed = state.effective_speed();
    state.progress.advance(speed);

    // --- Obstacles ---
    if let Some(hit) = resolve_obstacles(&mut state.obstacles, &state.player, speed) {
        let score = state.progress.reported_score();
        let distance = state.progress.reported_distance();
        log::info!(
            "Terminal hit by {:?} obstacle at ({:.0}, {:.0}): score {}, distance {}",
            hit.affinity,
            hit.obstacle_pos.x,
            hit.obstacle_pos.y,
            score,
            distance
        );

        events.push(GameEvent::Cue(Cue::Hit));
        state.shake.trigger(SHAKE_HIT);
        let origin = state.player.pos;
        emit_particles(&mut state.particles, &mut state.rng, origin, HIT_COLOR, 30, 15.0);

        return TickOutcome::Terminal { score, distance };
    }

    // --- Timers + feedback ---
    tick_timers(&mut state.player);
    state.shake.decay();
    integrate_particles(&mut state.particles);

    TickOutcome::Continue
}

/// Flip the player's world with a shake and a burst in the new world's color
fn switch_world(state: &mut RunState) {
    state.player.world = state.player.world.toggled();
    state.shake.trigger(SHAKE_SWITCH);

    let center = state.player.center();
    let color = state.player.world.primary_color();
    emit_particles(&mut state.particles, &mut state.rng, center, color, 20, 10.0);
}

/// Start a dash if one isn't running and there's enough energy
///
/// The dash window doubles as the immunity window.
fn try_dash(player: &mut Player, energy: &mut u32, tuning: &Tuning) -> bool {
    if player.dashing || *energy < tuning.dash_cost {
        return false;
    }
    *energy -= tuning.dash_cost;
    player.dashing = true;
    player.dash_timer = tuning.dash_duration;
    player.invincible_timer = tuning.dash_duration;
    true
}
