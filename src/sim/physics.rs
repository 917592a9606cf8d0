//! Player vertical motion
//!
//! The player never moves horizontally; the world scrolls past instead.

use super::entity::Player;
use crate::consts::GROUND_Y;
use crate::tuning::Tuning;

/// What happened during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsStep {
    /// Jump impulse applied this tick
    pub jumped: bool,
}

/// Advance the player's vertical motion by one tick
///
/// A jump only takes while grounded. Gravity has no terminal velocity; the
/// ground clamp is the only bound.
pub fn integrate_player(player: &mut Player, jump: bool, tuning: &Tuning) -> PhysicsStep {
    let mut step = PhysicsStep::default();

    if jump && player.grounded {
        player.vy = tuning.jump_force;
        player.grounded = false;
        step.jumped = true;
    }

    if !player.grounded {
        player.vy += tuning.gravity;
    }

    player.pos.y += player.vy;

    if player.bottom() >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.vy = 0.0;
        player.grounded = true;
    }

    step
}

/// Count down dash and immunity timers (once per tick, after collisions)
pub fn tick_timers(player: &mut Player) {
    player.invincible_timer = player.invincible_timer.saturating_sub(1);
    if player.dashing {
        player.dash_timer = player.dash_timer.saturating_sub(1);
        if player.dash_timer == 0 {
            player.dashing = false;
        }
    }
}
