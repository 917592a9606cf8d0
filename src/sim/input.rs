//! Logical input state
//!
//! The platform layer writes which actions are currently held; the driver
//! reads it once per tick. Writes between ticks are last-write-wins, so a
//! press and release inside the same frame is never seen.

use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Jump,
    WorldSwitch,
    Dash,
}

/// Actions currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub jump: bool,
    pub world_switch: bool,
    pub dash: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, down: bool) {
        match action {
            Action::Jump => self.jump = down,
            Action::WorldSwitch => self.world_switch = down,
            Action::Dash => self.dash = down,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Turns held state into press edges by comparing with the previous tick
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: InputState,
}

impl EdgeDetector {
    /// Actions that went from released to held since the last call
    pub fn pressed(&mut self, current: &InputState) -> InputState {
        let edges = InputState {
            jump: current.jump && !self.previous.jump,
            world_switch: current.world_switch && !self.previous.world_switch,
            dash: current.dash && !self.previous.dash,
        };
        self.previous = *current;
        edges
    }

    pub fn reset(&mut self) {
        self.previous = InputState::default();
    }
}

/// Wall-clock cooldown for world switches
#[derive(Debug, Clone)]
pub struct SwitchGate {
    cooldown_ms: f64,
    last_switch_ms: Option<f64>,
}

impl SwitchGate {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last_switch_ms: None,
        }
    }

    /// Accept a switch request at `now_ms` if the cooldown has elapsed
    pub fn try_pass(&mut self, now_ms: f64) -> bool {
        let ready = match self.last_switch_ms {
            Some(last) => now_ms - last > self.cooldown_ms,
            None => true,
        };
        if ready {
            self.last_switch_ms = Some(now_ms);
        }
        ready
    }

    pub fn reset(&mut self) {
        self.last_switch_ms = None;
    }
}
