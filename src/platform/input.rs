//! Keyboard adapter
//!
//! Maps raw key names (DOM `KeyboardEvent.key` values) onto logical actions.
//! Held state is tracked per physical key, so an action stays held while any
//! of its bound keys is down. Bindings are a presentation concern; the
//! simulation only ever sees actions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::input::{Action, InputState};

/// Key name to action table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Vec<String>,
    pub world_switch: Vec<String>,
    pub dash: Vec<String>,
    /// Host-level: toggles audio, never reaches the simulation
    pub mute: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            jump: keys(&[" "]),
            world_switch: keys(&["s", "S", "Shift"]),
            dash: keys(&["k", "K"]),
            mute: keys(&["m", "M"]),
        }
    }
}

impl KeyBindings {
    /// The action bound to `key`, if any
    pub fn action_for(&self, key: &str) -> Option<Action> {
        if self.jump.iter().any(|k| k == key) {
            Some(Action::Jump)
        } else if self.world_switch.iter().any(|k| k == key) {
            Some(Action::WorldSwitch)
        } else if self.dash.iter().any(|k| k == key) {
            Some(Action::Dash)
        } else {
            None
        }
    }

    pub fn is_mute(&self, key: &str) -> bool {
        self.mute.iter().any(|k| k == key)
    }
}

/// Keys currently held, each remembered with the action it drives
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    bindings: KeyBindings,
    /// Lowercased key name -> action
    held: HashMap<String, Action>,
}

impl KeyTracker {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashMap::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Apply a key down/up event. Returns true if the key was bound, so the
    /// caller can suppress the browser default (page scroll on Space).
    ///
    /// Key names are case-folded so `S` pressed with Shift and released as
    /// `s` is the same key.
    pub fn key(&mut self, key: &str, down: bool) -> bool {
        let id = key.to_lowercase();
        if !down {
            return self.held.remove(&id).is_some() || self.bindings.action_for(key).is_some();
        }
        match self.bindings.action_for(key) {
            Some(action) => {
                self.held.insert(id, action);
                true
            }
            None => false,
        }
    }

    /// Actions with at least one bound key down
    pub fn input_state(&self) -> InputState {
        let mut state = InputState::default();
        for action in self.held.values() {
            state.set(*action, true);
        }
        state
    }

    /// Forget everything held (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
