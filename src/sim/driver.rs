//! Simulation driver
//!
//! Owns the authoritative [`RunState`] and the MENU -> PLAYING -> GAME_OVER
//! state machine. The host calls [`Game::frame`] once per display refresh
//! while [`Frame::schedule_next`] says so.

use super::input::{EdgeDetector, InputState, SwitchGate};
use super::state::{GameEvent, GameStatus, RunState, Snapshot};
use super::tick::{TickInput, TickOutcome, tick};
use crate::consts::STATS_INTERVAL;
use crate::tuning::Tuning;

/// Result of one host frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Cues, snapshots and the terminal event, in emission order
    pub events: Vec<GameEvent>,
    /// Whether the host should schedule another frame
    pub schedule_next: bool,
}

/// The game: run state plus everything needed to drive it
#[derive(Debug, Clone)]
pub struct Game {
    status: GameStatus,
    run: RunState,
    tuning: Tuning,
    high_score: u64,
    edges: EdgeDetector,
    switch_gate: SwitchGate,
}

impl Game {
    /// New game sitting in the menu
    pub fn new(tuning: Tuning, high_score: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            status: GameStatus::Menu,
            run: RunState::new(0, tuning.clone()),
            switch_gate: SwitchGate::new(tuning.switch_cooldown_ms),
            tuning,
            high_score,
            edges: EdgeDetector::default(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Read-only view of the current (or last) run
    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn snapshot(&self) -> Snapshot {
        self.run.snapshot(self.status, self.high_score)
    }

    /// Start a fresh run (from the menu, or retry after game over)
    ///
    /// Returns the initial snapshot. Ignored while a run is in progress.
    pub fn start(&mut self, seed: u64) -> Vec<GameEvent> {
        if self.status == GameStatus::Playing {
            log::warn!("Start requested while already playing; ignoring");
            return Vec::new();
        }

        self.run = RunState::new(seed, self.tuning.clone());
        self.edges.reset();
        self.switch_gate.reset();
        self.status = GameStatus::Playing;
        log::info!("Run started with seed {}", seed);

        vec![GameEvent::Stats(self.snapshot())]
    }

    /// Leave the game-over screen for the menu
    pub fn return_to_menu(&mut self) -> Vec<GameEvent> {
        if self.status != GameStatus::GameOver {
            return Vec::new();
        }
        self.status = GameStatus::Menu;
        vec![GameEvent::Stats(self.snapshot())]
    }

    /// Run one frame with the currently held input
    ///
    /// Does nothing outside of PLAYING. `now_ms` is wall-clock time and only
    /// gates world switches.
    pub fn frame(&mut self, held: &InputState, now_ms: f64) -> Frame {
        if self.status != GameStatus::Playing {
            return Frame::default();
        }

        let pressed = self.edges.pressed(held);
        let switch_world = pressed.world_switch && self.switch_gate.try_pass(now_ms);
        if pressed.world_switch && !switch_world {
            log::debug!("World switch ignored (cooldown)");
        }

        let input = TickInput {
            jump: pressed.jump,
            switch_world,
            dash: pressed.dash,
        };

        let mut events = Vec::new();
        match tick(&mut self.run, &input, &mut events) {
            TickOutcome::Continue => {
                if self.run.frame % STATS_INTERVAL == 0 {
                    events.push(GameEvent::Stats(self.snapshot()));
                }
                Frame {
                    events,
                    schedule_next: true,
                }
            }
            TickOutcome::Terminal { score, distance } => {
                self.status = GameStatus::GameOver;
                let new_high_score = score > self.high_score;
                if new_high_score {
                    self.high_score = score;
                }
                log::info!(
                    "Game over: score {}, distance {}{}",
                    score,
                    distance,
                    if new_high_score { " (new high score)" } else { "" }
                );

                events.push(GameEvent::GameOver {
                    score,
                    distance,
                    new_high_score,
                });
                events.push(GameEvent::Stats(self.snapshot()));
                Frame {
                    events,
                    schedule_next: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Affinity, ObstacleType, World};
    use crate::sim::input::Action;
    use crate::sim::spawner::spawn_obstacle;
    use crate::sim::state::Cue;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn playing_game() -> Game {
        let mut game = Game::new(Tuning::default(), 0);
        game.start(42);
        game
    }

    fn place_hazard(game: &mut Game, x: f32) {
        let mut obstacle = spawn_obstacle(ObstacleType::Spike, Affinity::Both);
        obstacle.pos.x = x;
        game.run.obstacles.push(obstacle);
    }

    fn count_game_overs(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut game = Game::new(Tuning::default(), 0);
        let frame = game.frame(&InputState::default(), 0.0);
        assert_eq!(frame, Frame::default());
        assert_eq!(game.run().frame, 0);
        assert_eq!(game.status(), GameStatus::Menu);
    }

    #[test]
    fn test_start_emits_snapshot() {
        let mut game = Game::new(Tuning::default(), 12);
        let events = game.start(1);
        assert_eq!(game.status(), GameStatus::Playing);
        match &events[..] {
            [GameEvent::Stats(snap)] => {
                assert_eq!(snap.status, GameStatus::Playing);
                assert_eq!(snap.score, 0);
                assert_eq!(snap.high_score, 12);
            }
            other => panic!("unexpected events {:?}", other),
        }
        // Second start while playing is ignored
        assert!(game.start(2).is_empty());
        assert_eq!(game.run().seed, 1);
    }

    #[test]
    fn test_snapshot_every_ten_frames() {
        let mut game = playing_game();
        let held = InputState::default();
        let mut stats_frames = Vec::new();
        for i in 0..35 {
            let frame = game.frame(&held, i as f64 * FRAME_MS);
            assert!(frame.schedule_next);
            if frame.events.iter().any(|e| matches!(e, GameEvent::Stats(_))) {
                stats_frames.push(game.run().frame);
            }
        }
        assert_eq!(stats_frames, vec![10, 20, 30]);
    }

    #[test]
    fn test_game_over_fires_once_and_freezes() {
        let mut game = playing_game();
        place_hazard(&mut game, 200.0);

        let held = InputState::default();
        let mut all_events = Vec::new();
        let mut last = Frame::default();
        for i in 0..20 {
            last = game.frame(&held, i as f64 * FRAME_MS);
            all_events.extend(last.events.clone());
            if !last.schedule_next {
                break;
            }
        }

        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(!last.schedule_next);
        assert_eq!(count_game_overs(&all_events), 1);
        assert!(all_events.contains(&GameEvent::Cue(Cue::Hit)));

        let frozen_frame = game.run().frame;
        let frozen_particles = game.run().particles.len();
        let frozen_x = game.run().obstacles[0].pos.x;
        for i in 0..10 {
            let frame = game.frame(&held, 1000.0 + i as f64 * FRAME_MS);
            assert!(frame.events.is_empty());
            assert!(!frame.schedule_next);
        }
        assert_eq!(game.run().frame, frozen_frame);
        assert_eq!(game.run().particles.len(), frozen_particles);
        assert_eq!(game.run().obstacles[0].pos.x, frozen_x);
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let mut game = Game::new(Tuning::default(), 3);
        game.start(7);
        place_hazard(&mut game, 400.0);

        let mut events = Vec::new();
        for i in 0..60 {
            let frame = game.frame(&InputState::default(), i as f64 * FRAME_MS);
            events.extend(frame.events);
        }
        let game_over = events
            .iter()
            .find_map(|e| match e {
                GameEvent::GameOver {
                    score,
                    new_high_score,
                    ..
                } => Some((*score, *new_high_score)),
                _ => None,
            })
            .unwrap();
        assert!(game_over.0 > 3);
        assert!(game_over.1);
        assert_eq!(game.high_score(), game_over.0);
        assert_eq!(game.snapshot().status, GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_below_best_keeps_best() {
        let mut game = Game::new(Tuning::default(), 1_000);
        game.start(7);
        place_hazard(&mut game, 160.0);

        let frame = game.frame(&InputState::default(), 0.0);
        assert!(frame.events.contains(&GameEvent::GameOver {
            score: 1,
            distance: 0,
            new_high_score: false,
        }));
        assert_eq!(game.high_score(), 1_000);
        assert_eq!(game.snapshot().high_score, 1_000);
    }

    #[test]
    fn test_retry_and_menu() {
        let mut game = playing_game();
        place_hazard(&mut game, 160.0);
        game.frame(&InputState::default(), 0.0);
        assert_eq!(game.status(), GameStatus::GameOver);

        // Retry resets the run wholesale
        game.start(43);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.run().frame, 0);
        assert!(game.run().obstacles.is_empty());

        // Menu is only reachable from game over
        assert!(game.return_to_menu().is_empty());
        place_hazard(&mut game, 160.0);
        game.frame(&InputState::default(), 0.0);
        game.return_to_menu();
        assert_eq!(game.status(), GameStatus::Menu);
        game.start(44);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_switch_debounced_within_cooldown() {
        let mut game = playing_game();
        let mut held = InputState::default();

        // Press at t=1000, release, press again 150ms later
        held.set(Action::WorldSwitch, true);
        game.frame(&held, 1000.0);
        held.set(Action::WorldSwitch, false);
        game.frame(&held, 1016.0);
        held.set(Action::WorldSwitch, true);
        let frame = game.frame(&held, 1150.0);

        assert_eq!(game.run().player.world, World::Dark);
        assert!(!frame.events.contains(&GameEvent::Cue(Cue::WorldSwitch)));

        // After the cooldown a fresh press goes through
        held.set(Action::WorldSwitch, false);
        game.frame(&held, 1300.0);
        held.set(Action::WorldSwitch, true);
        game.frame(&held, 1316.0);
        assert_eq!(game.run().player.world, World::Bright);
    }

    #[test]
    fn test_holding_switch_toggles_once() {
        let mut game = playing_game();
        let mut held = InputState::default();
        held.set(Action::WorldSwitch, true);
        for i in 0..60 {
            game.frame(&held, i as f64 * FRAME_MS);
        }
        assert_eq!(game.run().player.world, World::Dark);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut game = playing_game();
        let mut held = InputState::default();
        held.set(Action::Jump, true);

        let mut jumps = 0;
        for i in 0..120 {
            let frame = game.frame(&held, i as f64 * FRAME_MS);
            jumps += frame
                .events
                .iter()
                .filter(|e| **e == GameEvent::Cue(Cue::Jump))
                .count();
            if !frame.schedule_next {
                break;
            }
        }
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_snapshot_carries_world() {
        let mut game = playing_game();
        let mut held = InputState::default();
        held.set(Action::WorldSwitch, true);
        game.frame(&held, 0.0);
        assert_eq!(game.snapshot().world, World::Dark);
    }
}
