//! Rift Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use rift_runner::audio::{AudioManager, CueSink};
    use rift_runner::persistence::{KeyValueStore, LocalStore};
    use rift_runner::platform::{KeyBindings, KeyTracker};
    use rift_runner::renderer::{Canvas2d, SceneBuilder, Surface};
    use rift_runner::sim::{Game, GameEvent, GameStatus, Snapshot};
    use rift_runner::{HighScore, Settings, Tuning};

    /// Optional balance override, JSON
    const TUNING_KEY: &str = "rift_runner_tuning";

    /// Everything the page needs between frames
    struct App {
        game: Game,
        keys: KeyTracker,
        surface: Option<Canvas2d>,
        scene: SceneBuilder,
        audio: AudioManager,
        settings: Settings,
        store: LocalStore,
        /// A rAF callback is pending
        looping: bool,
    }

    impl App {
        fn new(surface: Option<Canvas2d>, seed: u64) -> Self {
            let store = LocalStore::new();
            let settings = Settings::load(&store);
            let best = HighScore::load(&store).best();

            let tuning = match store.get(TUNING_KEY) {
                Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                    log::warn!("Ignoring stored tuning: {}", e);
                    Tuning::default()
                }),
                None => Tuning::default(),
            };

            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());

            Self {
                game: Game::new(tuning, best),
                keys: KeyTracker::new(KeyBindings::default()),
                surface,
                scene: SceneBuilder::new(seed),
                audio,
                settings,
                store,
                looping: false,
            }
        }

        /// Begin a run; returns true if the frame loop needs kicking off
        fn start(&mut self) -> bool {
            self.audio.resume();
            let seed = js_sys::Date::now() as u64;
            let events = self.game.start(seed);
            self.handle_events(events);

            if self.game.status() == GameStatus::Playing && !self.looping {
                self.looping = true;
                return true;
            }
            false
        }

        fn return_to_menu(&mut self) {
            let events = self.game.return_to_menu();
            self.handle_events(events);
            self.render();
        }

        /// One display refresh; returns whether to schedule another
        fn frame(&mut self, time: f64) -> bool {
            let frame = self.game.frame(&self.keys.input_state(), time);
            self.handle_events(frame.events);
            self.render();

            if !frame.schedule_next {
                self.looping = false;
            }
            frame.schedule_next
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_muted(&mut self.store);
            self.audio.set_volume(self.settings.effective_volume());
        }

        fn render(&mut self) {
            let Some(surface) = self.surface.as_mut() else {
                return;
            };
            let cmds = self.scene.build(self.game.run(), &self.settings);
            surface.draw(cmds);
        }

        fn handle_events(&mut self, events: Vec<GameEvent>) {
            for event in events {
                match event {
                    GameEvent::Cue(cue) => self.audio.play(cue),
                    GameEvent::Stats(snapshot) => update_hud(&snapshot),
                    GameEvent::GameOver {
                        score,
                        distance,
                        new_high_score,
                    } => {
                        // The game already holds the new best; just persist it
                        if new_high_score {
                            HighScore::new(score).save(&mut self.store);
                        }
                        show_final(score, distance);
                    }
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Mirror a snapshot into the DOM overlay
    fn update_hud(snap: &Snapshot) {
        let Some(document) = document() else { return };

        set_text(&document, "hud-score", &snap.score.to_string());
        set_text(&document, "hud-distance", &format!("{}m", snap.distance));
        set_text(&document, "hud-energy", &snap.energy.to_string());
        set_text(&document, "hud-health", &snap.health.to_string());
        set_text(&document, "hud-combo", &format!("x{:.1}", snap.combo));
        set_text(&document, "hud-world", snap.world.as_str());
        set_text(&document, "high-score", &snap.high_score.to_string());

        set_visible(&document, "menu", snap.status == GameStatus::Menu);
        set_visible(&document, "hud", snap.status == GameStatus::Playing);
        set_visible(&document, "game-over", snap.status == GameStatus::GameOver);
    }

    fn show_final(score: u64, distance: u64) {
        let Some(document) = document() else { return };
        set_text(&document, "final-score", &score.to_string());
        set_text(&document, "final-distance", &format!("{}m", distance));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Rift Runner starting...");

        let Some(document) = document() else {
            log::warn!("No document - nothing to run");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let surface = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| Canvas2d::new(&canvas));
        if surface.is_none() {
            log::warn!("No 2D canvas - running without rendering");
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(surface, seed)));
        {
            let mut a = app.borrow_mut();
            let snapshot = a.game.snapshot();
            update_hud(&snapshot);
            a.render();
        }

        setup_keyboard(app.clone());
        setup_buttons(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };

        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut a = app.borrow_mut();

                if down && key == "Enter" && a.game.status() != GameStatus::Playing {
                    let kick = a.start();
                    drop(a);
                    if kick {
                        request_animation_frame(app.clone());
                    }
                    return;
                }

                if down && a.keys.bindings().is_mute(&key) {
                    if !event.repeat() {
                        a.toggle_mute();
                    }
                    return;
                }

                // Auto-repeat keydowns carry no new information
                if down && event.repeat() {
                    if a.keys.bindings().action_for(&key).is_some() {
                        event.prevent_default();
                    }
                    return;
                }

                if a.keys.key(&key, down) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drop held keys when focus leaves so nothing sticks
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().keys.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = document() else { return };

        for id in ["start-btn", "retry-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let kick = app.borrow_mut().start();
                if kick {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().return_to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = app.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless native run driven by a simple autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rift_runner::audio::{AudioManager, CueSink};
    use rift_runner::persistence::MemoryStore;
    use rift_runner::renderer::{DrawCmd, SceneBuilder, Surface};
    use rift_runner::sim::{Action, Game, GameEvent, InputState, RunState, is_dangerous};
    use rift_runner::{HighScore, Settings, Tuning};

    /// 60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of play
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// How far ahead (in ticks of travel) the autopilot reacts
    const LOOKAHEAD_TICKS: f32 = 6.0;

    /// Hold WORLD_SWITCH while a dangerous obstacle is about to reach the player
    pub fn autopilot(run: &RunState) -> InputState {
        let player = &run.player;
        let reach = player.pos.x + player.size.x + run.effective_speed() * LOOKAHEAD_TICKS;

        let threatened = run.obstacles.iter().any(|o| {
            o.active
                && o.right() > player.pos.x
                && o.pos.x < reach
                && is_dangerous(o.affinity, player.world)
        });

        let mut input = InputState::default();
        input.set(Action::WorldSwitch, threatened);
        input
    }

    pub fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                return Tuning::default();
            }
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    struct Sinks {
        audio: AudioManager,
        store: MemoryStore,
    }

    impl Sinks {
        fn dispatch(&mut self, events: Vec<GameEvent>, ticks: u64) {
            for event in events {
                match event {
                    GameEvent::Cue(cue) => self.audio.play(cue),
                    GameEvent::Stats(snap) => {
                        log::trace!("score {} distance {}m", snap.score, snap.distance)
                    }
                    GameEvent::GameOver {
                        score,
                        distance,
                        new_high_score,
                    } => {
                        if new_high_score {
                            HighScore::new(score).save(&mut self.store);
                        }
                        log::info!(
                            "Run over after {} ticks: score {}, distance {}m{}",
                            ticks,
                            score,
                            distance,
                            if new_high_score { ", new high score" } else { "" }
                        );
                    }
                }
            }
        }
    }

    pub fn run(tuning: Tuning, seed: u64) {
        let store = MemoryStore::new();
        let best = HighScore::load(&store).best();
        let settings = Settings::default();
        let mut sinks = Sinks {
            audio: AudioManager::new(),
            store,
        };
        sinks.audio.set_volume(settings.effective_volume());
        let mut scene = SceneBuilder::new(seed);
        let mut surface: Vec<DrawCmd> = Vec::new();

        let mut game = Game::new(tuning, best);
        sinks.dispatch(game.start(seed), 0);
        let mut now = 0.0;

        for _ in 0..MAX_FRAMES {
            let held = autopilot(game.run());
            let frame = game.frame(&held, now);
            now += FRAME_MS;
            sinks.dispatch(frame.events, game.run().frame);

            surface.draw(scene.build(game.run(), &settings));

            if !frame.schedule_next {
                break;
            }
        }

        log::info!(
            "Headless run finished: {} ticks, {} cues, {} draw commands in the last frame, best {}",
            game.run().frame,
            sinks.audio.played(),
            surface.len(),
            game.high_score()
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rift_runner::sim::spawner::spawn_obstacle;
        use rift_runner::sim::{Affinity, ObstacleType};

        #[test]
        fn test_autopilot_switches_for_close_hazard() {
            let mut run = RunState::new(1, Tuning::default());
            assert!(!autopilot(&run).world_switch);

            let mut far = spawn_obstacle(ObstacleType::Spike, Affinity::Bright);
            far.pos.x = 1000.0;
            run.obstacles.push(far);
            assert!(!autopilot(&run).world_switch);

            let mut near = spawn_obstacle(ObstacleType::Spike, Affinity::Bright);
            near.pos.x = 220.0;
            run.obstacles.push(near);
            assert!(autopilot(&run).world_switch);

            let mut safe = spawn_obstacle(ObstacleType::Wall, Affinity::Dark);
            safe.pos.x = 220.0;
            run.obstacles = vec![safe];
            assert!(!autopilot(&run).world_switch);
        }

        #[test]
        fn test_missing_tuning_file_falls_back() {
            let tuning = load_tuning(Some("/nonexistent/tuning.json".to_string()));
            assert_eq!(tuning, Tuning::default());
            assert_eq!(load_tuning(None), Tuning::default());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rift Runner (native) starting headless...");

    let mut args = std::env::args().skip(1);
    let tuning = headless::load_tuning(args.next());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    headless::run(tuning, seed);
}
