//! Highway Hero entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use highway_hero::Settings;
    use highway_hero::camera::ChaseCamera;
    use highway_hero::consts::MAX_FRAME_DT;
    use highway_hero::sim::{
        Direction, GameEvent, GameState, Hud, InputState, MissionPhase, Obstacle, PickupZone,
        Vehicle, generate_world, tick,
    };

    // Scene drawing is done by the page; hand it one snapshot per frame
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.drawHighwayHero === 'function') {
                window.drawHighwayHero(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// What the page needs to draw a frame
    #[derive(Serialize)]
    struct Frame<'a> {
        camera: &'a ChaseCamera,
        bus: &'a Vehicle,
        obstacles: &'a [Obstacle],
        pickups: &'a [PickupZone],
        hud: Hud,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        camera: ChaseCamera,
        last_time: f64,
        /// Seconds since load, drives the menu orbit
        clock: f32,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let seed = session_seed(&settings);
            let state = GameState::new(settings, generate_world(seed), seed);
            let camera = ChaseCamera::behind(&state.vehicle);
            Self {
                state,
                input: InputState::default(),
                camera,
                last_time: 0.0,
                clock: 0.0,
            }
        }

        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.clock += dt;

            for event in tick(&mut self.state, &self.input, dt) {
                match event {
                    GameEvent::CoachTip(tip) => log::info!("Coach: {}", tip),
                    GameEvent::AllCollected => log::info!("Everyone aboard"),
                    GameEvent::MissionAccomplished => {
                        log::info!("Mission accomplished, score {}", self.state.score)
                    }
                    _ => {}
                }
            }

            self.camera
                .update(self.state.phase, &self.state.vehicle, dt, self.clock);
        }

        /// Start a fresh session on a newly generated map
        fn start(&mut self) {
            let seed = session_seed(&self.state.settings);
            if self.state.start(generate_world(seed), seed).is_ok() {
                self.input.release_all();
                self.camera = ChaseCamera::behind(&self.state.vehicle);
                log::info!("Session started with seed: {}", seed);
            }
        }

        fn restart(&mut self) {
            if self.state.restart().is_ok() {
                self.input.release_all();
            }
        }

        fn present(&self) {
            let frame = Frame {
                camera: &self.camera,
                bus: &self.state.vehicle,
                obstacles: &self.state.obstacles,
                pickups: &self.state.pickups,
                hud: self.state.hud(),
            };
            match serde_json::to_string(&frame) {
                Ok(json) => present_frame(&json),
                Err(err) => log::error!("Frame snapshot failed: {}", err),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.state.hud();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-students .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{}/{}", hud.collected, hud.total)));
            }

            if let Some(el) = document.query_selector("#hud-zone .hud-value").ok().flatten() {
                el.set_text_content(Some(hud.zone.unwrap_or("off road")));
            }

            if let Some(el) = document.get_element_by_id("coach-message") {
                el.set_text_content(Some(&hud.coach_message));
                set_hidden(&el, hud.coach_message.is_empty());
            }

            if let Some(el) = document.get_element_by_id("event-log") {
                el.set_text_content(Some(&hud.log.join("\n")));
            }

            if let Some(el) = document.get_element_by_id("hud") {
                set_hidden(&el, hud.phase == MissionPhase::Menu);
            }

            if let Some(el) = document.get_element_by_id("menu") {
                set_hidden(&el, hud.phase != MissionPhase::Menu);
            }

            if let Some(el) = document.get_element_by_id("finished") {
                set_hidden(&el, hud.phase != MissionPhase::Finished);
                if hud.phase == MissionPhase::Finished {
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&hud.score.to_string()));
                    }
                }
            }
        }
    }

    /// Fixed seed from settings, otherwise the wall clock
    fn session_seed(settings: &Settings) -> u64 {
        settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64)
    }

    fn set_hidden(el: &web_sys::Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Highway Hero starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, cannot start");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            set_hidden(&loading, true);
        }

        let settings = Settings::load();
        // Write back so the stored copy lists every field for hand editing
        settings.save();
        log::info!(
            "Settings: {} controls, {:?} finish",
            settings.control_model.as_str(),
            settings.finish_mode
        );
        let game = Rc::new(RefCell::new(Game::new(settings)));

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_focus_loss(game.clone());

        request_animation_frame(game);

        log::info!("Highway Hero running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input.set(direction, pressed);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys held while the page loses focus never see their keyup
    fn setup_focus_loss(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.release_all();
                    // Resume without a giant first frame
                    game.borrow_mut().last_time = 0.0;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.present();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Highway Hero (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless school run...");
    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a scripted session: down to the highway, past every stop, back to
/// school. Pickups are done by parking the bus beside each student.
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use glam::Vec3;
    use highway_hero::Settings;
    use highway_hero::camera::ChaseCamera;
    use highway_hero::sim::{GameState, InputState, MissionPhase, generate_world, tick};

    const DT: f32 = 1.0 / 60.0;

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(7);
    let mut state = GameState::new(settings, generate_world(seed), seed);
    let mut camera = ChaseCamera::behind(&state.vehicle);

    if let Err(err) = state.start(generate_world(seed), seed) {
        eprintln!("Could not start: {err}");
        return;
    }

    // Three seconds of throttle out of the compound
    let gas = InputState {
        forward: true,
        ..Default::default()
    };
    for _ in 0..180 {
        tick(&mut state, &gas, DT);
        camera.follow(&state.vehicle, DT);
    }
    println!(
        "After 3s: bus at {:.1}, camera at {:.1}",
        state.vehicle.position, camera.position
    );

    let idle = InputState::default();
    let stops: Vec<Vec3> = state.pickups.iter().map(|p| p.position).collect();
    for student in stops {
        state.vehicle.reset_to(Vec3::new(12.0, 0.0, student.z), state.vehicle.yaw);
        tick(&mut state, &idle, DT);
    }
    println!(
        "Collected {}/{} students, score {}",
        state.collected,
        state.total_students(),
        state.score
    );

    let school = state.layout.spawn_position;
    state.vehicle.reset_to(school, state.layout.spawn_yaw);
    tick(&mut state, &idle, DT);

    for line in state.log.lines().iter().rev() {
        println!("  {line}");
    }
    if state.phase == MissionPhase::Finished {
        println!("✓ Mission accomplished with score {}", state.score);
    } else {
        println!("✗ Mission not finished ({})", state.phase.as_str());
    }
}
