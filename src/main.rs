//! Bubble Words entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, MouseEvent};

    use bubble_words::catalog::Mode;
    use bubble_words::consts::*;
    use bubble_words::platform::DomPresenter;
    use bubble_words::sim::{Session, UserInput, handle_input, tick};
    use bubble_words::{Catalog, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        presenter: DomPresenter,
        accumulator: f32,
        last_time: f64,
        /// An animation frame is queued
        loop_running: bool,
        /// Language chosen on the start screen
        mode: Mode,
    }

    impl Game {
        /// Apply a player action and render its effects
        fn input(&mut self, input: UserInput) {
            handle_input(&mut self.session, input);
            self.session.flush(&mut self.presenter);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.session);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            self.session.flush(&mut self.presenter);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bubble Words starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let catalog = document
            .get_element_by_id("word-catalog")
            .and_then(|el| el.text_content())
            .map(|json| Catalog::from_json_or_builtin(&json))
            .unwrap_or_else(Catalog::builtin);

        let presenter = DomPresenter::new(document, &settings).expect("no #playfield element");
        presenter.build_level_buttons(&catalog.levels());
        let (width, height) = presenter.playfield_size();

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, catalog, settings, width, height);
        let mode = session.mode();
        presenter.mark_mode(mode);
        presenter.mark_level(session.level());
        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            presenter,
            accumulator: 0.0,
            last_time: 0.0,
            loop_running: false,
            mode,
        }));
        {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.session.flush(&mut g.presenter);
        }

        setup_playfield(game.clone());
        setup_start_screen(game.clone());
        setup_buttons(game.clone());
        setup_resize(game);

        log::info!("Bubble Words ready");
    }

    /// Element under the event that matches `selector`, if any
    fn closest(event: &web_sys::Event, selector: &str) -> Option<Element> {
        event
            .target()?
            .dyn_into::<Element>()
            .ok()?
            .closest(selector)
            .ok()
            .flatten()
    }

    fn add_click(id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("No #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_playfield(game: Rc<RefCell<Game>>) {
        add_click("playfield", move |event: MouseEvent| {
            let Some(bubble) = closest(&event, ".bubble") else {
                return;
            };
            let Some(id) = bubble.get_attribute("data-id").and_then(|s| s.parse().ok()) else {
                return;
            };
            game.borrow_mut().input(UserInput::ClickedBubble(id));
        });
    }

    fn setup_start_screen(game: Rc<RefCell<Game>>) {
        // Language toggle
        {
            let game = game.clone();
            add_click("mode-buttons", move |event: MouseEvent| {
                let Some(mode) = closest(&event, "[data-mode]")
                    .and_then(|el| el.get_attribute("data-mode"))
                    .and_then(|s| Mode::from_str(&s))
                else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.mode = mode;
                g.presenter.mark_mode(mode);
                log::info!("Mode: {}", mode.as_str());
            });
        }

        // Level buttons start a round
        add_click("level-buttons", move |event: MouseEvent| {
            let Some(level) = closest(&event, "[data-level]")
                .and_then(|el| el.get_attribute("data-level"))
                .and_then(|s| s.parse::<u8>().ok())
            else {
                return;
            };
            {
                let mut g = game.borrow_mut();
                g.presenter.resume_audio();
                let (width, height) = g.presenter.playfield_size();
                g.input(UserInput::ViewportResized { width, height });
                let mode = g.mode;
                g.input(UserInput::RequestedStart { mode, level });
                g.presenter.mark_level(level);
            }
            ensure_loop(&game);
        });
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        for id in ["exit-btn", "again-btn"] {
            let game = game.clone();
            add_click(id, move |_event: MouseEvent| {
                game.borrow_mut().input(UserInput::RequestedExit);
            });
        }

        add_click("listen-btn", move |_event: MouseEvent| {
            game.borrow_mut().input(UserInput::RequestedReplay);
        });
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let (width, height) = g.presenter.playfield_size();
            g.input(UserInput::ViewportResized { width, height });
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start the frame loop if a round is ticking and no frame is queued
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running || !g.session.is_ticking() {
                return;
            }
            g.loop_running = true;
            g.last_time = 0.0;
            g.accumulator = 0.0;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);

            // Stopped or cleared rounds stop requesting frames
            let ticking = g.session.is_ticking();
            if !ticking {
                g.loop_running = false;
            }
            ticking
        };

        if keep_running {
            request_animation_frame(game);
        }
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
    log::info!("Bubble Words (native) starting...");
    log::info!("Native mode plays headless rounds - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1);
    let settings = bubble_words::Settings::load_from(path.as_deref());
    headless::play_all_levels(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Auto-played rounds for native builds
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bubble_words::catalog::Mode;
    use bubble_words::platform::LogPresenter;
    use bubble_words::sim::{RoundPhase, Session, UserInput, handle_input, tick};
    use bubble_words::{Catalog, Settings};

    /// Ticks between simulated clicks (about 0.75 s)
    const THINK_TICKS: u64 = 45;
    /// Give up on a round after this many ticks
    const MAX_TICKS: u64 = 60 * 120;

    pub fn play_all_levels(settings: Settings) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let catalog = Catalog::builtin();
        let levels = catalog.levels();
        let mode = settings.mode;

        let mut presenter = LogPresenter::default();
        let mut session = Session::new(seed, catalog, settings, 1280.0, 720.0);
        log::info!("Session created with seed: {}", seed);

        for level in levels {
            handle_input(&mut session, UserInput::RequestedStart { mode, level });
            session.flush(&mut presenter);
            let ticks = play_round(&mut session, &mut presenter);
            log::info!(
                "Level {} finished in {} ticks ({:?})",
                level,
                ticks,
                session.phase()
            );
            handle_input(&mut session, UserInput::RequestedExit);
            session.flush(&mut presenter);
        }

        // Secondary-language mode gets one round too
        handle_input(
            &mut session,
            UserInput::RequestedStart {
                mode: Mode::Secondary,
                level: 1,
            },
        );
        play_round(&mut session, &mut presenter);
        session.flush(&mut presenter);

        log::info!(
            "Done: {} events, {} movement updates",
            presenter.events,
            presenter.moves
        );
    }

    /// Click the right bubble every `THINK_TICKS`, missing once per target
    fn play_round(session: &mut Session, presenter: &mut LogPresenter) -> u64 {
        let mut ticks = 0;
        let mut missed = false;
        while session.phase() == RoundPhase::AwaitingGuess && ticks < MAX_TICKS {
            tick(session);
            ticks += 1;

            if ticks % THINK_TICKS == 0 {
                let Some(target) = session.target().cloned() else {
                    break;
                };
                let wrong = session
                    .bubbles()
                    .values()
                    .find(|b| !b.word.same_word(&target))
                    .map(|b| b.id);
                let right = session.bubble_for(&target).map(|b| b.id);

                let pick = match (missed, wrong) {
                    (false, Some(id)) => {
                        missed = true;
                        Some(id)
                    }
                    _ => {
                        missed = false;
                        right
                    }
                };
                if let Some(id) = pick {
                    handle_input(session, UserInput::ClickedBubble(id));
                }
            }
            session.flush(presenter);
        }
        ticks
    }
}
