//! Star Collector entry point
//!
//! Browser: binds the DOM, input listeners and the animation-frame loop.
//! Native: runs headless autopilot sessions and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use star_collector::audio::AudioManager;
    use star_collector::platform::{FixedStep, Presenter, log_event, present};
    use star_collector::sim::{GameController, StarKind, TickInput, Viewport};
    use star_collector::{GameConfig, Settings};

    /// Star marker and HUD elements in the page
    struct DomPresenter {
        document: Document,
        game_area: Option<HtmlElement>,
        basket: Option<HtmlElement>,
        score: Option<Element>,
        timer: Option<Element>,
        game_over: Option<HtmlElement>,
        final_score: Option<Element>,
        markers: HashMap<u32, HtmlElement>,
        reduced_motion: bool,
        star_size: f32,
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        let el = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if el.is_none() {
            log::warn!("Missing element #{}", id);
        }
        el
    }

    fn element(document: &Document, id: &str) -> Option<Element> {
        let el = document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("Missing element #{}", id);
        }
        el
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        let _ = el.style().set_property(property, value);
    }

    impl DomPresenter {
        fn new(document: Document, reduced_motion: bool, star_size: f32) -> Self {
            Self {
                game_area: html_element(&document, "gameArea"),
                basket: html_element(&document, "basket"),
                score: element(&document, "score"),
                timer: element(&document, "timer"),
                game_over: html_element(&document, "gameOver"),
                final_score: element(&document, "finalScore"),
                markers: HashMap::new(),
                reduced_motion,
                star_size,
                document,
            }
        }

        /// Measure the playfield in client coordinates
        fn measure_viewport(&self) -> Option<Viewport> {
            let rect = self.game_area.as_ref()?.get_bounding_client_rect();
            Some(Viewport {
                left: rect.left() as f32,
                top: rect.top() as f32,
                width: rect.width() as f32,
                height: rect.height() as f32,
            })
        }

        /// Basket box as (top relative to the playfield, width, height)
        fn measure_basket(&self) -> Option<(f32, f32, f32)> {
            let area = self.game_area.as_ref()?.get_bounding_client_rect();
            let rect = self.basket.as_ref()?.get_bounding_client_rect();
            Some((
                (rect.top() - area.top()) as f32,
                rect.width() as f32,
                rect.height() as f32,
            ))
        }
    }

    impl Presenter for DomPresenter {
        fn place_basket(&mut self, x: f32) {
            if let Some(basket) = &self.basket {
                set_style(basket, "left", &format!("{x}px"));
                set_style(basket, "transform", "translateX(-50%)");
            }
        }

        fn spawn_star_marker(&mut self, id: u32, kind: StarKind) {
            let Some(area) = &self.game_area else { return };
            let Some(star) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            star.set_class_name(match kind {
                StarKind::Normal => "star",
                StarKind::Big => "star big-star",
            });
            star.set_text_content(Some("⭐"));
            set_style(&star, "top", &format!("-{}px", self.star_size));
            if area.append_child(&star).is_ok() {
                self.markers.insert(id, star);
            }
        }

        fn place_star_marker(&mut self, id: u32, x: f32, y: f32) {
            if let Some(star) = self.markers.get(&id) {
                set_style(star, "left", &format!("{x}px"));
                set_style(star, "top", &format!("{y}px"));
            }
        }

        fn flash_star_marker(&mut self, id: u32) {
            let Some(star) = self.markers.get(&id) else { return };
            if self.reduced_motion {
                set_style(star, "opacity", "0");
                return;
            }
            set_style(star, "transform", "scale(1.5)");
            set_style(star, "transition", "all 0.3s ease");
            set_style(star, "opacity", "0");
            set_style(star, "color", "#00FF00");
        }

        fn remove_star_marker(&mut self, id: u32) {
            // Already detached markers are simply gone from the map
            if let Some(star) = self.markers.remove(&id) {
                star.remove();
            }
        }

        fn show_score(&mut self, score: u64) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn show_clock(&mut self, text: &str) {
            if let Some(el) = &self.timer {
                el.set_text_content(Some(text));
            }
        }

        fn show_game_over(&mut self, final_score: u64) {
            if let Some(el) = &self.final_score {
                el.set_text_content(Some(&final_score.to_string()));
            }
            if let Some(el) = &self.game_over {
                set_style(el, "display", "block");
            }
        }

        fn hide_game_over(&mut self) {
            if let Some(el) = &self.game_over {
                set_style(el, "display", "none");
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: GameController,
        presenter: DomPresenter,
        step: FixedStep,
        input: TickInput,
        settings: Settings,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        /// Sync layout, run simulation ticks, push changes to the page
        fn update(&mut self, dt: f32) {
            if let Some(viewport) = self.presenter.measure_viewport() {
                self.controller.set_viewport(viewport);
            }
            if let Some((top, w, h)) = self.presenter.measure_basket() {
                if w > 0.0 && h > 0.0 {
                    self.controller.set_basket_rect(top, w, h);
                }
            }

            self.step.advance(&mut self.controller, &mut self.input, dt);

            let events = present(&mut self.controller, &mut self.presenter);
            for event in &events {
                log_event(event);
            }
            self.audio.play_events(&events);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Star Collector starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; cannot start");
            return;
        };

        let settings = Settings::load();
        let config = GameConfig::default();
        for warning in config.validate() {
            log::warn!("config: {}", warning);
        }

        let seed = js_sys::Date::now() as u64;
        let mut controller = GameController::new(config, seed);
        let presenter = DomPresenter::new(
            document.clone(),
            settings.reduced_motion,
            controller.config().star_size,
        );
        if let Some(viewport) = presenter.measure_viewport() {
            controller.set_viewport(viewport);
        }
        if let Some((top, w, h)) = presenter.measure_basket() {
            if w > 0.0 && h > 0.0 {
                controller.set_basket_rect(top, w, h);
            }
        }
        controller.start_session();
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            controller,
            presenter,
            step: FixedStep::new(),
            input: TickInput::default(),
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            last_time: 0.0,
        }));

        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());

        request_animation_frame(game);
        log::info!("Star Collector running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Mouse move - absolute position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_x = Some(event.client_x() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - first touch only
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.controller.is_running() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    g.input.pointer_x = Some(touch.client_x() as f32);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.nudge -= 1,
                    "ArrowRight" => g.input.nudge += 1,
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" => {
                        let volume = g.settings.toggle_muted();
                        g.audio.set_volume(volume);
                        g.settings.save();
                        log::info!("Muted: {}", g.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("restartBtn") else {
            log::warn!("Missing element #restartBtn");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio.resume();
            g.step.reset();
            g.input.restart = true;
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
        }

        request_animation_frame(game);
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

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use star_collector::GameConfig;
    use star_collector::platform::{RecordingPresenter, log_event, present};
    use star_collector::sim::{GameController, TickInput, tick};

    /// Headless Star Collector: plays sessions on autopilot and reports the results
    #[derive(Parser, Debug)]
    #[command(name = "star-collector", version)]
    pub struct Args {
        /// JSON game config (missing keys use defaults)
        #[arg(short, long)]
        pub config: Option<PathBuf>,
        /// RNG seed for star placement
        #[arg(short, long, default_value_t = 42)]
        pub seed: u64,
        /// Number of back-to-back sessions (restarts between them)
        #[arg(short = 'n', long, default_value_t = 1)]
        pub sessions: u32,
        /// Leave the basket still instead of chasing stars
        #[arg(long)]
        pub no_autopilot: bool,
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let config = match &args.config {
            Some(path) => GameConfig::load_from_file(path)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GameConfig::default(),
        };
        for warning in config.validate() {
            log::warn!("config: {}", warning);
        }

        let mut controller = GameController::new(config, args.seed);
        let mut presenter = RecordingPresenter::new();
        let autopilot = !args.no_autopilot;

        controller.start_session();
        for session in 0..args.sessions.max(1) {
            let mut input = TickInput {
                restart: session > 0,
                autopilot,
                ..Default::default()
            };
            loop {
                tick(&mut controller, &input);
                input.restart = false;
                for event in present(&mut controller, &mut presenter) {
                    log_event(&event);
                }
                if !controller.is_running() {
                    break;
                }
            }

            let summary = controller.summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
            debug_assert_eq!(presenter.game_over, Some(summary.score));
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Star Collector (native, headless) starting...");
    native::run(native::Args::parse())
}
