//! Gapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gapwing::audio::AudioManager;
    use gapwing::highscores::HighScoreStore;
    use gapwing::platform::storage::LocalStorageHighScores;
    use gapwing::platform::{ActivateLatch, Clock, PressSource, SystemClock};
    use gapwing::renderer::{RenderError, RenderState, frame_vertices};
    use gapwing::session::dispatch_events;
    use gapwing::settings::Settings;
    use gapwing::sim::{GameState, TickInput, tick};
    use gapwing::tuning::{Tuning, TuningError};

    /// Anything that stops the page from starting a game
    #[derive(Debug, Error)]
    enum StartupError {
        #[error("no browser window")]
        NoWindow,
        #[error("no #canvas element on the page")]
        NoCanvas,
        #[error("graphics unavailable: {0}")]
        Render(#[from] RenderError),
        #[error("invalid tuning: {0}")]
        Tuning(#[from] TuningError),
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        store: LocalStorageHighScores,
        settings: Settings,
        clock: SystemClock,
        latch: ActivateLatch,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState, settings: Settings, clock: SystemClock) -> Self {
            Self {
                audio: AudioManager::new(&settings),
                state,
                render_state: None,
                store: LocalStorageHighScores::new(),
                settings,
                clock,
                latch: ActivateLatch::default(),
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn press(&mut self, source: PressSource) {
            let now = self.clock.now_ms();
            if self.latch.press(source, now) {
                // First gesture unlocks the AudioContext
                self.audio.resume();
            }
        }

        /// One simulation tick per animation frame
        fn update(&mut self, time: f64) {
            let now = self.clock.now_ms();
            self.latch.fill(&mut self.input);
            tick(&mut self.state, &self.input, now);

            let events = self.state.drain_events();
            dispatch_events(&events, &self.audio, &mut self.store);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = frame_vertices(&self.state.snapshot());
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&self.state.score.high_score().to_string()));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("autopilot") {
                let class = if self.input.autopilot { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.state.is_game_over() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
        }
    }

    /// Surface a fatal startup error to the player
    fn show_fatal(message: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        if let Some(el) = document.get_element_by_id("fatal") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Gapwing starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            show_fatal(&e.to_string());
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoWindow)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(StartupError::NoCanvas)?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::default();
        let playfield = (tuning.playfield_width, tuning.playfield_height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield).await?;

        let settings = Settings::load();
        let clock = SystemClock::new();
        let seed = js_sys::Date::now() as u64;
        let best = LocalStorageHighScores::new().load_high_score();
        let state = GameState::new(tuning, seed, best, clock.now_ms())?;

        let game = Rc::new(RefCell::new(Game::new(state, settings, clock)));
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_focus_handlers(&window, &document, game.clone());
        setup_resize(&window, canvas, game.clone());

        request_animation_frame(game);

        log::info!("Gapwing running!");
        Ok(())
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let w = (canvas.client_width() as f64 * dpr) as u32;
        let h = (canvas.client_height() as f64 * dpr) as u32;
        (w.max(1), h.max(1))
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press(PressSource::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (no scrolling, no synthesized click)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press(PressSource::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.press(PressSource::Key);
                        }
                    }
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let g = game.borrow();
                if g.settings.mute_on_blur {
                    g.audio.set_suspended(true);
                    log::info!("Audio suspended (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow().audio.set_suspended(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = game.borrow();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    if g.settings.mute_on_blur {
                        g.audio.set_suspended(true);
                    }
                } else {
                    g.audio.set_suspended(false);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let (w, h) = canvas_pixel_size(&window, &canvas);
            canvas.set_width(w);
            canvas.set_height(h);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use thiserror::Error;

    use gapwing::audio::NullAudio;
    use gapwing::highscores::{HighScoreStore, MemoryHighScores};
    use gapwing::platform::storage::FileHighScores;
    use gapwing::session::{HeadlessConfig, run_headless};
    use gapwing::tuning::{Tuning, TuningError};

    pub const USAGE: &str = "usage: gapwing [--rounds N] [--seed N] [--max-ticks N] \
                             [--no-autopilot] [--tuning FILE.json] [--best FILE]";

    #[derive(Debug, Error)]
    pub enum ArgError {
        #[error("{0} needs a value")]
        MissingValue(String),
        #[error("{flag} expects a whole number, got {value:?}")]
        BadNumber { flag: String, value: String },
        #[error("unknown argument {0:?}")]
        Unknown(String),
    }

    #[derive(Debug, Default)]
    pub struct Args {
        pub config: HeadlessConfig,
        pub tuning: Option<PathBuf>,
        pub best: Option<PathBuf>,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgError> {
            let mut parsed = Args::default();
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--rounds" => parsed.config.rounds = number(&flag, args.next())?,
                    "--seed" => parsed.config.seed = number(&flag, args.next())?,
                    "--max-ticks" => parsed.config.max_ticks = number(&flag, args.next())?,
                    "--no-autopilot" => parsed.config.autopilot = false,
                    "--tuning" => parsed.tuning = Some(value(&flag, args.next())?.into()),
                    "--best" => parsed.best = Some(value(&flag, args.next())?.into()),
                    _ => return Err(ArgError::Unknown(flag)),
                }
            }
            Ok(parsed)
        }
    }

    fn value(flag: &str, next: Option<String>) -> Result<String, ArgError> {
        next.ok_or_else(|| ArgError::MissingValue(flag.to_string()))
    }

    fn number<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T, ArgError> {
        let raw = value(flag, next)?;
        raw.parse().map_err(|_| ArgError::BadNumber {
            flag: flag.to_string(),
            value: raw,
        })
    }

    fn load_tuning(path: Option<&PathBuf>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning {}: {}; using defaults", path.display(), e);
            Tuning::default()
        })
    }

    pub fn run(args: Args) -> Result<(), TuningError> {
        let tuning = load_tuning(args.tuning.as_ref());
        let mut store: Box<dyn HighScoreStore> = match &args.best {
            Some(path) => Box::new(FileHighScores::new(path)),
            None => Box::new(MemoryHighScores::new()),
        };

        let results = run_headless(tuning, &args.config, &NullAudio, store.as_mut())?;

        let best_round = results.iter().map(|r| r.score).max().unwrap_or(0);
        let records = results.iter().filter(|r| r.new_record).count();
        log::info!(
            "Played {} rounds (seed {}): best round {}, stored best {}, {} new records",
            results.len(),
            args.config.seed,
            best_round,
            store.load_high_score(),
            records
        );
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gapwing (native, headless) starting...");

    let args = match native::Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", native::USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = native::run(args) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
