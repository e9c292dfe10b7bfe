//! Flap Gates entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        KeyboardEvent, MouseEvent,
    };

    use flap_gates::audio::{AudioManager, SoundEffect};
    use flap_gates::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use flap_gates::input::InputEvent;
    use flap_gates::persistence::LocalStorage;
    use flap_gates::render::{DrawCommand, Frame, Sprite};
    use flap_gates::{Frontend, Game, Leaderboard, Settings, Tuning};

    type WebGame = Game<WebFrontend, LocalStorage>;

    /// Canvas + DOM overlays + Web Audio
    struct WebFrontend {
        document: Document,
        ctx: CanvasRenderingContext2d,
        avatar_img: Option<HtmlImageElement>,
        top_img: Option<HtmlImageElement>,
        bottom_img: Option<HtmlImageElement>,
        audio: AudioManager,
    }

    impl WebFrontend {
        fn new(document: Document, ctx: CanvasRenderingContext2d, audio: AudioManager) -> Self {
            Self {
                document,
                ctx,
                avatar_img: load_image("bird.png"),
                top_img: load_image("pipe_top.png"),
                bottom_img: load_image("pipe_bottom.png"),
                audio,
            }
        }

        fn set_display(&self, id: &str, value: &str) {
            if let Some(el) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("display", value);
            }
        }

        fn draw_sprite(&self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64, alpha: f32) {
            let (image, fallback) = match sprite {
                Sprite::Avatar => (&self.avatar_img, "#f5c542"),
                Sprite::ObstacleTop => (&self.top_img, "#3a9d3a"),
                Sprite::ObstacleBottom => (&self.bottom_img, "#3a9d3a"),
            };

            self.ctx.set_global_alpha(f64::from(alpha));
            match image.as_ref().filter(|img| img.complete() && img.natural_width() > 0) {
                Some(img) => {
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
                }
                None => {
                    self.ctx.set_fill_style_str(fallback);
                    self.ctx.fill_rect(x, y, w, h);
                }
            }
            self.ctx.set_global_alpha(1.0);
        }
    }

    impl Frontend for WebFrontend {
        fn draw(&mut self, frame: &Frame) {
            for command in &frame.commands {
                match command {
                    DrawCommand::Clear { size } => {
                        self.ctx
                            .clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
                    }
                    DrawCommand::Sprite {
                        sprite,
                        pos,
                        size,
                        alpha,
                    } => self.draw_sprite(
                        *sprite,
                        f64::from(pos.x),
                        f64::from(pos.y),
                        f64::from(size.x),
                        f64::from(size.y),
                        *alpha,
                    ),
                    DrawCommand::Text { text, pos, size_px } => {
                        self.ctx.set_fill_style_str("black");
                        self.ctx.set_font(&format!("{}px Arial", size_px));
                        let _ = self
                            .ctx
                            .fill_text(text, f64::from(pos.x), f64::from(pos.y));
                    }
                }
            }
        }

        fn play(&mut self, effect: SoundEffect) {
            self.audio.play(effect);
        }

        fn hide_overlays(&mut self) {
            self.set_display("startScreen", "none");
            self.set_display("leaderboard", "none");
        }

        fn show_start_screen(&mut self) {
            self.set_display("startScreen", "block");
        }

        fn show_leaderboard(&mut self, leaderboard: &Leaderboard) {
            if let Some(list) = self.document.get_element_by_id("leaderboard-list") {
                list.set_inner_html("");
                for line in leaderboard.lines() {
                    if let Ok(li) = self.document.create_element("li") {
                        li.set_text_content(Some(&line));
                        let _ = list.append_child(&li);
                    }
                }
            }
            self.set_display("leaderboard", "flex");
        }

        fn notify_game_over(&mut self, score: u64) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("Game Over! Score: {}", score));
            }
        }
    }

    fn load_image(src: &str) -> Option<HtmlImageElement> {
        let img = HtmlImageElement::new().ok()?;
        img.set_src(src);
        Some(img)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flap Gates starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let storage = LocalStorage::new();
        let settings = Settings::load(&storage);
        let frontend = WebFrontend::new(
            document.clone(),
            ctx,
            AudioManager::new(settings.effective_volume()),
        );

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::with_options(
            frontend,
            storage,
            seed,
            Tuning::default(),
            &settings,
        )));

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());

        request_animation_frame(game, None);

        log::info!("Flap Gates running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<WebGame>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard: power-up keys or flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(event.code()));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click anywhere: flap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_input(&InputEvent::Pointer);
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<WebGame>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start_game();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>, last_time: Option<f64>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, last_time, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, last_time: Option<f64>, time: f64) {
        // Delta time in seconds
        let dt = last_time.map_or(0.0, |last| (time - last) / 1000.0);
        game.borrow_mut().advance(dt);

        request_animation_frame(game, Some(time));
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
mod headless {
    use std::path::PathBuf;

    use flap_gates::audio::SoundEffect;
    use flap_gates::consts::SIM_DT;
    use flap_gates::persistence::FileStorage;
    use flap_gates::render::Frame;
    use flap_gates::sim::autopilot;
    use flap_gates::{Frontend, Game, Leaderboard, Settings, Tuning};

    /// Frontend that narrates to the log
    #[derive(Default)]
    struct LogFrontend {
        frames: u64,
    }

    impl Frontend for LogFrontend {
        fn draw(&mut self, _frame: &Frame) {
            self.frames += 1;
        }

        fn play(&mut self, effect: SoundEffect) {
            log::debug!("Sound: {:?}", effect);
        }

        fn hide_overlays(&mut self) {}

        fn show_start_screen(&mut self) {
            log::debug!("Start screen shown");
        }

        fn show_leaderboard(&mut self, leaderboard: &Leaderboard) {
            for line in leaderboard.lines() {
                log::info!("  {}", line);
            }
        }

        fn notify_game_over(&mut self, score: u64) {
            log::info!("Game Over! Score: {} ({} frames drawn)", score, self.frames);
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("FLAP_GATES_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Ok(Err(e)) => {
                log::warn!("Invalid tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Play `sessions` autopilot runs; run `n` lasts `10 * n` simulated seconds
    pub fn run() {
        let sessions: u32 = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(3);
        let data_dir = std::env::var("FLAP_GATES_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".flap-gates"));

        let storage = FileStorage::new(&data_dir);
        let settings = Settings::load(&storage);
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        log::info!("Flap Gates (headless) starting, data in {}", data_dir.display());
        let mut game = Game::with_options(
            LogFrontend::default(),
            storage,
            seed,
            load_tuning(),
            &settings,
        );

        for session in 1..=sessions {
            game.start_game();
            let frames = (f64::from(session) * 10.0 / SIM_DT).round() as u64;
            for _ in 0..frames {
                if !game.is_running() {
                    break;
                }
                if autopilot::wants_flap(game.state()) {
                    game.flap();
                }
                game.advance(SIM_DT);
            }
            game.end_game();
        }

        println!("High scores:");
        for line in game.leaderboard().lines() {
            println!("  {}", line);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}
