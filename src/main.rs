//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! simulation lives in `brick_breaker::sim`; everything here is presentation,
//! input wiring and storage glue.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::consts::*;
    use brick_breaker::highscores::HighScore;
    use brick_breaker::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// How long sprite loading may gate the Start screen before the game
    /// falls back to flat-color rendering
    const ASSET_TIMEOUT_MS: f64 = 3000.0;

    /// How long transient banners stay on screen
    const BANNER_MS: f64 = 2000.0;

    /// Game sprites. Any image that has not decoded renders as a flat
    /// colored shape instead, so a missing file never stalls the game.
    struct Assets {
        ball: HtmlImageElement,
        paddle: HtmlImageElement,
        brick: HtmlImageElement,
        brick_hit: HtmlImageElement,
    }

    impl Assets {
        fn load() -> Option<Self> {
            let make = |src: &str| -> Option<HtmlImageElement> {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(src);
                Some(img)
            };
            Some(Self {
                ball: make("images/ball.png")?,
                paddle: make("images/paddle.png")?,
                brick: make("images/brick.png")?,
                brick_hit: make("images/brick-hit.png")?,
            })
        }

        fn ready(img: &HtmlImageElement) -> bool {
            img.complete() && img.natural_width() > 0
        }

        fn all_ready(&self) -> bool {
            Self::ready(&self.ball)
                && Self::ready(&self.paddle)
                && Self::ready(&self.brick)
                && Self::ready(&self.brick_hit)
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        assets: Option<Assets>,
        /// Sprite-load gate; cleared once everything decoded or on timeout
        loading: bool,
        boot_time: f64,
        /// Transient notification text and its expiry time
        banner: Option<(String, f64)>,
        /// Set when the final score beat the stored record
        new_record: bool,
    }

    impl Game {
        fn new(seed: u64, high_score: u32, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(seed, high_score),
                input: TickInput::default(),
                audio: AudioManager::new(),
                ctx,
                assets: Assets::load(),
                loading: true,
                boot_time: js_sys::Date::now(),
                banner: None,
                new_record: false,
            }
        }

        /// One simulation step plus event handling
        fn update(&mut self, now: f64) {
            tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.confirm = false;
            self.input.pause = false;

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Cue(kind) => self.audio.play(kind),
                    GameEvent::WarmUpAudio => self.audio.warm_up(),
                    GameEvent::LifeLost { remaining } => {
                        self.banner = Some((format!("LIVES LEFT: {remaining}"), now + BANNER_MS));
                    }
                    GameEvent::LevelStart { level } => {
                        log::info!("Level {level} start");
                        self.banner =
                            Some((format!("LEVEL {level} START!  +1 LIFE"), now + BANNER_MS));
                    }
                    GameEvent::NewHighScore { score } => {
                        self.new_record = true;
                        HighScore::new(score).save();
                    }
                    GameEvent::GameOver { score } => {
                        log::info!("Game over, final score {score}");
                    }
                }
            }

            if self.banner.as_ref().is_some_and(|(_, expires)| now > *expires) {
                self.banner = None;
            }
        }

        /// Draw the current frame from the state snapshot
        fn render(&self) {
            let ctx = &self.ctx;
            let w = FIELD_WIDTH as f64;
            let h = FIELD_HEIGHT as f64;

            ctx.set_fill_style_str("#1a1a1a");
            ctx.fill_rect(0.0, 0.0, w, h);

            if self.loading {
                self.draw_centered_text("LOADING...", "28px Arial", "#ffffff", h / 2.0);
                return;
            }

            self.draw_objects();
            self.draw_hud();

            match self.state.phase {
                GamePhase::Start => self.draw_start_screen(),
                GamePhase::Paused => self.draw_pause_overlay(),
                GamePhase::GameOver => self.draw_game_over_overlay(),
                GamePhase::Playing => {}
            }

            if let Some((text, _)) = &self.banner {
                self.draw_centered_text(text, "32px Arial", "#ffff00", h / 2.0 + 100.0);
            }
        }

        fn draw_objects(&self) {
            let ctx = &self.ctx;
            let state = &self.state;

            // Bricks: reinforced ones get the cracked sprite / warm color
            for brick in state.bricks.iter() {
                if !brick.is_alive() {
                    continue;
                }
                let b = brick.bounds;
                let sprite = self.assets.as_ref().and_then(|a| {
                    let img = if brick.is_reinforced() {
                        &a.brick_hit
                    } else {
                        &a.brick
                    };
                    Assets::ready(img).then_some(img)
                });
                match sprite {
                    Some(img) => {
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            b.pos.x as f64,
                            b.pos.y as f64,
                            b.size.x as f64,
                            b.size.y as f64,
                        );
                    }
                    None => {
                        let color = if brick.is_reinforced() {
                            "#d9534f"
                        } else {
                            "#f0ad4e"
                        };
                        ctx.set_fill_style_str(color);
                        ctx.fill_rect(
                            b.pos.x as f64,
                            b.pos.y as f64,
                            b.size.x as f64,
                            b.size.y as f64,
                        );
                    }
                }
            }

            // Paddle
            let paddle = &state.paddle;
            let paddle_y = (FIELD_HEIGHT - paddle.height - PADDLE_GAP) as f64;
            let paddle_img = self
                .assets
                .as_ref()
                .and_then(|a| Assets::ready(&a.paddle).then_some(&a.paddle));
            match paddle_img {
                Some(img) => {
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        paddle.x as f64,
                        paddle_y,
                        paddle.width as f64,
                        paddle.height as f64,
                    );
                }
                None => {
                    ctx.set_fill_style_str("#5bc0de");
                    ctx.fill_rect(
                        paddle.x as f64,
                        paddle_y,
                        paddle.width as f64,
                        paddle.height as f64,
                    );
                }
            }

            // Ball
            let ball = &state.ball;
            let ball_img = self
                .assets
                .as_ref()
                .and_then(|a| Assets::ready(&a.ball).then_some(&a.ball));
            match ball_img {
                Some(img) => {
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        (ball.pos.x - ball.radius) as f64,
                        (ball.pos.y - ball.radius) as f64,
                        (ball.radius * 2.0) as f64,
                        (ball.radius * 2.0) as f64,
                    );
                }
                None => {
                    ctx.set_fill_style_str("#ffffff");
                    ctx.begin_path();
                    let _ = ctx.arc(
                        ball.pos.x as f64,
                        ball.pos.y as f64,
                        ball.radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
            }
        }

        fn draw_hud(&self) {
            let ctx = &self.ctx;
            let state = &self.state;
            let w = FIELD_WIDTH as f64;

            ctx.set_font("20px Arial");
            ctx.set_fill_style_str("#ffffff");

            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("Score: {}", state.score), 20.0, 30.0);

            ctx.set_text_align("center");
            let _ = ctx.fill_text(&format!("Level: {}", state.level), w / 2.0, 30.0);

            ctx.set_text_align("right");
            let _ = ctx.fill_text(&format!("High Score: {}", state.high_score), w - 20.0, 30.0);
            let _ = ctx.fill_text(&format!("Lives: {}", state.lives), w - 20.0, 55.0);
        }

        fn draw_start_screen(&self) {
            let ctx = &self.ctx;
            let w = FIELD_WIDTH as f64;
            let h = FIELD_HEIGHT as f64;

            ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
            ctx.fill_rect(0.0, 0.0, w, h);

            self.draw_centered_text("BRICK BREAKER", "60px Arial", "#ffffff", h / 2.0 - 150.0);
            self.draw_centered_text(
                &format!("HIGH SCORE: {}", self.state.high_score),
                "28px Arial",
                "#ffd700",
                h / 2.0 - 80.0,
            );
            self.draw_centered_text(
                "Move paddle with Arrow Keys",
                "24px Arial",
                "#ffffff",
                h / 2.0,
            );
            self.draw_centered_text(
                "Press 'P' to pause the game",
                "24px Arial",
                "#ffffff",
                h / 2.0 + 40.0,
            );
            self.draw_centered_text(
                "Press Enter to Start",
                "32px Arial",
                "#ffff00",
                h / 2.0 + 150.0,
            );
        }

        fn draw_pause_overlay(&self) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
            ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            self.draw_centered_text("PAUSED", "50px Arial", "#ffffff", FIELD_HEIGHT as f64 / 2.0);
        }

        fn draw_game_over_overlay(&self) {
            let ctx = &self.ctx;
            let h = FIELD_HEIGHT as f64;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
            ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, h);

            self.draw_centered_text("GAME OVER", "60px Arial", "#ff4444", h / 2.0 - 60.0);
            self.draw_centered_text(
                &format!("Final Score: {}", self.state.score),
                "32px Arial",
                "#ffffff",
                h / 2.0 + 10.0,
            );
            if self.new_record {
                self.draw_centered_text("NEW HIGH SCORE!", "28px Arial", "#ffd700", h / 2.0 + 60.0);
            }
            self.draw_centered_text(
                "Reload the page to play again",
                "22px Arial",
                "#aaaaaa",
                h / 2.0 + 120.0,
            );
        }

        fn draw_centered_text(&self, text: &str, font: &str, color: &str, y: f64) {
            let ctx = &self.ctx;
            ctx.set_font(font);
            ctx.set_fill_style_str(color);
            ctx.set_text_align("center");
            let _ = ctx.fill_text(text, FIELD_WIDTH as f64 / 2.0, y);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let high = HighScore::load();
        let game = Rc::new(RefCell::new(Game::new(seed, high.score, ctx)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: held directions plus one-shot pause/confirm
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = true,
                    "ArrowRight" | "Right" => g.input.right = true,
                    "p" | "P" => g.input.pause = true,
                    "Enter" => g.input.confirm = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held directions
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = false,
                    "ArrowRight" | "Right" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One step of the frame chain: tick, render, re-arm. The chain is not
    /// re-armed after the GameOver frame, so no further ticks can run.
    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        let session_over = {
            let mut g = game.borrow_mut();
            let now = js_sys::Date::now();

            if g.loading {
                if g.assets.as_ref().is_some_and(Assets::all_ready) {
                    g.loading = false;
                    log::info!("Sprites loaded");
                } else if now - g.boot_time > ASSET_TIMEOUT_MS {
                    g.loading = false;
                    log::warn!("Sprite load timed out, using flat-color rendering");
                }
            } else {
                g.update(now);
            }

            g.render();
            g.state.phase == GamePhase::GameOver
        };

        if session_over {
            log::info!("Frame chain stopped; reload to start a new session");
            return;
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
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) - running a headless demo session");
    demo_run();
}

/// Scripted session with a ball-chasing paddle, as a native smoke run
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use brick_breaker::consts::PADDLE_STEP;
    use brick_breaker::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(42, 0);
    tick(
        &mut state,
        &TickInput {
            confirm: true,
            ..Default::default()
        },
    );

    for _ in 0..20_000 {
        if state.phase == GamePhase::GameOver {
            break;
        }
        let target = state.ball.pos.x - state.paddle.width / 2.0;
        let input = TickInput {
            left: target < state.paddle.x - PADDLE_STEP,
            right: target > state.paddle.x + PADDLE_STEP,
            ..Default::default()
        };
        tick(&mut state, &input);
        state.drain_events();
    }

    log::info!(
        "Demo finished: score {} level {} lives {}",
        state.score,
        state.level,
        state.lives
    );
}
