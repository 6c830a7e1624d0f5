//! Iso Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use iso_runner::consts::SIM_DT;
    use iso_runner::renderer::{RenderState, VertexBatch};
    use iso_runner::sim::{GameEvent, RunPhase};
    use iso_runner::{Game, HudSnapshot};

    /// Browser-side state around the game
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        batch: VertexBatch,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last snapshot pushed to the DOM
        last_hud: Option<HudSnapshot>,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                game: Game::load(seed),
                render_state: None,
                batch: VertexBatch::with_capacity(1 << 16),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_hud: None,
            }
        }

        fn update(&mut self, dt: f32, time: f64) {
            self.game.update(dt);

            for event in self.game.drain_events() {
                match event {
                    GameEvent::Crashed { score } => log::info!("Crashed at {score}"),
                    GameEvent::NewHighScore(score) => log::info!("New best: {score}"),
                    _ => {}
                }
            }

            // Track frame times for FPS
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

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let (w, h) = render_state.size;
            self.batch.clear();
            self.game.render_frame(w as f32, h as f32, &mut self.batch);

            match render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if self.game.settings().show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            let hud = self.game.snapshot();
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-autopilot") {
                let _ = el.set_attribute("class", visible_class(hud.autopilot));
            }
            if let Some(body) = document.body() {
                let _ = body.set_attribute("class", if hud.is_night { "night" } else { "day" });
            }

            if let Some(el) = document.get_element_by_id("start-prompt") {
                let _ = el.set_attribute("class", visible_class(hud.phase == RunPhase::Start));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", visible_class(hud.phase == RunPhase::GameOver));
                if hud.phase == RunPhase::GameOver {
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&hud.score.to_string()));
                    }
                }
            }
        }
    }

    fn visible_class(visible: bool) -> &'static str {
        if visible { "" } else { "hidden" }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Iso Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone())?;
        setup_restart_button(&document, app.clone());
        setup_resize(&canvas, app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);

        log::info!("Iso Runner running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        a.game.jump_pressed();
                    }
                    "ArrowDown" => {
                        event.prevent_default();
                        a.game.duck_pressed(true);
                    }
                    "KeyA" if !event.repeat() => a.game.toggle_autopilot(),
                    "KeyR" if !event.repeat() => a.game.hard_reset(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "ArrowDown" {
                    event.prevent_default();
                    app.borrow_mut().game.duck_pressed(false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start (jump or start)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.jump_pressed();
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.start_or_restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keep the backing store in step with the CSS size
    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(rs) = app.borrow_mut().render_state.as_mut() {
                rs.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run: simulates and composes frames without a window
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use iso_runner::consts::SIM_DT;
    use iso_runner::renderer::VertexBatch;
    use iso_runner::sim::{GameEvent, RunPhase};
    use iso_runner::{Game, HighScore, QualityPreset, Settings};

    const FRAMES: u32 = 60 * 60;
    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    env_logger::init();
    log::info!("Iso Runner (native) starting...");
    log::info!("Native mode renders headless - run with `trunk serve` for the web version");

    // Usage: iso-runner [seed] [low|medium|high]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x15_0D1E);
    let quality = args
        .next()
        .and_then(|s| QualityPreset::from_str(&s))
        .unwrap_or_default();
    log::info!("Quality preset: {}", quality.as_str());

    let mut game = Game::new(seed, Settings::from_preset(quality), HighScore::default());
    game.toggle_autopilot();
    game.start_or_restart();

    let mut batch = VertexBatch::new();
    let mut peak_vertices = 0;
    let mut jumps = 0;

    for _ in 0..FRAMES {
        game.update(SIM_DT);
        for event in game.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::NightChanged(night) => {
                    log::info!("{} falls", if night { "Night" } else { "Day" })
                }
                GameEvent::Crashed { score } => log::info!("Autopilot crashed at {score}"),
                _ => {}
            }
        }

        batch.clear();
        game.render_frame(WIDTH, HEIGHT, &mut batch);
        peak_vertices = peak_vertices.max(batch.len());

        if game.snapshot().phase == RunPhase::GameOver {
            break;
        }
    }

    let hud = game.snapshot();
    log::info!(
        "Seed {seed}: score {}, {} jumps, speed {:.2}, peak {} vertices per frame",
        hud.score,
        jumps,
        game.state().speed,
        peak_vertices
    );
}
