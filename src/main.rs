//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::consts::*;
    use brick_breaker::driver::run_frame;
    use brick_breaker::input::{self, Control, DragTracker};
    use brick_breaker::renderer::{Hud, PAUSE_TEXT, RenderState, Scene};
    use brick_breaker::sim::{GameEvent, Session};
    use brick_breaker::Settings;

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        drag: DragTracker,
        /// A frame callback is pending
        loop_active: bool,
        /// Last HUD pushed to the DOM
        last_hud: Option<Hud>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                session: Session::new(&settings),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                drag: DragTracker::default(),
                loop_active: false,
                last_hud: None,
            }
        }

        /// Play cues and collect runs that need a game-over timer
        fn handle_events(&self, events: &[GameEvent]) -> Vec<u32> {
            let mut losses = Vec::new();
            for event in events {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(*cue),
                    GameEvent::BallLost { epoch } => losses.push(*epoch),
                    GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                    GameEvent::BrickDestroyed { .. } => {}
                }
            }
            losses
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = Scene::compose(&self.session);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update level readout and overlays in the DOM, only on change
        fn update_hud(&mut self) {
            let hud = Hud::from_session(&self.session);
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&hud.level.to_string()));
            }
            set_visible(&document, "startScreen", hud.start_overlay, "flex");
            set_visible(&document, "gameOverScreen", hud.game_over_overlay, "flex");
            if let Some(el) = document.get_element_by_id("pauseOverlay") {
                el.set_text_content(Some(PAUSE_TEXT));
            }
            set_visible(&document, "pauseOverlay", hud.pause_overlay, "flex");
        }
    }

    /// Show or hide an element by id
    fn set_visible(document: &Document, id: &str, visible: bool, display: &str) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let value = if visible { display } else { "none" };
        let _ = el.style().set_property("display", value);
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed logical surface, backing store scaled for crisp edges
        let dpr = window.device_pixel_ratio();
        let width = (SURFACE_WIDTH as f64 * dpr) as u32;
        let height = (SURFACE_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, canvas.clone(), width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {:?}", e),
        }

        setup_keyboard(game.clone())?;
        setup_drag(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(game.clone())?;

        // Draw the idle scene once under the start overlay
        ensure_loop(game);

        log::info!("Brick Breaker ready!");
        Ok(())
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, JsValue> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_error)
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if input::key_down(&mut game.borrow_mut().session, &key) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                input::key_up(&mut game.borrow_mut().session, &event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Touch, pen and mouse drags all arrive as pointer events
    fn setup_drag(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().drag.press(event.client_x() as f32);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.drag.is_active() {
                    event.prevent_default();
                    let Game { drag, session, .. } = &mut *g;
                    drag.drag(session, event.client_x() as f32);
                }
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().drag.release();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, control) in [
            ("startBtn", Control::Start),
            ("pauseBtn", Control::PauseResume),
            ("restartBtn", Control::Restart),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} control", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let changed = {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    input::activate(&mut g.session, control)
                };
                if changed {
                    ensure_loop(game.clone());
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.auto_pause_on_hide && g.session.pause() {
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.settings.auto_pause_on_hide && g.session.pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Request a frame unless one is already pending
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (reschedule, losses) = {
            let mut g = game.borrow_mut();
            let frame = run_frame(&mut g.session);
            let losses = g.handle_events(&frame.events);
            g.render();
            g.update_hud();

            let reschedule = frame.action.reschedules();
            if !reschedule {
                g.loop_active = false;
            }
            (reschedule, losses)
        };

        for epoch in losses {
            schedule_game_over(game.clone(), epoch);
        }

        if reschedule {
            request_animation_frame(game);
        }
    }

    /// One-shot timer, independent of the frame loop
    fn schedule_game_over(game: Rc<RefCell<Game>>, epoch: u32) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            let mut g = game.borrow_mut();
            if g.session.expire_loss(epoch) {
                g.update_hud();
            }
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            LOSS_DELAY_MS as i32,
        ) {
            log::error!("Failed to schedule game over: {:?}", e);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode plays a headless autopilot run - use `trunk serve` for the web version");

    let session = headless::play(headless::MAX_FRAMES);
    match serde_json::to_string_pretty(&session) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize session: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_breaker::Settings;
    use brick_breaker::driver::{TimerQueue, run_frame};
    use brick_breaker::sim::{Cue, GameEvent, Session};

    /// Five minutes at 60 Hz
    pub const MAX_FRAMES: u32 = 60 * 60 * 5;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play with the autopilot until game over or the frame limit
    pub fn play(max_frames: u32) -> Session {
        let mut session = Session::new(&Settings::load());
        session.autopilot = true;
        session.start();

        let mut timers = TimerQueue::new();
        let mut bricks = 0u32;
        let mut bounces = 0u32;

        for frame_index in 0..max_frames {
            let now_ms = f64::from(frame_index) * FRAME_MS;
            timers.fire_due(&mut session, now_ms);

            let frame = run_frame(&mut session);
            timers.schedule_losses(&frame.events, now_ms);
            for event in &frame.events {
                match event {
                    GameEvent::Sound(Cue::Hit) => bounces += 1,
                    GameEvent::Sound(Cue::Brick) => bricks += 1,
                    _ => {}
                }
            }

            if !frame.action.reschedules() {
                log::info!("Loop halted after {} frames", frame_index);
                break;
            }
        }

        log::info!(
            "Headless run finished: level {}, {} bricks, {} bounces, mode {:?}",
            session.level,
            bricks,
            bounces,
            session.mode
        );
        session
    }
}
