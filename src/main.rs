//! Paperboy entry point
//!
//! In the browser this wires the engine to the canvas, keyboard and timers.
//! Natively it plays one headless session on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use paperboy::renderer::{DrawList, RenderState};
    use paperboy::schedule::{ClockCommand, FrameId, TaskQueue};
    use paperboy::sim::{ClockId, MoveDirection, SessionEvent};
    use paperboy::{DifficultyTable, Engine, ResultLog};

    /// Game instance holding all state
    struct Game {
        engine: Engine<TaskQueue, ResultLog>,
        render_state: Option<RenderState>,
        draw_list: DrawList,
        canvas: HtmlCanvasElement,
        difficulty: String,
        /// Live `setInterval` handles by clock
        intervals: HashMap<ClockId, i32>,
    }

    impl Game {
        /// Playfield size in CSS pixels and surface size in device pixels
        fn measure(&self) -> ((u32, u32), (u32, u32)) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let w = self.canvas.client_width().max(1) as u32;
            let h = self.canvas.client_height().max(1) as u32;
            ((w, h), ((w as f64 * dpr) as u32, (h as f64 * dpr) as u32))
        }

        fn start(&mut self) {
            let ((w, h), _) = self.measure();
            let difficulty = self.difficulty.clone();
            if let Err(e) = self.engine.start_session(&difficulty, w, h) {
                log::error!("Cannot start session: {}", e);
                return;
            }
            if let Some(session) = self.engine.session() {
                set_text("timer", &format!("Time: {}", session.time_remaining));
                set_text("score", &format!("Score: {}", session.score));
                set_text("papers", &format!("Papers: {}", session.ammunition));
                set_text("lives", &format!("Lives: {}", session.lives));
            }
        }

        fn resize(&mut self) {
            let (playfield, surface) = self.measure();
            self.canvas.set_width(surface.0);
            self.canvas.set_height(surface.1);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(surface.0, surface.1, playfield);
            }
            if self.engine.is_active() {
                if let Err(e) = self.engine.resize(playfield.0, playfield.1) {
                    log::warn!("Resize ignored: {}", e);
                }
            }
        }

        /// Present the frame recorded by the last `on_frame`
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.draw_list) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let playfield = render_state.playfield;
                        render_state.resize(w, h, playfield);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Mirror session events into the HUD
        fn update_hud(&mut self) {
            for event in self.engine.drain_events() {
                match event {
                    SessionEvent::TimeChanged(t) => set_text("timer", &format!("Time: {}", t)),
                    SessionEvent::ScoreChanged(s) => set_text("score", &format!("Score: {}", s)),
                    SessionEvent::AmmunitionChanged(a) => {
                        set_text("papers", &format!("Papers: {}", a))
                    }
                    SessionEvent::Ended(result) => {
                        let results = self.engine.results();
                        results.save();
                        for (rank, entry) in results.ranked().iter().take(5).enumerate() {
                            log::info!("#{} {} on {}", rank + 1, entry.score, entry.difficulty);
                        }
                        let best = results.best(result.difficulty).unwrap_or(result.score);
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(&format!(
                                "Game Over!\nYour Score: {}\nBest on {}: {}",
                                result.score, result.difficulty, best
                            ));
                        }
                    }
                }
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Paperboy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Difficulty is chosen by the page's settings screen
        let difficulty = canvas
            .get_attribute("data-difficulty")
            .unwrap_or_else(|| "easy".to_string());

        // Optional tuning override, same JSON shape as the built-in table
        let table = match canvas.get_attribute("data-difficulty-table") {
            Some(json) => DifficultyTable::from_json(&json).unwrap_or_else(|e| {
                log::error!("Using built-in difficulty table: {}", e);
                DifficultyTable::default()
            }),
            None => DifficultyTable::default(),
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            engine: Engine::new(seed, TaskQueue::new(), ResultLog::load()).with_table(table),
            render_state: None,
            draw_list: DrawList::new(),
            canvas: canvas.clone(),
            difficulty,
            intervals: HashMap::new(),
        }));

        let (playfield, surface_size) = game.borrow().measure();
        canvas.set_width(surface_size.0);
        canvas.set_height(surface_size.1);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, surface_size.0, surface_size.1, playfield).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        game.borrow_mut().start();
        pump(game);

        log::info!("Paperboy running!");
    }

    /// Turn the engine's scheduling requests into browser timers
    fn pump(game: Rc<RefCell<Game>>) {
        let (frame, commands) = {
            let mut g = game.borrow_mut();
            let queue = g.engine.scheduler_mut();
            (queue.take_frame_request(), queue.drain_clock_commands())
        };

        let window = web_sys::window().unwrap();
        for command in commands {
            match command {
                ClockCommand::Start { id, period_ms } => {
                    let game_for_tick = game.clone();
                    let closure = Closure::<dyn FnMut()>::new(move || clock_tick(game_for_tick.clone(), id));
                    match window.set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        period_ms as i32,
                    ) {
                        Ok(handle) => {
                            game.borrow_mut().intervals.insert(id, handle);
                        }
                        Err(e) => log::error!("setInterval failed: {:?}", e),
                    }
                    closure.forget();
                }
                ClockCommand::Cancel(id) => {
                    if let Some(handle) = game.borrow_mut().intervals.remove(&id) {
                        window.clear_interval_with_handle(handle);
                    }
                }
            }
        }

        if let Some(id) = frame {
            let closure = Closure::once(move |_time: f64| frame_step(game, id));
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn frame_step(game: Rc<RefCell<Game>>, id: FrameId) {
        {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.draw_list.clear();
            if g.engine.on_frame(id, &mut g.draw_list) {
                g.render();
            }
            g.update_hud();
        }
        pump(game);
    }

    fn clock_tick(game: Rc<RefCell<Game>>, id: ClockId) {
        {
            let mut g = game.borrow_mut();
            g.engine.on_clock_tick(id);
            g.update_hud();
        }
        pump(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let result = {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.engine.throw().map(|_| ())
                    }
                    "ArrowUp" => g.engine.move_actor(MoveDirection::Up).map(|_| ()),
                    "ArrowDown" => g.engine.move_actor(MoveDirection::Down).map(|_| ()),
                    "Enter" if !g.engine.is_active() => {
                        g.start();
                        Ok(())
                    }
                    _ => Ok(()),
                }
            };
            if let Err(e) = result {
                log::warn!("Input ignored: {}", e);
            }
            game.borrow_mut().update_hud();
            pump(game.clone());
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Paperboy (native) starting headless session...");

    let mut args = std::env::args().skip(1);
    let difficulty = args.next().unwrap_or_else(|| "easy".to_string());
    let table = match args.next() {
        Some(path) => match paperboy::DifficultyTable::load(std::path::Path::new(&path)) {
            Ok(table) => table,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => paperboy::DifficultyTable::default(),
    };

    match headless::run(&difficulty, table) {
        Ok(result) => println!("{} points on {}", result.score, result.difficulty),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use paperboy::renderer::DrawList;
    use paperboy::schedule::TaskQueue;
    use paperboy::sim::{FinalResult, plan};
    use paperboy::{DifficultyTable, Engine, ResultLog, SessionError};

    /// Simulated animation frames per clock second
    const FRAMES_PER_SECOND: u32 = 60;
    const PLAYFIELD: (u32, u32) = (800, 600);

    /// Play one session to timeout, driving frames and clock by hand
    pub fn run(difficulty: &str, table: DifficultyTable) -> Result<FinalResult, SessionError> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut engine = Engine::new(seed, TaskQueue::new(), ResultLog::new()).with_table(table);
        engine.start_session(difficulty, PLAYFIELD.0, PLAYFIELD.1)?;

        let mut surface = DrawList::new();
        let mut frame: u32 = 0;
        loop {
            if let Some(session) = engine.session() {
                let input = plan(session);
                if let Some(direction) = input.move_dir {
                    engine.move_actor(direction)?;
                }
                if input.throw {
                    engine.throw()?;
                }
            }

            if let Some(frame) = engine.scheduler_mut().take_frame_request() {
                surface.clear();
                engine.on_frame(frame, &mut surface);
            }

            frame += 1;
            if frame % FRAMES_PER_SECOND == 0 {
                for id in engine.scheduler().running_clocks().to_vec() {
                    if let Some(result) = engine.on_clock_tick(id) {
                        return Ok(result);
                    }
                }
            }

            if !engine.is_active() {
                return Err(SessionError::InvalidState("session stopped before time ran out"));
            }
        }
    }
}
