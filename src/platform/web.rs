//! Browser bindings
//!
//! Each game is exported as a class owning its session. JS forwards pointer
//! events in canvas-relative display pixels and receives a JSON snapshot
//! after every timer tick for drawing.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::breaker::{self, BreakerState};
use crate::consts::*;
use crate::input::Viewport;
use crate::persistence::LocalStorageStore;
use crate::session::{Game, Session};
use crate::slicer::{self, SlicerState};
use crate::tuning::{BreakerTuning, SlicerTuning};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Neon Arcade loaded");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Snapshot serialization failed: {}", e);
        "null".to_string()
    })
}

/// Session plus the timer and viewport around it
struct Driver<G: Game> {
    session: Rc<RefCell<Session<G>>>,
    viewport: Viewport,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl<G: Game> Driver<G> {
    fn stop(&mut self) {
        if let Some((handle, _closure)) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
            log::info!("Game loop stopped");
        }
    }
}

impl<G: Game> Drop for Driver<G> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<G: Game + 'static> Driver<G> {
    fn new(game: G, logical: Vec2) -> Self {
        let session = Session::new(game, Box::new(LocalStorageStore));
        Self {
            session: Rc::new(RefCell::new(session)),
            viewport: Viewport::new(logical),
            interval: None,
        }
    }

    /// Run `f` against the session unless a tick is mid-flight
    fn with<R>(&self, f: impl FnOnce(&mut Session<G>) -> R) -> Option<R> {
        match self.session.try_borrow_mut() {
            Ok(mut session) => Some(f(&mut session)),
            Err(_) => {
                log::warn!("Session busy, event dropped");
                None
            }
        }
    }

    fn snapshot_json(&self) -> String {
        self.session
            .try_borrow()
            .map(|s| to_json(&s.snapshot()))
            .unwrap_or_else(|_| "null".to_string())
    }

    /// Tick on a fixed interval and hand each snapshot to `render`
    fn run(&mut self, render: js_sys::Function) -> Result<(), JsValue> {
        self.stop();

        let session = self.session.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let json = {
                // A tick that fires while the previous one is still running is skipped
                let Ok(mut session) = session.try_borrow_mut() else {
                    return;
                };
                session.frame_at(js_sys::Date::now());
                to_json(&session.snapshot())
            };
            if let Err(e) = render.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::error!("Render callback failed: {:?}", e);
            }
        });

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TICK_MS as i32,
        )?;
        self.interval = Some((handle, closure));
        log::info!("Game loop running every {} ms", TICK_MS);
        Ok(())
    }
}

#[wasm_bindgen]
pub struct SlicerApp {
    driver: Driver<SlicerState>,
}

#[wasm_bindgen]
impl SlicerApp {
    /// `tuning` is optional JSON overriding any subset of the balance values
    #[wasm_bindgen(constructor)]
    pub fn new(tuning: Option<String>) -> SlicerApp {
        let tuning = match tuning.as_deref().map(SlicerTuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Invalid slicer tuning, using defaults: {}", e);
                SlicerTuning::default()
            }
            None => SlicerTuning::default(),
        };
        let logical = Vec2::new(tuning.width, tuning.height);
        let seed = super::default_seed();
        log::info!("Slicer initialized with seed: {}", seed);
        SlicerApp {
            driver: Driver::new(SlicerState::new(seed, tuning), logical),
        }
    }

    pub fn run(&mut self, render: js_sys::Function) -> Result<(), JsValue> {
        self.driver.run(render)
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    pub fn resize(&mut self, display_width: f32, display_height: f32) {
        self.driver.viewport.resize(display_width, display_height);
    }

    #[wasm_bindgen(js_name = pressStart)]
    pub fn press_start(&self, x: f32, y: f32) {
        let point = self.driver.viewport.to_logical(x, y);
        self.driver
            .with(|s| s.input(|g| slicer::press_start(g, point)));
    }

    /// Returns true if the move cut anything
    #[wasm_bindgen(js_name = pressMove)]
    pub fn press_move(&self, x: f32, y: f32) -> bool {
        let point = self.driver.viewport.to_logical(x, y);
        self.driver
            .with(|s| s.input(|g| slicer::press_move(g, point)))
            .is_some_and(|o| o.sliced > 0 || o.bomb)
    }

    #[wasm_bindgen(js_name = pressEnd)]
    pub fn press_end(&self) -> bool {
        self.driver
            .with(|s| s.input(slicer::press_end))
            .is_some_and(|o| o.sliced > 0 || o.bomb)
    }

    pub fn start(&self) {
        self.driver.with(|s| s.start());
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.driver.with(|s| s.toggle_pause());
    }

    pub fn reset(&self) {
        self.driver.with(|s| s.reset());
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.driver.with(|s| s.high_score() as f64).unwrap_or(0.0)
    }

    pub fn snapshot(&self) -> String {
        self.driver.snapshot_json()
    }

    /// Events since the last call, as a JSON array (for sound cues)
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> String {
        self.driver
            .with(|s| to_json(&s.input(|g| g.drain_events())))
            .unwrap_or_else(|| "[]".to_string())
    }
}

#[wasm_bindgen]
pub struct BreakerApp {
    driver: Driver<BreakerState>,
}

#[wasm_bindgen]
impl BreakerApp {
    #[wasm_bindgen(constructor)]
    pub fn new(tuning: Option<String>) -> BreakerApp {
        let tuning = match tuning.as_deref().map(BreakerTuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Invalid breaker tuning, using defaults: {}", e);
                BreakerTuning::default()
            }
            None => BreakerTuning::default(),
        };
        let logical = Vec2::new(tuning.width, tuning.height);
        let seed = super::default_seed();
        log::info!("Breaker initialized with seed: {}", seed);
        BreakerApp {
            driver: Driver::new(BreakerState::new(seed, tuning), logical),
        }
    }

    pub fn run(&mut self, render: js_sys::Function) -> Result<(), JsValue> {
        self.driver.run(render)
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    pub fn resize(&mut self, display_width: f32, display_height: f32) {
        self.driver.viewport.resize(display_width, display_height);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f32) {
        let x = self.driver.viewport.to_logical_x(x);
        self.driver
            .with(|s| s.input(|g| breaker::pointer_move(g, x)));
    }

    pub fn start(&self) {
        self.driver.with(|s| s.start());
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.driver.with(|s| s.toggle_pause());
    }

    pub fn reset(&self) {
        self.driver.with(|s| s.reset());
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.driver.with(|s| s.high_score() as f64).unwrap_or(0.0)
    }

    pub fn snapshot(&self) -> String {
        self.driver.snapshot_json()
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> String {
        self.driver
            .with(|s| to_json(&s.input(|g| g.drain_events())))
            .unwrap_or_else(|| "[]".to_string())
    }
}

/// Logical canvas sizes, for hosts that size the element before constructing
#[wasm_bindgen(js_name = logicalSize)]
pub fn logical_size(game: &str) -> Option<Vec<f32>> {
    match game {
        "slicer" => Some(vec![SLICER_WIDTH, SLICER_HEIGHT]),
        "breaker" => Some(vec![BREAKER_WIDTH, BREAKER_HEIGHT]),
        _ => None,
    }
}
