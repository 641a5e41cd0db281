//! Browser bindings
//!
//! The page's `requestAnimationFrame` callback calls `update()` then reads
//! `snapshot_json()` to draw. Key handlers map onto the control setters.

use wasm_bindgen::prelude::*;

use crate::sim::{Session, Turn};
use crate::tuning::Tuning;

/// Install logging and the panic hook (call once at startup)
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A session owned by JavaScript
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// Classic tuning, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        WebSession {
            session: Session::new(super::clock_seed()),
        }
    }

    /// Custom tuning from a JSON document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(json: &str) -> Result<WebSession, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let session = Session::with_tuning(super::clock_seed(), tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebSession { session })
    }

    pub fn update(&mut self) {
        self.session.update();
    }

    #[wasm_bindgen(js_name = setThrust)]
    pub fn set_thrust(&mut self, on: bool) {
        self.session.set_thrust(on);
    }

    /// -1 = left, 0 = none, 1 = right
    #[wasm_bindgen(js_name = setTurn)]
    pub fn set_turn(&mut self, direction: i32) {
        let turn = match direction.signum() {
            -1 => Turn::Left,
            1 => Turn::Right,
            _ => Turn::None,
        };
        self.session.set_turn(turn);
    }

    #[wasm_bindgen(js_name = requestFire)]
    pub fn request_fire(&mut self) {
        self.session.request_fire();
    }

    #[wasm_bindgen(js_name = requestPauseToggle)]
    pub fn request_pause_toggle(&mut self) {
        self.session.request_pause_toggle();
    }

    #[wasm_bindgen(js_name = requestRestart)]
    pub fn request_restart(&mut self) {
        self.session.request_restart();
    }

    /// Current frame as JSON (see `Snapshot`)
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
