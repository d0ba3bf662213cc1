//! Browser host bindings
//!
//! The page owns rendering and the animation-frame loop; it forwards DOM input
//! here and reads JSON snapshots back once per frame.

use wasm_bindgen::prelude::*;

use crate::consts::*;
use crate::settings::{Settings, Variant};
use crate::sim::{ArcadePhysics, Button, GameState, InputEvent, PointerPhase, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Squish Platformer starting...");
}

/// One running round plus its fixed-step accumulator
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    physics: ArcadePhysics,
    /// Events waiting for the next tick
    pending: Vec<InputEvent>,
    accumulator: f32,
}

#[wasm_bindgen]
impl WebGame {
    /// New round for a named variant; seeds from the clock when `seed` is absent
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, seed: Option<f64>) -> WebGame {
        let variant = Variant::from_str(variant).unwrap_or_else(|| {
            log::warn!("Unknown variant '{}', using {}", variant, Variant::default().as_str());
            Variant::default()
        });
        let mut settings = Settings::from_preset(variant);
        settings.seed = seed.map_or_else(|| js_sys::Date::now() as u64, |s| s as u64);
        Self::with_settings(settings)
    }

    /// New round from a JSON settings object (missing fields take defaults)
    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(json: &str) -> Result<WebGame, JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_settings(settings))
    }

    fn with_settings(settings: Settings) -> WebGame {
        log::info!(
            "Game initialized: variant {}, seed {}",
            settings.variant.as_str(),
            settings.seed
        );
        WebGame {
            state: GameState::new(settings),
            physics: ArcadePhysics::default(),
            pending: Vec::new(),
            accumulator: 0.0,
        }
    }

    /// Restart with the same settings and a new seed
    pub fn restart(&mut self, seed: f64) {
        let mut settings = self.state.settings.clone();
        settings.seed = seed as u64;
        *self = Self::with_settings(settings);
    }

    pub fn key_down(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.pending.push(InputEvent::Key {
                button,
                pressed: true,
            });
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.pending.push(InputEvent::Key {
                button,
                pressed: false,
            });
        }
    }

    pub fn touch_down(&mut self, button: &str) {
        if let Some(button) = Button::from_str(button) {
            self.pending.push(InputEvent::TouchDown(button));
        }
    }

    pub fn touch_up(&mut self, button: &str) {
        if let Some(button) = Button::from_str(button) {
            self.pending.push(InputEvent::TouchUp(button));
        }
    }

    pub fn touch_out(&mut self, button: &str) {
        if let Some(button) = Button::from_str(button) {
            self.pending.push(InputEvent::TouchOut(button));
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer(PointerPhase::Down, x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer(PointerPhase::Move, x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.pointer(PointerPhase::Up, x, y);
    }

    pub fn pointer_out(&mut self, x: f32, y: f32) {
        self.pointer(PointerPhase::Out, x, y);
    }

    fn pointer(&mut self, phase: PointerPhase, x: f32, y: f32) {
        self.pending.push(InputEvent::Pointer { phase, x, y });
    }

    /// Advance by one rendered frame; returns the number of ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Queued events land on the first substep only
            let input = TickInput::new(std::mem::take(&mut self.pending));
            tick(&mut self.state, &mut self.physics, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Full state for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, oldest first
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.state.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
