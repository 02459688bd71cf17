//! JavaScript bindings.

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::GameConfig;
use crate::play::{GameMode, Match};

#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    /// `mode`: 0 black vs computer, 1 white vs computer, 2 two players,
    /// 3 weird two players, 4 demo. `config` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: u8, config: JsValue) -> Result<WasmMatch, JsValue> {
        let mode = GameMode::from_u8(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game mode {mode}")))?;
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(WasmMatch {
            inner: Match::new(mode, &config),
        })
    }

    /// Returns false when the move is not accepted.
    #[wasm_bindgen(js_name = humanMove)]
    pub fn human_move(&mut self, index: usize) -> bool {
        match self.inner.human_move(index) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("human move {index} rejected: {err}");
                false
            }
        }
    }

    /// Runs due agents; returns the events they produced.
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        let events = self.inner.tick();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    /// Milliseconds until `tick` has work, or undefined when idle.
    #[wasm_bindgen(js_name = msUntilTick)]
    pub fn ms_until_tick(&self) -> Option<f64> {
        let deadline = self.inner.next_deadline()?;
        let wait = deadline.saturating_duration_since(Instant::now());
        Some(wait.as_secs_f64() * 1000.0)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.inner.session().to_game_state();
        Ok(serde_wasm_bindgen::to_value(&state)?)
    }

    /// Final result, or null while the game runs.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        let result = self.inner.session().result();
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    pub fn status(&self) -> String {
        self.inner.status()
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<u8> {
        self.inner
            .legal_moves()
            .into_iter()
            .map(|index| index as u8)
            .collect()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn missing_config_starts_a_default_game() {
        let game = WasmMatch::new(2, JsValue::UNDEFINED).unwrap();

        assert_eq!(game.status(), "Black's turn.");
        assert_eq!(game.legal_moves(), vec![20, 29, 34, 43]);
        assert_eq!(game.ms_until_tick(), None);
    }

    #[wasm_bindgen_test]
    fn unknown_mode_is_an_error() {
        assert!(WasmMatch::new(9, JsValue::NULL).is_err());
    }

    #[wasm_bindgen_test]
    fn human_move_reports_acceptance() {
        let mut game = WasmMatch::new(2, JsValue::NULL).unwrap();

        assert!(!game.human_move(0));
        assert!(game.human_move(43));
        assert!(game.state().is_ok());
    }
}
