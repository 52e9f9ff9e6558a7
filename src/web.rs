//! JS-facing session wrapper
//!
//! Exported through `wasm-bindgen` on wasm32. On native the same type is
//! plain Rust so the JSON surface is covered by the regular tests.
//! Structured data crosses the boundary as JSON strings.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::Session;

/// Module start hook: logging and panic messages go to the console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    crate::platform::init_logging();
    log::info!("Bingo Roulette (web) loaded");
}

/// A session handle for a web host
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct WebSession {
    session: Session,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl WebSession {
    /// Create from optional settings JSON; bad JSON falls back to defaults
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(settings_json: Option<String>) -> WebSession {
        let settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Bad settings JSON: {e}");
                Settings::default()
            }
            None => Settings::default(),
        };
        WebSession {
            session: Session::new(settings),
        }
    }

    pub fn request_roll(&mut self) -> bool {
        self.session.request_roll()
    }

    pub fn request_reset(&mut self) {
        self.session.request_reset();
    }

    /// Step one frame; returns the frame's events as a JSON array
    pub fn advance(&mut self, dt_ms: f64) -> String {
        let events = self.session.advance(dt_ms);
        to_json_or_null(&events)
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_animating()
    }

    pub fn can_roll(&self) -> bool {
        self.session.can_roll()
    }

    pub fn tick_volume(&self) -> f32 {
        self.session.tick_volume()
    }

    /// Current round; re-fetch the layout when it changes
    pub fn round(&self) -> u32 {
        self.session.state().round()
    }

    pub fn snapshot_json(&self) -> String {
        to_json_or_null(&self.session.snapshot())
    }

    pub fn layout_json(&self) -> String {
        to_json_or_null(self.session.layout())
    }
}

fn to_json_or_null<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("JSON encode failed: {e}");
        "null".to_string()
    })
}
