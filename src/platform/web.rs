//! Browser binding
//!
//! JS owns the renderer and the animation loop. It forwards key events and
//! calls `frame` once per animation frame, drawing from the returned JSON.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::{FrameDriver, SceneSnapshot};
use crate::settings::Settings;
use crate::sim::SimState;
use crate::ui::{self, Hud};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
}

/// HUD backed by DOM elements
struct DomHud {
    document: Option<Document>,
}

impl DomHud {
    fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.as_ref().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }
}

impl Hud for DomHud {
    fn set_score(&mut self, home: u32, away: u32) {
        self.set_text("home-score", &home.to_string());
        self.set_text("away-score", &away.to_string());
    }

    fn set_power(&mut self, percent: u8) {
        self.set_text("power-value", &format!("{percent}%"));
    }

    fn set_statistics(&mut self, attempts: u32, made: u32, percentage: f32) {
        self.set_text("shot-stats", &format!("{made}/{attempts} ({percentage:.1}%)"));
    }

    fn show_feedback(&mut self, message: &str, success: bool) {
        let Some(el) = self
            .document
            .as_ref()
            .and_then(|d| d.get_element_by_id("feedback"))
        else {
            return;
        };
        el.set_text_content(Some(message));
        let classes = el.class_list();
        let (add, remove) = if success {
            ("success", "miss")
        } else {
            ("miss", "success")
        };
        let _ = classes.remove_1(remove);
        let _ = classes.add_2(add, "visible");
    }
}

/// One court, driven by the page
#[wasm_bindgen]
pub struct WebCourt {
    driver: FrameDriver,
    settings: Settings,
    hud: DomHud,
    scene: SceneSnapshot,
}

#[wasm_bindgen]
impl WebCourt {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebCourt {
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let mut state = SimState::new(seed);
        settings.apply(&mut state);
        log::info!("Hoop Shot starting (seed {seed})");

        let mut hud = DomHud::new();
        ui::refresh(&mut hud, &state);

        WebCourt {
            driver: FrameDriver::new(state),
            settings,
            hud,
            scene: SceneSnapshot::default(),
        }
    }

    /// Returns true when the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        let (up, down) = (self.settings.power_delta(true), self.settings.power_delta(false));
        let input = &mut self.driver.input;
        match key {
            "ArrowUp" => input.move_up = true,
            "ArrowDown" => input.move_down = true,
            "ArrowLeft" => input.move_left = true,
            "ArrowRight" => input.move_right = true,
            "w" | "W" => input.power_delta = input.power_delta.saturating_add(up),
            "s" | "S" => input.power_delta = input.power_delta.saturating_add(down),
            " " | "Space" => input.shoot = true,
            "r" | "R" => input.reset = true,
            "c" | "C" => input.clear_scores = true,
            "h" | "H" => input.toggle_preview = true,
            "o" | "O" => input.toggle_camera = true,
            _ => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        let input = &mut self.driver.input;
        match key {
            "ArrowUp" => input.move_up = false,
            "ArrowDown" => input.move_down = false,
            "ArrowLeft" => input.move_left = false,
            "ArrowRight" => input.move_right = false,
            _ => return false,
        }
        true
    }

    /// Step to `time_ms` and return the scene snapshot as JSON
    pub fn frame(&mut self, time_ms: f64) -> String {
        self.driver.frame_at(time_ms, &mut self.hud, &mut self.scene);

        if self.settings.capture(&self.driver.state) {
            self.settings.save();
        }

        match serde_json::to_string(&self.scene) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Snapshot serialization failed: {e}");
                String::from("{}")
            }
        }
    }
}

impl Default for WebCourt {
    fn default() -> Self {
        Self::new()
    }
}
