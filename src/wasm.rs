//! WASM API module for browser/JS interop
//!
//! Exposes the engine as raw RGBA frames: the JS side owns the canvas and
//! the `requestAnimationFrame` loop, calls [`StarfieldAnimation::tick`] with
//! `performance.now()`, and blits the returned pixels.

use wasm_bindgen::prelude::*;

use crate::config::StarfieldConfig;
use crate::engine::Starfield;
use crate::palette::Theme;
use crate::raster::RasterSurface;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn initial_theme(dark: bool) -> Theme {
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// A starfield engine paired with an in-memory frame buffer.
#[wasm_bindgen]
pub struct StarfieldAnimation {
    engine: Starfield,
    surface: RasterSurface,
}

#[wasm_bindgen]
impl StarfieldAnimation {
    /// Create an animation with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, dark: bool) -> StarfieldAnimation {
        let mut engine = Starfield::new(StarfieldConfig::default(), initial_theme(dark));
        engine.on_viewport_change(width as f64, height as f64);
        StarfieldAnimation { engine, surface: RasterSurface::new(width, height) }
    }

    /// Create an animation from a JSON configuration object using the same
    /// schema as the TOML config file.
    pub fn with_config(
        config_json: &str,
        width: u32,
        height: u32,
        dark: bool,
    ) -> Result<StarfieldAnimation, JsValue> {
        let config: StarfieldConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut engine = Starfield::new(config, initial_theme(dark));
        engine.on_viewport_change(width as f64, height as f64);
        Ok(StarfieldAnimation { engine, surface: RasterSurface::new(width, height) })
    }

    /// Render the frame at `now_ms` and return its RGBA pixels
    /// (4 bytes per pixel, row-major).
    pub fn tick(&mut self, now_ms: f64) -> Vec<u8> {
        self.engine.tick(&mut self.surface, now_ms);
        self.surface.image().as_raw().clone()
    }

    /// Adopt a new viewport size, regenerating the star field.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.engine.on_viewport_change(width as f64, height as f64);
    }

    /// Crossfade to the opposite theme. Ignored while a fade is running.
    pub fn toggle_theme(&mut self, now_ms: f64) {
        let next = self.engine.theme().toggled();
        self.engine.on_theme_toggle(next, now_ms);
    }

    /// Stop the animation; subsequent ticks return the last frame unchanged.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dark(&self) -> bool {
        self.engine.theme() == Theme::Dark
    }

    #[wasm_bindgen(getter)]
    pub fn is_transitioning(&self) -> bool {
        self.engine.is_transitioning()
    }
}
