//! CubeXR WASM Web Runtime
//!
//! Renders a spinning cube in the browser through WebGPU (or WebGL2), offers an
//! "Enter XR" control when the browser supports WebXR, and exchanges text with
//! a native iOS host through `window.webkit.messageHandlers`.
//!
//! Everything except the `web` module is plain Rust, so the scene, render
//! loop, viewport, bridge, and XR loader logic run and test natively.

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod viewport;
pub mod xr;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Runs once when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("CubeXR Web Runtime initialized");
}

/// Build the demo in the current page and start rendering.
///
/// Called from JavaScript once the module has loaded. `config_json` may
/// override any field of [`config::DemoConfig`].
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn launch(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => config::DemoConfig::from_json(&json),
        None => Ok(config::DemoConfig::default()),
    }
    .map_err(|e| JsValue::from_str(&format!("Failed to load config: {e}")))?;

    web::launch(config).await.map_err(|e| {
        log::error!("Launch failed: {e}");
        JsValue::from_str(&e.to_string())
    })
}
