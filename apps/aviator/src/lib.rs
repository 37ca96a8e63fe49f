//! Aviator host application.
//!
//! Native builds open a winit window; the wasm build mounts the canvas into
//! the page's `#world` element and starts from [`start`].

pub mod app;
pub mod headless;
pub mod host;

pub use app::{App, AppEvent, run};
pub use host::WinitHost;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))?;
    tracing::info!("aviator starting");
    run(aviator_game::GameConfig::default())
        .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}
