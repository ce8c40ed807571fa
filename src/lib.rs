// ============================================================================
// MYPAKET CORE - LÓGICA DE CLIENTE DEL FRONTEND DE TRACKING (RUST PURO)
// ============================================================================
// Capa de lógica sin UI:
// - Models: Registros persistidos (historial y configuración)
// - Services: Historial, configuración y tiempo relativo
// - State: Estado reactivo con Rc<RefCell>
// - Utils: Storage, reloj, parseo y formato de tiempo
// ============================================================================

pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use models::{PackageRecord, PackageUpdate, SettingKey, Settings};
pub use services::{HistoryService, SettingsService, TimeAgoService, TrackedTime};
pub use state::ReactiveState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Punto de entrada en el navegador: panic hook + logging
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 MyPaket core inicializado");
    Ok(())
}
