use crate::models::{SettingKey, Settings};
use crate::state::ReactiveState;
use crate::utils::storage::{load_from_storage, save_to_storage, StorageBackend};
use std::rc::Rc;

const SETTINGS_STORAGE_KEY: &str = "mypaket_settings";

/// Servicio de preferencias del usuario. Mantiene una copia reactiva
/// compartida por toda la pestaña; los cambios hechos en otra pestaña
/// entran por `notify_external_change`.
#[derive(Clone)]
pub struct SettingsService {
    storage: Rc<dyn StorageBackend>,
    settings: ReactiveState<Settings>,
}

impl SettingsService {
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        let initial = Self::read_from(storage.as_ref());
        Self {
            storage,
            settings: ReactiveState::new(initial),
        }
    }

    /// Servicio sobre el localStorage del navegador, escuchando los
    /// cambios hechos desde otras pestañas
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::storage::LocalStorage;
        let service = Self::new(Rc::new(LocalStorage));
        service.listen_for_external_changes();
        service
    }

    fn read_from(storage: &dyn StorageBackend) -> Settings {
        match load_from_storage::<Settings>(storage, SETTINGS_STORAGE_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("⚠️ No se pudo leer la configuración: {}", e);
                Settings::default()
            }
        }
    }

    /// Carga la configuración reportando errores de storage al caller
    pub fn load(&self) -> Result<Settings, String> {
        let settings = load_from_storage(self.storage.as_ref(), SETTINGS_STORAGE_KEY)?;
        Ok(settings.unwrap_or_default())
    }

    /// Lectura fresca desde storage, mezclada sobre los defaults.
    /// Un storage inaccesible o corrupto degrada a los defaults.
    pub fn read(&self) -> Settings {
        Self::read_from(self.storage.as_ref())
    }

    /// Copia reactiva compartida, sin tocar el storage
    pub fn current(&self) -> Settings {
        self.settings.get()
    }

    /// Persiste la configuración completa y actualiza la copia compartida
    pub fn write(&self, settings: Settings) -> Result<(), String> {
        save_to_storage(self.storage.as_ref(), SETTINGS_STORAGE_KEY, &settings)?;
        log::info!("💾 Configuración guardada");
        self.settings.set(settings);
        Ok(())
    }

    /// Cambia una clave suelta conservando el resto de valores persistidos
    pub fn set(&self, key: SettingKey, value: &str) -> Result<Settings, String> {
        let mut settings = self.read();
        match key {
            SettingKey::HomescreenInterval => settings.homescreen_interval = value.to_string(),
            SettingKey::TrackInterval => settings.track_interval = value.to_string(),
        }
        self.write(settings.clone())?;
        log::info!("📝 Configuración: {} = {}", key.as_str(), value);
        Ok(settings)
    }

    /// Convierte el valor de un intervalo (en horas) a milisegundos.
    /// "disabled", vacío, no numérico o fuera de rango significan
    /// sin refresco.
    pub fn interval_ms(value: &str) -> u64 {
        if value.is_empty() || value == "disabled" {
            return 0;
        }
        value
            .parse::<u64>()
            .ok()
            .and_then(|hours| hours.checked_mul(3_600_000))
            .unwrap_or(0)
    }

    /// Registra un callback que recibe la configuración cada vez que
    /// la copia compartida cambia, venga el cambio de esta pestaña o
    /// de fuera.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Settings) + 'static,
    {
        let settings = self.settings.clone();
        self.settings.subscribe(move || callback(&settings.get()));
    }

    /// Aplica un cambio hecho fuera de esta pestaña. `None` o vacío
    /// significa que el valor persistido desapareció y se vuelve a los
    /// defaults; un JSON inválido conserva la copia actual.
    pub fn notify_external_change(&self, new_value: Option<&str>) {
        let settings = match new_value {
            Some(json) if !json.is_empty() => match serde_json::from_str::<Settings>(json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("⚠️ Configuración externa inválida, se conserva la actual: {}", e);
                    return;
                }
            },
            _ => Settings::default(),
        };
        log::info!("🔄 Configuración actualizada desde fuera de la pestaña");
        self.settings.set(settings);
    }

    /// Conecta `notify_external_change` al evento "storage" del navegador.
    /// Se registra una sola vez por pestaña.
    #[cfg(target_arch = "wasm32")]
    pub fn listen_for_external_changes(&self) {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        thread_local! {
            static STORAGE_LISTENER_ATTACHED: std::cell::Cell<bool> = std::cell::Cell::new(false);
        }

        let already_attached = STORAGE_LISTENER_ATTACHED.with(|attached| attached.replace(true));
        if already_attached {
            log::warn!("⚠️ El listener de configuración ya estaba registrado");
            return;
        }

        let window = match web_sys::window() {
            Some(window) => window,
            None => return,
        };

        let service = self.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::StorageEvent| {
            if event.key().as_deref() == Some(SETTINGS_STORAGE_KEY) {
                let new_value = event.new_value();
                service.notify_external_change(new_value.as_deref());
            }
        }) as Box<dyn FnMut(web_sys::StorageEvent)>);

        if window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("❌ No se pudo registrar el listener de storage");
        }
        closure.forget();
    }
}
