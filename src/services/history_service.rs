use crate::models::{PackageRecord, PackageUpdate};
use crate::utils::clock::Clock;
use crate::utils::storage::{load_from_storage, save_to_storage, StorageBackend};
use std::rc::Rc;

const HISTORY_STORAGE_KEY: &str = "mypaket_history";

/// Servicio de historial de paquetes seguidos, persistido como
/// array JSON bajo una clave fija de localStorage.
#[derive(Clone)]
pub struct HistoryService {
    storage: Rc<dyn StorageBackend>,
    clock: Rc<dyn Clock>,
}

impl HistoryService {
    pub fn new(storage: Rc<dyn StorageBackend>, clock: Rc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Servicio sobre el localStorage del navegador y el reloj del sistema
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::clock::SystemClock;
        use crate::utils::storage::LocalStorage;
        Self::new(Rc::new(LocalStorage), Rc::new(SystemClock))
    }

    /// Carga el historial reportando errores de storage al caller
    pub fn load(&self) -> Result<Vec<PackageRecord>, String> {
        let history = load_from_storage(self.storage.as_ref(), HISTORY_STORAGE_KEY)?;
        Ok(history.unwrap_or_default())
    }

    /// Historial completo. Un storage inaccesible o corrupto degrada
    /// a lista vacía, la UI nunca ve el error.
    pub fn list(&self) -> Vec<PackageRecord> {
        match self.load() {
            Ok(history) => history,
            Err(e) => {
                log::warn!("⚠️ No se pudo leer el historial: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, history: &[PackageRecord]) -> Result<(), String> {
        save_to_storage(self.storage.as_ref(), HISTORY_STORAGE_KEY, &history)?;
        log::info!("💾 Historial guardado: {} paquetes", history.len());
        Ok(())
    }

    /// Crea o actualiza el registro del waybill con los datos observados.
    /// Los registros nuevos se insertan al principio; los existentes
    /// conservan su posición y los campos que la actualización no trae.
    pub fn upsert(&self, update: PackageUpdate) -> Result<PackageRecord, String> {
        let mut history = self.list();
        let existing_index = history.iter().position(|p| p.waybill == update.waybill);
        let existing = existing_index.map(|i| history[i].clone());
        let now = self.clock.now_iso();

        let record = PackageRecord {
            waybill: update.waybill,
            alias: update
                .alias
                .or_else(|| existing.as_ref().and_then(|p| p.alias.clone())),
            last_status: update.status,
            last_location: update
                .last_location
                .or_else(|| existing.as_ref().and_then(|p| p.last_location.clone())),
            last_activity: update
                .last_activity
                .or_else(|| existing.as_ref().and_then(|p| p.last_activity.clone())),
            last_update: update
                .updated_at
                .or_else(|| existing.as_ref().map(|p| p.last_update.clone()))
                .unwrap_or_else(|| now.clone()),
            courier_name: update.courier_name,
            is_done: update.is_done,
            added_at: existing
                .as_ref()
                .map(|p| p.added_at.clone())
                .unwrap_or(now),
        };

        match existing_index {
            Some(i) => history[i] = record.clone(),
            None => history.insert(0, record.clone()),
        }

        self.save(&history)?;
        Ok(record)
    }

    /// Cambia el alias de un paquete existente. Si el waybill no está
    /// en el historial no hace nada.
    pub fn set_alias(&self, waybill: &str, alias: &str) -> Result<(), String> {
        let mut history = self.list();
        if let Some(record) = history.iter_mut().find(|p| p.waybill == waybill) {
            record.alias = Some(alias.to_string());
            self.save(&history)?;
        }
        Ok(())
    }

    /// Elimina un paquete del historial. Eliminar un waybill inexistente
    /// no es un error.
    pub fn remove(&self, waybill: &str) -> Result<(), String> {
        let mut history = self.list();
        history.retain(|p| p.waybill != waybill);
        self.save(&history)
    }

    /// Paquetes todavía en camino
    pub fn list_active(&self) -> Vec<PackageRecord> {
        self.list().into_iter().filter(|p| !p.is_done).collect()
    }

    /// Paquetes ya entregados
    pub fn list_done(&self) -> Vec<PackageRecord> {
        self.list().into_iter().filter(|p| p.is_done).collect()
    }
}
