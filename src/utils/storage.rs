use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

/// Backend de almacenamiento clave/valor.
/// `LocalStorage` en el navegador, `MemoryStorage` en tests.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// localStorage del navegador
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| "No se pudo acceder a localStorage".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        self.storage()?
            .get_item(key)
            .map_err(|_| "Error leyendo de localStorage".to_string())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| "Error guardando en localStorage".to_string())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| "Error eliminando de localStorage".to_string())
    }
}

/// Almacenamiento en memoria (tests y entornos sin localStorage)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Backend que falla siempre, para probar la degradación de los services
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStorage;

#[cfg(test)]
impl StorageBackend for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, String> {
        Err("Storage no disponible".to_string())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("Storage no disponible".to_string())
    }

    fn remove_item(&self, _key: &str) -> Result<(), String> {
        Err("Storage no disponible".to_string())
    }
}

pub fn save_to_storage<T: Serialize>(
    storage: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let json =
        serde_json::to_string(value).map_err(|e| format!("Error serializando datos: {}", e))?;
    storage.set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(
    storage: &dyn StorageBackend,
    key: &str,
) -> Result<Option<T>, String> {
    match storage.get_item(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| format!("Error deserializando datos: {}", e)),
        None => Ok(None),
    }
}
