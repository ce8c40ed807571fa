use serde::{Deserialize, Serialize};

fn default_homescreen_interval() -> String {
    "12".to_string()
}

fn default_track_interval() -> String {
    "6".to_string()
}

/// Preferencias del usuario sobre la cadencia de refresco, en horas
/// ("12", "6", ... o "disabled"). Los campos ausentes en el JSON
/// persistido caen a los valores por defecto al deserializar.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_homescreen_interval")]
    pub homescreen_interval: String,
    #[serde(default = "default_track_interval")]
    pub track_interval: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homescreen_interval: default_homescreen_interval(),
            track_interval: default_track_interval(),
        }
    }
}

/// Claves de configuración conocidas
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingKey {
    HomescreenInterval,
    TrackInterval,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::HomescreenInterval => "homescreenInterval",
            SettingKey::TrackInterval => "trackInterval",
        }
    }
}
