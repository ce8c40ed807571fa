use serde::{Deserialize, Serialize};

/// Paquete seguido por el usuario, tal como se persiste en el historial.
/// Las claves JSON van en camelCase para mantener compatibilidad con
/// el historial ya guardado por versiones anteriores de la app.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub waybill: String, // Número de seguimiento, clave única del historial
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub last_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    pub last_update: String,
    pub courier_name: String,
    pub is_done: bool,
    pub added_at: String,
}

/// Datos de una actualización de estado observada por el poller de tracking.
/// Los campos opcionales que vengan en `None` conservan el valor ya guardado.
#[derive(Clone, PartialEq, Debug)]
pub struct PackageUpdate {
    pub waybill: String,
    pub status: String,
    pub courier_name: String,
    pub is_done: bool,
    pub alias: Option<String>,
    pub last_location: Option<String>,
    pub last_activity: Option<String>,
    pub updated_at: Option<String>,
}

impl PackageUpdate {
    pub fn new(waybill: &str, status: &str, courier_name: &str, is_done: bool) -> Self {
        Self {
            waybill: waybill.to_string(),
            status: status.to_string(),
            courier_name: courier_name.to_string(),
            is_done,
            alias: None,
            last_location: None,
            last_activity: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializa_el_formato_persistido_por_la_app_anterior() {
        let json = r#"{
            "waybill": "RR123456789DE",
            "alias": "Zapatillas",
            "lastStatus": "In transit",
            "lastUpdate": "2024-03-01T10:00:00.000Z",
            "courierName": "DHL",
            "isDone": false,
            "addedAt": "2024-02-28T09:30:00.000Z"
        }"#;

        let record: PackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.waybill, "RR123456789DE");
        assert_eq!(record.alias.as_deref(), Some("Zapatillas"));
        assert_eq!(record.last_status, "In transit");
        assert_eq!(record.last_location, None);
        assert!(!record.is_done);
    }

    #[test]
    fn serializa_con_claves_camel_case_y_omite_opcionales_vacios() {
        let record = PackageRecord {
            waybill: "AB1".to_string(),
            alias: None,
            last_status: "Delivered".to_string(),
            last_location: None,
            last_activity: None,
            last_update: "2024-03-01T10:00:00.000Z".to_string(),
            courier_name: "Hermes".to_string(),
            is_done: true,
            added_at: "2024-02-28T09:30:00.000Z".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"lastStatus\""));
        assert!(json.contains("\"courierName\""));
        assert!(json.contains("\"isDone\""));
        assert!(!json.contains("alias"));
        assert!(!json.contains("lastLocation"));
    }
}
