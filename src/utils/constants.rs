/// URL base de la API de tracking
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:3000 (por defecto)
/// - Producción: via API_BASE env var
pub const API_BASE: &str = match option_env!("API_BASE") {
    Some(url) => url,
    None => "http://localhost:3000",
};
