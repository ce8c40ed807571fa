use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parsea un timestamp en los formatos que produce la API y el frontend.
/// Las fechas sin zona horaria se interpretan como UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date.and_utc());
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(date.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Magnitud del tiempo transcurrido, sin "ago" ni "in".
/// Segundos, minutos y horas van con precisión exacta; los días
/// con un decimal; meses y años redondeados hacia abajo.
fn magnitude(abs_seconds: i64) -> String {
    if abs_seconds < 60 {
        return plural(abs_seconds, "second");
    }
    let minutes = abs_seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    if hours < 30 * 24 {
        // Días redondeados a un decimal: "about 1.5 days"
        let tenths = ((hours as f64) * 10.0 / 24.0).round() as i64;
        if tenths % 10 == 0 {
            return format!("about {}", plural(tenths / 10, "day"));
        }
        return format!("about {}.{} days", tenths / 10, tenths % 10);
    }
    let months = (hours / 24) / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

/// Tiempo relativo entre `timestamp` y `now_ms` ("3 minutes ago", "in 2 hours").
/// Menos de 5 segundos en cualquier dirección es "just now".
/// Un timestamp vacío devuelve cadena vacía; uno no parseable se devuelve tal cual.
pub fn relative_time(timestamp: &str, now_ms: i64) -> String {
    if timestamp.is_empty() {
        return String::new();
    }
    let parsed = match parse_timestamp(timestamp) {
        Some(date) => date,
        None => return timestamp.to_string(),
    };

    let diff_seconds = (now_ms - parsed.timestamp_millis()).div_euclid(1000);
    let abs_seconds = diff_seconds.abs();
    if abs_seconds < 5 {
        return "just now".to_string();
    }

    let text = magnitude(abs_seconds);
    if diff_seconds > 0 {
        format!("{} ago", text)
    } else {
        format!("in {}", text)
    }
}

/// Tiempo relativo respecto al reloj del sistema, como valor puntual
pub fn time_ago(timestamp: &str) -> String {
    relative_time(timestamp, Utc::now().timestamp_millis())
}

/// Fecha absoluta formateada para mostrar en la UI.
/// En el navegador usa el locale del usuario; un timestamp no parseable
/// se devuelve tal cual.
pub fn format_date(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return String::new();
    }
    match parse_timestamp(timestamp) {
        Some(date) => locale_string(&date),
        None => timestamp.to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
fn locale_string(date: &DateTime<Utc>) -> String {
    let js_date =
        js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(date.timestamp_millis() as f64));
    String::from(js_date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

#[cfg(not(target_arch = "wasm32"))]
fn locale_string(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}
