use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::cell::RefCell;

/// Fuente de hora actual inyectable en los services.
/// `SystemClock` para la app, `ManualClock` para tests.
pub trait Clock {
    /// Hora actual en UTC
    fn now(&self) -> DateTime<Utc>;

    /// Hora actual en milisegundos desde epoch
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Hora actual como string ISO 8601 (mismo formato que `Date.toISOString()`)
    fn now_iso(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Reloj del sistema
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reloj controlado manualmente (para tests y entornos sin reloj real)
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: RefCell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RefCell::new(start),
        }
    }

    /// Establecer la hora actual
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.borrow_mut() = now;
    }

    /// Avanzar la hora actual
    pub fn advance(&self, delta: Duration) {
        let next = *self.now.borrow() + delta;
        *self.now.borrow_mut() = next;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_avanza() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(clock.now_ms(), 1_709_294_400_000);

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now_ms(), 1_709_294_490_000);
    }

    #[test]
    fn now_iso_usa_formato_iso_con_milisegundos() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(clock.now_iso(), "2024-03-01T12:00:00.000Z");
    }
}
