use crate::state::ReactiveState;
use crate::utils::clock::Clock;
use crate::utils::time::{format_date, relative_time};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Interval;

/// Período de refresco de los textos de tiempo relativo
const TICK_INTERVAL_MS: u32 = 60_000;

/// Texto de tiempo relativo de un timestamp, actualizado en cada tick
/// del servicio que lo creó.
#[derive(Clone)]
pub struct TrackedTime {
    timestamp: String,
    text: ReactiveState<String>,
}

impl TrackedTime {
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn get(&self) -> String {
        self.text.get()
    }

    /// Registra un callback que recibe el texto cada vez que cambia
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&str) + 'static,
    {
        let text = self.text.clone();
        self.text.subscribe(move || callback(&text.get()));
    }
}

/// Servicio de tiempo relativo. Mantiene un "ahora" cacheado que el
/// ticker refresca cada minuto y recalcula los textos trackeados.
#[derive(Clone)]
pub struct TimeAgoService {
    clock: Rc<dyn Clock>,
    now_ms: ReactiveState<i64>,
    tracked: Rc<RefCell<Vec<TrackedTime>>>,
    running: Rc<Cell<bool>>,
    #[cfg(target_arch = "wasm32")]
    interval: Rc<RefCell<Option<Interval>>>,
}

impl TimeAgoService {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        let now_ms = clock.now_ms();
        Self {
            clock,
            now_ms: ReactiveState::new(now_ms),
            tracked: Rc::new(RefCell::new(Vec::new())),
            running: Rc::new(Cell::new(false)),
            #[cfg(target_arch = "wasm32")]
            interval: Rc::new(RefCell::new(None)),
        }
    }

    /// Servicio sobre el reloj del sistema
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::clock::SystemClock;
        Self::new(Rc::new(SystemClock))
    }

    /// Tiempo relativo contra el "ahora" cacheado. Entre tick y tick
    /// el texto es estable aunque el reloj real avance.
    pub fn time_ago(&self, timestamp: &str) -> String {
        relative_time(timestamp, self.now_ms.get())
    }

    /// Fecha absoluta formateada para mostrar en la UI
    pub fn format_date(&self, timestamp: &str) -> String {
        format_date(timestamp)
    }

    /// Empieza a seguir un timestamp y devuelve su texto reactivo
    pub fn track(&self, timestamp: &str) -> TrackedTime {
        let tracked = TrackedTime {
            timestamp: timestamp.to_string(),
            text: ReactiveState::new(relative_time(timestamp, self.now_ms.get())),
        };
        self.tracked.borrow_mut().push(tracked.clone());
        tracked
    }

    /// Deja de seguir un valor trackeado: su texto queda congelado y
    /// los ticks siguientes ya no lo recalculan
    pub fn untrack(&self, tracked: &TrackedTime) {
        self.tracked
            .borrow_mut()
            .retain(|entry| !entry.text.ptr_eq(&tracked.text));
    }

    /// Refresca el "ahora" y recalcula todos los textos trackeados.
    /// Solo notifica los que realmente cambiaron.
    pub fn tick(&self) {
        let now = self.clock.now_ms();
        self.now_ms.set(now);

        // Snapshot: un subscriber puede llamar a track() sin romper el borrow
        let entries: Vec<TrackedTime> = self.tracked.borrow().iter().cloned().collect();
        for entry in entries {
            let text = relative_time(&entry.timestamp, now);
            if entry.text.get() != text {
                entry.text.set(text);
            }
        }
    }

    /// Arranca el ticker periódico. Llamarlo con el ticker ya en marcha
    /// no hace nada.
    pub fn start(&self) {
        if self.running.replace(true) {
            log::warn!("⚠️ El ticker de tiempo relativo ya estaba en marcha");
            return;
        }
        log::info!("⏱️ Ticker de tiempo relativo iniciado ({} ms)", TICK_INTERVAL_MS);

        #[cfg(target_arch = "wasm32")]
        {
            let service = self.clone();
            let interval = Interval::new(TICK_INTERVAL_MS, move || service.tick());
            *self.interval.borrow_mut() = Some(interval);
        }
    }

    /// Detiene el ticker. El estado trackeado se conserva y el ticker
    /// puede volver a arrancarse.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        {
            // Soltar el Interval cancela el timer
            *self.interval.borrow_mut() = None;
        }
        log::info!("⏹️ Ticker de tiempo relativo detenido");
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::ManualClock;
    use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn timestamp_hace(seconds: i64) -> String {
        (base() - Duration::seconds(seconds)).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn setup() -> (TimeAgoService, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(base()));
        let service = TimeAgoService::new(clock.clone());
        (service, clock)
    }

    #[test]
    fn track_entrega_el_texto_inicial() {
        let (service, _) = setup();
        let tracked = service.track(&timestamp_hace(90));
        assert_eq!(tracked.get(), "1 minute ago");
        assert_eq!(tracked.timestamp(), timestamp_hace(90));
    }

    #[test]
    fn tick_actualiza_los_textos_trackeados() {
        let (service, clock) = setup();
        let tracked = service.track(&timestamp_hace(30));
        assert_eq!(tracked.get(), "30 seconds ago");

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            tracked.subscribe(move |text| seen.borrow_mut().push(text.to_string()));
        }

        clock.advance(Duration::seconds(90));
        service.tick();

        assert_eq!(tracked.get(), "2 minutes ago");
        assert_eq!(*seen.borrow(), vec!["2 minutes ago".to_string()]);
    }

    #[test]
    fn tick_no_notifica_si_el_texto_no_cambio() {
        let (service, clock) = setup();
        let tracked = service.track(&timestamp_hace(2 * 3600));
        assert_eq!(tracked.get(), "2 hours ago");

        let notified = Rc::new(Cell::new(0));
        {
            let notified = notified.clone();
            tracked.subscribe(move |_| notified.set(notified.get() + 1));
        }

        clock.advance(Duration::seconds(10));
        service.tick();

        assert_eq!(tracked.get(), "2 hours ago");
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn time_ago_usa_el_ahora_cacheado_hasta_el_siguiente_tick() {
        let (service, clock) = setup();
        let timestamp = timestamp_hace(60);
        assert_eq!(service.time_ago(&timestamp), "1 minute ago");

        // El reloj avanza pero sin tick el texto no se mueve
        clock.advance(Duration::seconds(60));
        assert_eq!(service.time_ago(&timestamp), "1 minute ago");

        service.tick();
        assert_eq!(service.time_ago(&timestamp), "2 minutes ago");
    }

    #[test]
    fn start_y_stop_son_idempotentes() {
        let (service, _) = setup();
        assert!(!service.is_running());

        service.start();
        assert!(service.is_running());
        service.start();
        assert!(service.is_running());

        service.stop();
        assert!(!service.is_running());
        service.stop();
        assert!(!service.is_running());

        // Puede volver a arrancar después de un stop
        service.start();
        assert!(service.is_running());
    }

    #[test]
    fn untrack_congela_el_texto_y_lo_saca_del_tick() {
        let (service, clock) = setup();
        let frozen = service.track(&timestamp_hace(30));
        let live = service.track(&timestamp_hace(30));

        service.untrack(&frozen);
        clock.advance(Duration::seconds(90));
        service.tick();

        assert_eq!(frozen.get(), "30 seconds ago");
        assert_eq!(live.get(), "2 minutes ago");
    }

    #[test]
    fn el_timestamp_vacio_queda_siempre_vacio() {
        let (service, clock) = setup();
        let tracked = service.track("");
        assert_eq!(tracked.get(), "");

        clock.advance(Duration::minutes(5));
        service.tick();
        assert_eq!(tracked.get(), "");
        assert_eq!(service.format_date(""), "");
    }
}
