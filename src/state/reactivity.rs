// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten el valor Y los subscribers: un `set` en cualquier
/// clone notifica a todos los observadores.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// `true` si ambos estados comparten el mismo valor subyacente
    /// (son clones uno del otro)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    fn notify(&self) {
        // Snapshot: un callback puede suscribirse durante la notificación
        let subscribers: Vec<Callback> = self.subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    /// Obtener una copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifica_a_los_subscribers() {
        let state = ReactiveState::new(0);
        let fired = Rc::new(Cell::new(0));

        let fired_clone = fired.clone();
        state.subscribe(move || fired_clone.set(fired_clone.get() + 1));

        state.set(1);
        state.set(2);

        assert_eq!(state.get(), 2);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn los_clones_comparten_valor_y_subscribers() {
        let state = ReactiveState::new(String::from("a"));
        let clone = state.clone();
        let fired = Rc::new(Cell::new(0));

        let fired_clone = fired.clone();
        state.subscribe(move || fired_clone.set(fired_clone.get() + 1));

        // Un set en el clone notifica a los subscribers del original
        clone.set(String::from("b"));

        assert_eq!(state.get(), "b");
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn update_modifica_en_el_lugar() {
        let state = ReactiveState::new(vec![1, 2]);
        state.update(|v| v.push(3));
        assert_eq!(state.get(), vec![1, 2, 3]);
        assert_eq!(state.with(|v| v.len()), 3);
    }

    #[test]
    fn ptr_eq_distingue_clones_de_estados_independientes() {
        let state = ReactiveState::new(0);
        let clone = state.clone();
        let otro = ReactiveState::new(0);

        assert!(state.ptr_eq(&clone));
        assert!(!state.ptr_eq(&otro));
    }
}
