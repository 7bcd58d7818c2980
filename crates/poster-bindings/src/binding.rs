//! Binding to a single event kind
//!
//! A binding starts from the controller's current value and follows every
//! change event after that. Renderers either poll `take_changed` once per
//! frame or attach an `on_change` trigger.

use parking_lot::Mutex;
use std::sync::Arc;

use poster_session::{PosterEvent, SessionAreaController, Subscription};

type ChangeHook = Arc<dyn Fn() + Send + Sync>;

struct BindingState<T> {
    value: T,
    /// Bumped on every delivered change
    revision: u64,
    /// Revision last acknowledged through `take_changed`
    seen: u64,
    on_change: Option<ChangeHook>,
}

pub struct Binding<T> {
    state: Arc<Mutex<BindingState<T>>>,
    _subscription: Subscription,
}

impl<T> Binding<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Follow event `E` on `controller`, starting from `initial`
    pub fn new<E>(controller: &SessionAreaController, initial: T) -> Self
    where
        E: PosterEvent<Payload = T>,
    {
        let state = Arc::new(Mutex::new(BindingState {
            value: initial,
            revision: 0,
            seen: 0,
            on_change: None,
        }));

        let target = Arc::clone(&state);
        let subscription = controller.subscribe::<E, _>(move |value: &T| {
            let hook = {
                let mut state = target.lock();
                state.value = value.clone();
                state.revision += 1;
                state.on_change.clone()
            };
            // Run outside the lock so the hook can read the binding
            if let Some(hook) = hook {
                hook();
            }
        });

        tracing::trace!(
            area_id = %controller.id(),
            event = %E::KIND,
            "Bound renderer to session area"
        );

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Latest value
    pub fn get(&self) -> T {
        self.state.lock().value.clone()
    }

    /// Read the latest value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().value)
    }

    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    /// True if a change arrived since the last call
    pub fn take_changed(&mut self) -> bool {
        let mut state = self.state.lock();
        let changed = state.revision != state.seen;
        state.seen = state.revision;
        changed
    }

    /// Install the trigger run after each change, replacing any previous one
    pub fn on_change<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.state.lock().on_change = Some(Arc::new(hook));
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Binding")
            .field("value", &state.value)
            .field("revision", &state.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_session::{EventKind, SessionAreaRecord, StarChange, TitleChange};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller() -> SessionAreaController {
        SessionAreaController::new(SessionAreaRecord::new("a1").with_title("T").with_stars(1))
            .unwrap()
    }

    #[test]
    fn test_binding_follows_changes() {
        let mut controller = controller();
        let mut stars = Binding::new::<StarChange>(&controller, controller.stars());

        assert_eq!(stars.get(), 1);
        assert!(!stars.take_changed());

        controller.set_stars(4).unwrap();
        controller.set_stars(6).unwrap();

        assert_eq!(stars.get(), 6);
        assert_eq!(stars.revision(), 2);
        assert!(stars.take_changed());
        assert!(!stars.take_changed());
    }

    #[test]
    fn test_binding_ignores_no_op_sets() {
        let mut controller = controller();
        let mut title = Binding::new::<TitleChange>(&controller, Some("T".to_string()));

        controller.set_title(Some("T".to_string()));

        assert!(!title.take_changed());
        assert_eq!(title.with(|t| t.as_deref().map(str::len)), Some(1));
    }

    #[test]
    fn test_on_change_hook() {
        let mut controller = controller();
        let stars = Binding::new::<StarChange>(&controller, controller.stars());
        let renders = Arc::new(AtomicUsize::new(0));
        {
            let renders = Arc::clone(&renders);
            stars.on_change(move || {
                renders.fetch_add(1, Ordering::SeqCst);
            });
        }

        controller.set_stars(2).unwrap();
        controller.set_stars(2).unwrap();
        controller.set_stars(3).unwrap();

        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let controller = controller();
        let binding = Binding::new::<StarChange>(&controller, controller.stars());
        assert_eq!(controller.listener_count(EventKind::StarChange), 1);

        drop(binding);
        assert_eq!(controller.listener_count(EventKind::StarChange), 0);
    }
}
