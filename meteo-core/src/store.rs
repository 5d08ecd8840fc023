//! Centralized state store with reducer pattern and change listeners

use crate::Action;
use std::marker::PhantomData;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Handle returned by [`Store::subscribe`], used to remove a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener<S> {
    id: ListenerId,
    callback: Box<dyn FnMut(&S)>,
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the state and provides a single point for state
/// mutations through [`dispatch`](Store::dispatch). Listeners registered with
/// [`subscribe`](Store::subscribe) are called after every dispatch that
/// changed the state, which is how views know to recompute markers and chart
/// series.
///
/// # Example
/// ```
/// use meteo_core::selection::{reducer, SelectionAction, SelectionState};
/// use meteo_core::{Store, WeatherMode};
///
/// let mut store = Store::new(SelectionState::default(), reducer);
/// store.dispatch(SelectionAction::ModeSelect(WeatherMode::Vent));
/// assert_eq!(store.state().active_mode, WeatherMode::Vent);
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    listeners: Vec<Listener<S>>,
    next_listener: u64,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            listeners: Vec::new(),
            next_listener: 0,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// The reducer will be called with the current state and action.
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        let changed = (self.reducer)(&mut self.state, action);
        if changed {
            self.notify();
        }
        changed
    }

    /// Register a listener called with the new state after each change
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            callback: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            (listener.callback)(&self.state);
        }
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use this sparingly - prefer dispatching actions for state changes.
    /// Listeners are not notified of changes made through this reference.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

impl<S: std::fmt::Debug, A: Action> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and allows middleware to intercept actions
/// before and after they are processed by the reducer.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Register a change listener on the wrapped store
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> ListenerId {
        self.store.subscribe(listener)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, persistence, or other
/// cross-cutting concerns to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                category = action.category().unwrap_or("uncategorized"),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::WeatherMode;
    use crate::selection::{reducer, SelectionAction, SelectionState};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(SelectionState::default(), reducer);

        assert!(store.dispatch(SelectionAction::ModeSelect(WeatherMode::Humi)));
        assert_eq!(store.state().active_mode, WeatherMode::Humi);

        assert!(store.dispatch(SelectionAction::TooltipsToggle));
        assert!(!store.state().tooltips_enabled);
    }

    #[test]
    fn test_store_unchanged_dispatch() {
        let mut store = Store::new(SelectionState::default(), reducer);

        // prev is already active
        assert!(!store.dispatch(SelectionAction::ModeSelect(WeatherMode::Prev)));
        assert_eq!(store.state().active_mode, WeatherMode::Prev);
    }

    #[test]
    fn test_listeners_called_on_change_only() {
        let mut store = Store::new(SelectionState::default(), reducer);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |state: &SelectionState| sink.borrow_mut().push(state.active_mode));

        store.dispatch(SelectionAction::ModeSelect(WeatherMode::Vent));
        store.dispatch(SelectionAction::ModeSelect(WeatherMode::Vent));
        store.dispatch(SelectionAction::ModeSelect(WeatherMode::Psea));

        assert_eq!(*seen.borrow(), vec![WeatherMode::Vent, WeatherMode::Psea]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = Store::new(SelectionState::default(), reducer);
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_: &SelectionState| *sink.borrow_mut() += 1);

        store.dispatch(SelectionAction::TooltipsToggle);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(SelectionAction::TooltipsToggle);

        assert_eq!(*count.borrow(), 1);
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = StoreWithMiddleware::new(
            SelectionState::default(),
            reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(SelectionAction::ModeSelect(WeatherMode::Ress));
        store.dispatch(SelectionAction::ModeSelect(WeatherMode::Ress));

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().changed_count, 1);
        assert_eq!(store.state().active_mode, WeatherMode::Ress);
    }

    #[test]
    fn test_logging_middleware_logs_once_per_dispatch() {
        let logging = LoggingMiddleware::new();
        assert!(!logging.log_before);
        assert!(logging.log_after);

        let verbose = LoggingMiddleware::verbose();
        assert!(verbose.log_before && verbose.log_after);
    }
}
