//! Observable state stores.
//!
//! A [`Store`] is a single-threaded observable container: read it anywhere,
//! write it anywhere, and every subscriber hears about each write. It is the
//! one channel between the many grid tiles scattered across a page and the
//! single lightbox instance — no prop threading, no process global. One store
//! is constructed per page render and handed around by `Rc`, so tests build a
//! fresh one per case.
//!
//! Subscriptions are RAII: [`Store::subscribe`] returns a [`Subscription`]
//! guard and dropping it removes the listener. The notify path snapshots the
//! listener list before delivering, so a callback may subscribe, unsubscribe,
//! or write the store re-entrantly without tripping a `RefCell` borrow.
//!
//! [`SelectionState`] is the concrete state this crate ships: which photo, if
//! any, is open full-screen. Its default — nothing selected — is valid from
//! the moment of construction, so there is no "read before init" state to
//! guard against.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Which photo is currently shown full-screen. `None` means the lightbox is
/// closed; that is the initial state on every page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_photo_key: Option<String>,
}

/// The per-page selection store.
pub type SelectionStore = Store<SelectionState>;

struct Listener<T> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
}

/// A minimal observable store. Single-threaded by design — the whole engine
/// runs on one event loop, so interior mutability is `RefCell`, not a lock.
///
/// Always lives behind an `Rc`; the constructor keeps a `Weak` back-reference
/// so subscription guards can find their way home without owning the store.
pub struct Store<T> {
    state: RefCell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
    next_id: Cell<u64>,
    self_ref: Weak<Store<T>>,
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(initial: T) -> Rc<Self> {
        Rc::new_cyclic(|weak| Store {
            state: RefCell::new(initial),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            self_ref: weak.clone(),
        })
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Replace the state and notify subscribers.
    pub fn set(&self, value: T) {
        *self.state.borrow_mut() = value;
        self.notify();
    }

    /// Mutate the state in place and notify subscribers. This is the partial
    /// update path: callers touch only the fields they mean to change.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.state.borrow_mut());
        self.notify();
    }

    /// Register a change listener. The listener fires on every write, with
    /// the post-write state. Dropping the returned guard unregisters it.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription<T> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            callback: Rc::new(callback),
        });
        Subscription {
            store: self.self_ref.clone(),
            id,
        }
    }

    fn notify(&self) {
        // Snapshot before delivery: a listener may mutate the listener list
        // or the state itself. Each callback sees the state as of its own
        // delivery, so re-entrant writes settle on the last one.
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|l| l.callback.clone())
            .collect();
        for callback in snapshot {
            let current = self.get();
            callback(&current);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Store<SelectionState> {
    /// A fresh selection store with nothing selected.
    pub fn selection() -> Rc<Self> {
        Store::new(SelectionState::default())
    }

    /// The currently selected photo key, if any.
    pub fn selected(&self) -> Option<String> {
        self.state.borrow().selected_photo_key.clone()
    }

    /// Select a photo — the lightbox opens on it.
    pub fn select(&self, key: &str) {
        self.update(|s| s.selected_photo_key = Some(key.to_string()));
    }

    /// Clear the selection — every close path converges here.
    pub fn clear(&self) {
        self.update(|s| s.selected_photo_key = None);
    }
}

/// Listener registration guard. Dropping it removes the listener; if the
/// store itself is already gone, dropping is a no-op.
pub struct Subscription<T> {
    store: Weak<Store<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.listeners.borrow_mut().retain(|l| l.id != self.id);
        }
    }
}
