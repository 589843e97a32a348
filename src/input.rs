//! Document-level keyboard routing.
//!
//! The lightbox navigates with arrow keys bound at the page level, not on a
//! focused element, so the engine models the page's key stream as a
//! [`KeyRouter`]: the embedding layer feeds every keydown into
//! [`KeyRouter::dispatch`], and components register listeners scoped to their
//! own lifetime.
//!
//! Listener lifetime is the whole point. [`KeyRouter::listen`] hands back a
//! [`KeyListener`] guard and the listener is gone exactly when the guard is
//! dropped — there is no way to forget the removal, and no way to remove a
//! different closure than the one added. The design assumes at most one
//! modal-scale consumer is registered at a time (the single selection store
//! gates that), but the router itself doesn't care.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// The keys the engine reacts to. Everything else arrives as [`Key::Other`]
/// and is deliberately left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
    Other,
}

/// One keydown, with a consumable default action — the analog of the host
/// platform's "prevent default" flag. Handlers that claim a key mark it so
/// the page underneath doesn't also scroll.
#[derive(Debug)]
pub struct KeyEvent {
    key: Key,
    default_prevented: Cell<bool>,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        KeyEvent {
            key,
            default_prevented: Cell::new(false),
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

struct Registration {
    id: u64,
    callback: Rc<dyn Fn(&KeyEvent)>,
}

/// Page-scoped key dispatcher. Always lives behind an `Rc`; it keeps a
/// `Weak` back-reference so listener guards can deregister without owning
/// the router.
pub struct KeyRouter {
    listeners: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
    self_ref: Weak<KeyRouter>,
}

impl KeyRouter {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak| KeyRouter {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            self_ref: weak.clone(),
        })
    }

    /// Register a listener for every dispatched key. Dropping the returned
    /// guard removes it.
    pub fn listen(&self, callback: impl Fn(&KeyEvent) + 'static) -> KeyListener {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Registration {
            id,
            callback: Rc::new(callback),
        });
        KeyListener {
            router: self.self_ref.clone(),
            id,
        }
    }

    /// Deliver one key event to every registered listener. The list is
    /// snapshotted first: a listener may register or unregister during
    /// delivery (closing the lightbox mid-keypress does exactly that).
    pub fn dispatch(&self, event: &KeyEvent) {
        let snapshot: Vec<Rc<dyn Fn(&KeyEvent)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|r| r.callback.clone())
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Key listener registration guard.
pub struct KeyListener {
    router: Weak<KeyRouter>,
    id: u64,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(router) = self.router.upgrade() {
            router.listeners.borrow_mut().retain(|r| r.id != self.id);
        }
    }
}
