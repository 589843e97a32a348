//! The carousel widget boundary.
//!
//! The carousel itself is someone else's widget. Once mounted it hands back
//! an imperative handle, and this crate consumes exactly six capabilities on
//! it: read the selected snap, scroll three ways, and an `on`/`off` pair for
//! change notifications. [`CarouselHandle`] is that surface as a trait — the
//! engine treats it as an opaque capability and never reaches past it.
//!
//! ## Subscription symmetry
//!
//! `off` must be called with the *same* callback that was passed to `on`
//! (matched by `Rc` pointer identity, the widget's analog of JS reference
//! equality) or the widget keeps a dangling listener across open/close
//! cycles — the primary bug class here. [`EventBinding`] makes the pairing
//! structural: it subscribes on construction, keeps the one `Rc` it
//! subscribed, and unsubscribes that exact `Rc` on drop. Holding a binding
//! *is* the subscription; there is no unpaired path.
//!
//! The binding holds the handle weakly. If the widget is torn down first the
//! unsubscribe is a no-op, and nothing keeps a dead widget alive.

use std::rc::{Rc, Weak};

/// Events the widget emits to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The visible slide changed — by drag, programmatic scroll, or initial
    /// mount.
    Select,
    /// The widget rebuilt its internal slide list (e.g. after data changed).
    ReInit,
}

/// What the embedding layer passes to the widget constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    pub looping: bool,
    pub start_index: usize,
}

/// The imperative control surface of a mounted carousel widget.
///
/// Methods take `&self`: the widget owns its own interior state, exactly like
/// a handle into a foreign UI toolkit.
pub trait CarouselHandle {
    /// Index of the currently selected snap position.
    fn selected_scroll_snap(&self) -> usize;
    fn scroll_to(&self, index: usize);
    fn scroll_prev(&self);
    fn scroll_next(&self);
    /// Subscribe `callback` to `event`. The widget may hold the callback for
    /// as long as it lives; it is released by [`CarouselHandle::off`] with
    /// the same `Rc`.
    fn on(&self, event: CarouselEvent, callback: Rc<dyn Fn()>);
    /// Unsubscribe a callback previously passed to `on`, matched by pointer
    /// identity. Unknown callbacks are ignored.
    fn off(&self, event: CarouselEvent, callback: &Rc<dyn Fn()>);
}

/// A scoped `on`/`off` pair on a carousel handle.
pub struct EventBinding {
    handle: Weak<dyn CarouselHandle>,
    event: CarouselEvent,
    callback: Rc<dyn Fn()>,
}

impl EventBinding {
    /// Subscribe `callback` to `event` on `handle`, releasing it on drop.
    pub fn bind(
        handle: &Rc<dyn CarouselHandle>,
        event: CarouselEvent,
        callback: Rc<dyn Fn()>,
    ) -> Self {
        handle.on(event, callback.clone());
        tracing::trace!(?event, "carousel listener bound");
        EventBinding {
            handle: Rc::downgrade(handle),
            event,
            callback,
        }
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.upgrade() {
            handle.off(self.event, &self.callback);
            tracing::trace!(event = ?self.event, "carousel listener released");
        }
    }
}
