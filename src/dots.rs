//! Navigation dots — the small-scale carousel sync analog.
//!
//! Inline card carousels (house comparisons, extra-cost cards) use the same
//! handle-synchronization pattern as the lightbox, minus the modal: a
//! [`DotStrip`] tracks the widget's current snap through one shared
//! `Select`/`ReInit` callback and exposes which position dot is active.
//! Activating a dot scrolls the widget there; the active dot then follows
//! from the widget's own `Select` event, not from the click — the widget is
//! the source of truth either way.
//!
//! The binding discipline is identical to the lightbox's: subscribe once per
//! handle instance, release the identical callback on detach or drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::carousel::{CarouselEvent, CarouselHandle, EventBinding};

/// Dot indicators for one inline carousel.
pub struct DotStrip {
    len: usize,
    current: Rc<Cell<usize>>,
    handle: RefCell<Option<Rc<dyn CarouselHandle>>>,
    bindings: RefCell<Vec<EventBinding>>,
}

impl DotStrip {
    /// A strip of `len` dots, none active beyond the widget's initial
    /// position (dot 0 until a handle arrives).
    pub fn new(len: usize) -> Self {
        DotStrip {
            len,
            current: Rc::new(Cell::new(0)),
            handle: RefCell::new(None),
            bindings: RefCell::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The active dot index.
    pub fn active(&self) -> usize {
        self.current.get()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current.get() == index
    }

    /// Accept the widget handle. Same contract as the lightbox: once per
    /// instance, replacement releases the old bindings first.
    pub fn attach(&self, handle: Rc<dyn CarouselHandle>) {
        {
            let existing = self.handle.borrow();
            if let Some(existing) = existing.as_ref()
                && Rc::ptr_eq(existing, &handle)
            {
                return;
            }
        }
        self.bindings.borrow_mut().clear();

        self.current.set(handle.selected_scroll_snap());

        let sync: Rc<dyn Fn()> = {
            let current = Rc::clone(&self.current);
            let handle = Rc::downgrade(&handle);
            Rc::new(move || {
                if let Some(handle) = handle.upgrade() {
                    current.set(handle.selected_scroll_snap());
                }
            })
        };
        let mut bindings = self.bindings.borrow_mut();
        bindings.push(EventBinding::bind(
            &handle,
            CarouselEvent::Select,
            sync.clone(),
        ));
        bindings.push(EventBinding::bind(&handle, CarouselEvent::ReInit, sync));
        drop(bindings);

        tracing::debug!(current = self.current.get(), "dot strip attached");
        *self.handle.borrow_mut() = Some(handle);
    }

    /// Release the handle and its listeners. Dropping the strip does the
    /// same implicitly.
    pub fn detach(&self) {
        self.bindings.borrow_mut().clear();
        *self.handle.borrow_mut() = None;
    }

    /// Dot activation: scroll the widget to `index`. The active dot updates
    /// via the widget's `Select` event, not here.
    pub fn select(&self, index: usize) {
        let handle = self.handle.borrow().clone();
        if let Some(handle) = handle {
            handle.scroll_to(index);
        }
    }
}
