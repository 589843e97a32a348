//! The lightbox — full-screen modal with a synchronized carousel.
//!
//! This is the consumer side of the whole crate: grid tiles write the
//! selection store, and the single [`Lightbox`] instance observes it. The
//! controller is a two-state machine:
//!
//! ```text
//!             store: Some(key)                    store: None
//! Closed ────────────────────────▶ Open ────────────────────────▶ Closed
//!   no key listener                 key listener attached          all
//!   no carousel bindings            carousel bindings (once        bindings
//!                                   the widget hands over          dropped
//!                                   its handle)
//! ```
//!
//! On open, the start slide is computed **once** from the flattened slide
//! list — a key change while already open does not recompute it; from then
//! on the carousel's own `Select` events are the only source of truth for
//! the current index. The widget's handle arrives on a later tick than the
//! open transition, so binding is gated on [`Lightbox::attach`]: seed the
//! local index from `selected_scroll_snap()` (the initial position may never
//! fire a `Select`), then subscribe one shared callback to both `Select` and
//! `ReInit`.
//!
//! Teardown is the part that has to be boring: the key listener and every
//! carousel binding live inside the open state and are dropped together when
//! it goes — on close, on drop, with or without a handle ever having
//! arrived. All close paths (button, Escape via the dialog primitive,
//! backdrop, swipe) converge on clearing the store; none of them tears down
//! directly.
//!
//! Nothing in here errors toward the user. An unknown selected key opens on
//! the first slide (the `image_index` fallback), an out-of-range index just
//! means no caption.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::carousel::{CarouselEvent, CarouselHandle, CarouselOptions, EventBinding};
use crate::config::GalleryConfig;
use crate::content::{GalleryItem, resolve_caption};
use crate::grouping::image_index;
use crate::input::{Key, KeyEvent, KeyListener, KeyRouter};
use crate::store::{SelectionState, SelectionStore, Subscription};

/// Everything that exists only while the modal is open. Dropping this value
/// *is* the teardown: carousel bindings unsubscribe, the key listener
/// detaches.
struct OpenState {
    start_index: usize,
    /// Locally tracked current slide, updated by the carousel's own events.
    current: Rc<Cell<usize>>,
    handle: Option<Rc<dyn CarouselHandle>>,
    bindings: Vec<EventBinding>,
    swipe_origin: Cell<Option<f32>>,
    _keys: KeyListener,
}

/// The lightbox controller. One per page, alongside one selection store.
pub struct Lightbox {
    store: Rc<SelectionStore>,
    keyboard: Rc<KeyRouter>,
    /// Flattened, category-major slide list (see [`crate::grouping::flatten`]),
    /// optionally with a featured item prepended. Immutable per render.
    slides: Vec<GalleryItem>,
    config: GalleryConfig,
    open: RefCell<Option<OpenState>>,
    /// Back-reference for closures that must not keep the controller alive.
    self_ref: Weak<Lightbox>,
    _selection: Subscription<SelectionState>,
}

impl Lightbox {
    /// Build a lightbox over a flattened slide list and wire it to the
    /// store. If a photo is already selected at construction time the
    /// lightbox opens immediately.
    pub fn new(
        slides: Vec<GalleryItem>,
        config: GalleryConfig,
        store: Rc<SelectionStore>,
        keyboard: Rc<KeyRouter>,
    ) -> Rc<Self> {
        let lightbox = Rc::new_cyclic(|weak: &Weak<Lightbox>| {
            let observer = weak.clone();
            let selection = store.subscribe(move |state: &SelectionState| {
                if let Some(lightbox) = observer.upgrade() {
                    lightbox.selection_changed(state.selected_photo_key.as_deref());
                }
            });
            Lightbox {
                store: store.clone(),
                keyboard,
                slides,
                config,
                open: RefCell::new(None),
                self_ref: weak.clone(),
                _selection: selection,
            }
        });

        let initial = lightbox.store.selected();
        lightbox.selection_changed(initial.as_deref());
        lightbox
    }

    pub fn is_open(&self) -> bool {
        self.open.borrow().is_some()
    }

    /// The start slide computed at the open transition, while open.
    pub fn start_index(&self) -> Option<usize> {
        self.open.borrow().as_ref().map(|o| o.start_index)
    }

    /// The locally tracked current slide, while open.
    pub fn current_index(&self) -> Option<usize> {
        self.open.borrow().as_ref().map(|o| o.current.get())
    }

    /// What the embedding layer passes to the carousel widget constructor,
    /// while open.
    pub fn carousel_options(&self) -> Option<CarouselOptions> {
        self.open.borrow().as_ref().map(|o| CarouselOptions {
            looping: self.config.carousel.loop_slides,
            start_index: o.start_index,
        })
    }

    /// Caption for the current slide: alt text, else the category label in
    /// the configured locale. `None` when closed, when the index is out of
    /// range, or when no source has text.
    pub fn caption(&self) -> Option<String> {
        let index = self.open.borrow().as_ref()?.current.get();
        let item = self.slides.get(index)?;
        let alt = item.image.as_ref().and_then(|i| i.alt.as_deref());
        let label = item
            .category
            .as_ref()
            .and_then(|c| c.label.resolve(&self.config.locale));
        resolve_caption(&[alt, label])
    }

    /// Accept the carousel handle once the widget has mounted.
    ///
    /// Runs the bind step exactly once per handle instance: re-attaching the
    /// same handle is a no-op, a replacement handle drops the old bindings
    /// first. Called while closed (a widget outliving its modal), it does
    /// nothing.
    pub fn attach(&self, handle: Rc<dyn CarouselHandle>) {
        let mut open = self.open.borrow_mut();
        let Some(state) = open.as_mut() else {
            return;
        };
        if let Some(existing) = &state.handle {
            if Rc::ptr_eq(existing, &handle) {
                return;
            }
            // Replacement handle: release the old widget's listeners before
            // touching the new one.
            state.bindings.clear();
        }

        // The widget may already sit on the start slide, in which case no
        // Select will ever fire for it — read the position once directly.
        state.current.set(handle.selected_scroll_snap());

        // One callback, shared by both events, kept alive by the bindings so
        // the off call releases the identical Rc that on received.
        let sync: Rc<dyn Fn()> = {
            let current = Rc::clone(&state.current);
            let handle = Rc::downgrade(&handle);
            Rc::new(move || {
                if let Some(handle) = handle.upgrade() {
                    current.set(handle.selected_scroll_snap());
                }
            })
        };
        state
            .bindings
            .push(EventBinding::bind(&handle, CarouselEvent::Select, sync.clone()));
        state
            .bindings
            .push(EventBinding::bind(&handle, CarouselEvent::ReInit, sync));

        tracing::debug!(current = state.current.get(), "carousel handle attached");
        state.handle = Some(handle);
    }

    /// Close the modal. Every close trigger — button, Escape from the dialog
    /// primitive, backdrop click, swipe — lands here, and this only clears
    /// the store; the actual teardown happens in the store notification.
    pub fn close(&self) {
        self.store.clear();
    }

    /// Begin a horizontal swipe at `x` (touch devices).
    pub fn swipe_start(&self, x: f32) {
        if let Some(state) = self.open.borrow().as_ref() {
            state.swipe_origin.set(Some(x));
        }
    }

    /// End a swipe at `x`. Travel past the configured threshold closes the
    /// modal; anything less is left to the carousel's own drag handling.
    pub fn swipe_end(&self, x: f32) {
        let past_threshold = {
            let open = self.open.borrow();
            let Some(state) = open.as_ref() else {
                return;
            };
            let Some(origin) = state.swipe_origin.take() else {
                return;
            };
            (x - origin).abs() >= self.config.gestures.swipe_close_threshold
        };
        if past_threshold {
            self.close();
        }
    }

    fn selection_changed(&self, selected: Option<&str>) {
        let is_open = self.is_open();
        match (is_open, selected) {
            (false, Some(key)) => self.open_at(key),
            (true, None) => self.teardown(),
            // Key changes while open don't reset the carousel, and clearing
            // an already-clear selection is nothing.
            _ => {}
        }
    }

    fn open_at(&self, key: &str) {
        let start_index = image_index(&self.slides, key);
        tracing::debug!(key, start_index, "lightbox open");

        let keys = {
            let weak = self.self_ref.clone();
            self.keyboard.listen(move |event| {
                if let Some(lightbox) = weak.upgrade() {
                    lightbox.handle_key(event);
                }
            })
        };

        *self.open.borrow_mut() = Some(OpenState {
            start_index,
            current: Rc::new(Cell::new(start_index)),
            handle: None,
            bindings: Vec::new(),
            swipe_origin: Cell::new(None),
            _keys: keys,
        });
    }

    fn teardown(&self) {
        let open = self.open.borrow_mut().take();
        if open.is_some() {
            tracing::debug!("lightbox close");
        }
        // Dropped outside the borrow: unbinding calls back into foreign
        // widget code.
        drop(open);
    }

    /// Arrow keys drive the carousel while open. The handle is cloned out of
    /// the state before the call — scrolling synchronously re-enters us via
    /// the Select callback.
    fn handle_key(&self, event: &KeyEvent) {
        let handle = {
            let open = self.open.borrow();
            match open.as_ref() {
                Some(state) => state.handle.clone(),
                None => return,
            }
        };
        match event.key() {
            Key::ArrowLeft => {
                event.prevent_default();
                if let Some(handle) = handle {
                    handle.scroll_prev();
                }
            }
            Key::ArrowRight => {
                event.prevent_default();
                if let Some(handle) = handle {
                    handle.scroll_next();
                }
            }
            _ => {}
        }
    }
}
