//! Shared test utilities for the gallery-lightbox test suite.
//!
//! Provides fixture builders for content types and [`FakeCarousel`], a
//! recording double for the external carousel widget. The fake both *acts*
//! like a small carousel (tracks a selected snap, emits `Select` when it
//! moves) and *records* every capability call, so tests can assert the
//! subscribe/unsubscribe symmetry the real widget depends on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::carousel::{CarouselEvent, CarouselHandle};
use crate::content::{CategoryRef, GalleryItem, ImageAsset, LocalizedText};

// =========================================================================
// Content fixtures
// =========================================================================

/// An image asset with the given source URL and alt text.
pub fn asset(src: &str, alt: &str) -> ImageAsset {
    ImageAsset {
        src: src.to_string(),
        alt: Some(alt.to_string()),
        placeholder: None,
        width: 1600,
        height: 1067,
        hotspot: None,
    }
}

/// A category whose id derives from its key (`id-<key>`), labeled in the
/// default locale.
pub fn category(key: &str, order: u32) -> CategoryRef {
    CategoryRef {
        id: format!("id-{key}"),
        key: key.to_string(),
        label: LocalizedText::single("en", key),
        order: Some(order),
    }
}

/// A gallery item with a derived image (`https://cdn.example/<key>.jpg`,
/// alt `Photo <key>`).
pub fn item(key: &str, category: Option<CategoryRef>) -> GalleryItem {
    GalleryItem {
        key: key.to_string(),
        image: Some(asset(
            &format!("https://cdn.example/{key}.jpg"),
            &format!("Photo {key}"),
        )),
        category,
    }
}

/// A gallery item with a specific alt text.
pub fn item_with_alt(key: &str, alt: &str, category: Option<CategoryRef>) -> GalleryItem {
    GalleryItem {
        key: key.to_string(),
        image: Some(asset(&format!("https://cdn.example/{key}.jpg"), alt)),
        category,
    }
}

/// A gallery item with no image payload.
pub fn item_without_image(key: &str, category: Option<CategoryRef>) -> GalleryItem {
    GalleryItem {
        key: key.to_string(),
        image: None,
        category,
    }
}

// =========================================================================
// FakeCarousel
// =========================================================================

/// Identity of a subscribed callback — the `Rc` pointer, the same identity
/// the `off` contract matches on.
pub type CallbackId = *const ();

/// One recorded capability call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    On(CarouselEvent, CallbackId),
    Off(CarouselEvent, CallbackId),
    ScrollTo(usize),
    ScrollPrev,
    ScrollNext,
}

/// A scriptable, recording carousel double.
///
/// Behaves like a non-looping carousel over `len` slides: scrolling moves the
/// selected snap (clamped to bounds) and emits `Select` to subscribers when
/// it actually moved. [`FakeCarousel::re_init`] emits `ReInit` as a data
/// rebuild would.
pub struct FakeCarousel {
    len: usize,
    selected: Cell<usize>,
    listeners: RefCell<Vec<(CarouselEvent, Rc<dyn Fn()>)>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeCarousel {
    pub fn new(len: usize) -> Rc<Self> {
        Self::with_start(len, 0)
    }

    pub fn with_start(len: usize, start: usize) -> Rc<Self> {
        Rc::new(FakeCarousel {
            len,
            selected: Cell::new(start),
            listeners: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        })
    }

    /// The pointer identity of a callback, for matching against recorded
    /// [`Call::On`]/[`Call::Off`] entries.
    pub fn id_of(callback: &Rc<dyn Fn()>) -> CallbackId {
        Rc::as_ptr(callback) as *const ()
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Callback ids passed to `on` for `event`, in order.
    pub fn ons(&self, event: CarouselEvent) -> Vec<CallbackId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::On(e, id) if *e == event => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Callback ids passed to `off` for `event`, in order.
    pub fn offs(&self, event: CarouselEvent) -> Vec<CallbackId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Off(e, id) if *e == event => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Count of recorded scroll calls of each kind: `(prev, next, to)`.
    pub fn scroll_counts(&self) -> (usize, usize, usize) {
        let calls = self.calls.borrow();
        let prev = calls.iter().filter(|c| **c == Call::ScrollPrev).count();
        let next = calls.iter().filter(|c| **c == Call::ScrollNext).count();
        let to = calls
            .iter()
            .filter(|c| matches!(c, Call::ScrollTo(_)))
            .count();
        (prev, next, to)
    }

    /// Number of live subscriptions (after on/off pairing).
    pub fn live_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Simulate the widget rebuilding its slide list.
    pub fn re_init(&self) {
        self.emit(CarouselEvent::ReInit);
    }

    /// Simulate a user drag landing on `index`.
    pub fn drag_to(&self, index: usize) {
        if self.move_to(index) {
            self.emit(CarouselEvent::Select);
        }
    }

    fn move_to(&self, index: usize) -> bool {
        if self.len == 0 {
            return false;
        }
        let clamped = index.min(self.len - 1);
        let moved = clamped != self.selected.get();
        self.selected.set(clamped);
        moved
    }

    fn emit(&self, event: CarouselEvent) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in snapshot {
            callback();
        }
    }
}

impl CarouselHandle for FakeCarousel {
    fn selected_scroll_snap(&self) -> usize {
        self.selected.get()
    }

    fn scroll_to(&self, index: usize) {
        self.calls.borrow_mut().push(Call::ScrollTo(index));
        if self.move_to(index) {
            self.emit(CarouselEvent::Select);
        }
    }

    fn scroll_prev(&self) {
        self.calls.borrow_mut().push(Call::ScrollPrev);
        let current = self.selected.get();
        if current > 0 && self.move_to(current - 1) {
            self.emit(CarouselEvent::Select);
        }
    }

    fn scroll_next(&self) {
        self.calls.borrow_mut().push(Call::ScrollNext);
        let current = self.selected.get();
        if self.move_to(current + 1) {
            self.emit(CarouselEvent::Select);
        }
    }

    fn on(&self, event: CarouselEvent, callback: Rc<dyn Fn()>) {
        self.calls
            .borrow_mut()
            .push(Call::On(event, Self::id_of(&callback)));
        self.listeners.borrow_mut().push((event, callback));
    }

    fn off(&self, event: CarouselEvent, callback: &Rc<dyn Fn()>) {
        self.calls
            .borrow_mut()
            .push(Call::Off(event, Self::id_of(callback)));
        self.listeners
            .borrow_mut()
            .retain(|(e, cb)| !(*e == event && Rc::ptr_eq(cb, callback)));
    }
}
