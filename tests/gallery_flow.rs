//! End-to-end flow through the public API: decode a CMS payload, derive the
//! grid and slide order, activate a tile, and drive the lightbox through a
//! full open → navigate → close cycle against a scripted carousel widget.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gallery_lightbox::carousel::{CarouselEvent, CarouselHandle};
use gallery_lightbox::config::GalleryConfig;
use gallery_lightbox::content::decode_gallery;
use gallery_lightbox::grid::Tile;
use gallery_lightbox::grouping::{flatten, group_by_category};
use gallery_lightbox::input::{Key, KeyEvent, KeyRouter};
use gallery_lightbox::lightbox::Lightbox;
use gallery_lightbox::store::SelectionStore;

const PAYLOAD: &str = r#"{
    "categories": [
        {"_id": "cat-bedroom", "key": "bedroom", "label": {"en": "Bedroom"}, "order": 1},
        {"_id": "cat-kitchen", "key": "kitchen", "label": {"en": "Kitchen"}, "order": 2}
    ],
    "items": [
        {"_key": "k1", "image": {"src": "https://cdn.example/k1.jpg", "alt": "Kitchen window", "width": 1600, "height": 1067}, "category": {"_ref": "cat-kitchen"}},
        {"_key": "b1", "image": {"src": "https://cdn.example/b1.jpg", "alt": "Bed at dawn", "width": 1600, "height": 1067}, "category": {"_ref": "cat-bedroom"}},
        {"_key": "b2", "image": {"src": "https://cdn.example/b2.jpg", "alt": "Reading nook", "width": 1600, "height": 1067}, "category": {"_ref": "cat-bedroom"}},
        {"_key": "unplaced", "image": {"src": "https://cdn.example/u.jpg", "width": 800, "height": 600}}
    ]
}"#;

/// A minimal widget double: tracks a snap position, emits `Select` when it
/// moves, and hands out its listener count so the test can check release.
struct ScriptedCarousel {
    len: usize,
    selected: Cell<usize>,
    listeners: RefCell<Vec<(CarouselEvent, Rc<dyn Fn()>)>>,
}

impl ScriptedCarousel {
    fn new(len: usize, start: usize) -> Rc<Self> {
        Rc::new(ScriptedCarousel {
            len,
            selected: Cell::new(start),
            listeners: RefCell::new(Vec::new()),
        })
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
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

    fn settle(&self, index: usize) {
        self.selected.set(index.min(self.len.saturating_sub(1)));
        self.emit(CarouselEvent::Select);
    }
}

impl CarouselHandle for ScriptedCarousel {
    fn selected_scroll_snap(&self) -> usize {
        self.selected.get()
    }

    fn scroll_to(&self, index: usize) {
        self.settle(index);
    }

    fn scroll_prev(&self) {
        self.settle(self.selected.get().saturating_sub(1));
    }

    fn scroll_next(&self) {
        self.settle(self.selected.get() + 1);
    }

    fn on(&self, event: CarouselEvent, callback: Rc<dyn Fn()>) {
        self.listeners.borrow_mut().push((event, callback));
    }

    fn off(&self, event: CarouselEvent, callback: &Rc<dyn Fn()>) {
        self.listeners
            .borrow_mut()
            .retain(|(e, cb)| !(*e == event && Rc::ptr_eq(cb, callback)));
    }
}

#[test]
fn full_gallery_cycle() {
    // Decode and derive. The uncategorized item stays out of the groups.
    let payload = decode_gallery(PAYLOAD).unwrap();
    let groups = group_by_category(&payload.items);

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["bedroom", "kitchen"]);
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[1].count, 1);

    let slides = flatten(&groups);
    let order: Vec<&str> = slides.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(order, vec!["b1", "b2", "k1"]);

    // Wire the page: one store, one key router, one lightbox, many tiles.
    let store = SelectionStore::selection();
    let keyboard = KeyRouter::new();
    let lightbox = Lightbox::new(
        slides,
        GalleryConfig::default(),
        store.clone(),
        keyboard.clone(),
    );

    let tile = Tile::new(groups[1].items[0].clone(), "kitchen", store.clone());
    assert!(tile.view().is_some());

    // Activate the kitchen tile: the lightbox opens on slide 2.
    tile.activate();
    assert!(lightbox.is_open());
    let options = lightbox.carousel_options().unwrap();
    assert_eq!(options.start_index, 2);

    // The widget mounts at the requested start and hands over its handle.
    let widget = ScriptedCarousel::new(3, options.start_index);
    lightbox.attach(widget.clone());
    assert_eq!(lightbox.current_index(), Some(2));
    assert_eq!(lightbox.caption().as_deref(), Some("Kitchen window"));
    assert_eq!(widget.listener_count(), 2);

    // Navigate left twice by keyboard; the caption follows the widget.
    keyboard.dispatch(&KeyEvent::new(Key::ArrowLeft));
    keyboard.dispatch(&KeyEvent::new(Key::ArrowLeft));
    assert_eq!(lightbox.current_index(), Some(0));
    assert_eq!(lightbox.caption().as_deref(), Some("Bed at dawn"));

    // Close: selection clears, listeners release, keys go quiet.
    lightbox.close();
    assert!(!lightbox.is_open());
    assert_eq!(store.selected(), None);
    assert_eq!(widget.listener_count(), 0);
    assert_eq!(keyboard.listener_count(), 0);

    keyboard.dispatch(&KeyEvent::new(Key::ArrowRight));
    assert_eq!(widget.selected_scroll_snap(), 0);
}

#[test]
fn swipe_close_cycle() {
    let payload = decode_gallery(PAYLOAD).unwrap();
    let slides = gallery_lightbox::grouping::flatten_items(&payload.items);

    let store = SelectionStore::selection();
    let keyboard = KeyRouter::new();
    let lightbox = Lightbox::new(
        slides,
        GalleryConfig::default(),
        store.clone(),
        keyboard.clone(),
    );

    store.select("b2");
    assert!(lightbox.is_open());

    // A drag well past the default 80px threshold.
    lightbox.swipe_start(320.0);
    lightbox.swipe_end(150.0);
    assert!(!lightbox.is_open());
    assert_eq!(store.selected(), None);
}
