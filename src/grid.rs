//! Grid tiles — the selectable thumbnails.
//!
//! A [`Tile`] is the interaction model of one image in the gallery grid. It
//! does two things: produce a [`TileView`] for the rendering layer, and write
//! the shared selection store when activated. Tiles never talk to the
//! lightbox directly — the store is the only channel, which is what lets any
//! number of tiles scattered across the page drive a single modal.
//!
//! Tiles are not native buttons in the host page, so the view model carries
//! the `role="button"` / `tabIndex=0` semantics that make them keyboard
//! reachable, and [`Tile::handle_key`] implements the activation keys itself
//! (`Enter` and `Space`, with the default suppressed so `Space` doesn't
//! scroll the page).
//!
//! An item without an image produces no view at all — no placeholder, no
//! error. Same silent-skip policy as grouping.

use std::rc::Rc;

use crate::content::GalleryItem;
use crate::input::{Key, KeyEvent};
use crate::store::SelectionStore;

/// ARIA role carried by every tile view.
pub const TILE_ROLE: &str = "button";
/// Tab index making tiles keyboard-reachable.
pub const TILE_TAB_INDEX: i32 = 0;

/// Everything the rendering layer needs to draw one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub role: &'static str,
    pub tab_index: i32,
    pub src: String,
    pub alt: String,
    pub placeholder: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Content-editing deep link for the CMS overlay.
    pub edit_path: String,
}

/// One selectable grid thumbnail.
pub struct Tile {
    item: GalleryItem,
    category_key: String,
    store: Rc<SelectionStore>,
}

impl Tile {
    pub fn new(item: GalleryItem, category_key: &str, store: Rc<SelectionStore>) -> Self {
        Tile {
            item,
            category_key: category_key.to_string(),
            store,
        }
    }

    pub fn key(&self) -> &str {
        &self.item.key
    }

    /// The view model, or `None` when the item has no image.
    pub fn view(&self) -> Option<TileView> {
        let image = self.item.image.as_ref()?;
        Some(TileView {
            role: TILE_ROLE,
            tab_index: TILE_TAB_INDEX,
            src: image.src.clone(),
            alt: image.alt.clone().unwrap_or_default(),
            placeholder: image.placeholder.clone(),
            width: image.width,
            height: image.height,
            edit_path: edit_path(&self.category_key, &self.item.key),
        })
    }

    /// Pointer activation: select this tile's photo.
    pub fn activate(&self) {
        self.store.select(&self.item.key);
    }

    /// Keyboard activation: `Enter` or `Space` activates and consumes the
    /// default action; every other key passes through untouched.
    pub fn handle_key(&self, event: &KeyEvent) {
        match event.key() {
            Key::Enter | Key::Space => {
                event.prevent_default();
                self.activate();
            }
            _ => {}
        }
    }
}

/// Content-editing path for one image within its category block, in the
/// CMS's array-key addressing syntax.
pub fn edit_path(category_key: &str, item_key: &str) -> String {
    format!("gallery[_key==\"{category_key}\"].images[_key==\"{item_key}\"]")
}
