//! Category grouping, flattening, and index lookup.
//!
//! Pure functions from a flat item list to the two derived shapes the UI
//! renders from:
//!
//! ```text
//! items ──group_by_category──▶ Vec<CategoryGroup>   (grid sections)
//!                  │
//!                  └─flatten──▶ Vec<GalleryItem>    (lightbox slide order)
//! ```
//!
//! Both are recomputed per call and never stored — the item list is the
//! single source of truth, same as the filesystem is for a scan pipeline.
//!
//! ## Ordering rules
//!
//! Grouping is *stable*: items keep their encounter order within a category,
//! and the category list sorts ascending by the declared `order` weight.
//! Categories without a weight sort after all weighted ones and keep their
//! encounter order among themselves (`order.unwrap_or(u32::MAX)` under a
//! stable sort). Flattening is category-major: every category's items in
//! sequence, in the sorted category order.
//!
//! ## The zero fallback
//!
//! [`image_index`] returns `0` for an unknown key or an empty list, not an
//! error and not a `-1`-style sentinel. The result feeds straight into the
//! carousel's start index with no further bounds check, so "first slide" is
//! the safe answer for every miss. Deep links to deleted photos open the
//! gallery at the beginning instead of crashing it.

use crate::content::{GalleryItem, ImageAsset, LocalizedText};

/// Reserved key for the featured-image wrapper. Content keys are CMS-minted
/// random strings, so this cannot collide with a real item.
pub const FEATURED_KEY: &str = "featured";

/// One category with its items and derived display attributes.
///
/// Derived per grouping call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub id: String,
    pub key: String,
    pub label: LocalizedText,
    pub order: Option<u32>,
    /// Number of items in this group.
    pub count: usize,
    /// First item's image — the section thumbnail. Nullable for symmetry
    /// with zero-item call sites even though grouping never produces an
    /// empty group.
    pub thumbnail: Option<ImageAsset>,
    pub items: Vec<GalleryItem>,
}

/// Group items by their category key.
///
/// - An empty input produces an empty output.
/// - Items without a category are skipped: not grouped, not counted.
/// - Items are merged by the category's `key` field, not by reference
///   identity — two resolved copies of the same category land in one group,
///   with the first occurrence supplying the group's metadata.
/// - Output order: ascending `order`, absent orders last, stable throughout.
pub fn group_by_category(items: &[GalleryItem]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for item in items {
        let Some(category) = &item.category else {
            continue;
        };
        match groups.iter_mut().find(|g| g.key == category.key) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                id: category.id.clone(),
                key: category.key.clone(),
                label: category.label.clone(),
                order: category.order,
                count: 0,
                thumbnail: None,
                items: vec![item.clone()],
            }),
        }
    }

    groups.sort_by_key(|g| g.order.unwrap_or(u32::MAX));

    for group in &mut groups {
        group.count = group.items.len();
        group.thumbnail = group.items.first().and_then(|i| i.image.clone());
    }

    groups
}

/// Concatenate grouped items into the category-major slide order.
pub fn flatten(groups: &[CategoryGroup]) -> Vec<GalleryItem> {
    groups.iter().flat_map(|g| g.items.iter().cloned()).collect()
}

/// Group then flatten in one step, for callers holding the raw item list.
pub fn flatten_items(items: &[GalleryItem]) -> Vec<GalleryItem> {
    flatten(&group_by_category(items))
}

/// Position of the first item whose key matches, else `0`.
///
/// The miss case is a deliberate start-position policy, not an error signal
/// — see the module docs before "fixing" it.
pub fn image_index(list: &[GalleryItem], key: &str) -> usize {
    list.iter().position(|item| item.key == key).unwrap_or(0)
}

/// Wrap a standalone featured image as a gallery item under [`FEATURED_KEY`]
/// so it can be prepended to a slide list without colliding with real items.
pub fn featured_to_gallery_item(image: ImageAsset) -> GalleryItem {
    GalleryItem {
        key: FEATURED_KEY.to_string(),
        image: Some(image),
        category: None,
    }
}
