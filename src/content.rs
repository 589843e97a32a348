//! Gallery content model and the CMS decode boundary.
//!
//! The engine never fetches anything. A content layer (headless CMS client,
//! static JSON, test fixture) hands over one plain in-memory payload per page
//! render, and everything downstream treats it as immutable. This module owns
//! the types of that hand-off and the one place where the CMS wire shape is
//! decoded into them.
//!
//! ## Partial content is normal
//!
//! Real galleries are edited by humans mid-upload. An item can arrive without
//! an image (renders nothing), without a category (never grouped), or with a
//! reference to a category that no longer exists (same as no category). None
//! of these are errors — they are expected shapes of partially-filled content
//! and each one has a documented silent fallback. The only hard error at this
//! boundary is JSON that does not decode at all.
//!
//! ## Localized labels
//!
//! Category labels are locale → text maps. Resolution is deterministic:
//! requested locale, then the default locale, then the lexicographically
//! first entry, then nothing. Captions merge sources the same way titles and
//! descriptions do elsewhere: first non-empty wins, via [`resolve_caption`].

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Locale used when the requested one has no entry.
pub const DEFAULT_LOCALE: &str = "en";

/// A locale → text map with deterministic fallback.
///
/// Stored as a `BTreeMap` so the last-resort fallback (first entry) does not
/// depend on hash ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Single-locale text, mostly useful in tests and fixtures.
    pub fn single(locale: &str, text: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(locale.to_string(), text.to_string());
        LocalizedText(map)
    }

    /// Resolve for a locale: requested → [`DEFAULT_LOCALE`] → first entry.
    ///
    /// Empty-string entries count as missing, so a half-translated label
    /// falls through to the next locale instead of rendering blank.
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        [locale, DEFAULT_LOCALE]
            .iter()
            .filter_map(|l| self.0.get(*l))
            .chain(self.0.values())
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Focal point hint in relative coordinates (0.0–1.0), passed through to the
/// rendering layer for crop positioning. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Hotspot {
    pub x: f32,
    pub y: f32,
}

/// A resolved image reference: asset URL plus display metadata.
///
/// URLs and transforms are the content source's job (spec'd at the boundary);
/// the engine only carries these values through to view models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAsset {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    /// Low-quality inline placeholder (LQIP), if the source generated one.
    #[serde(default, alias = "lqip")]
    pub placeholder: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
}

/// A resolved category reference carried on a gallery item.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRef {
    /// Content-source document id.
    pub id: String,
    /// Stable machine identifier — the grouping key.
    pub key: String,
    pub label: LocalizedText,
    /// Sort weight. Absent orders sort after all explicit ones.
    pub order: Option<u32>,
}

/// One photograph entry. Immutable for the lifetime of a page render.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    /// Stable unique key, used for deep links and list diffing.
    pub key: String,
    /// Absent image → the item is not renderable and is skipped silently.
    pub image: Option<ImageAsset>,
    /// Absent/unresolvable category → excluded from grouping.
    pub category: Option<CategoryRef>,
}

/// Everything the content layer hands over for one gallery page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryPayload {
    pub items: Vec<GalleryItem>,
    /// The ordered category catalog, as authored.
    pub categories: Vec<CategoryRef>,
    /// Optional hero image that sits outside the category set.
    pub featured: Option<ImageAsset>,
}

/// Pick the first non-empty caption source.
///
/// The same merge rule used for every display string in the crate: sources in
/// priority order, whitespace-only counts as empty, first hit wins.
///
/// ```text
/// caption: resolve_caption(&[image_alt, category_label])
/// ```
pub fn resolve_caption(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

// =========================================================================
// Wire shape
// =========================================================================
//
// The CMS delivers arrays of keyed objects: items carry a `_key`, an optional
// image, and an optional `{_ref}` pointer into a category catalog keyed by
// `_id`. Decoding resolves each pointer against the catalog once, so the rest
// of the crate never sees an unresolved reference.

#[derive(Deserialize)]
struct RawPayload {
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    featured: Option<ImageAsset>,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(rename = "_key")]
    key: String,
    #[serde(default)]
    image: Option<ImageAsset>,
    #[serde(default)]
    category: Option<RawRef>,
}

#[derive(Deserialize)]
struct RawRef {
    #[serde(rename = "_ref")]
    target: String,
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(rename = "_id")]
    id: String,
    key: String,
    #[serde(default)]
    label: LocalizedText,
    #[serde(default)]
    order: Option<u32>,
}

/// Decode a CMS-shaped JSON payload into a [`GalleryPayload`].
///
/// Each item's category pointer is resolved against the catalog by document
/// id first, then by key (hand-written fixtures tend to use keys). A pointer
/// that matches neither decodes as no category at all — the item stays in the
/// payload, it just never groups.
pub fn decode_gallery(json: &str) -> Result<GalleryPayload, ContentError> {
    let raw: RawPayload = serde_json::from_str(json)?;

    let categories: Vec<CategoryRef> = raw
        .categories
        .into_iter()
        .map(|c| CategoryRef {
            id: c.id,
            key: c.key,
            label: c.label,
            order: c.order,
        })
        .collect();

    let items = raw
        .items
        .into_iter()
        .map(|item| {
            let category = item.category.as_ref().and_then(|r| {
                categories
                    .iter()
                    .find(|c| c.id == r.target)
                    .or_else(|| categories.iter().find(|c| c.key == r.target))
                    .cloned()
            });
            GalleryItem {
                key: item.key,
                image: item.image,
                category,
            }
        })
        .collect();

    Ok(GalleryPayload {
        items,
        categories,
        featured: raw.featured,
    })
}
