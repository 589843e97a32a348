//! # Gallery Lightbox
//!
//! A headless state engine for photography galleries: category grouping,
//! deep-linkable slide ordering, and a full-screen lightbox whose state stays
//! in lockstep with an external carousel widget. The rendering layer — web
//! front end, GUI toolkit, test harness — draws from the view models this
//! crate computes and feeds user input back in; the engine itself owns no
//! pixels, no DOM, and no network.
//!
//! # Architecture: Data Pipeline + Interaction Machine
//!
//! Two halves, meeting at a shared observable store:
//!
//! ```text
//! 1. Content    CMS JSON  →  items/categories     (decode once per render)
//! 2. Derive     items     →  groups → flat slides (pure, recomputed per call)
//! 3. Interact   tile activation → SelectionStore → lightbox ⇄ carousel handle
//! ```
//!
//! The derivation half is pure functions over immutable data — easy to test,
//! impossible to desynchronize. The interaction half is deliberately small
//! and guard-based: every listener registration (store subscription, key
//! listener, carousel event binding) is an RAII value whose drop is the
//! deregistration, so teardown symmetry is structural rather than a
//! convention someone has to remember across open/close cycles.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Content types and the CMS JSON decode boundary |
//! | [`grouping`] | Category grouping, flattening, slide index lookup |
//! | [`store`] | Observable stores; the per-page photo selection |
//! | [`input`] | Page-level key routing with scoped listeners |
//! | [`carousel`] | The external carousel widget contract and scoped event bindings |
//! | [`lightbox`] | The modal + carousel synchronization state machine |
//! | [`grid`] | Selectable thumbnail tiles |
//! | [`dots`] | Dot indicators for inline carousels (same sync pattern, smaller) |
//! | [`config`] | `gallery.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## Single-Threaded By Contract
//!
//! Everything here runs on one UI event loop. Shared state is `Rc` +
//! `RefCell`/`Cell`, not locks, and "concurrency" concerns reduce to event
//! ordering and listener lifecycle. Notification paths snapshot their
//! listener lists before delivering, so callbacks can re-enter (write the
//! store, close the lightbox, unregister themselves) without poisoning a
//! borrow.
//!
//! ## The Widget Is the Source of Truth
//!
//! The carousel widget is foreign code reached only through
//! [`carousel::CarouselHandle`]. The engine never mirrors its internals:
//! after construction it tracks exactly one number — the selected snap —
//! and re-reads it from the widget on every `Select`/`ReInit` event. Clicking
//! a dot or pressing an arrow key *asks* the widget to scroll; the local
//! index updates only when the widget says it moved.
//!
//! ## Fallbacks Over Failures
//!
//! Half-filled content is the normal case for an edited gallery, so every
//! missing piece has a documented silent fallback: imageless items render
//! nothing, uncategorized items never group, and an unknown slide key
//! resolves to index `0` — the safe carousel start. The interaction core has
//! no error type at all; the worst a bug can look like is the wrong slide,
//! never a crash.
//!
//! ## Injected, Not Global
//!
//! The selection store is the page's single communication channel between
//! many tiles and one lightbox, but it is constructed per page and threaded
//! by `Rc`, never a process global. Tests build a fresh store, router, and
//! lightbox per case and drop them at the end — which also exercises the
//! teardown paths constantly.

pub mod carousel;
pub mod config;
pub mod content;
pub mod dots;
pub mod grid;
pub mod grouping;
pub mod input;
pub mod lightbox;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
