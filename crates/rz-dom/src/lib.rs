//! rz DOM - the element tree the resizer widgets are written against.
//!
//! Widgets never talk to a browser directly. They go through two small
//! traits:
//! - [`StyleSink`]: set, read and clear inline style properties
//! - [`Document`]: selector lookup, element creation, tree edits, layout
//!   metrics and pointer listener registration
//!
//! On `wasm32` the [`web::WebDocument`] backend implements both over
//! `web-sys`. Tests use the in-memory document from `rz-test-utils`.

pub mod document;
pub mod error;
pub mod event;
pub mod layout;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use document::{Document, StyleSink};
pub use error::{DomError, DomResult};
pub use event::{ListenerId, ListenerScope, Modifiers, PointerEvent, PointerKind, PointerListener};
pub use layout::LayoutRect;
