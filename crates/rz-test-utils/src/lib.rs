//! Test utilities for rz widgets.
//!
//! This crate provides a headless stand-in for a browser document so widget
//! logic can be exercised without `wasm32` or a real page.
//!
//! - [`MemoryDocument`] - an in-memory element tree implementing
//!   [`rz_dom::Document`]; every mutation is recorded as a [`DomCall`]
//! - [`SimpleSelector`] - the small selector subset the memory document
//!   understands
//! - [`fixtures`] - ready-made layouts used across the test suites
//!
//! # Example
//!
//! ```rust
//! use rz_dom::{Document, StyleSink};
//! use rz_test_utils::MemoryDocument;
//!
//! let doc = MemoryDocument::new();
//! let div = doc.create_element("div").unwrap();
//! doc.append_child(&doc.body(), &div).unwrap();
//! doc.set_style(&div, "display", "none");
//!
//! assert_eq!(doc.style(&div, "display").as_deref(), Some("none"));
//! assert_eq!(doc.count_style_writes(div, "display"), 1);
//! ```

pub mod fixtures;
pub mod memory;
pub mod selector;

pub use fixtures::{ContainerFixture, create_container, remove_containers};
pub use memory::{DomCall, MemoryDocument, NodeId};
pub use selector::SimpleSelector;
