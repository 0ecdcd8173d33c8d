//! rz Resizer - a draggable handle between flex siblings.
//!
//! A [`Resizer`] binds to a container element holding two or more flex
//! children. It inserts a thin handle before the second child and a
//! full-height ghost overlay. While the handle is dragged the ghost tracks
//! the pointer; on release the element after the handle (the *target*)
//! gets a fixed `flex-basis` matching the new handle position.
//!
//! ## Quick Start
//!
//! ```rust
//! use rz_core::math::Vec2;
//! use rz_dom::{PointerEvent, StyleSink};
//! use rz_resizer::{Resizer, ResizerOptions};
//! use rz_test_utils::{MemoryDocument, create_container};
//!
//! let doc = MemoryDocument::new();
//! let fixture = create_container(&doc, 400.0);
//!
//! let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
//!
//! doc.dispatch(rz.handle(), &mut PointerEvent::down(Vec2::ZERO, Vec2::ZERO));
//! doc.dispatch(fixture.container, &mut PointerEvent::moved(Vec2::new(150.0, 0.0)));
//! doc.dispatch(fixture.container, &mut PointerEvent::up(Vec2::new(150.0, 0.0)));
//!
//! // 400 - 150 - 8 (handle width)
//! assert_eq!(doc.style(&rz.target(), "flex").as_deref(), Some("0 0 242px"));
//!
//! rz.remove();
//! ```

pub mod drag;
pub mod error;
pub mod options;
pub mod registry;
pub mod resizer;

pub use drag::DragTracker;
pub use error::{ConstructionError, ConstructionResult};
pub use options::{DEFAULT_HANDLE_CLASS, DEFAULT_HANDLE_WIDTH, ResizerOptions};
pub use registry::InstanceId;
pub use resizer::{
    ContainerRef, GHOST_Z_INDEX, HANDLE_ATTRIBUTE, INSTANCE_ATTRIBUTE, ResizeCommit, Resizer,
};
