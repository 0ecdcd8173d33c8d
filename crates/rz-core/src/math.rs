//! Vector math re-exported from [`glam`].
//!
//! Pointer positions are carried as [`Vec2`] in page pixels.
//!
//! ```
//! use rz_core::math::Vec2;
//!
//! let page = Vec2::new(120.0, 40.0);
//! let local = page - Vec2::new(100.0, 0.0);
//! assert_eq!(local.x, 20.0);
//! ```

pub use glam::*;
