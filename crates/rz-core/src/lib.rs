//! rz Core
//!
//! Shared utilities for the rz widget crates: collections, math,
//! logging and profiling.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
