//! Domain logic and core data structures
//!
//! This module contains pure geometry that is independent
//! of any window system.

pub mod core;
pub mod grid;
pub mod presets;
