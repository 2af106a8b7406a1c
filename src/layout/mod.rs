//! Layout compiler
//!
//! Resolves the view/track tree into absolute pixel bounding boxes, handles
//! linear vs. circular arrangement (including circular-root detection, where
//! an entire subtree collapses into radial ring geometry), and converts
//! absolute boxes into the normalized 12-column grid coordinate system.

pub mod compiler;
pub mod config;
pub mod types;

pub use compiler::{compute, footprint, normalize_grid};
pub use config::{ConfigError, LayoutConfig};
pub use types::*;
