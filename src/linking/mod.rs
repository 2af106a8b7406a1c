//! Linking resolver
//!
//! Derives shared zoom/pan state and brush-driven cross-view selection from
//! the channel-level linking identifiers carried by the laid-out tracks.

pub mod resolver;
pub mod types;

pub use resolver::{discover, resolve, resolve_axes};
pub use types::*;
