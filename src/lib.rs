//! genovis - layout and linking compiler for declarative genomic
//! visualization specifications
//!
//! This crate turns a hierarchical specification tree into a concrete layout
//! (absolute bounding boxes, 12-column grid coordinates, circular ring
//! geometry) and a linking graph (zoom locks, location locks, brush-driven
//! cross-view selection), ready for a downstream rendering engine. Grammar
//! parsing/validation, mark drawing, and data loading are external
//! collaborators.
//!
//! # Example
//!
//! ```rust
//! use genovis::compile_str;
//!
//! let output = compile_str(r#"{
//!     "tracks": [
//!         { "id": "a", "mark": "bar", "width": 400, "height": 100 },
//!         { "id": "b", "mark": "line", "width": 400, "height": 150 }
//!     ],
//!     "spacing": 10
//! }"#).unwrap();
//!
//! assert_eq!(output.tracks.len(), 2);
//! assert_eq!(output.size.height, 260.0);
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod linking;
pub mod output;
pub mod spec;
pub mod traverse;

pub use error::CompileError;
pub use layout::{LayoutConfig, TrackInfo};
pub use output::CompiledOutput;
pub use spec::RootSpec;

/// Compile a specification with the default layout configuration.
///
/// The compile itself cannot fail: incomplete tracks are skipped with a
/// warning and malformed linking degrades to "no sharing".
pub fn compile(spec: &RootSpec) -> CompiledOutput {
    compile_with_config(spec, &LayoutConfig::default())
}

/// Compile a specification with a custom layout configuration
pub fn compile_with_config(spec: &RootSpec, config: &LayoutConfig) -> CompiledOutput {
    let mut output = CompiledOutput::new();

    let (tracks, size) = layout::compute(spec, config);
    output.set_layout(tracks, size);

    linking::resolve(&mut output);

    output
}

/// Decode a JSON specification and compile it with defaults
pub fn compile_str(json: &str) -> Result<CompiledOutput, CompileError> {
    compile_str_with_config(json, &LayoutConfig::default())
}

/// Decode a JSON specification and compile it with a custom configuration
pub fn compile_str_with_config(
    json: &str,
    config: &LayoutConfig,
) -> Result<CompiledOutput, CompileError> {
    let spec: RootSpec = serde_json::from_str(json)?;
    Ok(compile_with_config(&spec, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_str_simple_stack() {
        let output = compile_str(
            r#"{
                "tracks": [
                    { "id": "a", "mark": "bar", "width": 400, "height": 100 },
                    { "id": "b", "mark": "line", "width": 400, "height": 150 }
                ],
                "spacing": 10
            }"#,
        )
        .unwrap();

        assert_eq!(output.tracks.len(), 2);
        assert_eq!(output.size.width, 400.0);
        assert_eq!(output.size.height, 260.0);
    }

    #[test]
    fn test_compile_str_rejects_invalid_json() {
        let result = compile_str("{ not json");
        assert!(matches!(result, Err(CompileError::Spec(_))));
    }

    #[test]
    fn test_compile_populates_linking_tables() {
        let output = compile_str(
            r#"{
                "arrangement": "vertical",
                "views": [
                    { "tracks": [{ "id": "a", "mark": "bar", "width": 300, "height": 60, "xLinkingId": "shared-x" }] },
                    { "tracks": [{ "id": "b", "mark": "bar", "width": 300, "height": 60, "xLinkingId": "shared-x" }] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(output.zoom_lock_group("a"), Some("shared-x"));
        assert_eq!(output.zoom_lock_group("b"), Some("shared-x"));
        assert!(output
            .location_lock("a", linking::Channel::X)
            .unwrap()
            .axis
            .is_some());
    }
}
