//! End-to-end tests over the full compile pipeline

use genovis::linking::Channel;
use genovis::{compile, compile_str, compile_str_with_config, LayoutConfig, RootSpec};

const FULL_SPEC: &str = r#"{
    "title": "Comparative View",
    "arrangement": "vertical",
    "spacing": 16,
    "views": [
        {
            "tracks": [
                {
                    "tracks": [
                        { "id": "overview", "mark": "bar", "width": 600, "height": 80, "xAxis": true },
                        { "id": "window", "mark": "brush", "xLinkingId": "zoomed" }
                    ],
                    "width": 600,
                    "height": 80
                }
            ]
        },
        {
            "tracks": [
                { "id": "detail", "mark": "line", "width": 600, "height": 180, "xLinkingId": "zoomed", "xAxis": true }
            ]
        }
    ]
}"#;

#[test]
fn test_full_pipeline_produces_layout_and_linking() {
    let output = compile_str(FULL_SPEC).unwrap();

    // Header + overlay slot + detail track, in traversal order
    assert_eq!(output.tracks.len(), 3);
    assert_eq!(output.tracks[1].primary_id(), Some("overview"));
    assert_eq!(output.tracks[2].primary_id(), Some("detail"));

    // The brush found its target
    assert_eq!(output.brush_target("window"), Some("detail"));

    // The detail view is pan-locked but unresolved (no plain partner)
    let detail = output.location_lock("detail", Channel::X).unwrap();
    assert_eq!(detail.lock, "zoomed");
    assert_eq!(detail.axis, None);

    // Every placement stays within the grid
    for info in &output.tracks {
        assert!(info.grid.x + info.grid.w <= 12.0 + 1e-9);
        assert!(info.grid.y + info.grid.h <= 12.0 + 1e-9);
    }
}

#[test]
fn test_pipeline_footprint_accounts_for_axes_and_title() {
    let output = compile_str(FULL_SPEC).unwrap();
    let config = LayoutConfig::default();

    // 80 + axis + spacing + 180 + axis, shifted by title band + margin
    let body = 80.0 + config.axis_height + 16.0 + 180.0 + config.axis_height;
    let expected = body + config.title_height + config.title_margin;
    assert_eq!(output.size.height, expected);
    assert_eq!(output.size.width, 600.0);
}

#[test]
fn test_compile_is_deterministic() {
    let a = compile_str(FULL_SPEC).unwrap().to_json().unwrap();
    let b = compile_str(FULL_SPEC).unwrap().to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_recompiling_the_same_spec_is_side_effect_free() {
    let spec: RootSpec = serde_json::from_str(FULL_SPEC).unwrap();
    let first = compile(&spec);
    let second = compile(&spec);

    assert_eq!(first.tracks.len(), second.tracks.len());
    assert_eq!(first.size, second.size);
    assert_eq!(first.zoom_locks, second.zoom_locks);
    assert_eq!(first.location_locks, second.location_locks);
}

#[test]
fn test_toml_configuration_changes_the_layout() {
    let config = LayoutConfig::from_toml(
        r#"
        axis_height = 0.0
        title_height = 40.0
        title_margin = 0.0
        "#,
    )
    .unwrap();

    let output = compile_str_with_config(FULL_SPEC, &config).unwrap();
    assert_eq!(output.tracks[0].bounds.height, 40.0);
    assert_eq!(output.size.height, 40.0 + 80.0 + 16.0 + 180.0);
}

#[test]
fn test_circular_subtree_next_to_linear_view() {
    let output = compile_str(
        r#"{
            "arrangement": "horizontal",
            "spacing": 10,
            "views": [
                {
                    "tracks": [
                        { "id": "ring", "mark": "bar", "width": 200, "height": 50, "layout": "circular" }
                    ]
                },
                {
                    "tracks": [
                        { "id": "flat", "mark": "bar", "width": 300, "height": 100 }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(output.tracks.len(), 2);
    assert!(output.tracks[0].placement.is_circular());
    assert!(!output.tracks[1].placement.is_circular());

    // The ring collapses to its own square; the linear view sits beside it
    assert_eq!(output.tracks[0].bounds.width, 200.0);
    assert_eq!(output.tracks[0].bounds.height, 200.0);
    assert_eq!(output.tracks[1].bounds.x, 210.0);
    assert_eq!(output.size.width, 510.0);
}

#[test]
fn test_degenerate_specs_never_fail() {
    for json in [
        r#"{ "tracks": [] }"#,
        r#"{ "arrangement": "serial", "views": [] }"#,
        r#"{ "arrangement": "parallel", "views": [ { "tracks": [] } ] }"#,
        // Tracks with unresolved sizes are skipped, not fatal
        r#"{ "tracks": [ { "id": "nosize", "mark": "bar" } ] }"#,
    ] {
        let output = compile_str(json).unwrap();
        assert!(output.tracks.is_empty(), "spec {json} should compile empty");
    }
}
