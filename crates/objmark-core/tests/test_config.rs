use std::path::PathBuf;

use approx::assert_relative_eq;

use objmark_core::config::{AppConfig, GuideConfig, ViewerConfig};
use objmark_core::geometry::Rect;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_app_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.image_folder, PathBuf::from("rawdata"));
    assert_eq!(config.output_file, PathBuf::from("annotation.txt"));
    assert_eq!(config.viewer, ViewerConfig::default());
}

#[test]
fn test_viewer_config_defaults() {
    let viewer = ViewerConfig::default();
    assert_relative_eq!(viewer.display_scale, 1.0);
    assert_relative_eq!(viewer.aspect_ratio, 1.0);
    assert!(!viewer.fix_marker_ratio);
    assert!(!viewer.accept_point_shape);
    assert!(viewer.guide.is_none());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_empty_document_deserializes_to_defaults() {
    let config: AppConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_partial_viewer_section_fills_defaults() {
    let config: AppConfig =
        serde_json::from_str(r#"{"viewer": {"aspect_ratio": 2.0, "fix_marker_ratio": true}}"#)
            .unwrap();
    assert_relative_eq!(config.viewer.aspect_ratio, 2.0);
    assert!(config.viewer.fix_marker_ratio);
    assert_relative_eq!(config.viewer.display_scale, 1.0);
    assert_eq!(config.image_folder, PathBuf::from("rawdata"));
}

#[test]
fn test_guide_section_round_trip() {
    let config = AppConfig {
        image_folder: PathBuf::from("frames"),
        output_file: PathBuf::from("labels.txt"),
        viewer: ViewerConfig {
            display_scale: 0.5,
            guide: Some(GuideConfig {
                shape: 3,
                position: Rect::new(10, 20, 30, 40),
                display: true,
            }),
            ..ViewerConfig::default()
        },
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""position":{"x":10,"y":20,"width":30,"height":40}"#));

    let back: AppConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_guide_fields_default_individually() {
    let guide: GuideConfig = serde_json::from_str(r#"{"shape": 2}"#).unwrap();
    assert_eq!(guide.shape, 2);
    assert_eq!(guide.position, Rect::default());
    assert!(!guide.display);
}
