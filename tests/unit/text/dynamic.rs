use super::*;
use crate::config::model::{AspectRatioEntry, DisplayMode};

fn element(text_type: TextType, text: &str) -> TextElement {
    TextElement {
        text_type,
        text: text.to_owned(),
        ..TextElement::default()
    }
}

fn ctx() -> TextContext {
    TextContext {
        frame: 1012.0,
        show: "tst".to_owned(),
        shot: "sh010".to_owned(),
        frame_start: "1001".to_owned(),
        frame_end: "1096".to_owned(),
        user: "artist".to_owned(),
        scene_file: "/jobs/tst/sh010/layout_v003.ma".to_owned(),
    }
}

fn resolve(text_type: TextType, text: &str, cfg: &ReticleConfig) -> ReticleResult<String> {
    resolve_text(&element(text_type, text), cfg, 0.0, &ctx())
}

#[test]
fn empty_text_uses_builtin_formats() {
    let cfg = ReticleConfig::default();
    assert_eq!(resolve(TextType::Lens, "", &cfg).unwrap(), "35.00 mm");
    assert_eq!(resolve(TextType::Camera, "", &cfg).unwrap(), "persp");
    assert_eq!(resolve(TextType::Frame, "", &cfg).unwrap(), "1012");
    assert_eq!(resolve(TextType::ShowShot, "", &cfg).unwrap(), "tst/sh010");
    assert_eq!(resolve(TextType::FrameRange, "", &cfg).unwrap(), "1001-1096");
    assert_eq!(resolve(TextType::User, "", &cfg).unwrap(), "artist");
    assert_eq!(resolve(TextType::PanScanRatio, "", &cfg).unwrap(), "1.33");
    assert_eq!(resolve(TextType::PanScanOffset, "", &cfg).unwrap(), "0.00");
    assert_eq!(resolve(TextType::SafeAction, "", &cfg).unwrap(), "safe action");
    assert_eq!(resolve(TextType::SafeTitle, "", &cfg).unwrap(), "safe title");
}

#[test]
fn custom_text_is_a_format() {
    let cfg = ReticleConfig::default();
    assert_eq!(resolve(TextType::Camera, "cam: %s", &cfg).unwrap(), "cam: persp");
    assert_eq!(resolve(TextType::Frame, "f%d", &cfg).unwrap(), "f1012");
    assert_eq!(resolve(TextType::Lens, "%.0fmm", &cfg).unwrap(), "35mm");
    assert_eq!(resolve(TextType::String, "hello 100%", &cfg).unwrap(), "hello 100%");
    assert_eq!(resolve(TextType::SafeTitle, "TITLE", &cfg).unwrap(), "TITLE");
}

#[test]
fn scene_file_is_split_into_path_and_name() {
    let cfg = ReticleConfig::default();
    assert_eq!(
        resolve(TextType::CurrentFile, "", &cfg).unwrap(),
        "/jobs/tst/sh010/layout_v003.ma"
    );
    assert_eq!(resolve(TextType::FilePath, "", &cfg).unwrap(), "/jobs/tst/sh010/");
    assert_eq!(resolve(TextType::FileName, "", &cfg).unwrap(), "layout_v003.ma");

    let bare = TextContext {
        scene_file: "untitled".to_owned(),
        ..TextContext::default()
    };
    assert_eq!(bare.scene_dir(), "");
    assert_eq!(bare.scene_name(), "untitled");
}

#[test]
fn aspect_ratio_text_checks_the_index() {
    let mut cfg = ReticleConfig::default();
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(2.39, DisplayMode::Off));
    assert_eq!(resolve(TextType::AspectRatio, "", &cfg).unwrap(), "2.390");

    let mut el = element(TextType::AspectRatio, "");
    el.ar_level = 1;
    let err = resolve_text(&el, &cfg, 0.0, &ctx()).unwrap_err();
    assert!(matches!(err, ReticleError::IndexOutOfRange { index: 1, len: 1, .. }));

    el.ar_level = -1;
    assert!(resolve_text(&el, &cfg, 0.0, &ctx()).is_err());
}

#[test]
fn gate_and_distance_text_skip_when_off() {
    let mut cfg = ReticleConfig::default();
    let err = resolve(TextType::ProjectionGate, "", &cfg).unwrap_err();
    assert!(matches!(err, ReticleError::UndisplayedDependency(_)));

    cfg.projection_gate.display = DisplayMode::Lines;
    cfg.projection_gate.horizontal = 0.825;
    cfg.projection_gate.vertical = 0.446;
    assert_eq!(resolve(TextType::ProjectionGate, "", &cfg).unwrap(), "1.850");

    let el = element(TextType::MaxDistance, "");
    assert_eq!(resolve_text(&el, &cfg, -250.0, &ctx()).unwrap(), "max. dist -250");
    cfg.options.maximum_distance = 0.0;
    assert!(matches!(
        resolve_text(&el, &cfg, -250.0, &ctx()).unwrap_err(),
        ReticleError::UndisplayedDependency(_)
    ));
}
