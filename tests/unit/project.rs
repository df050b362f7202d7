use super::*;
use crate::{Layer, LayerKind};

const PROJECT: &str = r#"{
    "input": "media/clip.mp4",
    "layers": [
        { "kind": "filter", "filter_index": 2 },
        { "kind": "image", "source": "assets/a.png", "geometry": { "width": 100, "height": 50, "x": 10, "y": "20" } },
        { "kind": "text", "x": "(w-tw)/2", "y": 12, "text": "hello", "style": { "font_color": "yellow" } },
        { "kind": "sticker", "sticker_index": 0, "geometry": { "width": 32, "height": 32, "x": 0, "y": 0 } },
        { "kind": "filter", "filter_index": 4 },
        { "kind": "trim", "start": "00:00:01", "end": 3.5 }
    ]
}"#;

#[test]
fn parses_numbers_and_expressions_as_text() {
    let project: EditProject = serde_json::from_str(PROJECT).unwrap();
    assert_eq!(project.layers.len(), 6);
    let LayerSpec::Image { geometry, .. } = &project.layers[1] else {
        panic!("expected image spec");
    };
    assert_eq!(geometry, &Geometry::new(100, 50, 10, 20));
    let LayerSpec::Trim { end, .. } = &project.layers[5] else {
        panic!("expected trim spec");
    };
    assert_eq!(end, "3.5");
}

#[test]
fn build_registry_replays_and_skips_duplicates() {
    let project: EditProject = serde_json::from_str(PROJECT).unwrap();
    let reg = project.build_registry().unwrap();
    let kinds: Vec<LayerKind> = reg.iter().map(Layer::kind).collect();
    assert_eq!(
        kinds,
        vec![
            LayerKind::Filter,
            LayerKind::Image,
            LayerKind::Text,
            LayerKind::Sticker,
            LayerKind::Trim,
        ]
    );

    let Some(Layer::Filter(f)) = reg.get(0) else {
        panic!("expected filter");
    };
    assert_eq!(f.filter_index, 2);

    let Some(Layer::Image(img)) = reg.get(1) else {
        panic!("expected image");
    };
    assert_eq!(img.staged_name, "a.png");

    let Some(Layer::Text(t)) = reg.get(2) else {
        panic!("expected text");
    };
    assert_eq!(t.y, "12");
    assert_eq!(t.style.font_color, "yellow");
    assert_eq!(t.style.font_size, "24");
}

#[test]
fn staged_input_name_defaults_to_file_name() {
    let project: EditProject = serde_json::from_str(PROJECT).unwrap();
    assert_eq!(project.staged_input_name().unwrap(), "clip.mp4");

    let named = EditProject {
        file_name: Some("in.mp4".to_string()),
        ..project
    };
    assert_eq!(named.staged_input_name().unwrap(), "in.mp4");
}

#[test]
fn staged_input_name_is_normalized() {
    let project: EditProject = serde_json::from_str(
        r#"{ "input": "media/clip.mp4", "file_name": "./work\\clip.mp4" }"#,
    )
    .unwrap();
    assert_eq!(project.staged_input_name().unwrap(), "work/clip.mp4");

    let escaping = EditProject {
        file_name: Some("../clip.mp4".to_string()),
        ..project
    };
    assert!(matches!(
        escaping.staged_input_name(),
        Err(LayerfxError::Validation(_))
    ));
}

#[test]
fn unknown_kind_is_rejected() {
    let res: Result<EditProject, _> =
        serde_json::from_str(r#"{ "input": "a.mp4", "layers": [ { "kind": "blur" } ] }"#);
    assert!(res.is_err());
}
