use super::*;
use crate::{Geometry, LayerRegistry, TextStyle};

fn catalog() -> AssetCatalog {
    AssetCatalog {
        stickers: vec!["s0.png".into(), "s1.png".into(), "s2.png".into()],
        ..AssetCatalog::default()
    }
}

fn geo() -> Geometry {
    Geometry::new(10, 10, 0, 0)
}

#[test]
fn single_image_gets_stream_one() {
    let mut reg = LayerRegistry::new();
    reg.add_image("assets/a.png", "a.png", Geometry::new(100, 50, 10, 20));
    let plan = enumerate_inputs(reg.layers(), &catalog()).unwrap();
    assert_eq!(
        plan.inputs(),
        &[AuxInput {
            stream: 1,
            path: "a.png".to_string(),
            source: AuxSource::Image { position: 0 },
        }]
    );
    assert_eq!(plan.image_stream(0), Some(1));
}

#[test]
fn images_precede_distinct_stickers() {
    let mut reg = LayerRegistry::new();
    reg.add_sticker(2, geo());
    reg.add_image("a.png", "a.png", geo());
    reg.add_sticker(0, geo());
    reg.add_text(0, 0, "t", TextStyle::default());
    reg.add_sticker(2, geo());
    reg.add_image("b.png", "b.png", geo());

    let plan = enumerate_inputs(reg.layers(), &catalog()).unwrap();
    let got: Vec<(usize, &str)> = plan
        .inputs()
        .iter()
        .map(|i| (i.stream, i.path.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![(1, "a.png"), (2, "b.png"), (3, "s2.png"), (4, "s0.png")]
    );
    assert_eq!(plan.image_stream(1), Some(1));
    assert_eq!(plan.image_stream(5), Some(2));
    assert_eq!(plan.sticker_stream(2), Some(3));
    assert_eq!(plan.sticker_stream(0), Some(4));
    assert_eq!(plan.sticker_stream(1), None);
}

#[test]
fn streams_stay_dense_after_removal() {
    let mut reg = LayerRegistry::new();
    reg.add_image("a.png", "a.png", geo());
    reg.add_image("b.png", "b.png", geo());
    reg.add_sticker(0, geo());
    reg.add_sticker(1, geo());
    reg.remove_layer(0).unwrap();
    reg.remove_layer(1).unwrap();

    let plan = enumerate_inputs(reg.layers(), &catalog()).unwrap();
    let streams: Vec<usize> = plan.inputs().iter().map(|i| i.stream).collect();
    assert_eq!(streams, vec![1, 2]);
    assert_eq!(plan.image_stream(0), Some(1));
    assert_eq!(plan.sticker_stream(1), Some(2));
}

#[test]
fn no_overlays_means_no_inputs() {
    let mut reg = LayerRegistry::new();
    reg.add_crop(geo()).unwrap();
    reg.add_trim("1", "2").unwrap();
    let plan = enumerate_inputs(reg.layers(), &catalog()).unwrap();
    assert!(plan.inputs().is_empty());
}

#[test]
fn unknown_sticker_is_an_asset_error() {
    let mut reg = LayerRegistry::new();
    reg.add_sticker(42, geo());
    let err = enumerate_inputs(reg.layers(), &catalog()).unwrap_err();
    assert!(matches!(err, LayerfxError::AssetResolution(_)));
}
