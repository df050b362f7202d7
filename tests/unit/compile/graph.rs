use super::*;
use crate::{LayerRegistry, TextStyle, compile::inputs::enumerate_inputs};

fn compile(reg: &LayerRegistry) -> Option<FilterGraph> {
    let catalog = AssetCatalog {
        stickers: vec!["s0.png".into(), "s1.png".into()],
        ..AssetCatalog::default()
    };
    let inputs = enumerate_inputs(reg.layers(), &catalog).unwrap();
    compile_filter_graph(reg.layers(), &inputs, &catalog).unwrap()
}

#[test]
fn no_complex_layers_compiles_to_nothing() {
    let mut reg = LayerRegistry::new();
    assert!(compile(&reg).is_none());
    reg.add_trim("00:00:02", "00:00:05").unwrap();
    assert!(compile(&reg).is_none());
}

#[test]
fn single_image_is_first_and_last() {
    let mut reg = LayerRegistry::new();
    reg.add_image("a.png", "a.png", Geometry::new(100, 50, 10, 20));
    let g = compile(&reg).unwrap();
    assert_eq!(
        g.expression(),
        "[1]scale=100x50[img0];[0][img0]overlay=10:20"
    );
    assert!(g.chain_fragments().is_empty());
}

#[test]
fn filter_is_labeled_when_an_overlay_follows() {
    let mut reg = LayerRegistry::new();
    reg.add_image("a.png", "a.png", Geometry::new(100, 50, 10, 20));
    reg.add_filter(2).unwrap();
    let g = compile(&reg).unwrap();
    assert_eq!(
        g.graph_fragments(),
        &[
            "[0]hue=h=60[filtered]".to_string(),
            "[1]scale=100x50[img1];[filtered][img1]overlay=10:20".to_string(),
        ]
    );
}

#[test]
fn filter_alone_is_unlabeled() {
    let mut reg = LayerRegistry::new();
    reg.add_filter(0).unwrap();
    reg.add_crop(Geometry::new(320, 240, 0, 0)).unwrap();
    let g = compile(&reg).unwrap();
    assert_eq!(g.expression(), "[0]hue=h=-60,crop=320:240:0:0");
}

#[test]
fn overlays_thread_through_the_chain() {
    let mut reg = LayerRegistry::new();
    reg.add_image("a.png", "a.png", Geometry::new(10, 10, 1, 1));
    reg.add_sticker(1, Geometry::new(20, 20, 2, 2));
    reg.add_image("b.png", "b.png", Geometry::new(30, 30, 3, 3));
    let g = compile(&reg).unwrap();
    assert_eq!(
        g.graph_fragments(),
        &[
            "[1]scale=10x10[img0];[0][img0]overlay=1:1[ov_img0]".to_string(),
            "[3]scale=20x20[sticker1];[ov_img0][sticker1]overlay=2:2[ov_sticker1]".to_string(),
            "[2]scale=30x30[img2];[ov_sticker1][img2]overlay=3:3".to_string(),
        ]
    );
}

#[test]
fn repeated_sticker_reads_the_same_stream() {
    let mut reg = LayerRegistry::new();
    reg.add_sticker(0, Geometry::new(8, 8, 0, 0));
    reg.add_sticker(0, Geometry::new(8, 8, 50, 50));
    let g = compile(&reg).unwrap();
    assert_eq!(
        g.expression(),
        "[1]scale=8x8[sticker0];[0][sticker0]overlay=0:0[ov_sticker0];\
         [1]scale=8x8[sticker1];[ov_sticker0][sticker1]overlay=50:50"
    );
}

#[test]
fn chain_fragments_follow_graph_in_priority_then_registry_order() {
    let mut reg = LayerRegistry::new();
    reg.add_text(
        5,
        6,
        "hi",
        TextStyle {
            font_color: "red".into(),
            ..TextStyle::default()
        },
    );
    reg.add_crop(Geometry::new(100, 100, 0, 0)).unwrap();
    reg.add_image("a.png", "a.png", Geometry::new(10, 10, 0, 0));
    let g = compile(&reg).unwrap();
    assert_eq!(
        g.chain_fragments(),
        &[
            "drawtext=fontfile=font.ttf:text=hi:fontcolor=red:fontsize=24:box=1:boxcolor=white@1:boxborderw=0:x=5:y=6".to_string(),
            "crop=100:100:0:0".to_string(),
        ]
    );
    assert!(
        g.expression()
            .starts_with("[1]scale=10x10[img0];[0][img0]overlay=0:0,drawtext=")
    );
}

#[test]
fn chain_only_graph_has_no_leading_separator() {
    let mut reg = LayerRegistry::new();
    reg.add_crop(Geometry::new("iw/2", "ih/2", 0, 0)).unwrap();
    let g = compile(&reg).unwrap();
    assert_eq!(g.expression(), "crop=iw/2:ih/2:0:0");
}

#[test]
fn compiling_twice_gives_identical_output() {
    let mut reg = LayerRegistry::new();
    reg.add_filter(1).unwrap();
    reg.add_image("a.png", "a.png", Geometry::new(10, 10, 0, 0));
    reg.add_sticker(0, Geometry::new(10, 10, 0, 0));
    let first = compile(&reg).unwrap();
    let second = compile(&reg).unwrap();
    assert_eq!(first, second);

    reg.remove_layer(0).unwrap();
    let third = compile(&reg).unwrap();
    assert!(third.graph_fragments()[0].contains("[0][img0]"));
}

#[test]
fn unknown_filter_index_fails() {
    let mut reg = LayerRegistry::new();
    reg.add_filter(99).unwrap();
    let inputs = enumerate_inputs(reg.layers(), &AssetCatalog::default()).unwrap();
    let err = compile_filter_graph(reg.layers(), &inputs, &AssetCatalog::default()).unwrap_err();
    assert!(matches!(err, LayerfxError::AssetResolution(_)));
}
