use super::*;
use crate::{Geometry, TextStyle};

fn tail(output: &str) -> Vec<String> {
    OUTPUT_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(output.to_string()))
        .collect()
}

#[test]
fn trim_only_has_no_filter_graph() {
    let mut reg = LayerRegistry::new();
    reg.add_trim("00:00:02", "00:00:05").unwrap();
    let args = assemble_command("in.mp4", &reg, &AssetCatalog::default(), "out.mp4").unwrap();

    let mut expected: Vec<String> = ["-i", "in.mp4", "-ss", "00:00:02", "-to", "00:00:05"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    expected.extend(tail("out.mp4"));
    assert_eq!(args, expected);
    assert!(!args.iter().any(|a| a == "-filter_complex"));
}

#[test]
fn single_image_end_to_end() {
    let mut reg = LayerRegistry::new();
    reg.add_image("assets/a.png", "a.png", Geometry::new(100, 50, 10, 20));
    let args = assemble_command("in.mp4", &reg, &AssetCatalog::default(), "test.mp4").unwrap();

    let mut expected: Vec<String> = [
        "-i",
        "in.mp4",
        "-i",
        "a.png",
        "-filter_complex",
        "[1]scale=100x50[img0];[0][img0]overlay=10:20",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    expected.extend(tail("test.mp4"));
    assert_eq!(args, expected);
}

#[test]
fn filter_flag_present_iff_complex_layer_exists() {
    let cat = AssetCatalog::default();
    let mut reg = LayerRegistry::new();
    let has_graph = |reg: &LayerRegistry| {
        assemble_command("in.mp4", reg, &cat, "o.mp4")
            .unwrap()
            .iter()
            .any(|a| a == "-filter_complex")
    };

    assert!(!has_graph(&reg));
    reg.add_trim("1", "2").unwrap();
    assert!(!has_graph(&reg));
    reg.add_text(0, 0, "x", TextStyle::default());
    assert!(has_graph(&reg));
    reg.remove_layer(1).unwrap();
    assert!(!has_graph(&reg));
}

#[test]
fn sections_appear_in_fixed_order() {
    let cat = AssetCatalog::default();
    let mut reg = LayerRegistry::new();
    reg.add_trim("00:00:01", "00:00:03").unwrap();
    reg.add_sticker(0, Geometry::new(32, 32, 4, 4));
    reg.add_filter(3).unwrap();
    reg.add_image("pic.png", "pic.png", Geometry::new(64, 64, 0, 0));

    let args = assemble_command("movie.mp4", &reg, &cat, "out.mp4").unwrap();
    let pos = |needle: &str| args.iter().position(|a| a == needle).unwrap();

    assert_eq!(&args[..6], &["-i", "movie.mp4", "-i", "pic.png", "-i", "logo.png"]);
    assert!(pos("-filter_complex") > pos("logo.png"));
    assert!(pos("-ss") > pos("-filter_complex"));
    assert!(pos("-segment_format_options") > pos("-to"));
    assert_eq!(args.last().map(String::as_str), Some("out.mp4"));

    let graph = &args[pos("-filter_complex") + 1];
    assert_eq!(
        graph,
        "[0]hue=h=120[filtered];\
         [2]scale=32x32[sticker1];[filtered][sticker1]overlay=4:4[ov_sticker1];\
         [1]scale=64x64[img2];[ov_sticker1][img2]overlay=0:0"
    );
}
