use crate::{
    assets::catalog::AssetCatalog,
    compile::graph::compile_filter_graph,
    compile::inputs::enumerate_inputs,
    foundation::error::LayerfxResult,
    layer::model::Layer,
    layer::registry::LayerRegistry,
};

/// Output options appended to every command, before the output path.
pub const OUTPUT_OPTIONS: [&str; 8] = [
    "-segment_format_options",
    "movflags=frag_keyframe+empty_moov+default_base_moof",
    "-movflags",
    "faststart",
    "-vsync",
    "0",
    "-f",
    "mp4",
];

/// Assemble the full engine argument list for the registry snapshot.
///
/// Order: primary input, auxiliary inputs, `-filter_complex` (only when a complex layer
/// exists), trim flags, fixed output options, output path.
#[tracing::instrument(skip(registry, catalog), fields(layers = registry.len()))]
pub fn assemble_command(
    primary: &str,
    registry: &LayerRegistry,
    catalog: &AssetCatalog,
    output: &str,
) -> LayerfxResult<Vec<String>> {
    let layers = registry.layers();
    let inputs = enumerate_inputs(layers, catalog)?;

    let mut args = vec!["-i".to_string(), primary.to_string()];
    for input in inputs.inputs() {
        args.push("-i".to_string());
        args.push(input.path.clone());
    }

    if let Some(graph) = compile_filter_graph(layers, &inputs, catalog)? {
        args.push("-filter_complex".to_string());
        args.push(graph.expression());
    }

    args.extend(simple_args(layers));
    args.extend(OUTPUT_OPTIONS.iter().map(|s| s.to_string()));
    args.push(output.to_string());

    tracing::debug!(args = args.len(), "assembled command");
    Ok(args)
}

fn simple_args(layers: &[Layer]) -> Vec<String> {
    let mut out = Vec::new();
    for layer in layers.iter().filter(|l| !l.is_complex()) {
        if let Layer::Trim(trim) = layer {
            out.extend([
                "-ss".to_string(),
                trim.start.clone(),
                "-to".to_string(),
                trim.end.clone(),
            ]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/command.rs"]
mod tests;
