use std::fmt;

use crate::{
    assets::catalog::AssetCatalog,
    compile::inputs::{InputPlan, PRIMARY_STREAM},
    foundation::core::{Geometry, Priority},
    foundation::error::{LayerfxError, LayerfxResult},
    layer::model::{Layer, TextLayer},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Compiled `-filter_complex` expression, kept in its two fragment buckets.
///
/// Graph fragments (colour filter, image and sticker overlays) are labeled
/// sub-expressions joined with `;`. Chain fragments (crop, text) are plain filters joined
/// with `,` and applied in sequence to the graph's final output.
pub struct FilterGraph {
    graph: Vec<String>,
    chain: Vec<String>,
}

impl FilterGraph {
    /// Labeled overlay-chain fragments in compile order.
    pub fn graph_fragments(&self) -> &[String] {
        &self.graph
    }

    /// Sequential filters appended to the graph output.
    pub fn chain_fragments(&self) -> &[String] {
        &self.chain
    }

    /// Full expression passed after `-filter_complex`.
    pub fn expression(&self) -> String {
        let graph = self.graph.join(";");
        let chain = self.chain.join(",");
        match (graph.is_empty(), chain.is_empty()) {
            (false, false) => format!("{graph},{chain}"),
            (false, true) => graph,
            (true, _) => chain,
        }
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

/// Label the colour filter writes when overlays read from it.
const FILTERED_LABEL: &str = "[filtered]";

/// Output label of the most recent overlay-producing step.
///
/// Lives for one compile call only.
struct OverlayChain {
    current: String,
}

impl OverlayChain {
    fn new() -> Self {
        Self {
            current: format!("[{PRIMARY_STREAM}]"),
        }
    }

    /// Emit `scale` + `overlay` for one auxiliary stream and advance the chain.
    ///
    /// The last overlay is left unlabeled so it becomes the graph's output.
    fn overlay(
        &mut self,
        stream: usize,
        geometry: &Geometry,
        scaled: String,
        out: String,
        is_last: bool,
    ) -> String {
        let Geometry {
            width,
            height,
            x,
            y,
        } = geometry;
        let out_label = if is_last { "" } else { out.as_str() };
        let fragment = format!(
            "[{stream}]scale={width}x{height}{scaled};{base}{scaled}overlay={x}:{y}{out_label}",
            base = self.current,
        );
        if !is_last {
            self.current = out;
        }
        fragment
    }
}

/// Compile the complex layers of `layers` into one filter-graph expression.
///
/// Returns `None` when no layer belongs in the filter graph. Geometry, colours and text
/// are inserted verbatim; only catalogue lookups can fail.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn compile_filter_graph(
    layers: &[Layer],
    inputs: &InputPlan,
    catalog: &AssetCatalog,
) -> LayerfxResult<Option<FilterGraph>> {
    let mut complex: Vec<(usize, &Layer)> = layers
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_complex())
        .collect();
    if complex.is_empty() {
        return Ok(None);
    }
    // Stable: equal priorities keep registry order.
    complex.sort_by_key(|(_, l)| l.priority());

    let overlay_total = complex
        .iter()
        .filter(|(_, l)| matches!(l, Layer::Image(_) | Layer::Sticker(_)))
        .count();
    // The filter output is labeled whenever any medium-priority layer exists in the
    // snapshot, not only when an overlay structurally follows it.
    let has_medium = layers.iter().any(|l| l.priority() == Priority::Medium);

    let mut out = FilterGraph::default();
    let mut chain = OverlayChain::new();
    let mut overlays_seen = 0usize;

    for (i, (position, layer)) in complex.into_iter().enumerate() {
        match layer {
            Layer::Crop(crop) => {
                let Geometry {
                    width,
                    height,
                    x,
                    y,
                } = &crop.geometry;
                out.chain.push(format!("crop={width}:{height}:{x}:{y}"));
            }
            Layer::Text(text) => {
                out.chain.push(drawtext(text, catalog)?);
            }
            Layer::Filter(filter) => {
                let expr = catalog.filter(filter.filter_index)?;
                let label = if has_medium { FILTERED_LABEL } else { "" };
                out.graph.push(format!("[{PRIMARY_STREAM}]{expr}{label}"));
                if has_medium {
                    chain.current = FILTERED_LABEL.to_string();
                }
            }
            Layer::Image(image) => {
                overlays_seen += 1;
                let stream = inputs.image_stream(position).ok_or_else(|| {
                    LayerfxError::asset(format!(
                        "no input stream for image layer at position {position}"
                    ))
                })?;
                out.graph.push(chain.overlay(
                    stream,
                    &image.geometry,
                    format!("[img{i}]"),
                    format!("[ov_img{i}]"),
                    overlays_seen == overlay_total,
                ));
            }
            Layer::Sticker(sticker) => {
                overlays_seen += 1;
                let stream = inputs.sticker_stream(sticker.sticker_index).ok_or_else(|| {
                    LayerfxError::asset(format!(
                        "no input stream for sticker {}",
                        sticker.sticker_index
                    ))
                })?;
                out.graph.push(chain.overlay(
                    stream,
                    &sticker.geometry,
                    format!("[sticker{i}]"),
                    format!("[ov_sticker{i}]"),
                    overlays_seen == overlay_total,
                ));
            }
            Layer::Trim(_) => {}
        }
        tracing::debug!(step = i, kind = %layer.kind(), "compiled layer");
    }

    Ok(Some(out))
}

fn drawtext(text: &TextLayer, catalog: &AssetCatalog) -> LayerfxResult<String> {
    let font = catalog.font(text.style.font_index)?;
    let s = &text.style;
    Ok(format!(
        "drawtext=fontfile={font}:text={}:fontcolor={}:fontsize={}:box=1:boxcolor={}@1:boxborderw={}:x={}:y={}",
        text.text, s.font_color, s.font_size, s.background_color, s.border_width, text.x, text.y
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/graph.rs"]
mod tests;
