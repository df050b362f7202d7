use std::collections::{BTreeMap, HashMap};

use crate::{
    assets::catalog::{AssetCatalog, normalize_rel_path},
    foundation::error::{LayerfxError, LayerfxResult},
    layer::model::Layer,
};

/// Stream index of the primary media input.
pub const PRIMARY_STREAM: usize = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
/// What an auxiliary input stream carries.
pub enum AuxSource {
    /// An image layer's staged file.
    Image {
        /// Registry position of the image layer.
        position: usize,
    },
    /// A distinct sticker from the catalogue.
    Sticker {
        /// Catalogue index shared by all layers of this sticker.
        sticker_index: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One `-i` input after the primary media.
pub struct AuxInput {
    /// Engine stream index (`[n]` in the filter graph).
    pub stream: usize,
    /// Staged file name passed after `-i`.
    pub path: String,
    /// Origin of the input.
    pub source: AuxSource,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Auxiliary inputs and the stream index every overlay layer reads from.
pub struct InputPlan {
    inputs: Vec<AuxInput>,
    image_streams: HashMap<usize, usize>,
    sticker_streams: BTreeMap<usize, usize>,
}

impl InputPlan {
    /// Auxiliary inputs in command-line order.
    pub fn inputs(&self) -> &[AuxInput] {
        &self.inputs
    }

    /// Stream index for the image layer at registry `position`.
    pub fn image_stream(&self, position: usize) -> Option<usize> {
        self.image_streams.get(&position).copied()
    }

    /// Stream index for sticker source `sticker_index`.
    pub fn sticker_stream(&self, sticker_index: usize) -> Option<usize> {
        self.sticker_streams.get(&sticker_index).copied()
    }
}

/// Derive auxiliary inputs from a layer snapshot.
///
/// Stream `0` is the primary media. Image layers follow in registry order, then one
/// input per distinct sticker source in order of first occurrence.
pub fn enumerate_inputs(layers: &[Layer], catalog: &AssetCatalog) -> LayerfxResult<InputPlan> {
    let mut plan = InputPlan::default();
    let mut next_stream = PRIMARY_STREAM + 1;

    for (position, layer) in layers.iter().enumerate() {
        let Layer::Image(image) = layer else {
            continue;
        };
        let path = normalize_rel_path(&image.staged_name).map_err(|e| {
            LayerfxError::asset(format!("image '{}': {e}", image.staged_name))
        })?;
        plan.image_streams.insert(position, next_stream);
        plan.inputs.push(AuxInput {
            stream: next_stream,
            path,
            source: AuxSource::Image { position },
        });
        next_stream += 1;
    }

    for layer in layers {
        let Layer::Sticker(sticker) = layer else {
            continue;
        };
        if plan.sticker_streams.contains_key(&sticker.sticker_index) {
            continue;
        }
        plan.sticker_streams.insert(sticker.sticker_index, next_stream);
        plan.inputs.push(AuxInput {
            stream: next_stream,
            path: catalog.sticker(sticker.sticker_index)?,
            source: AuxSource::Sticker {
                sticker_index: sticker.sticker_index,
            },
        });
        next_stream += 1;
    }

    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/inputs.rs"]
mod tests;
