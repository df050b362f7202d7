use std::collections::BTreeMap;

use crate::{
    foundation::core::{Geometry, LayerKind},
    foundation::error::{LayerfxError, LayerfxResult},
    layer::model::{
        CropLayer, FilterLayer, ImageLayer, Layer, StickerLayer, TextLayer, TextStyle, TrimLayer,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle to a layer as it was placed by an `add_*` call.
///
/// `position` is only valid until the next removal.
pub struct LayerRef {
    /// Position in the registry at insertion time.
    pub position: usize,
    /// Kind of the inserted layer.
    pub kind: LayerKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SingletonSlots {
    filter: bool,
    crop: bool,
    trim: bool,
}

impl SingletonSlots {
    fn slot_mut(&mut self, kind: LayerKind) -> Option<&mut bool> {
        match kind {
            LayerKind::Filter => Some(&mut self.filter),
            LayerKind::Crop => Some(&mut self.crop),
            LayerKind::Trim => Some(&mut self.trim),
            LayerKind::Image | LayerKind::Text | LayerKind::Sticker => None,
        }
    }

    fn is_taken(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Filter => self.filter,
            LayerKind::Crop => self.crop,
            LayerKind::Trim => self.trim,
            LayerKind::Image | LayerKind::Text | LayerKind::Sticker => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StickerSlot {
    custom_index: usize,
    refs: usize,
}

#[derive(Clone, Debug, Default)]
/// Ordered collection of editing layers.
///
/// The registry owns index allocation: image layers get `image_index` equal to the number
/// of image layers present, and sticker layers share one `custom_index` per distinct
/// sticker source. Filter, crop and trim layers are limited to one each.
pub struct LayerRegistry {
    layers: Vec<Layer>,
    singletons: SingletonSlots,
    stickers: BTreeMap<usize, StickerSlot>,
    image_count: usize,
}

impl LayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers in insertion order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterate layers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Layer at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Layer> {
        self.layers.get(position)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the registry holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of image layers currently present.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Whether a singleton layer of `kind` is present.
    pub fn has_singleton(&self, kind: LayerKind) -> bool {
        self.singletons.is_taken(kind)
    }

    /// Whether any layer belongs in the filter graph.
    pub fn has_complex(&self) -> bool {
        self.layers.iter().any(Layer::is_complex)
    }

    /// Add an image overlay staged under `staged_name`.
    pub fn add_image(
        &mut self,
        source: impl Into<String>,
        staged_name: impl Into<String>,
        geometry: Geometry,
    ) -> LayerRef {
        let image_index = self.image_count;
        self.image_count += 1;
        self.push(Layer::Image(ImageLayer {
            source: source.into(),
            staged_name: staged_name.into(),
            geometry,
            image_index,
        }))
    }

    /// Add a text layer at `(x, y)`.
    pub fn add_text(
        &mut self,
        x: impl ToString,
        y: impl ToString,
        text: impl Into<String>,
        style: TextStyle,
    ) -> LayerRef {
        self.push(Layer::Text(TextLayer {
            x: x.to_string(),
            y: y.to_string(),
            text: text.into(),
            style,
        }))
    }

    /// Add a sticker overlay from the sticker catalogue.
    ///
    /// Layers of the same `sticker_index` share a `custom_index`; a new source gets one
    /// past the largest index in use, or `0` when no sticker is present.
    pub fn add_sticker(&mut self, sticker_index: usize, geometry: Geometry) -> LayerRef {
        let next = self
            .stickers
            .values()
            .map(|s| s.custom_index + 1)
            .max()
            .unwrap_or(0);
        let slot = self.stickers.entry(sticker_index).or_insert(StickerSlot {
            custom_index: next,
            refs: 0,
        });
        slot.refs += 1;
        let custom_index = slot.custom_index;

        self.push(Layer::Sticker(StickerLayer {
            sticker_index,
            custom_index,
            geometry,
        }))
    }

    /// Add the colour filter. Fails with `DuplicateLayerKind` if one exists.
    pub fn add_filter(&mut self, filter_index: usize) -> LayerfxResult<LayerRef> {
        self.claim_singleton(LayerKind::Filter)?;
        Ok(self.push(Layer::Filter(FilterLayer { filter_index })))
    }

    /// Add the crop. Fails with `DuplicateLayerKind` if one exists.
    pub fn add_crop(&mut self, geometry: Geometry) -> LayerfxResult<LayerRef> {
        self.claim_singleton(LayerKind::Crop)?;
        Ok(self.push(Layer::Crop(CropLayer { geometry })))
    }

    /// Add the trim. Fails with `DuplicateLayerKind` if one exists.
    pub fn add_trim(
        &mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> LayerfxResult<LayerRef> {
        self.claim_singleton(LayerKind::Trim)?;
        Ok(self.push(Layer::Trim(TrimLayer {
            start: start.into(),
            end: end.into(),
        })))
    }

    /// Remove and return the layer at `position`.
    ///
    /// Indices of remaining layers are not renumbered.
    pub fn remove_layer(&mut self, position: usize) -> LayerfxResult<Layer> {
        if position >= self.layers.len() {
            return Err(LayerfxError::IndexOutOfRange {
                index: position,
                len: self.layers.len(),
            });
        }

        let removed = self.layers.remove(position);
        match &removed {
            Layer::Image(_) => self.image_count -= 1,
            Layer::Sticker(s) => {
                if let Some(slot) = self.stickers.get_mut(&s.sticker_index) {
                    slot.refs -= 1;
                    if slot.refs == 0 {
                        self.stickers.remove(&s.sticker_index);
                    }
                }
            }
            other => {
                if let Some(taken) = self.singletons.slot_mut(other.kind()) {
                    *taken = false;
                }
            }
        }

        tracing::debug!(position, kind = %removed.kind(), "removed layer");
        Ok(removed)
    }

    fn claim_singleton(&mut self, kind: LayerKind) -> LayerfxResult<()> {
        match self.singletons.slot_mut(kind) {
            Some(taken) if *taken => Err(LayerfxError::duplicate(kind)),
            Some(taken) => {
                *taken = true;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn push(&mut self, layer: Layer) -> LayerRef {
        let layer_ref = LayerRef {
            position: self.layers.len(),
            kind: layer.kind(),
        };
        tracing::debug!(position = layer_ref.position, kind = %layer_ref.kind, "added layer");
        self.layers.push(layer);
        layer_ref
    }
}

impl<'a> IntoIterator for &'a LayerRegistry {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/registry.rs"]
mod tests;
