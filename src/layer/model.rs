use crate::foundation::core::{Geometry, LayerKind, Priority, de_text};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One editing operation in a [`crate::LayerRegistry`].
///
/// Indices (`image_index`, `custom_index`) are assigned by the registry when the layer
/// is added; layer values are immutable afterwards.
pub enum Layer {
    /// Image file scaled and overlaid on the video.
    Image(ImageLayer),
    /// Text drawn on the video.
    Text(TextLayer),
    /// Catalogue sticker scaled and overlaid on the video.
    Sticker(StickerLayer),
    /// Catalogue colour filter applied to the primary stream.
    Filter(FilterLayer),
    /// Crop of the composed output.
    Crop(CropLayer),
    /// Start/end trim, expressed as plain flags rather than inside the filter graph.
    Trim(TrimLayer),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Image`].
pub struct ImageLayer {
    /// Where the image bytes are fetched from.
    pub source: String,
    /// Name the image is staged under in the engine filesystem.
    pub staged_name: String,
    /// Scaled size and overlay position.
    pub geometry: Geometry,
    /// Count of image layers present when this one was added.
    pub image_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Styling of a text layer.
pub struct TextStyle {
    /// Font size expression.
    #[serde(deserialize_with = "de_text")]
    pub font_size: String,
    /// Font colour name or hex.
    pub font_color: String,
    /// Index into the font catalogue.
    pub font_index: usize,
    /// Box colour behind the text, without alpha qualifier.
    pub background_color: String,
    /// Box border width.
    #[serde(deserialize_with = "de_text")]
    pub border_width: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: "24".to_string(),
            font_color: "black".to_string(),
            font_index: 0,
            background_color: "white".to_string(),
            border_width: "0".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Text`].
pub struct TextLayer {
    /// Horizontal start.
    pub x: String,
    /// Vertical start.
    pub y: String,
    /// Text to draw, passed verbatim.
    pub text: String,
    /// Font and box styling.
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Sticker`].
pub struct StickerLayer {
    /// Index into the sticker catalogue.
    pub sticker_index: usize,
    /// Stable per-source index shared by every layer of the same sticker.
    pub custom_index: usize,
    /// Scaled size and overlay position.
    pub geometry: Geometry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Filter`].
pub struct FilterLayer {
    /// Index into the filter catalogue.
    pub filter_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Crop`].
pub struct CropLayer {
    /// Crop size and origin.
    pub geometry: Geometry,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Payload of [`Layer::Trim`].
pub struct TrimLayer {
    /// Start position (`-ss`).
    pub start: String,
    /// End position (`-to`).
    pub end: String,
}

impl Layer {
    /// Kind discriminant.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Image(_) => LayerKind::Image,
            Self::Text(_) => LayerKind::Text,
            Self::Sticker(_) => LayerKind::Sticker,
            Self::Filter(_) => LayerKind::Filter,
            Self::Crop(_) => LayerKind::Crop,
            Self::Trim(_) => LayerKind::Trim,
        }
    }

    /// Order in which the graph compiler processes this layer.
    pub fn priority(&self) -> Priority {
        match self.kind() {
            LayerKind::Filter => Priority::High,
            LayerKind::Image | LayerKind::Sticker => Priority::Medium,
            LayerKind::Text | LayerKind::Crop | LayerKind::Trim => Priority::Low,
        }
    }

    /// Whether the layer is expressed inside the filter graph.
    pub fn is_complex(&self) -> bool {
        !matches!(self, Self::Trim(_))
    }
}
