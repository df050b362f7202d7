use std::fmt;

use serde::Deserialize as _;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Graph-construction order of a layer. Lower values are compiled first.
pub enum Priority {
    /// Global adjustments that must see the untouched primary stream.
    High = 0,
    /// Overlay-producing layers.
    Medium = 1,
    /// Final per-frame filters applied to the composed output.
    Low = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Discriminant of a [`crate::Layer`] without its payload.
pub enum LayerKind {
    /// Image file overlay.
    Image,
    /// Drawn text.
    Text,
    /// Catalogue sticker overlay.
    Sticker,
    /// Catalogue colour filter.
    Filter,
    /// Output crop.
    Crop,
    /// Start/end trim.
    Trim,
}

impl LayerKind {
    /// Lowercase name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Sticker => "sticker",
            Self::Filter => "filter",
            Self::Crop => "crop",
            Self::Trim => "trim",
        }
    }

    /// Whether at most one layer of this kind may exist at a time.
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Filter | Self::Crop | Self::Trim)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Size and placement of a rectangle in the engine's expression grammar.
///
/// Values are kept as text so engine expressions such as `iw/2` or `(W-w)/2` pass
/// through unchanged.
pub struct Geometry {
    /// Width expression.
    #[serde(deserialize_with = "de_text")]
    pub width: String,
    /// Height expression.
    #[serde(deserialize_with = "de_text")]
    pub height: String,
    /// Horizontal start.
    #[serde(deserialize_with = "de_text")]
    pub x: String,
    /// Vertical start.
    #[serde(deserialize_with = "de_text")]
    pub y: String,
}

impl Geometry {
    /// Build a geometry from anything displayable as text.
    pub fn new(
        width: impl ToString,
        height: impl ToString,
        x: impl ToString,
        y: impl ToString,
    ) -> Self {
        Self {
            width: width.to_string(),
            height: height.to_string(),
            x: x.to_string(),
            y: y.to_string(),
        }
    }
}

/// Deserialize an engine expression given either as a JSON string or a number.
pub(crate) fn de_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Uint(u64),
        Float(f64),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Str(s) => s,
        Raw::Int(v) => v.to_string(),
        Raw::Uint(v) => v.to_string(),
        Raw::Float(v) => v.to_string(),
    })
}
