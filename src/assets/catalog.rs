use crate::foundation::error::{LayerfxError, LayerfxResult};

/// Default hue-rotation filter catalogue.
pub const DEFAULT_FILTERS: [&str; 6] = [
    "hue=h=-60",
    "hue=h=0",
    "hue=h=60",
    "hue=h=120",
    "hue=h=180",
    "hue=h=240",
];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Indexed asset lists that layers refer to by position.
///
/// Font and sticker entries are relative asset paths; they are fetched from that path and
/// staged in the engine filesystem under its normalized form. Filter entries are
/// filter-graph expressions inserted verbatim.
pub struct AssetCatalog {
    /// Font files, indexed by `TextStyle::font_index`.
    #[serde(default = "default_fonts")]
    pub fonts: Vec<String>,
    /// Sticker images, indexed by `StickerLayer::sticker_index`.
    #[serde(default = "default_stickers")]
    pub stickers: Vec<String>,
    /// Colour filter expressions, indexed by `FilterLayer::filter_index`.
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            fonts: default_fonts(),
            stickers: default_stickers(),
            filters: default_filters(),
        }
    }
}

fn default_fonts() -> Vec<String> {
    vec!["font.ttf".to_string()]
}

fn default_stickers() -> Vec<String> {
    vec!["logo.png".to_string()]
}

fn default_filters() -> Vec<String> {
    DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect()
}

impl AssetCatalog {
    /// Staged name of the font at `index`.
    pub fn font(&self, index: usize) -> LayerfxResult<String> {
        lookup_path("font", &self.fonts, index)
    }

    /// Staged name of the sticker at `index`.
    pub fn sticker(&self, index: usize) -> LayerfxResult<String> {
        lookup_path("sticker", &self.stickers, index)
    }

    /// Filter expression at `index`.
    pub fn filter(&self, index: usize) -> LayerfxResult<&str> {
        self.filters.get(index).map(String::as_str).ok_or_else(|| {
            LayerfxError::asset(format!(
                "filter index {index} is not in the catalogue ({} entries)",
                self.filters.len()
            ))
        })
    }

    /// Check every font and sticker path normalizes.
    pub fn validate(&self) -> LayerfxResult<()> {
        for p in self.fonts.iter().chain(&self.stickers) {
            normalize_rel_path(p)?;
        }
        Ok(())
    }
}

fn lookup_path(what: &str, list: &[String], index: usize) -> LayerfxResult<String> {
    let raw = list.get(index).ok_or_else(|| {
        LayerfxError::asset(format!(
            "{what} index {index} is not in the catalogue ({} entries)",
            list.len()
        ))
    })?;
    normalize_rel_path(raw).map_err(|e| LayerfxError::asset(format!("{what} {index}: {e}")))
}

/// Normalize an asset path into the name it is staged under.
///
/// Backslashes become `/`, a leading `/` and `.` segments are dropped; `..` is rejected.
pub fn normalize_rel_path(source: &str) -> LayerfxResult<String> {
    let s = source.replace('\\', "/");
    if s.trim().is_empty() {
        return Err(LayerfxError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LayerfxError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LayerfxError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
