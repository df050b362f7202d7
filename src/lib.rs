//! layerfx compiles a list of declarative editing layers into one `ffmpeg` invocation.
//!
//! Supported layers: image overlay, text, sticker overlay, colour filter, crop and trim.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: `add_*` / `remove_layer` on a [`LayerRegistry`] (indices are assigned here)
//! 2. **Enumerate**: layers -> auxiliary `-i` inputs with stable stream indices ([`InputPlan`])
//! 3. **Compile**: complex layers -> one `-filter_complex` expression ([`FilterGraph`])
//! 4. **Assemble**: inputs + graph + trim flags + fixed output options -> argument list
//! 5. **Run** (optional): [`MediaEditor`] stages assets through a [`VirtualFs`] and hands the
//!    arguments to an [`Engine`] such as [`FfmpegEngine`]
//!
//! Steps 1 to 4 are pure and synchronous. Asset staging and the engine run are async and happen
//! strictly one after the other.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compile;
mod config;
mod editor;
mod engine;
mod foundation;
mod layer;
mod project;

pub use assets::catalog::{AssetCatalog, DEFAULT_FILTERS, normalize_rel_path};
pub use compile::command::{OUTPUT_OPTIONS, assemble_command};
pub use compile::graph::{FilterGraph, compile_filter_graph};
pub use compile::inputs::{AuxInput, AuxSource, InputPlan, PRIMARY_STREAM, enumerate_inputs};
pub use config::EditorConfig;
pub use editor::MediaEditor;
pub use engine::fetch::{AssetFetcher, FsFetcher};
pub use engine::ffmpeg::{FfmpegEngine, is_ffmpeg_on_path};
pub use engine::fs::{DirFs, MemFs, VirtualFs};
pub use engine::run::{EditorEvent, Engine, ProgressFn};
pub use foundation::core::{Geometry, LayerKind, Priority};
pub use foundation::error::{LayerfxError, LayerfxResult};
pub use layer::model::{
    CropLayer, FilterLayer, ImageLayer, Layer, StickerLayer, TextLayer, TextStyle, TrimLayer,
};
pub use layer::registry::{LayerRef, LayerRegistry};
pub use project::{EditProject, LayerSpec};
