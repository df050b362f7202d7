use std::collections::BTreeMap;

use crate::{
    assets::catalog::normalize_rel_path,
    compile::command::assemble_command,
    config::EditorConfig,
    engine::fetch::AssetFetcher,
    engine::fs::VirtualFs,
    engine::run::{EditorEvent, Engine, ProgressFn},
    foundation::core::Geometry,
    foundation::error::{LayerfxError, LayerfxResult},
    layer::model::{Layer, TextStyle},
    layer::registry::{LayerRef, LayerRegistry},
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct PrimaryInput {
    source: String,
    staged_name: String,
}

/// Layer-based media editor driving one external engine.
///
/// Typical flow:
/// 1. [`MediaEditor::init`] stages the primary media.
/// 2. `add_*` / [`MediaEditor::remove_layer`] edit the layer registry.
/// 3. [`MediaEditor::run`] stages every referenced asset, one at a time, then runs the
///    engine with the assembled command.
/// 4. [`MediaEditor::output`] reads the produced file.
///
/// Failures during `run` leave the registry untouched; already staged assets stay staged.
pub struct MediaEditor<E: Engine, F: AssetFetcher> {
    config: EditorConfig,
    engine: E,
    fetcher: F,
    registry: LayerRegistry,
    progress: Option<Box<ProgressFn>>,
    input: Option<PrimaryInput>,
    has_run: bool,
}

impl<E: Engine, F: AssetFetcher> MediaEditor<E, F> {
    /// Create an editor with no input and no layers.
    pub fn new(config: EditorConfig, engine: E, fetcher: F) -> Self {
        Self {
            config,
            engine,
            fetcher,
            registry: LayerRegistry::new(),
            progress: None,
            input: None,
            has_run: false,
        }
    }

    /// Install a progress/log callback.
    pub fn with_progress(mut self, f: impl Fn(&EditorEvent) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Editor configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current layers.
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Source the primary input was fetched from, once initialized.
    pub fn input_source(&self) -> Option<&str> {
        self.input.as_ref().map(|i| i.source.as_str())
    }

    /// Asset fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Replace all layers, e.g. with a registry built from an [`crate::EditProject`].
    pub fn set_registry(&mut self, registry: LayerRegistry) {
        self.registry = registry;
    }

    /// Fetch the primary media from `source` and stage it as `file_name`.
    #[tracing::instrument(skip(self))]
    pub async fn init(&mut self, source: &str, file_name: &str) -> LayerfxResult<()> {
        let staged_name = normalize_rel_path(file_name)
            .map_err(|e| LayerfxError::asset(format!("input '{file_name}': {e}")))?;
        self.stage(source, &staged_name).await?;
        self.input = Some(PrimaryInput {
            source: source.to_string(),
            staged_name,
        });
        self.has_run = false;
        tracing::info!("input staged");
        Ok(())
    }

    /// Add an image overlay fetched from `source` and staged as `staged_name`.
    pub fn add_image(
        &mut self,
        source: impl Into<String>,
        staged_name: impl Into<String>,
        geometry: Geometry,
    ) -> LayerRef {
        self.registry.add_image(source, staged_name, geometry)
    }

    /// Add a text layer.
    pub fn add_text(
        &mut self,
        x: impl ToString,
        y: impl ToString,
        text: impl Into<String>,
        style: TextStyle,
    ) -> LayerRef {
        self.registry.add_text(x, y, text, style)
    }

    /// Add a sticker overlay.
    pub fn add_sticker(&mut self, sticker_index: usize, geometry: Geometry) -> LayerRef {
        self.registry.add_sticker(sticker_index, geometry)
    }

    /// Add the colour filter; a second one is rejected.
    pub fn add_filter(&mut self, filter_index: usize) -> LayerfxResult<LayerRef> {
        report_duplicate(self.registry.add_filter(filter_index))
    }

    /// Add the crop; a second one is rejected.
    pub fn add_crop(&mut self, geometry: Geometry) -> LayerfxResult<LayerRef> {
        report_duplicate(self.registry.add_crop(geometry))
    }

    /// Add the trim; a second one is rejected.
    pub fn add_trim(
        &mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> LayerfxResult<LayerRef> {
        report_duplicate(self.registry.add_trim(start, end))
    }

    /// Remove the layer at `position`.
    pub fn remove_layer(&mut self, position: usize) -> LayerfxResult<Layer> {
        self.registry.remove_layer(position)
    }

    /// Engine arguments for the current layers.
    pub fn command(&self) -> LayerfxResult<Vec<String>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| LayerfxError::not_ready("no input staged; call init first"))?;
        assemble_command(
            &input.staged_name,
            &self.registry,
            &self.config.catalog,
            &self.config.output_file,
        )
    }

    /// Stage all referenced assets and run the engine.
    #[tracing::instrument(skip(self), fields(layers = self.registry.len()))]
    pub async fn run(&mut self) -> LayerfxResult<()> {
        self.has_run = false;
        let args = self.command()?;

        tracing::info!("loading assets");
        self.emit(EditorEvent::LoadingAssets);
        self.load_assets().await?;

        tracing::info!("starting transcode");
        self.emit(EditorEvent::Transcoding);
        let log = if self.config.log {
            self.progress.as_deref()
        } else {
            None
        };
        self.engine.run(&args, log).await?;

        self.has_run = true;
        tracing::info!("transcode completed");
        self.emit(EditorEvent::Completed);
        Ok(())
    }

    /// Bytes of the produced output file.
    ///
    /// Fails with `NotReady` until a run has completed successfully.
    pub fn output(&self) -> LayerfxResult<Vec<u8>> {
        if self.input.is_none() {
            return Err(LayerfxError::not_ready("no input staged"));
        }
        if !self.has_run {
            return Err(LayerfxError::not_ready("no successful run has completed"));
        }
        self.engine.fs().read(&self.config.output_file)
    }

    /// Stage image files, then each distinct font, then each distinct sticker.
    ///
    /// Every staged name must come from exactly one source, the primary input included;
    /// a clash fails before anything is fetched.
    async fn load_assets(&mut self) -> LayerfxResult<()> {
        let mut jobs: Vec<(String, String)> = Vec::new();
        let mut fonts: Vec<usize> = Vec::new();
        let mut stickers: Vec<usize> = Vec::new();

        for layer in &self.registry {
            match layer {
                Layer::Image(image) => {
                    let name = normalize_rel_path(&image.staged_name).map_err(|e| {
                        LayerfxError::asset(format!("image '{}': {e}", image.staged_name))
                    })?;
                    jobs.push((image.source.clone(), name));
                }
                Layer::Text(text) if !fonts.contains(&text.style.font_index) => {
                    fonts.push(text.style.font_index);
                }
                Layer::Sticker(s) if !stickers.contains(&s.sticker_index) => {
                    stickers.push(s.sticker_index);
                }
                _ => {}
            }
        }
        // Lookups fail before indexing for unknown catalogue entries.
        for index in fonts {
            let name = self.config.catalog.font(index)?;
            jobs.push((self.config.catalog.fonts[index].clone(), name));
        }
        for index in stickers {
            let name = self.config.catalog.sticker(index)?;
            jobs.push((self.config.catalog.stickers[index].clone(), name));
        }

        let mut owners: BTreeMap<String, String> = BTreeMap::new();
        if let Some(input) = &self.input {
            owners.insert(input.staged_name.clone(), input.source.clone());
        }
        let output = normalize_rel_path(&self.config.output_file)?;
        let mut pending = Vec::with_capacity(jobs.len());
        for (source, name) in jobs {
            if name == output {
                return Err(LayerfxError::validation(format!(
                    "'{source}' would be staged over the output file '{output}'"
                )));
            }
            match owners.get(&name) {
                Some(owner) if *owner == source => continue,
                Some(owner) => {
                    return Err(LayerfxError::validation(format!(
                        "staged name '{name}' is claimed by both '{owner}' and '{source}'"
                    )));
                }
                None => {
                    owners.insert(name.clone(), source.clone());
                    pending.push((source, name));
                }
            }
        }

        for (source, name) in pending {
            self.stage(&source, &name).await?;
        }
        Ok(())
    }

    async fn stage(&mut self, source: &str, name: &str) -> LayerfxResult<()> {
        let bytes = self.fetcher.fetch(source).await?;
        self.engine
            .fs_mut()
            .write(name, &bytes)
            .map_err(|e| LayerfxError::asset(format!("stage '{name}': {e}")))?;
        tracing::debug!(source, name, bytes = bytes.len(), "staged asset");
        self.emit(EditorEvent::AssetStaged {
            name: name.to_string(),
        });
        Ok(())
    }

    fn emit(&self, event: EditorEvent) {
        if let Some(cb) = self.progress.as_deref() {
            cb(&event);
        }
    }
}

fn report_duplicate(res: LayerfxResult<LayerRef>) -> LayerfxResult<LayerRef> {
    if let Err(LayerfxError::DuplicateLayerKind { kind }) = &res {
        tracing::warn!(%kind, "layer already added; keeping the existing one");
    }
    res
}
