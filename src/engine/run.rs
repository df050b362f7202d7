use crate::{engine::fs::VirtualFs, foundation::error::LayerfxResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Progress notification delivered to the editor's callback.
pub enum EditorEvent {
    /// Asset staging started.
    LoadingAssets,
    /// One asset was written to the engine filesystem.
    AssetStaged {
        /// Staged name.
        name: String,
    },
    /// The engine was started with the assembled command.
    Transcoding,
    /// A log line from the engine (only forwarded when logging is enabled).
    EngineLog(String),
    /// The engine finished successfully.
    Completed,
}

/// Progress/log callback.
pub type ProgressFn = dyn Fn(&EditorEvent) + Send + Sync;

/// External transcoding engine.
///
/// The engine owns the filesystem its inputs are staged in and its output is read from.
#[async_trait::async_trait]
pub trait Engine: Send {
    /// Filesystem the engine reads inputs from and writes output to.
    type Fs: VirtualFs;

    /// Borrow the engine filesystem.
    fn fs(&self) -> &Self::Fs;

    /// Mutably borrow the engine filesystem.
    fn fs_mut(&mut self) -> &mut Self::Fs;

    /// Run one invocation with `args`. Log lines go to `progress` when given.
    async fn run(&mut self, args: &[String], progress: Option<&ProgressFn>) -> LayerfxResult<()>;
}
