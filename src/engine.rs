//! External collaborators: engine filesystem, asset fetching and the transcoding engine.

/// Asset byte fetching.
pub mod fetch;
/// System `ffmpeg` engine.
pub mod ffmpeg;
/// Virtual filesystem implementations.
pub mod fs;
/// Engine trait and progress events.
pub mod run;
