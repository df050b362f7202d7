//! Asset catalogues and staged-name normalization.

/// Indexed font, sticker and filter catalogues.
pub mod catalog;
