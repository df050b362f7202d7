//! Layer-to-command compilation.
//!
//! [`inputs`] numbers the auxiliary streams, [`graph`] builds the `-filter_complex`
//! expression against that numbering, and [`command`] assembles the final argument list.

/// Command assembly.
pub mod command;
/// Filter graph compiler.
pub mod graph;
/// Auxiliary input enumeration.
pub mod inputs;
