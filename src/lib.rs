//! door-audio — batch preparation of spoken-word WAV assets.
//!
//! All line-table, synthesis, and renumbering logic lives here.
//! The `generate-audio` and `prepare-audio` binaries are thin CLI
//! front-ends over this crate.

pub mod discover;
pub mod lines;
pub mod renumber;
pub mod speech;
