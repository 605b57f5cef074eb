//! Labeled corpus loading from directory trees.

pub mod loader;

pub use loader::CorpusLoader;
