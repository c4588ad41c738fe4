//! Changelog rendering and writing.

pub mod format;
pub mod writer;

pub use format::render;
pub use writer::prepend;
