//! Frame rendering: a pure projection into a display model, and renderers for that model.

/// Renderer trait and output formats.
pub mod backend;
pub(crate) mod cell;
/// Type-tag dispatch from frame objects to display bodies.
pub mod project;
/// Plain-text renderer.
pub mod text;
/// Display model types.
pub mod view;
