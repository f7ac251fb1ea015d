use crate::foundation::error::{VizError, VizResult};
use crate::render::project::project_frame;
use crate::render::text::TextRenderer;
use crate::render::view::FrameView;
use crate::scene::model::Frame;

/// Turns a [`FrameView`] into output for the user.
///
/// Most callers go through [`render_frame`], which projects the frame first.
pub trait FrameRenderer {
    /// Render an already projected frame.
    fn render(&self, view: &FrameView) -> VizResult<String>;
}

/// Available output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON display model.
    Json,
}

/// Serializes the display model as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer;

impl FrameRenderer for JsonRenderer {
    fn render(&self, view: &FrameView) -> VizResult<String> {
        serde_json::to_string_pretty(view).map_err(|e| VizError::serde(e.to_string()))
    }
}

/// Create a renderer for `format`.
pub fn create_renderer(format: OutputFormat) -> Box<dyn FrameRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new()),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Project and render one frame.
pub fn render_frame(frame: &Frame, renderer: &dyn FrameRenderer) -> VizResult<String> {
    renderer.render(&project_frame(frame))
}
