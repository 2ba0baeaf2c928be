//! Renderer trait abstraction.

use slidecraft_core::input::DeltaHandle;
use slidecraft_core::view::ViewSurface;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error, PartialEq)]
pub enum RendererError {
    #[error("Invalid class name: {0:?}")]
    InvalidClass(String),
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for rendering one component element.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Rendered state of the component.
    pub surface: &'a ViewSurface,
    /// Markup of the component's content, inserted as-is.
    pub inner_html: &'a str,
    /// Delta-drag handles to emit.
    pub handles: &'a [DeltaHandle],
    /// Whether to emit the x/y coordinate inputs.
    pub position_inputs: bool,
    /// Whether to emit the remove button.
    pub remove_button: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context with every handle, the inputs and the remove button.
    pub fn new(surface: &'a ViewSurface) -> Self {
        Self {
            surface,
            inner_html: "",
            handles: &DeltaHandle::ALL,
            position_inputs: true,
            remove_button: true,
        }
    }

    /// Set the content markup.
    pub fn with_inner_html(mut self, html: &'a str) -> Self {
        self.inner_html = html;
        self
    }

    /// Set the handles to emit.
    pub fn with_handles(mut self, handles: &'a [DeltaHandle]) -> Self {
        self.handles = handles;
        self
    }

    pub fn with_position_inputs(mut self, show: bool) -> Self {
        self.position_inputs = show;
        self
    }

    pub fn with_remove_button(mut self, show: bool) -> Self {
        self.remove_button = show;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Render one component element into the backend's output.
    fn render_component(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Render several elements, stopping at the first error.
    fn render_all(&mut self, contexts: &[RenderContext]) -> RenderResult<()> {
        for ctx in contexts {
            self.render_component(ctx)?;
        }
        Ok(())
    }
}
