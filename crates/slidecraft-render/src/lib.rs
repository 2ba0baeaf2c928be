//! Slidecraft Render Library
//!
//! Renderer abstraction for slide component elements, with an HTML markup
//! implementation.

pub mod markup;
mod renderer;

pub use markup::MarkupRenderer;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
