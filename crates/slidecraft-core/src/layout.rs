//! Queries against the rendered element and its container.
//!
//! Gestures need a few facts only the rendering layer knows: where the
//! element sits on the page, how big it is, and the zoom applied by the
//! parent container. [`ElementLayout`] is that seam.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors parsing a container transform string.
#[derive(Debug, Error, PartialEq)]
pub enum TransformParseError {
    #[error("Not a matrix transform: {0}")]
    NotMatrix(String),
    #[error("Invalid scale component: {0}")]
    InvalidNumber(String),
}

/// Read the horizontal scale factor out of a `matrix(sx, ...)` transform.
pub fn parse_matrix_scale(transform: &str) -> Result<f64, TransformParseError> {
    let args = transform
        .trim()
        .strip_prefix("matrix(")
        .ok_or_else(|| TransformParseError::NotMatrix(transform.to_string()))?;
    let end = args.find([',', ')']).unwrap_or(args.len());
    let first = args[..end].trim();
    first
        .parse::<f64>()
        .map_err(|_| TransformParseError::InvalidNumber(first.to_string()))
}

/// Zoom factor of a container transform.
///
/// Missing, unparseable, zero or non-finite factors fall back to 1.
pub fn drag_scale_from_transform(transform: Option<&str>) -> f64 {
    let Some(transform) = transform else {
        return 1.0;
    };
    match parse_matrix_scale(transform) {
        Ok(scale) if scale.is_finite() && scale != 0.0 => scale,
        Ok(scale) => {
            log::debug!("Ignoring container scale {}", scale);
            1.0
        }
        Err(e) => {
            log::debug!("Container transform fallback: {}", e);
            1.0
        }
    }
}

/// Rendered geometry of a component element.
pub trait ElementLayout {
    /// Top-left corner of the element's bounding box in page coordinates.
    fn page_offset(&self) -> Point;

    /// Rendered (untransformed) size of the element.
    fn rendered_size(&self) -> Size;

    /// Computed transform of the parent container, e.g.
    /// `matrix(0.5, 0, 0, 0.5, 0, 0)`.
    fn parent_transform(&self) -> Option<&str>;

    /// Zoom factor of the parent container.
    fn drag_scale(&self) -> f64 {
        drag_scale_from_transform(self.parent_transform())
    }

    /// Centre of the element's bounding box in page coordinates.
    fn bounding_center(&self) -> Point {
        let size = self.rendered_size();
        self.page_offset() + Vec2::new(size.width / 2.0, size.height / 2.0)
    }
}

/// Fixed layout values, for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticLayout {
    pub page_offset: Point,
    pub size: Size,
    #[serde(default)]
    pub parent_transform: Option<String>,
}

impl StaticLayout {
    pub fn new(page_offset: Point, size: Size) -> Self {
        Self {
            page_offset,
            size,
            parent_transform: None,
        }
    }

    /// Set the container transform string.
    pub fn with_parent_transform(mut self, transform: impl Into<String>) -> Self {
        self.parent_transform = Some(transform.into());
        self
    }
}

impl ElementLayout for StaticLayout {
    fn page_offset(&self) -> Point {
        self.page_offset
    }

    fn rendered_size(&self) -> Size {
        self.size
    }

    fn parent_transform(&self) -> Option<&str> {
        self.parent_transform.as_deref()
    }
}
