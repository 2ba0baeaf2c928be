//! Gesture sessions and the geometry that turns pointer input into
//! transform parameters.
//!
//! A [`GestureSession`] holds everything snapshotted at gesture start. The
//! free functions compute the new attribute value for a move event from that
//! snapshot, so the result never depends on how the pointer path was chunked
//! into move events.

use crate::component::{Attribute, Scale};
use crate::snap::{normalize_angle, quantize_angle, snap_to_grid};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The transform dimension a gesture drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Drag,
    Rotate,
    SkewX,
    SkewY,
    Scale,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureKind::Drag => "drag",
            GestureKind::Rotate => "rotate",
            GestureKind::SkewX => "skewX",
            GestureKind::SkewY => "skewY",
            GestureKind::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// Skew axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkewAxis {
    X,
    Y,
}

impl SkewAxis {
    /// Attribute the axis writes.
    pub fn attribute(self) -> Attribute {
        match self {
            SkewAxis::X => Attribute::SkewX,
            SkewAxis::Y => Attribute::SkewY,
        }
    }

    /// Component of a drag delta that drives this axis.
    pub fn along(self, delta: Vec2) -> f64 {
        match self {
            SkewAxis::X => delta.x,
            SkewAxis::Y => delta.y,
        }
    }

    pub fn kind(self) -> GestureKind {
        match self {
            SkewAxis::X => GestureKind::SkewX,
            SkewAxis::Y => GestureKind::SkewY,
        }
    }
}

/// Reference pixel box of a scale gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDim {
    pub width: f64,
    pub height: f64,
    /// Rotation of the component at gesture start.
    pub theta: f64,
}

impl ScaleDim {
    /// Scaled pixel box for `scale` applied to `orig_size`.
    pub fn new(scale: Scale, orig_size: Size, theta: f64) -> Self {
        Self {
            width: scale.x * orig_size.width,
            height: scale.y * orig_size.height,
            theta,
        }
    }
}

/// State snapshotted at gesture start, owned by the view until stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSession {
    Drag {
        start_position: Point,
        start_pointer: Point,
        drag_scale: f64,
    },
    Rotate {
        initial: f64,
        origin: Point,
        offset: f64,
    },
    Skew {
        axis: SkewAxis,
        initial: f64,
    },
    Scale {
        initial: Scale,
        drag_scale: f64,
        orig_size: Option<Size>,
        dim: ScaleDim,
    },
}

impl GestureSession {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureSession::Drag { .. } => GestureKind::Drag,
            GestureSession::Rotate { .. } => GestureKind::Rotate,
            GestureSession::Skew { axis, .. } => axis.kind(),
            GestureSession::Scale { .. } => GestureKind::Scale,
        }
    }
}

/// New position for a drag.
///
/// The pointer delta is divided by the container zoom so a screen-space
/// distance maps to the same model-space distance at any zoom level.
pub fn drag_target(
    start_position: Point,
    start_pointer: Point,
    pointer: Point,
    drag_scale: f64,
    grid: Option<f64>,
) -> Point {
    let delta = pointer - start_pointer;
    let target = start_position + delta / drag_scale;
    match grid {
        Some(grid_size) => snap_to_grid(target, grid_size),
        None => target,
    }
}

/// Angle of `point` around `origin`, in radians.
pub fn angle_from(origin: Point, point: Point) -> f64 {
    (point.y - origin.y).atan2(point.x - origin.x)
}

/// New rotation for a rotate gesture, reduced into (-2π, 2π).
///
/// Zero net pointer rotation yields `initial` exactly.
pub fn rotation_target(initial: f64, offset: f64, current: f64, steps: Option<f64>) -> f64 {
    let mut angle = initial + (current - offset);
    if let Some(steps) = steps {
        angle = quantize_angle(angle, steps);
    }
    normalize_angle(angle)
}

/// New skew angle: the drag distance turned into an angle via `atan2`, so
/// the response decelerates as the drag grows.
pub fn skew_target(initial: f64, distance: f64, sensitivity: f64) -> f64 {
    initial + distance.atan2(sensitivity)
}

/// Smallest scale factor a scale gesture can produce.
pub const MIN_SCALE: f64 = 0.01;

/// Proportional factor for an extent grown by `delta`. A degenerate extent
/// yields 1.
fn scale_factor(delta: f64, extent: f64) -> f64 {
    if extent == 0.0 || !extent.is_finite() {
        return 1.0;
    }
    (delta + extent) / extent
}

/// New scale for a scale gesture.
///
/// By default both axes follow the horizontal factor so the aspect ratio is
/// kept; `ratio_unlocked` lets the vertical axis follow its own delta.
/// Each axis is clamped to at least [`MIN_SCALE`] so the box never
/// collapses to zero.
pub fn scale_target(
    initial: Scale,
    dim: ScaleDim,
    orig_size: Option<Size>,
    delta: Vec2,
    ratio_unlocked: bool,
) -> Scale {
    let scale_x = scale_factor(delta.x, dim.width);
    let scale_y = scale_factor(delta.y, dim.height);
    let y_factor = if ratio_unlocked { scale_y } else { scale_x };
    Scale::derived(
        (initial.x * scale_x).max(MIN_SCALE),
        (initial.y * y_factor).max(MIN_SCALE),
        orig_size,
    )
}
