//! Input types delivered to component views.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Modifiers with only shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Shift switches gestures into quantized mode: grid snap while dragging,
    /// π/8 steps while rotating, and independent axes while scaling.
    pub fn snap(&self) -> bool {
        self.shift
    }

    /// Ctrl or meta turns a press on a selected component into a deselect.
    pub fn toggles_selection(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// The delta-drag handles rendered on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaHandle {
    SkewX,
    SkewY,
    Rotate,
    Scale,
}

impl DeltaHandle {
    pub const ALL: [DeltaHandle; 4] = [
        DeltaHandle::SkewX,
        DeltaHandle::SkewY,
        DeltaHandle::Rotate,
        DeltaHandle::Scale,
    ];

    /// Value of the handle's `data-delta` marker.
    pub fn name(self) -> &'static str {
        match self {
            DeltaHandle::SkewX => "skewX",
            DeltaHandle::SkewY => "skewY",
            DeltaHandle::Rotate => "rotate",
            DeltaHandle::Scale => "scale",
        }
    }
}

/// Lifecycle event emitted by a delta-drag handle.
///
/// `delta` is the offset from the drag's own start point; `position` is the
/// absolute page coordinate of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaDrag {
    Start { position: Point },
    Move { position: Point, delta: Vec2 },
    Stop,
}
