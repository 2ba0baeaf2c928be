//! Slidecraft Core Library
//!
//! Direct-manipulation editing of slide components: drag, rotate, skew,
//! scale and select gestures, synchronized with the component model and an
//! undo history.

pub mod commands;
pub mod component;
pub mod config;
pub mod events;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod slide;
pub mod snap;
pub mod transform;
pub mod view;
pub mod zorder;

pub use commands::{CommandError, CommandList, CommandResult, ComponentCommand, ComponentStore, UndoHistory};
pub use component::{Attribute, Attributes, Axis, Component, ComponentId, Scale};
pub use config::{ConfigError, EditorConfig};
pub use events::{ComponentEvent, EventKind, SubscriptionId};
pub use gesture::{GestureKind, GestureSession, ScaleDim, SkewAxis};
pub use input::{DeltaDrag, DeltaHandle, Modifiers, MouseButton};
pub use layout::{ElementLayout, StaticLayout, TransformParseError};
pub use slide::Slide;
pub use snap::{GRID_SIZE, quantize_angle, snap_to_grid};
pub use transform::ComposedTransform;
pub use view::{ComponentView, ViewSurface};
pub use zorder::{ZIndexSource, ZTracker};
