//! Component model: the attribute record a view edits.

use crate::events::{ComponentEvent, EventKind, Listener, ListenerRegistry, SubscriptionId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-uniform scale of a component.
///
/// `width`/`height` are the pixel dimensions derived from the original
/// rendered size and are only ever produced together with `x`/`y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

impl Scale {
    /// Identity scale with no derived dimensions.
    pub const fn identity() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            width: None,
            height: None,
        }
    }

    /// Scale factors with dimensions derived from `orig_size` when known.
    pub fn derived(x: f64, y: f64, orig_size: Option<Size>) -> Self {
        Self {
            x,
            y,
            width: orig_size.map(|size| x * size.width),
            height: orig_size.map(|size| y * size.height),
        }
    }

    /// Derived pixel size, if both dimensions are present.
    pub fn size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => None,
        }
    }
}

/// Names of the component attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    X,
    Y,
    Rotate,
    SkewX,
    SkewY,
    Scale,
    Selected,
    CustomClasses,
    Color,
}

impl Attribute {
    /// Attributes whose change requires the transform to be recomposed.
    pub const TRANSFORMS: [Attribute; 4] = [
        Attribute::Rotate,
        Attribute::SkewX,
        Attribute::SkewY,
        Attribute::Scale,
    ];

    /// Model-facing attribute name.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Rotate => "rotate",
            Attribute::SkewX => "skewX",
            Attribute::SkewY => "skewY",
            Attribute::Scale => "scale",
            Attribute::Selected => "selected",
            Attribute::CustomClasses => "customClasses",
            Attribute::Color => "color",
        }
    }

    /// Whether the attribute holds a plain number.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Attribute::X | Attribute::Y | Attribute::Rotate | Attribute::SkewX | Attribute::SkewY
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position axis, used by manual moves and centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Position attribute for this axis.
    pub fn attribute(self) -> Attribute {
        match self {
            Axis::X => Attribute::X,
            Axis::Y => Attribute::Y,
        }
    }

    /// Extent of a size along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }
}

/// Plain attribute record of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub x: f64,
    pub y: f64,
    /// Rotation in radians, kept inside (-2π, 2π).
    pub rotate: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub scale: Scale,
    pub selected: bool,
    pub custom_classes: String,
    /// Text colour as hex digits without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            scale: Scale::identity(),
            selected: false,
            custom_classes: String::new(),
            color: None,
        }
    }
}

impl Attributes {
    /// Position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Read a numeric attribute.
    pub fn number(&self, attr: Attribute) -> Option<f64> {
        match attr {
            Attribute::X => Some(self.x),
            Attribute::Y => Some(self.y),
            Attribute::Rotate => Some(self.rotate),
            Attribute::SkewX => Some(self.skew_x),
            Attribute::SkewY => Some(self.skew_y),
            _ => None,
        }
    }

    fn number_mut(&mut self, attr: Attribute) -> Option<&mut f64> {
        match attr {
            Attribute::X => Some(&mut self.x),
            Attribute::Y => Some(&mut self.y),
            Attribute::Rotate => Some(&mut self.rotate),
            Attribute::SkewX => Some(&mut self.skew_x),
            Attribute::SkewY => Some(&mut self.skew_y),
            _ => None,
        }
    }
}

/// A component placed on a slide.
///
/// Every setter notifies subscribed listeners when, and only when, the
/// stored value actually changes.
#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    attributes: Attributes,
    listeners: ListenerRegistry,
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

impl Component {
    /// Create a component with default attributes.
    pub fn new() -> Self {
        Self::with_attributes(Attributes::default())
    }

    /// Create a component from an attribute record.
    pub fn with_attributes(mut attributes: Attributes) -> Self {
        attributes.rotate %= TAU;
        Self {
            id: ComponentId::new(),
            attributes,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Create a component at a position.
    pub fn at(x: f64, y: f64) -> Self {
        Self::with_attributes(Attributes {
            x,
            y,
            ..Attributes::default()
        })
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn x(&self) -> f64 {
        self.attributes.x
    }

    pub fn y(&self) -> f64 {
        self.attributes.y
    }

    pub fn position(&self) -> Point {
        self.attributes.position()
    }

    pub fn rotate(&self) -> f64 {
        self.attributes.rotate
    }

    pub fn skew_x(&self) -> f64 {
        self.attributes.skew_x
    }

    pub fn skew_y(&self) -> f64 {
        self.attributes.skew_y
    }

    pub fn scale(&self) -> Scale {
        self.attributes.scale
    }

    pub fn is_selected(&self) -> bool {
        self.attributes.selected
    }

    pub fn custom_classes(&self) -> &str {
        &self.attributes.custom_classes
    }

    pub fn color(&self) -> Option<&str> {
        self.attributes.color.as_deref()
    }

    /// Set a numeric attribute, truncating the value to an integer.
    pub fn set_int(&mut self, attr: Attribute, value: f64) -> bool {
        self.set_float(attr, value.trunc())
    }

    /// Set a numeric attribute. Rotation is reduced modulo 2π.
    ///
    /// Non-finite values and non-numeric attributes are ignored.
    pub fn set_float(&mut self, attr: Attribute, value: f64) -> bool {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite {} for component {}", attr, self.id);
            return false;
        }
        let value = if attr == Attribute::Rotate { value % TAU } else { value };
        let Some(slot) = self.attributes.number_mut(attr) else {
            log::warn!("{} is not a numeric attribute", attr);
            return false;
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        self.changed(attr);
        true
    }

    /// Replace the whole scale record at once.
    pub fn set_scale(&mut self, scale: Scale) -> bool {
        if self.attributes.scale == scale {
            return false;
        }
        self.attributes.scale = scale;
        self.changed(Attribute::Scale);
        true
    }

    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.attributes.selected == selected {
            return false;
        }
        self.attributes.selected = selected;
        self.changed(Attribute::Selected);
        true
    }

    pub fn set_custom_classes(&mut self, classes: impl Into<String>) -> bool {
        let classes = classes.into();
        if self.attributes.custom_classes == classes {
            return false;
        }
        self.attributes.custom_classes = classes;
        self.changed(Attribute::CustomClasses);
        true
    }

    pub fn set_color(&mut self, color: Option<String>) -> bool {
        if self.attributes.color == color {
            return false;
        }
        self.attributes.color = color;
        self.changed(Attribute::Color);
        true
    }

    /// Subscribe to an attribute change or lifecycle signal.
    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) -> SubscriptionId {
        self.listeners.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Ask every view of this component to refresh its transforms.
    pub fn rerender(&mut self) {
        self.listeners.notify(&self.attributes, ComponentEvent::Rerender);
    }

    /// Ask every view of this component to detach.
    pub fn unrender(&mut self) {
        self.listeners.notify(&self.attributes, ComponentEvent::Unrender);
    }

    fn changed(&mut self, attr: Attribute) {
        self.listeners.notify(&self.attributes, ComponentEvent::Changed(attr));
    }
}
