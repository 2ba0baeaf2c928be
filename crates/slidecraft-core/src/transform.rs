//! Composition of component attributes into layered CSS-style transforms.
//!
//! The rendered element is three nested layers:
//!
//! | Layer   | Transform                 |
//! |---------|---------------------------|
//! | outer   | `rotate(<θ>rad)`          |
//! | scale   | `scale(<x>,<y>)`          |
//! | content | `skewX(..rad) skewY(..rad)` |
//!
//! Rotation is applied on the outer wrapper, outside the non-uniform scale.

use crate::component::{Attribute, Attributes};
use kurbo::{Affine, Point, Size, Vec2};
use serde::Serialize;

/// Content-layer transform functions, in application order.
pub const SKEW_ORDER: [Attribute; 2] = [Attribute::SkewX, Attribute::SkewY];

/// Transform strings and box size for each rendered layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedTransform {
    /// Outer element transform.
    pub outer: String,
    /// Scale layer transform.
    pub scale_layer: String,
    /// Content layer transform; empty when there is no skew.
    pub content: String,
    /// Outer box size, when an original size is known.
    pub box_size: Option<Size>,
}

/// Build the content-layer transform from the non-zero skews.
pub fn content_transform(attrs: &Attributes) -> String {
    let mut out = String::new();
    for attr in SKEW_ORDER {
        match attrs.number(attr) {
            Some(value) if value != 0.0 => {
                out.push_str(&format!("{}({}rad) ", attr.name(), value));
            }
            _ => {}
        }
    }
    out
}

/// Compose all layers from the current attributes.
///
/// The box takes the scale-derived dimensions when present and otherwise
/// the original size; it is left unset when no original size is known.
pub fn compose(attrs: &Attributes, orig_size: Option<Size>) -> ComposedTransform {
    let scale = attrs.scale;
    let box_size = orig_size.map(|orig| {
        Size::new(
            scale.width.filter(|w| *w != 0.0).unwrap_or(orig.width),
            scale.height.filter(|h| *h != 0.0).unwrap_or(orig.height),
        )
    });
    ComposedTransform {
        outer: format!("rotate({}rad)", attrs.rotate),
        scale_layer: format!("scale({},{})", scale.x, scale.y),
        content: content_transform(attrs),
        box_size,
    }
}

/// CSS `skewX` matrix.
fn skew_x(angle: f64) -> Affine {
    Affine::new([1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0])
}

/// CSS `skewY` matrix.
fn skew_y(angle: f64) -> Affine {
    Affine::new([1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0])
}

/// The three layers as one affine map about the element origin.
pub fn affine(attrs: &Attributes) -> Affine {
    Affine::rotate(attrs.rotate)
        * Affine::scale_non_uniform(attrs.scale.x, attrs.scale.y)
        * skew_x(attrs.skew_x)
        * skew_y(attrs.skew_y)
}

/// Corners of the transformed element box in slide coordinates.
///
/// Layers transform about the box centre, so the box is mapped around it
/// and then placed at the component position. Corners are returned
/// clockwise from the top-left.
pub fn outline(attrs: &Attributes, box_size: Size) -> [Point; 4] {
    let half = Vec2::new(box_size.width / 2.0, box_size.height / 2.0);
    let center = attrs.position() + half;
    let map = Affine::translate(center.to_vec2()) * affine(attrs);
    [
        map * Point::new(-half.x, -half.y),
        map * Point::new(half.x, -half.y),
        map * Point::new(half.x, half.y),
        map * Point::new(-half.x, half.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Scale;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_content_transform_skips_zero() {
        let attrs = Attributes {
            skew_y: 0.25,
            ..Attributes::default()
        };
        assert_eq!(content_transform(&attrs), "skewY(0.25rad) ");

        let attrs = Attributes {
            skew_x: 0.5,
            skew_y: -0.25,
            ..Attributes::default()
        };
        assert_eq!(content_transform(&attrs), "skewX(0.5rad) skewY(-0.25rad) ");
        assert_eq!(content_transform(&Attributes::default()), "");
    }

    #[test]
    fn test_compose_layers() {
        let attrs = Attributes {
            rotate: 1.5,
            scale: Scale::derived(2.0, 0.5, Some(Size::new(100.0, 40.0))),
            ..Attributes::default()
        };
        let composed = compose(&attrs, Some(Size::new(100.0, 40.0)));
        assert_eq!(composed.outer, "rotate(1.5rad)");
        assert_eq!(composed.scale_layer, "scale(2,0.5)");
        assert_eq!(composed.content, "");
        assert_eq!(composed.box_size, Some(Size::new(200.0, 20.0)));
    }

    #[test]
    fn test_compose_box_fallbacks() {
        let attrs = Attributes::default();
        assert_eq!(compose(&attrs, None).box_size, None);
        assert_eq!(
            compose(&attrs, Some(Size::new(80.0, 30.0))).box_size,
            Some(Size::new(80.0, 30.0))
        );
    }

    #[test]
    fn test_compose_is_idempotent() {
        let attrs = Attributes {
            rotate: -0.3,
            skew_x: 0.2,
            ..Attributes::default()
        };
        let orig = Some(Size::new(10.0, 10.0));
        assert_eq!(compose(&attrs, orig), compose(&attrs, orig));
    }

    #[test]
    fn test_outline_quarter_turn() {
        let attrs = Attributes {
            x: 0.0,
            y: 0.0,
            rotate: FRAC_PI_2,
            ..Attributes::default()
        };
        let corners = outline(&attrs, Size::new(100.0, 50.0));
        // Rotating a 100x50 box about its centre (50, 25) by 90°.
        assert!((corners[0].x - 75.0).abs() < 1e-9);
        assert!((corners[0].y - -25.0).abs() < 1e-9);
        assert!((corners[2].x - 25.0).abs() < 1e-9);
        assert!((corners[2].y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_affine_skew_matches_css() {
        let attrs = Attributes {
            skew_x: std::f64::consts::FRAC_PI_4,
            ..Attributes::default()
        };
        let p = affine(&attrs) * Point::new(0.0, 10.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }
}
