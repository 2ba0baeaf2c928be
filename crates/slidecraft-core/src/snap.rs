//! Grid snapping and angle quantization for gestures.

use kurbo::Point;
use std::f64::consts::{PI, TAU};

/// Grid size for snapping positions, in model units.
pub const GRID_SIZE: f64 = 20.0;

/// Angle quantization steps per half turn (π / 8 increments).
pub const ANGLE_STEPS: f64 = 8.0;

/// Snap a single coordinate down to the grid.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).floor() * grid_size
}

/// Snap a point down to the grid cell containing it.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// Quantize an angle (radians) down to a multiple of `π / steps`.
pub fn quantize_angle(angle: f64, steps: f64) -> f64 {
    if steps <= 0.0 {
        return angle;
    }
    (angle / PI * steps).floor() / steps * PI
}

/// Reduce an angle into (-2π, 2π), keeping the sign of the input.
pub fn normalize_angle(angle: f64) -> f64 {
    angle % TAU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid_floors() {
        let snapped = snap_to_grid(Point::new(39.9, -1.0), GRID_SIZE);
        assert_eq!(snapped, Point::new(20.0, -20.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        for value in [-47.3, -20.0, 0.0, 3.5, 19.999, 20.0, 123.4, 1e6 + 7.0] {
            let once = snap_value(value, GRID_SIZE);
            assert_eq!(snap_value(once, GRID_SIZE), once);
            assert_eq!(once % GRID_SIZE, 0.0);
            assert!(value - once < GRID_SIZE && value >= once);
        }
    }

    #[test]
    fn test_quantize_angle_steps() {
        let step = PI / ANGLE_STEPS;
        for angle in [-5.0, -0.3, 0.0, 0.1, 0.39, 0.4, 1.0, 3.0, 6.2] {
            let q = quantize_angle(angle, ANGLE_STEPS);
            let multiple = q / step;
            assert!((multiple - multiple.round()).abs() < 1e-9, "{angle} -> {q}");
            assert!((q - angle).abs() < step, "{angle} -> {q}");
            assert!(q <= angle + 1e-12);
        }
    }

    #[test]
    fn test_normalize_angle_keeps_sign() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-3.0 * PI) + PI).abs() < 1e-12);
        assert_eq!(normalize_angle(1.25), 1.25);
    }
}
