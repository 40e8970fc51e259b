/// Orbit geometry: maps the orbital angle parameter to a point on the
/// on-screen ellipse and back.
///
/// Pure math, no engine state. Angles cross this boundary in degrees;
/// radians only exist inside the trig calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Degrees in a full turn.
pub const FULL_TURN: f32 = 360.0;

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Shortest-arc distance between two angles on a circle, in [0, 180].
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs();
    diff.min(FULL_TURN - diff)
}

/// Axis-aligned ellipse the body travels along, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitEllipse {
    /// Ellipse center (also where the sun sits).
    pub center: Vec2,
    /// Horizontal semi-axis.
    pub rx: f32,
    /// Vertical semi-axis.
    pub ry: f32,
}

impl OrbitEllipse {
    pub const fn new(center: Vec2, rx: f32, ry: f32) -> Self {
        Self { center, rx, ry }
    }

    /// Point on the ellipse for an orbital angle in degrees.
    /// Defined for every real input; periodic in 360.
    pub fn position_for_angle(&self, deg: f32) -> Vec2 {
        let rad = deg.to_radians();
        Vec2::new(
            self.center.x + self.rx * rad.cos(),
            self.center.y + self.ry * rad.sin(),
        )
    }

    /// Orbital angle in [0, 360) for a viewport point.
    ///
    /// This inverts the elliptical parametrization (the offsets are divided
    /// by the semi-axes before `atan2`), so it only round-trips with
    /// [`position_for_angle`](Self::position_for_angle) on the same ellipse.
    pub fn angle_for_position(&self, p: Vec2) -> f32 {
        let dx = (p.x - self.center.x) / self.rx;
        let dy = (p.y - self.center.y) / self.ry;
        let mut deg = dy.atan2(dx).to_degrees();
        if deg < 0.0 {
            deg += FULL_TURN;
        }
        if deg >= FULL_TURN {
            deg = 0.0;
        }
        deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> OrbitEllipse {
        OrbitEllipse::new(Vec2::new(300.0, 150.0), 220.0, 100.0)
    }

    #[test]
    fn quarter_turns_hit_the_axes() {
        let o = orbit();
        let right = o.position_for_angle(0.0);
        assert_eq!(right, Vec2::new(520.0, 150.0));

        let bottom = o.position_for_angle(90.0);
        assert!((bottom.x - 300.0).abs() < 1e-3);
        assert!((bottom.y - 250.0).abs() < 1e-3);

        let left = o.position_for_angle(180.0);
        assert!((left.x - 80.0).abs() < 1e-3);
        assert!((left.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn forward_map_is_periodic() {
        let o = orbit();
        let a = o.position_for_angle(37.0);
        let b = o.position_for_angle(37.0 + 720.0);
        let c = o.position_for_angle(37.0 - 360.0);
        assert!((a - b).length() < 1e-2);
        assert!((a - c).length() < 1e-2);
    }

    #[test]
    fn angle_round_trips_through_position() {
        let o = orbit();
        let mut deg = 0.0_f32;
        while deg < 360.0 {
            let back = o.angle_for_position(o.position_for_angle(deg));
            assert!(
                angular_distance(back, deg) < 1e-2,
                "{deg} came back as {back}"
            );
            assert!((0.0..360.0).contains(&back));
            deg += 7.5;
        }
    }

    #[test]
    fn inverse_uses_the_ellipse_not_a_circle() {
        let o = orbit();
        // 45° on the ellipse is not on the 45° screen diagonal
        let p = o.position_for_angle(45.0);
        assert!((o.angle_for_position(p) - 45.0).abs() < 1e-3);
        let screen_diag = Vec2::new(300.0 + 100.0, 150.0 + 100.0);
        assert!(o.angle_for_position(screen_diag) > 45.0);
    }

    #[test]
    fn angle_for_position_is_normalized() {
        let o = orbit();
        // Above the center (negative y offset) lands in the upper half: 270°
        let up = o.angle_for_position(Vec2::new(300.0, 50.0));
        assert!((up - 270.0).abs() < 1e-3);
        // Center itself resolves to 0 rather than NaN
        assert_eq!(o.angle_for_position(o.center), 0.0);
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-7) < 360.0);
    }

    #[test]
    fn angular_distance_takes_the_short_way() {
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(90.0, 45.0), 45.0);
    }
}
