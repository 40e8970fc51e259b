// extensions/transform.rs
//
// Rotation compositor: places a point fixed on the tilted body into
// viewport space.
//
// Usage:
//   let site = site_offset(Season::Summer, 30.0, 30.0);
//   let screen = compose(site, body_pos, AxialTilt::Tilted.degrees());
//
// Order is always rotate-about-local-origin, then translate to the anchor.
// Rotation is in degrees, clockwise on a y-down surface (same sense as
// SVG `rotate()`).

use glam::Vec2;

use crate::core::season::Season;

/// Rotate `local` by `rotation_deg` about the origin, then translate by `anchor`.
pub fn compose(local: Vec2, anchor: Vec2, rotation_deg: f32) -> Vec2 {
    LocalTransform::new(anchor, rotation_deg).apply(local)
}

/// Where the observation site sits on the body's disc, in the body's
/// unrotated local frame (y-down).
///
/// At the two solstices the site is pushed onto the sun-facing hemisphere,
/// which is on opposite sides of the disc for the two sides of the orbit.
/// At the equinoxes it sits on the axis midline, a quarter radius up.
pub fn site_offset(season: Season, body_radius: f32, latitude_deg: f32) -> Vec2 {
    let lat = latitude_deg.to_radians();
    match season {
        Season::Spring | Season::Autumn => Vec2::new(0.0, -body_radius / 4.0),
        // Summer is on the left of the orbit: sun is to the body's right
        Season::Summer => Vec2::new(body_radius * lat.cos(), -body_radius * lat.sin()),
        Season::Winter => Vec2::new(-body_radius * lat.cos(), -body_radius * lat.sin()),
    }
}

/// A body's placement: translation to its anchor plus a constant rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Where the local origin lands in viewport space.
    pub anchor: Vec2,
    /// Rotation about the local origin, in degrees.
    pub rotation_deg: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            anchor: Vec2::ZERO,
            rotation_deg: 0.0,
        }
    }
}

impl LocalTransform {
    pub fn new(anchor: Vec2, rotation_deg: f32) -> Self {
        Self { anchor, rotation_deg }
    }

    /// Map a local point into viewport space.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let (sin_r, cos_r) = self.rotation_deg.to_radians().sin_cos();
        let rotated = Vec2::new(
            local.x * cos_r - local.y * sin_r,
            local.x * sin_r + local.y * cos_r,
        );
        self.anchor + rotated
    }
}
