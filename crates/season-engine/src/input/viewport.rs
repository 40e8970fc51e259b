//! Screen -> viewport coordinate conversion.
//!
//! Pointer events arrive in absolute screen coordinates. The host surface
//! supplies its current screen transform (an SVG element's screen CTM in a
//! browser); the engine applies the inverse to get viewport-local points.

use glam::{Affine2, Vec2};

/// Determinants smaller than this are treated as a collapsed surface.
const MIN_DETERMINANT: f32 = 1e-12;

/// Host-supplied mapping from viewport space to screen space.
pub trait SurfaceTransform {
    /// The surface's viewport -> screen matrix, or `None` when the surface
    /// isn't mounted or can't report one.
    fn screen_matrix(&self) -> Option<Affine2>;

    /// Viewport-local point for a screen point. `None` when the transform is
    /// unavailable or not invertible; callers drop the event.
    fn to_local(&self, screen: Vec2) -> Option<Vec2> {
        let m = self.screen_matrix()?;
        if m.matrix2.determinant().abs() < MIN_DETERMINANT {
            return None;
        }
        let local = m.inverse().transform_point2(screen);
        local.is_finite().then_some(local)
    }
}

/// A fixed matrix, for hosts whose surface never moves (and for tests).
impl SurfaceTransform for Affine2 {
    fn screen_matrix(&self) -> Option<Affine2> {
        Some(*self)
    }
}

/// A surface that has not been mounted yet (or was torn down).
#[derive(Debug, Default, Clone, Copy)]
pub struct Unmounted;

impl SurfaceTransform for Unmounted {
    fn screen_matrix(&self) -> Option<Affine2> {
        None
    }
}

/// Scale-and-offset matrix in the layout of an SVG CTM (`a`, `d`, `e`, `f`),
/// i.e. no skew.
pub fn scale_offset(scale: Vec2, offset: Vec2) -> Affine2 {
    Affine2::from_scale_angle_translation(scale, 0.0, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_points_through() {
        let p = Vec2::new(12.0, 34.0);
        assert_eq!(Affine2::IDENTITY.to_local(p), Some(p));
    }

    #[test]
    fn scaled_and_offset_surface_is_inverted() {
        // Viewport drawn at 2x, its origin at (100, 50) on screen
        let ctm = scale_offset(Vec2::splat(2.0), Vec2::new(100.0, 50.0));
        let local = ctm.to_local(Vec2::new(700.0, 350.0)).unwrap();
        assert!((local - Vec2::new(300.0, 150.0)).length() < 1e-4);
    }

    #[test]
    fn unmounted_surface_yields_nothing() {
        assert_eq!(Unmounted.to_local(Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn collapsed_surface_yields_nothing() {
        let ctm = scale_offset(Vec2::new(0.0, 1.0), Vec2::ZERO);
        assert_eq!(ctm.to_local(Vec2::new(1.0, 1.0)), None);
    }
}
