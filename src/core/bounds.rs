use crate::core::particle::Particle;
use crate::core::vec2::Vec2;
use crate::error::{Error, Result};

/// Axis-aligned container rectangle, immutable for the simulation's
/// lifetime. `y` grows downward, canvas style: the lamp sits on the bottom
/// edge at `y + height` and buoyant particles move toward smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle, rejecting zero or negative area.
    ///
    /// Errors: `Error::InvalidParam` if any field is non-finite or if
    /// `width`/`height` is not strictly positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidParam("bounds must be finite".into()));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidParam(
                "bounds width and height must be > 0".into(),
            ));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Maximum x coordinate.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum y coordinate (the bottom edge in canvas orientation).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Midpoint of the bottom edge, where the heat lamp sits.
    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.bottom())
    }

    /// True when `p` lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Enforces the containment invariant by elastic reflection.
///
/// Runs after a particle's velocity and position have been integrated for
/// the tick, so it corrects the current tick's overshoot: for each axis
/// independently, `position -= 2 × overshoot` folds the particle back
/// inside, and the velocity on that axis is scaled by `-restitution`.
#[derive(Debug, Clone, Copy)]
pub struct BoundsReflector {
    bounds: Rect,
    restitution: f64,
}

impl BoundsReflector {
    /// Fully inelastic bounce: the reflected axis's velocity is zeroed.
    /// This is the canonical behavior; pass a fractional coefficient to
    /// `with_restitution` for a damped bounce instead.
    pub const DEFAULT_RESTITUTION: f64 = 0.0;

    /// Reflector with the default (inelastic) restitution.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            restitution: Self::DEFAULT_RESTITUTION,
        }
    }

    /// Reflector with an explicit restitution coefficient.
    ///
    /// Errors: `Error::InvalidParam` unless `restitution` is in `[0, 1]`.
    pub fn with_restitution(bounds: Rect, restitution: f64) -> Result<Self> {
        if !restitution.is_finite() || !(0.0..=1.0).contains(&restitution) {
            return Err(Error::InvalidParam(
                "restitution must be in [0, 1]".into(),
            ));
        }
        Ok(Self {
            bounds,
            restitution,
        })
    }

    /// The container this reflector encloses.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Fold any overshoot back inside the container, both axes
    /// independently. One pass restores containment for any single-tick
    /// overshoot smaller than the container itself.
    pub fn reflect(&self, particle: &mut Particle) {
        let b = self.bounds;
        Self::reflect_axis(
            &mut particle.position.x,
            &mut particle.velocity.x,
            b.x,
            b.right(),
            self.restitution,
        );
        Self::reflect_axis(
            &mut particle.position.y,
            &mut particle.velocity.y,
            b.y,
            b.bottom(),
            self.restitution,
        );
    }

    fn reflect_axis(pos: &mut f64, vel: &mut f64, lo: f64, hi: f64, restitution: f64) {
        let overshoot = if *pos > hi {
            *pos - hi
        } else if *pos < lo {
            *pos - lo
        } else {
            return;
        };
        *pos -= 2.0 * overshoot;
        *vel = -*vel * restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp_rect() -> Rect {
        Rect::new(0.0, 0.0, 150.0, 500.0).unwrap()
    }

    #[test]
    fn rect_rejects_zero_area() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_err());
        assert!(Rect::new(0.0, f64::NAN, 10.0, 10.0).is_err());
    }

    #[test]
    fn rect_geometry() -> Result<()> {
        let r = Rect::new(10.0, 20.0, 100.0, 200.0)?;
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 220.0);
        assert_eq!(r.bottom_center(), Vec2::new(60.0, 220.0));
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 220.0)));
        assert!(!r.contains(Vec2::new(9.9, 100.0)));
        Ok(())
    }

    #[test]
    fn reflect_folds_overshoot_back_inside() -> Result<()> {
        let reflector = BoundsReflector::new(lamp_rect());
        // 1 unit past the right edge.
        let mut p = Particle::new(Vec2::new(151.0, 250.0), Vec2::new(2.0, 0.0))?;
        reflector.reflect(&mut p);
        assert_eq!(p.position, Vec2::new(149.0, 250.0));
        Ok(())
    }

    #[test]
    fn inelastic_reflection_zeroes_axis_velocity() -> Result<()> {
        let reflector = BoundsReflector::new(lamp_rect());
        let mut p = Particle::new(Vec2::new(75.0, -1.0), Vec2::new(0.5, -3.0))?;
        reflector.reflect(&mut p);
        assert_eq!(p.position, Vec2::new(75.0, 1.0));
        assert_eq!(p.velocity.y, 0.0);
        // The untouched axis keeps its velocity.
        assert_eq!(p.velocity.x, 0.5);
        Ok(())
    }

    #[test]
    fn fractional_restitution_damps_and_reverses() -> Result<()> {
        let reflector = BoundsReflector::with_restitution(lamp_rect(), 0.1)?;
        let mut p = Particle::new(Vec2::new(75.0, 501.0), Vec2::new(0.0, 4.0))?;
        reflector.reflect(&mut p);
        assert_eq!(p.position.y, 499.0);
        assert!((p.velocity.y + 0.4).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn restitution_out_of_range_rejected() {
        assert!(BoundsReflector::with_restitution(lamp_rect(), 1.5).is_err());
        assert!(BoundsReflector::with_restitution(lamp_rect(), -0.1).is_err());
        assert!(BoundsReflector::with_restitution(lamp_rect(), f64::NAN).is_err());
    }

    #[test]
    fn interior_particle_untouched() -> Result<()> {
        let reflector = BoundsReflector::new(lamp_rect());
        let mut p = Particle::new(Vec2::new(75.0, 250.0), Vec2::new(1.0, 1.0))?;
        let before = p.clone();
        reflector.reflect(&mut p);
        assert_eq!(p, before);
        Ok(())
    }
}
