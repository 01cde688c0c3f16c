use crate::error::{Error, Result};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// An immutable 2-D vector with value semantics.
///
/// Arithmetic goes through the `std::ops` impls (`+`, `-`, unary `-`,
/// `* f64`); everything returns a fresh value, so no aliasing can leak
/// between particles.
///
/// Zero-vector policy: operations that need a direction (`with_length`,
/// `normalized`, `angle`) return [`Error::DegenerateVector`] on a
/// zero-length input. `rotate` uses the rotation matrix directly and maps
/// zero to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// The zero vector.
pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

impl Vec2 {
    /// Create a vector from components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length (cheaper when only comparing magnitudes).
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Rescale to the requested length, preserving direction.
    ///
    /// A negative `len` flips the direction, which is how the pairwise rule
    /// expresses repulsion along a separation vector.
    ///
    /// Errors: [`Error::DegenerateVector`] if this vector has zero length
    /// (there is no direction to preserve).
    pub fn with_length(&self, len: f64) -> Result<Vec2> {
        let current = self.length();
        if current == 0.0 {
            return Err(Error::DegenerateVector(
                "cannot rescale a zero-length vector".into(),
            ));
        }
        Ok(*self * (len / current))
    }

    /// Unit vector in this vector's direction.
    ///
    /// Errors: [`Error::DegenerateVector`] on a zero-length vector.
    #[inline]
    pub fn normalized(&self) -> Result<Vec2> {
        self.with_length(1.0)
    }

    /// Rotate by `degrees` counter-clockwise, preserving magnitude.
    ///
    /// Implemented as a rotation matrix, which composes the current angle
    /// with the requested one and is defined (as identity) for the zero
    /// vector.
    pub fn rotate(&self, degrees: f64) -> Vec2 {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Angle from the positive x-axis, in (−π, π].
    ///
    /// Errors: [`Error::DegenerateVector`] on a zero-length vector, whose
    /// angle is undefined.
    pub fn angle(&self) -> Result<f64> {
        if self.x == 0.0 && self.y == 0.0 {
            return Err(Error::DegenerateVector(
                "zero-length vector has no angle".into(),
            ));
        }
        Ok(self.y.atan2(self.x))
    }

    /// True when both components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}
