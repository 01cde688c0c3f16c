use crate::core::vec2::Vec2;
use crate::error::{Error, Result};

/// A convecting particle in the 2-D lamp.
///
/// Fields:
/// - `position`, `velocity`: integrated every tick
/// - `temperature`: scalar driven toward the lamp's ambient field each tick
/// - `neighbor`: index of the currently bonded particle, if any
///
/// `neighbor` is a transient, directed relation recomputed by the pairwise
/// rule every tick. Storing it as an index into the ensemble's particle
/// slice keeps the relation non-owning and trivially inspectable in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Scalar temperature (starts at 0, no fixed upper bound).
    pub temperature: f64,
    /// Index of the bonded particle, `None` when unbonded.
    pub neighbor: Option<usize>,
}

impl Particle {
    /// Create a particle at rest-state temperature with no bond.
    ///
    /// Errors: `Error::InvalidParam` if any position or velocity component
    /// is NaN or infinite.
    pub fn new(position: Vec2, velocity: Vec2) -> Result<Self> {
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            position,
            velocity,
            temperature: 0.0,
            neighbor: None,
        })
    }

    /// Fold an acceleration into the velocity over `dt`.
    #[inline]
    pub fn accelerate(&mut self, accel: Vec2, dt: f64) {
        self.velocity += accel * dt;
    }

    /// Advance the position along the current velocity over `dt`.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }
}
