//! Force rules: the per-tick contributors that drive the lamp.
//!
//! Each rule computes an acceleration contribution for one particle and may
//! mutate ancillary particle state (temperature, neighbor bonds) — never
//! position or velocity, which belong to the engine's integration phase.
//! The engine applies the rules in a fixed, documented order; see
//! [`crate::core::sim::Simulation`].

use crate::core::bounds::Rect;
use crate::core::particle::Particle;
use crate::core::vec2::{self, Vec2};
use crate::error::Result;

/// A pluggable per-particle force contributor.
///
/// `contribute` receives the index of the particle being evaluated and the
/// whole ensemble slice. Implementations may read any particle but must
/// only write ancillary state (`temperature`, `neighbor`); the engine
/// guarantees positions and velocities are untouched while rules run, so
/// every pairwise read observes the pre-step state.
pub trait ForceRule {
    /// Acceleration contribution for particle `i` over this tick.
    fn contribute(&self, i: usize, dt: f64, particles: &mut [Particle]) -> Result<Vec2>;
}

/// Pairwise attraction/repulsion plus neighbor bonding ("liquidness").
///
/// Evaluated against every other particle — an exhaustive O(n²) pass with
/// no symmetry shortcut, each particle accumulating its own contributions
/// independently. The three thresholds are ordered
/// `rejection < attraction < neighborhood` and are load-bearing for the
/// visual behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Liquidness;

impl Liquidness {
    /// Below this separation the pair repels.
    pub const REJECTION_THRESHOLD: f64 = 12.0;
    /// Below this separation (and above rejection) the pair attracts.
    pub const ATTRACTION_THRESHOLD: f64 = 30.0;
    /// Below this separation the pair bonds for rendering.
    pub const NEIGHBORHOOD_THRESHOLD: f64 = 50.0;
    /// Repulsive micro-force magnitude (negative = away from the other).
    pub const REJECTION_STRENGTH: f64 = -0.0001;
    /// Attractive micro-force magnitude.
    pub const ATTRACTION_STRENGTH: f64 = 0.00002;
}

impl ForceRule for Liquidness {
    fn contribute(&self, i: usize, _dt: f64, particles: &mut [Particle]) -> Result<Vec2> {
        let mut accel = vec2::ZERO;
        for j in 0..particles.len() {
            if j == i {
                continue;
            }
            let d = particles[j].position - particles[i].position;
            let dist = d.length();

            // Bond bookkeeping comes first, matching the rule's documented
            // order. The claim is directed: `i` takes `j` and `j` loses its
            // own bond; whichever later-evaluated particle is in range
            // overwrites the claim. Release is hysteresis-gated at twice
            // the bonding threshold to stop flicker at the boundary.
            if dist < Self::NEIGHBORHOOD_THRESHOLD {
                particles[i].neighbor = Some(j);
                particles[j].neighbor = None;
            } else if particles[i].neighbor == Some(j)
                && dist > 2.0 * Self::NEIGHBORHOOD_THRESHOLD
            {
                particles[i].neighbor = None;
            }

            // Coincident centers have no direction; that pair contributes
            // nothing rather than erroring the whole tick.
            if dist == 0.0 {
                continue;
            }
            if dist < Self::REJECTION_THRESHOLD {
                accel += d.with_length(Self::REJECTION_STRENGTH)?;
            } else if dist < Self::ATTRACTION_THRESHOLD {
                accel += d.with_length(Self::ATTRACTION_STRENGTH)?;
            }
        }
        Ok(accel)
    }
}

/// Temperature field from the heat lamp at the bottom-center of the bounds.
///
/// Ancillary-only rule: it drives each particle's temperature toward the
/// distance-decaying ambient value through a first-order low-pass filter
/// and contributes no acceleration. Must run before [`Downforce`] in the
/// pipeline so buoyancy reads this tick's temperature.
#[derive(Debug, Clone, Copy)]
pub struct Heater {
    lamp: Vec2,
}

impl Heater {
    /// Numerator of the ambient temperature curve.
    pub const RADIANCE: f64 = 10_000.0;
    /// Added to the lamp distance so the ambient value stays finite at the
    /// lamp itself.
    pub const DISTANCE_SOFTENING: f64 = 10.0;
    /// Low-pass filter coefficient toward ambient, per tick.
    pub const CONDUCTIVITY: f64 = 0.005;

    /// Heater whose lamp sits at the bottom-center of `bounds`.
    pub fn new(bounds: &Rect) -> Self {
        Self {
            lamp: bounds.bottom_center(),
        }
    }

    /// Ambient temperature at `position`.
    pub fn ambient_at(&self, position: Vec2) -> f64 {
        let distance = (position - self.lamp).length();
        Self::RADIANCE / (distance + Self::DISTANCE_SOFTENING)
    }
}

impl ForceRule for Heater {
    fn contribute(&self, i: usize, _dt: f64, particles: &mut [Particle]) -> Result<Vec2> {
        let p = &mut particles[i];
        let ambient = self.ambient_at(p.position);
        p.temperature += (ambient - p.temperature) * Self::CONDUCTIVITY;
        Ok(vec2::ZERO)
    }
}

/// Converts temperature deviation from equilibrium into vertical
/// acceleration: the convective mechanism. Hotter-than-equilibrium
/// particles accelerate upward (negative y in canvas orientation), cooler
/// ones sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Downforce;

impl Downforce {
    /// Temperature at which a particle is neutrally buoyant.
    pub const EQUILIBRIUM_TEMPERATURE: f64 = 100.0;
    /// Scale from temperature deviation to vertical acceleration.
    pub const BUOYANCY_SCALE: f64 = 1e-6;
}

impl ForceRule for Downforce {
    fn contribute(&self, i: usize, _dt: f64, particles: &mut [Particle]) -> Result<Vec2> {
        let diff = particles[i].temperature - Self::EQUILIBRIUM_TEMPERATURE;
        Ok(Vec2::new(0.0, -diff * Self::BUOYANCY_SCALE))
    }
}
