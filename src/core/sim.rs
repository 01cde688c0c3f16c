use crate::core::bounds::{BoundsReflector, Rect};
use crate::core::particle::Particle;
use crate::core::rules::{Downforce, ForceRule, Heater, Liquidness};
use crate::core::vec2::{self, Vec2};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Fixed-timestep lava-lamp simulation: a fixed-size particle ensemble in a
/// bounded container, advanced by an ordered list of force rules.
///
/// Rule order is a correctness requirement, not an implementation detail:
/// pairwise interaction → heater → downforce, then bounds reflection after
/// integration. The heater must precede downforce so buoyancy reads the
/// temperature written this tick.
///
/// Each `step` runs in two phases. Phase one evaluates every rule for every
/// particle, summing acceleration contributions into a scratch buffer;
/// positions and velocities are untouched during this phase, so all
/// pairwise reads observe the pre-step state. Phase two integrates
/// velocity then position per particle and folds any boundary overshoot
/// back inside.
pub struct Simulation {
    bounds: Rect,
    /// The ensemble. Fixed size for the lifetime of the run; mutated in
    /// place every tick.
    pub particles: Vec<Particle>,
    rules: Vec<Box<dyn ForceRule + Send + Sync>>,
    reflector: BoundsReflector,
    // Per-tick acceleration scratch, zeroed each step. Never observable.
    accel: Vec<Vec2>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("bounds", &self.bounds)
            .field("particles", &self.particles)
            .field("rules", &self.rules.len())
            .field("reflector", &self.reflector)
            .field("accel", &self.accel)
            .finish()
    }
}

impl Simulation {
    /// Create a simulation with `count` particles spread uniformly at
    /// random along the bottom edge of `bounds`, at rest and at zero
    /// temperature, with the standard rule pipeline and an inelastic
    /// boundary.
    ///
    /// `seed` makes the initial layout reproducible; `None` draws a seed
    /// from the thread RNG.
    ///
    /// Errors: `Error::InvalidParam` if `count` is zero.
    pub fn new(bounds: Rect, count: usize, seed: Option<u64>) -> Result<Self> {
        Self::build(bounds, count, seed, BoundsReflector::new(bounds))
    }

    /// Like [`Simulation::new`] but with an explicit restitution
    /// coefficient for the boundary bounce.
    ///
    /// Errors: `Error::InvalidParam` if `count` is zero or `restitution`
    /// is outside `[0, 1]`.
    pub fn with_restitution(
        bounds: Rect,
        count: usize,
        seed: Option<u64>,
        restitution: f64,
    ) -> Result<Self> {
        let reflector = BoundsReflector::with_restitution(bounds, restitution)?;
        Self::build(bounds, count, seed, reflector)
    }

    fn build(
        bounds: Rect,
        count: usize,
        seed: Option<u64>,
        reflector: BoundsReflector,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidParam("count must be > 0".into()));
        }

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.random_range(bounds.x..=bounds.right());
            let position = Vec2::new(x, bounds.bottom());
            particles.push(Particle::new(position, vec2::ZERO)?);
        }

        let rules: Vec<Box<dyn ForceRule + Send + Sync>> = vec![
            Box::new(Liquidness),
            Box::new(Heater::new(&bounds)),
            Box::new(Downforce),
        ];

        Ok(Self {
            bounds,
            particles,
            rules,
            reflector,
            accel: vec![vec2::ZERO; count],
        })
    }

    /// Advance the simulation by one fixed interval.
    ///
    /// Errors: `Error::InvalidParam` if `dt` is NaN, infinite, or negative.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidParam(
                "dt must be finite and non-negative".into(),
            ));
        }

        // Phase one: accumulate accelerations from the rule pipeline.
        // Rules only write ancillary state, so every pairwise read during
        // this phase sees the pre-step positions and velocities.
        for i in 0..self.particles.len() {
            self.accel[i] = vec2::ZERO;
            for rule in &self.rules {
                let contribution = rule.contribute(i, dt, &mut self.particles)?;
                self.accel[i] += contribution;
            }
        }

        // Phase two: integrate, then correct this tick's overshoot.
        for (particle, accel) in self.particles.iter_mut().zip(&self.accel) {
            particle.accelerate(*accel, dt);
            particle.advance(dt);
            self.reflector.reflect(particle);
        }

        Ok(())
    }

    /// The container rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of particles (fixed at construction).
    #[inline]
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the ensemble for rendering.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions, one per particle.
    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Velocities, one per particle.
    pub fn velocities(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.velocity).collect()
    }

    /// Temperatures, one per particle.
    pub fn temperatures(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.temperature).collect()
    }

    /// Neighbor bonds as indices, one per particle; `None` when unbonded.
    pub fn neighbors(&self) -> Vec<Option<usize>> {
        self.particles.iter().map(|p| p.neighbor).collect()
    }

    /// Mean ensemble temperature (diagnostic).
    pub fn mean_temperature(&self) -> f64 {
        let n = self.particles.len() as f64;
        self.particles.iter().map(|p| p.temperature).sum::<f64>() / n
    }

    /// Overwrite all particle positions, e.g. to stage a scenario from the
    /// driver or a test.
    ///
    /// Errors: `Error::InvalidParam` on length mismatch or non-finite
    /// components.
    pub fn set_positions(&mut self, positions: &[Vec2]) -> Result<()> {
        if positions.len() != self.particles.len() {
            return Err(Error::InvalidParam(format!(
                "expected {} positions, got {}",
                self.particles.len(),
                positions.len()
            )));
        }
        if !positions.iter().all(Vec2::is_finite) {
            return Err(Error::InvalidParam("positions must be finite".into()));
        }
        for (p, &pos) in self.particles.iter_mut().zip(positions) {
            p.position = pos;
        }
        Ok(())
    }

    /// Overwrite all particle velocities.
    ///
    /// Errors: `Error::InvalidParam` on length mismatch or non-finite
    /// components.
    pub fn set_velocities(&mut self, velocities: &[Vec2]) -> Result<()> {
        if velocities.len() != self.particles.len() {
            return Err(Error::InvalidParam(format!(
                "expected {} velocities, got {}",
                self.particles.len(),
                velocities.len()
            )));
        }
        if !velocities.iter().all(Vec2::is_finite) {
            return Err(Error::InvalidParam("velocities must be finite".into()));
        }
        for (p, &vel) in self.particles.iter_mut().zip(velocities) {
            p.velocity = vel;
        }
        Ok(())
    }
}
