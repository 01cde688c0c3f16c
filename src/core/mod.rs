//! Core simulation data structures for the lava-lamp engine.
//!
//! The core is pure Rust with no Python types: a 2-D vector value type, a
//! mutable particle entity, the force-rule pipeline, the bounds reflector,
//! and the fixed-timestep engine that ties them together.

pub mod bounds;
pub mod particle;
pub mod rules;
pub mod sim;
pub mod vec2;

pub use bounds::{BoundsReflector, Rect};
pub use particle::Particle;
pub use rules::{Downforce, ForceRule, Heater, Liquidness};
pub use sim::Simulation;
pub use vec2::Vec2;
