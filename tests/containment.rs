use lavasim::core::{Rect, Simulation, Vec2};
use lavasim::error::Result;

fn lamp_rect() -> Result<Rect> {
    Rect::new(0.0, 0.0, 150.0, 500.0)
}

/// Containment validation: a particle placed exactly 1 unit outside each of
/// the four edges with inward-pointing velocity must be back inside after a
/// single `step` — one reflection pass corrects the overshoot.
#[test]
fn one_unit_outside_each_edge_reflects_inside() -> Result<()> {
    let bounds = lamp_rect()?;
    // Slow inward velocities so the tick's own motion does not re-enter the
    // container by itself; reflection has to do the work.
    let cases = [
        (Vec2::new(-1.0, 250.0), Vec2::new(0.01, 0.0)),   // left
        (Vec2::new(151.0, 250.0), Vec2::new(-0.01, 0.0)), // right
        (Vec2::new(75.0, -1.0), Vec2::new(0.0, 0.01)),    // top
        (Vec2::new(75.0, 501.0), Vec2::new(0.0, -0.01)),  // bottom
    ];
    for (pos, vel) in cases {
        let mut sim = Simulation::new(bounds, 1, Some(1))?;
        sim.set_positions(&[pos])?;
        sim.set_velocities(&[vel])?;
        sim.step(20.0)?;
        let p = &sim.particles()[0];
        assert!(
            bounds.contains(p.position),
            "particle at {pos:?} escaped to {:?}",
            p.position
        );
    }
    Ok(())
}

/// Containment invariant over a long run: after every step, every particle
/// is inside the bounds.
#[test]
fn ensemble_stays_inside_over_many_steps() -> Result<()> {
    let bounds = lamp_rect()?;
    let mut sim = Simulation::new(bounds, 50, Some(20260830))?;
    for step in 0..500 {
        sim.step(20.0)?;
        for (i, p) in sim.particles().iter().enumerate() {
            assert!(
                bounds.contains(p.position),
                "particle {i} outside bounds at step {step}: {:?}",
                p.position
            );
        }
    }
    Ok(())
}

/// Same invariant with a damped (restitution 0.1) boundary.
#[test]
fn damped_boundary_also_contains() -> Result<()> {
    let bounds = lamp_rect()?;
    let mut sim = Simulation::with_restitution(bounds, 20, Some(99), 0.1)?;
    for _ in 0..200 {
        sim.step(20.0)?;
        for p in sim.particles() {
            assert!(bounds.contains(p.position));
        }
    }
    Ok(())
}
