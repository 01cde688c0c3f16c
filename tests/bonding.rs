use lavasim::core::{Rect, Simulation, Vec2};
use lavasim::error::Result;

fn two_particle_sim() -> Result<Simulation> {
    let bounds = Rect::new(0.0, 0.0, 150.0, 500.0)?;
    Simulation::new(bounds, 2, Some(7))
}

/// Place the two particles at a horizontal separation, mid-container so the
/// bottom edge stays out of play.
fn set_separation(sim: &mut Simulation, distance: f64) -> Result<()> {
    sim.set_positions(&[Vec2::new(20.0, 250.0), Vec2::new(20.0 + distance, 250.0)])?;
    sim.set_velocities(&[Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)])
}

/// Two particles within the bonding threshold become bonded in one tick,
/// in exactly one direction: the later-evaluated particle holds the claim
/// and the earlier one's bond is cleared.
#[test]
fn bond_forms_within_one_tick_one_direction() -> Result<()> {
    let mut sim = two_particle_sim()?;
    // Distance 40 bonds (< 50) without any pairwise force (> 30).
    set_separation(&mut sim, 40.0)?;
    sim.step(20.0)?;
    let bonds = sim.neighbors();
    assert_eq!(bonds[1], Some(0));
    assert_eq!(bonds[0], None);
    Ok(())
}

/// An existing bond persists in the hysteresis band between the bonding
/// threshold and twice the bonding threshold — no flicker at the boundary.
#[test]
fn bond_persists_between_threshold_and_release_distance() -> Result<()> {
    let mut sim = two_particle_sim()?;
    set_separation(&mut sim, 40.0)?;
    sim.step(20.0)?;
    assert_eq!(sim.neighbors()[1], Some(0));

    set_separation(&mut sim, 70.0)?;
    sim.step(20.0)?;
    assert_eq!(sim.neighbors()[1], Some(0), "bond flickered at distance 70");
    Ok(())
}

/// Beyond twice the bonding threshold the bond clears within one tick.
#[test]
fn bond_releases_beyond_twice_threshold() -> Result<()> {
    let mut sim = two_particle_sim()?;
    set_separation(&mut sim, 40.0)?;
    sim.step(20.0)?;
    assert_eq!(sim.neighbors()[1], Some(0));

    set_separation(&mut sim, 110.0)?;
    sim.step(20.0)?;
    assert_eq!(sim.neighbors(), vec![None, None]);
    Ok(())
}

/// Bonds are recomputed every tick and never outlive proximity plus
/// hysteresis; a fresh ensemble has no bonds at all.
#[test]
fn fresh_ensemble_is_unbonded() -> Result<()> {
    let sim = two_particle_sim()?;
    assert_eq!(sim.neighbors(), vec![None, None]);
    Ok(())
}
