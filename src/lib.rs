use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod core;
pub mod error;

use crate::core::{Rect, Simulation, Vec2};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn vecs_from_array(arr: numpy::ndarray::ArrayView2<'_, f64>) -> Vec<Vec2> {
    arr.rows().into_iter().map(|r| Vec2::new(r[0], r[1])).collect()
}

/// LavaLamp Python-facing wrapper around the Rust simulation core.
///
/// The Python side is the external driver: it owns the timer loop and the
/// rendering, and consumes the read-only particle state (positions,
/// velocities, temperatures, neighbor bonds) exposed here.
#[pyclass]
pub struct LavaLamp {
    sim: Simulation,
}

#[pymethods]
impl LavaLamp {
    /// Initialize a lamp with `count` particles along the bottom edge of a
    /// `width` × `height` container anchored at the origin.
    ///
    /// Parameters
    /// - width, height: container size (floats, > 0)
    /// - count: number of particles (int, > 0)
    /// - seed: RNG seed (int) for a reproducible initial layout; None for
    ///   nondeterministic
    /// - restitution: boundary bounce coefficient in [0, 1]; 0 (default)
    ///   is the canonical fully inelastic stop
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (width, height, count=100, seed=None, restitution=0.0))]
    fn new(
        width: f64,
        height: f64,
        count: usize,
        seed: Option<u64>,
        restitution: f64,
    ) -> PyResult<Self> {
        let bounds = Rect::new(0.0, 0.0, width, height).map_err(py_err)?;
        let sim =
            Simulation::with_restitution(bounds, count, seed, restitution).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance the simulation by one fixed interval (releases the GIL
    /// during computation).
    fn step(&mut self, py: Python<'_>, dt: f64) -> PyResult<()> {
        py.detach(|| self.sim.step(dt)).map_err(py_err)
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.sim.num_particles();
        let mut arr = Array2::<f64>::zeros((n, 2));
        for (i, p) in self.sim.particles().iter().enumerate() {
            arr[[i, 0]] = p.position.x;
            arr[[i, 1]] = p.position.y;
        }
        Ok(arr.into_pyarray(py).into())
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.sim.num_particles();
        let mut arr = Array2::<f64>::zeros((n, 2));
        for (i, p) in self.sim.particles().iter().enumerate() {
            arr[[i, 0]] = p.velocity.x;
            arr[[i, 1]] = p.velocity.y;
        }
        Ok(arr.into_pyarray(py).into())
    }

    /// Return temperatures as a NumPy array of shape (N,), dtype=float64.
    fn get_temperatures<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<f64>>> {
        let temps = Array1::from_vec(self.sim.temperatures());
        Ok(temps.into_pyarray(py).into())
    }

    /// Return neighbor bonds as a NumPy array of shape (N,), dtype=int64,
    /// holding the bonded particle's index or -1 when unbonded. This is
    /// everything a renderer needs to draw the bond blobs.
    fn get_neighbors<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<i64>>> {
        let bonds: Vec<i64> = self
            .sim
            .neighbors()
            .into_iter()
            .map(|n| n.map_or(-1, |j| j as i64))
            .collect();
        Ok(Array1::from_vec(bonds).into_pyarray(py).into())
    }

    /// Set all particle positions from a NumPy array of shape (N, 2),
    /// dtype=float64. Values must be finite.
    fn set_positions<'py>(&mut self, positions: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
        let arr = positions.as_array();
        let n = self.sim.num_particles();
        if arr.shape() != [n, 2] {
            return Err(py_err(format!(
                "positions must have shape ({n}, 2), got {:?}",
                arr.shape()
            )));
        }
        self.sim.set_positions(&vecs_from_array(arr)).map_err(py_err)
    }

    /// Set all particle velocities from a NumPy array of shape (N, 2),
    /// dtype=float64. Values must be finite.
    fn set_velocities<'py>(&mut self, velocities: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
        let arr = velocities.as_array();
        let n = self.sim.num_particles();
        if arr.shape() != [n, 2] {
            return Err(py_err(format!(
                "velocities must have shape ({n}, 2), got {:?}",
                arr.shape()
            )));
        }
        self.sim.set_velocities(&vecs_from_array(arr)).map_err(py_err)
    }

    /// Return the container rectangle as (x, y, width, height).
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let b = self.sim.bounds();
        (b.x, b.y, b.width, b.height)
    }

    /// Number of particles (fixed at construction).
    #[getter]
    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }

    /// Mean ensemble temperature (diagnostic).
    fn mean_temperature(&self) -> f64 {
        self.sim.mean_temperature()
    }
}

/// The lavasim Python module entry point.
#[pymodule]
fn lavasim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<LavaLamp>()?;
    Ok(())
}
