use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// All inputs are internally generated once the ensemble is constructed, so
/// the taxonomy is narrow: bad construction/call parameters, and the one
/// geometric degeneracy (normalizing a zero-length vector). Each variant
/// carries enough context to be actionable.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter (non-positive particle count, zero-area
    /// bounds, negative or non-finite timestep, malformed array shapes).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A zero-length vector was asked for a direction or a rescaled length.
    #[error("degenerate vector: {0}")]
    DegenerateVector(String),
}
