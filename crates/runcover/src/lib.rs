//! Incremental city-coverage accumulation.
//!
//! A run (clicked path) is buffered into a corridor, unioned with the coverage
//! so far, clipped to the city boundary, and scored against the boundary area.
//!
//! Layers (leaf → root)
//! - `boundary`: the fixed region and its area.
//! - `geom2`: stateless buffer/union/intersect/area/length.
//! - `accumulator`: running coverage and per-run deltas.
//! - `ledger`: append-only run history.
//! - `tracker`: coverage + ledger updated as one transaction.
//! - `session`: draw-mode lifecycle feeding the tracker.

pub mod accumulator;
pub mod boundary;
pub mod error;
pub mod geom2;
pub mod ledger;
pub mod session;
pub mod tracker;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use accumulator::{Coverage, CoverageAccumulator, Run, RunOutcome};
pub use boundary::Boundary;
pub use error::CoverageError;
pub use geom2::{GeoPolygon, GeomCfg, LatLng, Path};
pub use ledger::RunLedger;
pub use session::{SessionCfg, SessionController, SessionError, SessionState};
pub use tracker::CoverageTracker;

/// Common exports for callers driving a session.
pub mod prelude {
    pub use crate::accumulator::{Coverage, Run};
    pub use crate::boundary::Boundary;
    pub use crate::error::CoverageError;
    pub use crate::geom2::{GeomCfg, LatLng, LocalFrame, Path};
    pub use crate::session::{SessionCfg, SessionController, SessionError, SessionState};
}

#[cfg(test)]
mod tests_props;
