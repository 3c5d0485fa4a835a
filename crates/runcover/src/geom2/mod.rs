//! Geometry Engine: buffer, union, intersect, area, length.
//!
//! Purpose
//! - Pure functions over geographic polygons; no state, no I/O.
//! - Polygons live in longitude/latitude degrees. Metric work (buffer radius,
//!   area, length) happens through a local frame or spherical formulas.
//!
//! Why this split
//! - `buffer` owns the only projection step; `ops` stays in degrees so that
//!   repeated union/clip cycles never round-trip through a projection.
//!
//! Code cross-refs: `accumulator::CoverageAccumulator`, `boundary::Boundary`

mod buffer;
mod ops;
mod types;
mod util;

pub use buffer::{buffer_path, MAX_ABS_LAT};
pub use ops::{area, intersect, length, union};
pub use types::{GeoPolygon, GeomCfg, LatLng, LocalFrame, Path, EARTH_RADIUS_M, M2_PER_KM2};

#[cfg(test)]
mod tests;
