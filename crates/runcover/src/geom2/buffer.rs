//! Path buffering: Minkowski sum of the path's segments with a disk.
//!
//! Model
//! - Project the path into a `LocalFrame` anchored at its first point.
//! - Each segment becomes a capsule (hull of the two endpoint disks).
//! - Capsules are unioned in degrees, so the result composes with coverage
//!   without another projection step.

use geo::{LineString, MultiPolygon, Polygon};
use nalgebra::Vector2;

use super::ops::union;
use super::types::{GeoPolygon, GeomCfg, LocalFrame, Path};
use super::util::{capsule, ring_area};
use crate::error::CoverageError;

/// Paths reaching past this latitude are refused: the local frame's
/// east-west scale collapses near the poles.
pub const MAX_ABS_LAT: f64 = 89.9;

/// Buffer `path` by `radius_m` meters.
///
/// Errors
/// - `DegenerateInput` for fewer than two points.
/// - `InvalidRadius` for a non-finite or non-positive radius.
/// - `Geometry` for out-of-range or polar coordinates, or a collapsed capsule.
pub fn buffer_path(path: &Path, radius_m: f64, cfg: &GeomCfg) -> Result<GeoPolygon, CoverageError> {
    let pts = path.points();
    if pts.len() < 2 {
        return Err(CoverageError::DegenerateInput { points: pts.len() });
    }
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(CoverageError::InvalidRadius { radius_m });
    }
    if let Some(bad) = pts.iter().find(|p| !p.is_valid()) {
        return Err(CoverageError::geometry(format!(
            "coordinate out of range: lat={}, lng={}",
            bad.lat, bad.lng
        )));
    }

    if let Some(polar) = pts.iter().find(|p| p.lat.abs() > MAX_ABS_LAT) {
        return Err(CoverageError::geometry(format!(
            "latitude {} too close to a pole to buffer (limit ±{MAX_ABS_LAT}°)",
            polar.lat
        )));
    }

    let frame = LocalFrame::at(pts[0]);
    let local: Vec<Vector2<f64>> = pts.iter().map(|p| frame.to_local(*p)).collect();
    let n = cfg.arc_segments.max(8);

    let mut acc: Option<GeoPolygon> = None;
    for (k, seg) in local.windows(2).enumerate() {
        let hull = capsule(seg[0], seg[1], radius_m, n)
            .filter(|h| ring_area(h) > 0.0)
            .ok_or_else(|| CoverageError::geometry(format!("segment {k} collapsed while buffering")))?;
        let ring: LineString<f64> = hull.iter().map(|v| frame.to_coord(*v)).collect();
        let piece = MultiPolygon::new(vec![Polygon::new(ring, vec![])]);
        acc = Some(union(acc.as_ref(), &piece));
    }
    acc.ok_or_else(|| CoverageError::geometry("buffer produced no geometry"))
}
