//! Polygon algebra and measurement on geographic polygons.
//!
//! - `union`/`intersect` delegate to `geo::BooleanOps` (integer-snapped overlay,
//!   robust against the shared edges that repeated unions of the same run produce).
//! - `area` is spherical (Chamberlain–Duquette over `EARTH_RADIUS_M`), per ring.
//! - `length` is haversine over the mean earth radius.

use geo::{Area, BooleanOps, ChamberlainDuquetteArea, LineString, Polygon};

use super::types::{GeoPolygon, Path};

/// Set union. An absent or empty `a` is the identity: `b` comes back unchanged.
pub fn union(a: Option<&GeoPolygon>, b: &GeoPolygon) -> GeoPolygon {
    match a {
        Some(a) if !a.0.is_empty() => {
            if b.0.is_empty() {
                return a.clone();
            }
            a.union(b)
        }
        _ => b.clone(),
    }
}

/// Set intersection; `None` when nothing with positive area remains.
pub fn intersect(a: &GeoPolygon, b: &GeoPolygon) -> Option<GeoPolygon> {
    if a.0.is_empty() || b.0.is_empty() {
        return None;
    }
    let mut out = a.intersection(b);
    // Edge-touching inputs can leave zero-area slivers behind.
    out.0.retain(|p| p.unsigned_area() > 0.0);
    if out.0.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Area in square meters; zero for `None` or empty input.
/// Holes are subtracted whatever their winding.
pub fn area(p: Option<&GeoPolygon>) -> f64 {
    match p {
        Some(p) => p.0.iter().map(polygon_area).sum(),
        None => 0.0,
    }
}

fn polygon_area(p: &Polygon<f64>) -> f64 {
    let holes: f64 = p.interiors().iter().map(ring_area).sum();
    (ring_area(p.exterior()) - holes).max(0.0)
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), vec![]).chamberlain_duquette_unsigned_area()
}

/// Great-circle length of the path in meters; zero for fewer than two points.
#[allow(deprecated)]
pub fn length(path: &Path) -> f64 {
    use geo::HaversineLength;

    if path.len() < 2 {
        return 0.0;
    }
    let line: LineString<f64> = path.points().iter().map(|p| p.to_coord()).collect();
    line.haversine_length()
}
