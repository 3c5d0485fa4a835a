//! Boundary Provider: the fixed region polygon and its area.
//!
//! A `Boundary` is built once at startup and only read afterwards.

use geo::{LineString, MultiPolygon, Polygon};

use crate::error::CoverageError;
use crate::geom2::{area, GeoPolygon, LatLng, LocalFrame, M2_PER_KM2};

/// Simplified Pune administrative boundary, `(lng, lat)` ring.
const PUNE_RING: [(f64, f64); 5] = [
    (73.74, 18.63),
    (73.96, 18.63),
    (73.96, 18.43),
    (73.74, 18.43),
    (73.74, 18.63),
];

/// Immutable region polygon with its precomputed area.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    polygon: GeoPolygon,
    area_m2: f64,
}

impl Boundary {
    /// Validate coordinates and precompute the area. Fails on zero area.
    pub fn new(polygon: GeoPolygon) -> Result<Self, CoverageError> {
        let all_valid = polygon.0.iter().all(|p| {
            p.exterior()
                .coords()
                .chain(p.interiors().iter().flat_map(|r| r.coords()))
                .all(|c| LatLng::new(c.y, c.x).is_valid())
        });
        if !all_valid {
            return Err(CoverageError::geometry("boundary has out-of-range coordinates"));
        }
        let area_m2 = area(Some(&polygon));
        if !(area_m2.is_finite() && area_m2 > 0.0) {
            return Err(CoverageError::geometry("boundary has zero area"));
        }
        Ok(Self { polygon, area_m2 })
    }

    /// Single ring of `(lng, lat)` pairs (closing point optional).
    pub fn from_lng_lat_ring(ring: &[(f64, f64)]) -> Result<Self, CoverageError> {
        if ring.len() < 3 {
            return Err(CoverageError::geometry(format!(
                "boundary ring needs at least three points (got {})",
                ring.len()
            )));
        }
        let ls: LineString<f64> = ring.to_vec().into();
        Self::new(MultiPolygon::new(vec![Polygon::new(ls, vec![])]))
    }

    /// Square of side `side_m` meters centered on `center`.
    pub fn square_around(center: LatLng, side_m: f64) -> Result<Self, CoverageError> {
        if !(side_m.is_finite() && side_m > 0.0) {
            return Err(CoverageError::geometry(format!("square side must be positive (got {side_m})")));
        }
        let f = LocalFrame::at(center);
        let h = side_m / 2.0;
        let ring: Vec<(f64, f64)> = [(-h, -h), (h, -h), (h, h), (-h, h)]
            .iter()
            .map(|&(e, n)| {
                let p = f.offset(e, n);
                (p.lng, p.lat)
            })
            .collect();
        Self::from_lng_lat_ring(&ring)
    }

    /// Built-in city boundary (Pune, simplified to its bounding box).
    pub fn pune() -> Self {
        let ls: LineString<f64> = PUNE_RING.to_vec().into();
        let polygon = MultiPolygon::new(vec![Polygon::new(ls, vec![])]);
        let area_m2 = area(Some(&polygon));
        Self { polygon, area_m2 }
    }

    #[inline]
    pub fn polygon(&self) -> &GeoPolygon {
        &self.polygon
    }

    #[inline]
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    #[inline]
    pub fn area_km2(&self) -> f64 {
        self.area_m2 / M2_PER_KM2
    }

    /// Share of the boundary covered by `area_m2`, in percent.
    #[inline]
    pub fn percent_of(&self, area_m2: f64) -> f64 {
        area_m2 / self.area_m2 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area_is_side_squared() {
        let b = Boundary::square_around(LatLng::new(18.53, 73.85), 22_000.0).unwrap();
        assert!((b.area_km2() - 484.0).abs() / 484.0 < 0.005, "{}", b.area_km2());
        assert!((b.percent_of(b.area_m2()) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn pune_box_is_a_city_sized_region() {
        let b = Boundary::pune();
        // 0.22° of longitude by 0.2° of latitude near 18.5°N
        assert!(b.area_km2() > 500.0 && b.area_km2() < 560.0, "{}", b.area_km2());
        assert_eq!(b.polygon().0.len(), 1);
    }

    #[test]
    fn rejects_degenerate_rings() {
        assert!(Boundary::from_lng_lat_ring(&[(73.0, 18.0), (74.0, 18.0)]).is_err());
        let flat = [(73.0, 18.0), (74.0, 18.0), (75.0, 18.0)];
        assert!(matches!(
            Boundary::from_lng_lat_ring(&flat),
            Err(CoverageError::Geometry { .. })
        ));
        let bad = [(73.0, 18.0), (274.0, 18.0), (74.0, 19.0)];
        assert!(Boundary::from_lng_lat_ring(&bad).is_err());
        assert!(Boundary::square_around(LatLng::new(0.0, 0.0), -1.0).is_err());
    }
}
