//! Basic geographic types, tolerances, and the local metric frame.
//!
//! - `LatLng`: a WGS84 point as delivered by the map (latitude first).
//! - `Path`: the ordered clicks of one drawing session.
//! - `GeomCfg`: disk resolution for buffers and the area tolerance.
//! - `LocalFrame`: equirectangular projection around an anchor, used to build
//!   buffers in meters before mapping them back to degrees.
//!
//! Code cross-refs: `buffer::buffer_path`, `ops::{area, length}`

use geo::{Coord, MultiPolygon};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Polygon geometry in longitude/latitude degrees (`x = lng`, `y = lat`).
/// Possibly multi-part, possibly with holes.
pub type GeoPolygon = MultiPolygon<f64>;

/// Equatorial earth radius in meters. Shared by the local frame and the
/// spherical area formula so buffers measure what they were built as.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Square meters per square kilometer.
pub const M2_PER_KM2: f64 = 1e6;

/// Geometry configuration (resolution and tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Vertices per full circle when approximating the buffer disk. Clamped to >= 8.
    pub arc_segments: usize,
    /// Relative slack for area comparisons (shrinkage below this is float noise).
    pub eps_area_rel: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            arc_segments: 64,
            eps_area_rel: 1e-6,
        }
    }
}

/// Geographic point, latitude first (map click order).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the WGS84 ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }

    #[inline]
    pub(crate) fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

impl From<(f64, f64)> for LatLng {
    /// `(lat, lng)` pair, the order the map reports clicks in.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Ordered points of one drawing session. Append-only while drawing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<LatLng>,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, p: LatLng) {
        self.points.push(p);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }
}

impl From<Vec<LatLng>> for Path {
    fn from(points: Vec<LatLng>) -> Self {
        Self { points }
    }
}

impl FromIterator<LatLng> for Path {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Local equirectangular frame anchored at `origin`: `x` meters east, `y` meters north.
///
/// Distortion grows with distance from the anchor; at run scale (a few km) it
/// stays far below the buffer resolution.
#[derive(Clone, Copy, Debug)]
pub struct LocalFrame {
    origin: LatLng,
    cos_lat: f64,
}

impl LocalFrame {
    /// Distorts without bound near the poles; `buffer_path` refuses
    /// latitudes beyond `MAX_ABS_LAT`.
    pub fn at(origin: LatLng) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos().max(1e-12),
        }
    }

    #[inline]
    pub fn origin(&self) -> LatLng {
        self.origin
    }

    #[inline]
    pub fn to_local(&self, p: LatLng) -> Vector2<f64> {
        Vector2::new(
            EARTH_RADIUS_M * (p.lng - self.origin.lng).to_radians() * self.cos_lat,
            EARTH_RADIUS_M * (p.lat - self.origin.lat).to_radians(),
        )
    }

    #[inline]
    pub fn to_lat_lng(&self, v: Vector2<f64>) -> LatLng {
        LatLng {
            lat: self.origin.lat + (v.y / EARTH_RADIUS_M).to_degrees(),
            lng: self.origin.lng + (v.x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees(),
        }
    }

    /// Point `east_m` east and `north_m` north of the anchor.
    #[inline]
    pub fn offset(&self, east_m: f64, north_m: f64) -> LatLng {
        self.to_lat_lng(Vector2::new(east_m, north_m))
    }

    #[inline]
    pub(crate) fn to_coord(&self, v: Vector2<f64>) -> Coord<f64> {
        self.to_lat_lng(v).to_coord()
    }
}
