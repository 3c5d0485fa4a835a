//! Coverage Accumulator: fold one run into the running coverage polygon.
//!
//! Pipeline per run
//! - buffer the path and reject it if it misses the boundary entirely.
//! - union with coverage, clip to the boundary, measure.
//! - Every step runs on locals; `self.coverage` is replaced only once all of
//!   them succeeded, so a rejection leaves no trace.
//!
//! Code cross-refs: `geom2::{buffer_path, union, intersect, area, length}`,
//! `tracker::CoverageTracker` (pairs this with the ledger)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::CoverageError;
use crate::geom2::{area, buffer_path, intersect, length, union, GeoPolygon, GeomCfg, Path, M2_PER_KM2};

/// Accumulated, boundary-clipped union of all saved buffers.
///
/// Invariants:
/// - `polygon` is `None` exactly when nothing has been covered yet.
/// - `percentage == area_km2 / boundary_km2 * 100`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub polygon: Option<GeoPolygon>,
    pub area_km2: f64,
    pub percentage: f64,
}

impl Coverage {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygon.is_none()
    }
}

/// One saved drawing session and its metrics. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,
    pub started_at: DateTime<Utc>,
    pub path: Path,
    pub radius_m: f64,
    pub distance_km: f64,
    /// Coverage area gained by this run; ~0 when it retraced covered ground.
    pub new_area_added_km2: f64,
    /// Percentage-point increase of coverage (a delta, not the running total).
    pub new_coverage_percent: f64,
    /// This run's own buffer, before union and clipping.
    pub buffered: GeoPolygon,
}

/// Result of a successful `apply_run`.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub coverage: Coverage,
    pub run: Run,
}

/// Owns the running coverage for one boundary.
#[derive(Clone, Debug)]
pub struct CoverageAccumulator {
    boundary: Boundary,
    cfg: GeomCfg,
    coverage: Coverage,
    next_id: u64,
}

impl CoverageAccumulator {
    pub fn new(boundary: Boundary, cfg: GeomCfg) -> Self {
        Self {
            boundary,
            cfg,
            coverage: Coverage::default(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }

    #[inline]
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// `apply_run_at` stamped with the current UTC time.
    pub fn apply_run(&mut self, path: &Path, radius_m: f64) -> Result<RunOutcome, CoverageError> {
        self.apply_run_at(path, radius_m, Utc::now())
    }

    /// Fold `path` buffered by `radius_m` into coverage. All-or-nothing.
    pub fn apply_run_at(
        &mut self,
        path: &Path,
        radius_m: f64,
        started_at: DateTime<Utc>,
    ) -> Result<RunOutcome, CoverageError> {
        if path.len() < 2 {
            return Err(CoverageError::DegenerateInput { points: path.len() });
        }
        let buffered = buffer_path(path, radius_m, &self.cfg)?;
        // Judged on the run alone; the clipped union always contains old coverage.
        if intersect(&buffered, self.boundary.polygon()).is_none() {
            return Err(CoverageError::OutOfBounds);
        }
        let merged = union(self.coverage.polygon.as_ref(), &buffered);
        let clipped =
            intersect(&merged, self.boundary.polygon()).ok_or(CoverageError::OutOfBounds)?;

        let new_area_m2 = area(Some(&clipped));
        if !new_area_m2.is_finite() {
            return Err(CoverageError::geometry("clipped coverage has non-finite area"));
        }
        let old_area_m2 = area(self.coverage.polygon.as_ref());
        let delta_m2 = new_area_m2 - old_area_m2;
        if delta_m2 < -self.cfg.eps_area_rel * new_area_m2.max(1.0) {
            tracing::warn!(delta_m2, old_area_m2, new_area_m2, "coverage_shrank");
        }
        let percentage = self.boundary.percent_of(new_area_m2);

        let run = Run {
            id: self.next_id,
            started_at,
            path: path.clone(),
            radius_m,
            distance_km: length(path) / 1000.0,
            new_area_added_km2: delta_m2 / M2_PER_KM2,
            new_coverage_percent: percentage - self.coverage.percentage,
            buffered,
        };
        let coverage = Coverage {
            polygon: Some(clipped),
            area_km2: new_area_m2 / M2_PER_KM2,
            percentage,
        };
        tracing::debug!(
            run_id = run.id,
            points = path.len(),
            radius_m,
            added_km2 = run.new_area_added_km2,
            total_km2 = coverage.area_km2,
            "run_applied"
        );

        self.next_id += 1;
        self.coverage = coverage.clone();
        Ok(RunOutcome { coverage, run })
    }

    /// Back to zero coverage. Run ids keep counting.
    pub fn reset(&mut self) {
        self.coverage = Coverage::default();
    }
}
