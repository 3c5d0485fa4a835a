//! Session Controller: draw-mode lifecycle around a `CoverageTracker`.
//!
//! States: `Idle → Drawing → Idle` (on save or cancel).
//! - Points are collected only while drawing; no geometry runs until `save`.
//! - `save` always ends the session, accepted or not; a rejected path is dropped.
//! - `start` is gated by `SessionCfg::max_runs` (admission control).

use std::fmt;

use crate::accumulator::{Coverage, Run};
use crate::boundary::Boundary;
use crate::error::CoverageError;
use crate::geom2::{GeomCfg, LatLng, Path};
use crate::tracker::CoverageTracker;

/// Session settings: radius slider bounds and the stored-run cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionCfg {
    /// Maximum stored runs before `start` is refused. `None` = unlimited.
    pub max_runs: Option<usize>,
    pub radius_min_m: f64,
    pub radius_max_m: f64,
    pub default_radius_m: f64,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            max_runs: Some(10),
            radius_min_m: 5.0,
            radius_max_m: 50.0,
            default_radius_m: 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drawing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    AlreadyDrawing,
    NotDrawing,
    RunLimitReached { limit: usize },
    RadiusOutOfRange { radius_m: f64, min: f64, max: f64 },
    /// The pipeline refused the run; the session is back to idle.
    Rejected(CoverageError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDrawing => write!(f, "a drawing session is already in progress"),
            Self::NotDrawing => write!(f, "no drawing session in progress"),
            Self::RunLimitReached { limit } => {
                write!(f, "limit of {limit} runs reached; reset to draw more")
            }
            Self::RadiusOutOfRange { radius_m, min, max } => {
                write!(f, "buffer radius {radius_m} m outside [{min}, {max}] m")
            }
            Self::Rejected(e) => write!(f, "run not saved: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoverageError> for SessionError {
    fn from(e: CoverageError) -> Self {
        Self::Rejected(e)
    }
}

#[derive(Clone, Debug)]
pub struct SessionController {
    cfg: SessionCfg,
    tracker: CoverageTracker,
    state: SessionState,
    path: Path,
    radius_m: f64,
}

impl SessionController {
    pub fn new(boundary: Boundary, geom: GeomCfg, cfg: SessionCfg) -> Self {
        Self {
            radius_m: cfg.default_radius_m,
            cfg,
            tracker: CoverageTracker::new(boundary, geom),
            state: SessionState::Idle,
            path: Path::new(),
        }
    }

    /// Enter drawing mode with an empty path.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Drawing {
            return Err(SessionError::AlreadyDrawing);
        }
        if let Some(limit) = self.cfg.max_runs {
            if self.tracker.runs().len() >= limit {
                return Err(SessionError::RunLimitReached { limit });
            }
        }
        self.path = Path::new();
        self.state = SessionState::Drawing;
        Ok(())
    }

    /// Append a clicked point. Returns `false` (and ignores it) while idle.
    pub fn add_point(&mut self, p: LatLng) -> bool {
        if self.state != SessionState::Drawing {
            return false;
        }
        self.path.push(p);
        true
    }

    /// Fold the collected path into coverage and end the session.
    pub fn save(&mut self) -> Result<Run, SessionError> {
        if self.state != SessionState::Drawing {
            return Err(SessionError::NotDrawing);
        }
        let path = std::mem::take(&mut self.path);
        self.state = SessionState::Idle;
        match self.tracker.record(&path, self.radius_m) {
            Ok(outcome) => {
                tracing::info!(
                    run_id = outcome.run.id,
                    distance_km = outcome.run.distance_km,
                    added_km2 = outcome.run.new_area_added_km2,
                    coverage_pct = outcome.coverage.percentage,
                    "run_saved"
                );
                Ok(outcome.run)
            }
            Err(e) => {
                tracing::warn!(points = path.len(), reason = %e, "run_rejected");
                Err(e.into())
            }
        }
    }

    /// Discard the in-progress path.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Drawing {
            return Err(SessionError::NotDrawing);
        }
        self.path = Path::new();
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Clear ledger and coverage and drop any session in progress.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.path = Path::new();
        self.state = SessionState::Idle;
    }

    /// Radius used by the next `save`.
    pub fn set_radius(&mut self, radius_m: f64) -> Result<(), SessionError> {
        let (min, max) = (self.cfg.radius_min_m, self.cfg.radius_max_m);
        if !(radius_m.is_finite() && radius_m >= min && radius_m <= max) {
            return Err(SessionError::RadiusOutOfRange { radius_m, min, max });
        }
        self.radius_m = radius_m;
        Ok(())
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    /// Whether `start` would be admitted right now.
    pub fn can_start(&self) -> bool {
        self.state == SessionState::Idle
            && self
                .cfg
                .max_runs
                .map_or(true, |limit| self.tracker.runs().len() < limit)
    }

    #[inline]
    pub fn coverage(&self) -> &Coverage {
        self.tracker.coverage()
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        self.tracker.runs()
    }

    #[inline]
    pub fn last_run(&self) -> Option<&Run> {
        self.tracker.ledger().last()
    }

    #[inline]
    pub fn tracker(&self) -> &CoverageTracker {
        &self.tracker
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        self.tracker.boundary()
    }
}
