//! Application state: coverage and ledger, mutated together or not at all.

use chrono::{DateTime, Utc};

use crate::accumulator::{Coverage, CoverageAccumulator, Run, RunOutcome};
use crate::boundary::Boundary;
use crate::error::CoverageError;
use crate::geom2::{GeomCfg, Path};
use crate::ledger::RunLedger;

#[derive(Clone, Debug)]
pub struct CoverageTracker {
    accumulator: CoverageAccumulator,
    ledger: RunLedger,
}

impl CoverageTracker {
    pub fn new(boundary: Boundary, cfg: GeomCfg) -> Self {
        Self {
            accumulator: CoverageAccumulator::new(boundary, cfg),
            ledger: RunLedger::new(),
        }
    }

    /// Apply the run and append it to the ledger. On error neither changes.
    pub fn record(&mut self, path: &Path, radius_m: f64) -> Result<RunOutcome, CoverageError> {
        self.record_at(path, radius_m, Utc::now())
    }

    pub fn record_at(
        &mut self,
        path: &Path,
        radius_m: f64,
        started_at: DateTime<Utc>,
    ) -> Result<RunOutcome, CoverageError> {
        let outcome = self.accumulator.apply_run_at(path, radius_m, started_at)?;
        self.ledger.append(outcome.run.clone());
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.ledger.reset();
        self.accumulator.reset();
        tracing::info!("coverage_reset");
    }

    #[inline]
    pub fn coverage(&self) -> &Coverage {
        self.accumulator.coverage()
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        self.ledger.list()
    }

    #[inline]
    pub fn ledger(&self) -> &RunLedger {
        &self.ledger
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        self.accumulator.boundary()
    }
}
