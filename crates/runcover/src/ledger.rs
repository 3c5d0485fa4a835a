//! Run Ledger: append-only history of saved runs, in save order.

use crate::accumulator::Run;

#[derive(Clone, Debug, Default)]
pub struct RunLedger {
    runs: Vec<Run>,
}

impl RunLedger {
    #[inline]
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    #[inline]
    pub fn append(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Clears everything. Callers pair this with a coverage reset.
    #[inline]
    pub fn reset(&mut self) {
        self.runs.clear();
    }

    /// Oldest first.
    #[inline]
    pub fn list(&self) -> &[Run] {
        &self.runs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&Run> {
        self.runs.last()
    }

    /// Display order for history panels.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().rev()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.runs.iter().map(|r| r.distance_km).sum()
    }
}
