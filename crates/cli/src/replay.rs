//! Replay recorded runs through a drawing session and summarize the result.

use anyhow::{Context, Result};
use runcover::{
    Boundary, Coverage, GeomCfg, LatLng, Run, SessionCfg, SessionController, SessionError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::provenance::{write_sidecar, Payload};

/// Input file: `{"runs": [{"path": [[lat, lng], ...], "radius_m": 15}]}`.
#[derive(Debug, Deserialize)]
pub struct RunFile {
    pub runs: Vec<RecordedRun>,
}

#[derive(Debug, Deserialize)]
pub struct RecordedRun {
    /// `(lat, lng)` clicks in drawing order.
    pub path: Vec<(f64, f64)>,
    #[serde(default)]
    pub radius_m: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
pub struct ReplayOpts {
    /// Radius for runs that do not carry their own.
    pub radius_m: f64,
    pub max_runs: Option<usize>,
    pub geom: GeomCfg,
}

#[derive(Debug, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: String,
}

/// Run metrics without the path and buffer geometry.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub id: u64,
    pub started_at: String,
    pub points: usize,
    pub radius_m: f64,
    pub distance_km: f64,
    pub new_area_added_km2: f64,
    pub new_coverage_percent: f64,
}

impl From<&Run> for RunSummary {
    fn from(r: &Run) -> Self {
        Self {
            id: r.id,
            started_at: r.started_at.to_rfc3339(),
            points: r.path.len(),
            radius_m: r.radius_m,
            distance_km: r.distance_km,
            new_area_added_km2: r.new_area_added_km2,
            new_coverage_percent: r.new_coverage_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub boundary_km2: f64,
    pub coverage_km2: f64,
    pub coverage_pct: f64,
    pub total_distance_km: f64,
    pub saved: usize,
    pub rejected: Vec<Rejection>,
    /// Newest first, as the history panel lists them.
    pub runs: Vec<RunSummary>,
    pub coverage: Coverage,
}

/// Drive one session per recorded run: set radius, start, click, save.
pub fn replay(file: &RunFile, boundary: Boundary, opts: &ReplayOpts) -> ReplayReport {
    let cfg = SessionCfg {
        max_runs: opts.max_runs,
        ..SessionCfg::default()
    };
    let mut session = SessionController::new(boundary, opts.geom, cfg);
    let mut rejected = Vec::new();

    for (index, rec) in file.runs.iter().enumerate() {
        if let Err(e) = replay_one(&mut session, rec, opts.radius_m) {
            tracing::warn!(index, reason = %e, "replay_skipped");
            rejected.push(Rejection {
                index,
                reason: e.to_string(),
            });
        }
    }

    let ledger = session.tracker().ledger();
    let coverage = session.coverage().clone();
    ReplayReport {
        boundary_km2: session.boundary().area_km2(),
        coverage_km2: coverage.area_km2,
        coverage_pct: coverage.percentage,
        total_distance_km: ledger.total_distance_km(),
        saved: ledger.len(),
        rejected,
        runs: ledger.iter_newest_first().map(RunSummary::from).collect(),
        coverage,
    }
}

fn replay_one(
    session: &mut SessionController,
    rec: &RecordedRun,
    fallback_radius_m: f64,
) -> Result<(), SessionError> {
    session.set_radius(rec.radius_m.unwrap_or(fallback_radius_m))?;
    session.start()?;
    for &(lat, lng) in &rec.path {
        session.add_point(LatLng::new(lat, lng));
    }
    session.save().map(|_| ())
}

/// Read `input`, replay against the built-in boundary, write `out` + provenance.
pub fn run_replay(input: &Path, out: &Path, opts: &ReplayOpts) -> Result<ReplayReport> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let file: RunFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing run file {}", input.display()))?;
    tracing::info!(runs = file.runs.len(), input = %input.display(), "replay_start");

    let report = replay(&file, Boundary::pune(), opts);
    tracing::info!(
        saved = report.saved,
        rejected = report.rejected.len(),
        coverage_km2 = report.coverage_km2,
        coverage_pct = report.coverage_pct,
        "replay_done"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = Payload::new(json!({
        "radius_m": opts.radius_m,
        "max_runs": opts.max_runs,
        "arc_segments": opts.geom.arc_segments,
        "boundary": "pune",
    }))
    .with_input(input.to_string_lossy());
    write_sidecar(out, payload)?;
    Ok(report)
}
