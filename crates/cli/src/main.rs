use anyhow::Result;
use clap::{Parser, Subcommand};
use runcover::{Boundary, GeomCfg};
use std::path::PathBuf;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod provenance;
mod replay;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Replay recorded runs and report city coverage")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Feed recorded runs through drawing sessions and write a coverage report
    Replay {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Buffer radius (m) for runs that carry none
        #[arg(long, default_value_t = 15.0)]
        radius: f64,
        /// Maximum stored runs before new sessions are refused
        #[arg(long, default_value_t = 10, conflicts_with = "unlimited")]
        max_runs: usize,
        #[arg(long)]
        unlimited: bool,
        /// Vertices per full circle in buffer disks
        #[arg(long, default_value_t = 64)]
        arc_segments: usize,
    },
    /// Print the built-in boundary and its area
    Boundary,
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Replay {
            input,
            out,
            radius,
            max_runs,
            unlimited,
            arc_segments,
        } => {
            let opts = replay::ReplayOpts {
                radius_m: radius,
                max_runs: (!unlimited).then_some(max_runs),
                geom: GeomCfg {
                    arc_segments,
                    ..GeomCfg::default()
                },
            };
            let report = replay::run_replay(&input, &out, &opts)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "saved": report.saved,
                    "rejected": report.rejected.len(),
                    "coverage_km2": report.coverage_km2,
                    "coverage_pct": report.coverage_pct,
                }))?
            );
            Ok(())
        }
        Action::Boundary => boundary(),
        Action::Report => report(),
    }
}

fn boundary() -> Result<()> {
    let b = Boundary::pune();
    tracing::info!(area_km2 = b.area_km2(), "boundary");
    let obj = serde_json::json!({
        "name": "pune",
        "area_m2": b.area_m2(),
        "area_km2": b.area_km2(),
        "polygon": b.polygon(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::base_block())?);
    Ok(())
}
