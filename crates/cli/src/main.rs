use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use sphere_predicates::{PredCfg, Predicates};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod cases;
mod provenance;

use cases::{evaluate, evaluate_all, parse_point, Case, Predicate};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Evaluate robust spherical predicates")]
struct Cmd {
    /// Cross-check every fast answer against exact arithmetic (slow)
    #[arg(long, global = true)]
    verify: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate one predicate on points given as x,y,z
    Eval {
        #[arg(value_enum)]
        predicate: Predicate,
        /// Points in argument order
        #[arg(allow_hyphen_values = true, required = true)]
        points: Vec<String>,
        /// Threshold angle in degrees for the distance predicates
        #[arg(long)]
        r_deg: Option<f64>,
    },
    /// Evaluate a JSON array of cases and write results with a provenance sidecar
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON results.
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let preds = Predicates::new(PredCfg { verify: cmd.verify });
    match cmd.action {
        Action::Eval {
            predicate,
            points,
            r_deg,
        } => eval(&preds, predicate, &points, r_deg),
        Action::Batch { input, out } => batch(&preds, &input, &out),
        Action::Report => report(),
    }
}

fn eval(preds: &Predicates, predicate: Predicate, points: &[String], r_deg: Option<f64>) -> Result<()> {
    tracing::info!(?predicate, n = points.len(), r_deg = ?r_deg, verify = preds.cfg.verify, "eval");
    let case = Case {
        predicate,
        points: points
            .iter()
            .map(|s| parse_point(s))
            .collect::<Result<Vec<_>>>()?,
        r_deg,
    };
    let result = evaluate(preds, &case)?;
    println!("{}", serde_json::to_string(&json!({ "predicate": predicate, "result": result }))?);
    Ok(())
}

fn batch(preds: &Predicates, input: &Path, out: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), verify = preds.cfg.verify, "batch");
    let text = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let cases: Vec<Case> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))?;
    let results = evaluate_all(preds, &cases)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&results)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(
        json!({
            "input": input.to_string_lossy(),
            "cases": cases.len(),
        }),
        preds.cfg.verify,
    );
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(cases = cases.len(), sidecar = %sidecar.display(), "batch done");
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::build_info())?);
    Ok(())
}
