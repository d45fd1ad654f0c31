use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jam_disputes::{
    AcceptAllVerifier, Adjudicator, AttestationVerifier, DisputesConfig, DisputesExtrinsic,
    DisputesOutput, DisputesState, Ed25519Verifier,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod vector;

use vector::{run_vector, TestVector};

#[derive(Parser)]
#[command(name = "jam-disputes")]
#[command(about = "JAM disputes transition and conformance runner", long_about = None)]
struct Cli {
    /// Protocol parameters (TOML, JSON or YAML); JAM_DISPUTES_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept every signature instead of verifying Ed25519 attestations
    #[arg(long, global = true)]
    skip_signatures: bool,

    /// Log filter, e.g. "debug" or "jam_disputes=trace"; defaults to RUST_LOG, then "info"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one conformance vector
    Run { file: PathBuf },

    /// Run every *.json vector in a directory
    Check { dir: PathBuf },

    /// Apply a disputes batch to a state and print the result
    Adjudicate {
        #[arg(long)]
        extrinsic: PathBuf,
        #[arg(long)]
        state: PathBuf,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct AdjudicationResult<'a> {
    output: &'a DisputesOutput,
    post_state: &'a DisputesState,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = load_config(cli.config.as_deref())?;
    let verifier: Box<dyn AttestationVerifier> = if cli.skip_signatures {
        warn!("signature verification disabled");
        Box::new(AcceptAllVerifier)
    } else {
        Box::new(Ed25519Verifier)
    };
    let adjudicator = Adjudicator::new(config, verifier)?;

    match cli.command {
        Commands::Run { file } => {
            if !run_file(&file, &adjudicator)? {
                bail!("vector {} failed", file.display());
            }
        }
        Commands::Check { dir } => check_dir(&dir, &adjudicator)?,
        Commands::Adjudicate {
            extrinsic,
            state,
            out,
        } => {
            let extrinsic: DisputesExtrinsic = read_json(&extrinsic)?;
            let pre_state: DisputesState = read_json(&state)?;
            let transition = adjudicator.apply(&extrinsic, &pre_state);
            let rendered = serde_json::to_string_pretty(&AdjudicationResult {
                output: &transition.output,
                post_state: &transition.post_state,
            })?;
            match out {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("result written to {}", path.display());
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> Result<DisputesConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    let config: DisputesConfig = builder
        .add_source(config::Environment::with_prefix("JAM_DISPUTES"))
        .build()
        .context("loading configuration")?
        .try_deserialize()
        .context("invalid configuration")?;
    config.validate()?;
    info!(
        "epoch length {}, age policy {:?}, vote split policy {:?}",
        config.epoch_length, config.age_policy, config.vote_split_policy
    );
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn run_file<V: AttestationVerifier>(path: &Path, adjudicator: &Adjudicator<V>) -> Result<bool> {
    let vector = TestVector::load(path)?;
    for key in vector.unexplained_marks() {
        warn!(
            "{}: expected offenders_mark holds {} which no culprit or fault names; the vector is likely wrong",
            path.display(),
            key
        );
    }

    let report = run_vector(&vector, adjudicator)?;
    if report.passed() {
        info!("PASS {}", path.display());
    } else {
        error!(
            "FAIL {} (output {}, post-state {})",
            path.display(),
            if report.output_matches { "ok" } else { "differs" },
            if report.state_matches { "ok" } else { "differs" }
        );
        error!("  computed output {}", serde_json::to_string(&report.output)?);
        for difference in &report.differences {
            error!("  {difference}");
        }
    }
    Ok(report.passed())
}

fn check_dir<V: AttestationVerifier>(dir: &Path, adjudicator: &Adjudicator<V>) -> Result<()> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut failed = Vec::new();
    for file in &files {
        match run_file(file, adjudicator) {
            Ok(true) => {}
            Ok(false) => failed.push(file),
            Err(err) => {
                error!("{}: {err:#}", file.display());
                failed.push(file);
            }
        }
    }

    info!("{} passed, {} failed", files.len() - failed.len(), failed.len());
    if !failed.is_empty() {
        bail!("{} of {} vectors failed", failed.len(), files.len());
    }
    Ok(())
}
