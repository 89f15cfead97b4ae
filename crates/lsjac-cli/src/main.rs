//! lsjac command-line interface.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lsjac_core::CheckConfig;
use lsjac_plot::{PlottersRenderer, render_spectrum};
use lsjac_validate::{DatasetKey, DatasetSource, DirectorySource, RunOptions, RunOutcome, run};

#[derive(Parser)]
#[command(name = "lsjac")]
#[command(about = "Check analytic line-shape derivatives against finite differences", long_about = None)]
#[command(version)]
struct Cli {
    /// Line-shape case to check (datasets are read from <DATA_DIR>/test-<CASE>)
    #[arg(value_name = "CASE", default_value = "lorentz")]
    case: String,

    /// Directory holding the test-<CASE> dataset directories
    #[arg(long, value_name = "DIR", default_value = "testdata")]
    data_dir: PathBuf,

    /// TOML file with grid, axis, tolerances and catalog overrides
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Figure output (.png or .svg); defaults to jacobian-<CASE>.png
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also plot the baseline profile to this file
    #[arg(long, value_name = "FILE")]
    baseline_plot: Option<PathBuf>,

    /// Skip the comparison with the analytic derivatives
    #[arg(long)]
    no_compare: bool,

    /// Load perturbed datasets in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match check(&cli) {
        Ok(outcome) if outcome.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(cli: &Cli) -> Result<RunOutcome> {
    let config = load_config(cli.config.as_deref())?;
    let source = DirectorySource::new(&cli.data_dir);

    if let Some(ref path) = cli.baseline_plot {
        plot_baseline(&source, &cli.case, &config, path)?;
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("jacobian-{}.png", cli.case)));
    let mut renderer = PlottersRenderer::new(&output).with_title(format!(
        "{} line-shape derivatives (finite difference)",
        cli.case
    ));

    let options = RunOptions::default()
        .with_parallel(cli.parallel)
        .with_compare(!cli.no_compare);

    let outcome = run(&source, &cli.case, &config, &mut renderer, options)
        .with_context(|| format!("Derivative check failed for case {:?}", cli.case))?;

    if let Some(ref report) = outcome.report {
        print!("{}", report.to_text());
    }
    println!("Figure: {}", output.display());

    Ok(outcome)
}

fn load_config(path: Option<&Path>) -> Result<CheckConfig> {
    match path {
        Some(path) => CheckConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => CheckConfig::builtin().context("Built-in catalog is invalid"),
    }
}

fn plot_baseline(
    source: &DirectorySource,
    case: &str,
    config: &CheckConfig,
    path: &Path,
) -> Result<()> {
    let baseline = source
        .load(case, &DatasetKey::Baseline)
        .and_then(|dataset| Ok(dataset.field(config.field)?))
        .with_context(|| format!("Failed to load baseline for case {:?}", case))?;

    render_spectrum(
        path,
        &config.axis.values(),
        &baseline,
        &format!("{} baseline propagation", case),
    )
    .with_context(|| format!("Failed to plot baseline: {}", path.display()))
}
