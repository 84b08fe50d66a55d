use anyhow::{Context, Result};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use trendmap::cli::{parse_args, Commands};
use trendmap::core::{BuildOutcome, Report};
use trendmap::io::create_writer;
use trendmap::result::{AnalysisBuild, NullReferenceProvider, ReferenceId, ReferenceProvider};
use trendmap::{AnalysisResult, GateConfig, ThresholdGate};

// Main orchestrator function
fn main() -> Result<()> {
    env_logger::init();

    let cli = parse_args();

    let outcome = match cli.command {
        Commands::Diff {
            current,
            reference,
            previous,
            build_number,
            job,
            results_dir,
            config,
            format,
            output,
        } => {
            let diff_config = DiffConfig {
                current,
                reference,
                previous,
                build_number,
                job,
                results_dir,
                config,
                format,
                output,
            };
            handle_diff_command(diff_config)?
        }
    };

    match outcome {
        BuildOutcome::Success => Ok(()),
        BuildOutcome::Unstable => std::process::exit(1),
        BuildOutcome::Failure => std::process::exit(2),
    }
}

struct DiffConfig {
    current: PathBuf,
    reference: Option<PathBuf>,
    previous: Option<PathBuf>,
    build_number: u32,
    job: String,
    results_dir: PathBuf,
    config: Option<PathBuf>,
    format: trendmap::cli::OutputFormat,
    output: Option<PathBuf>,
}

/// Host build handle for one locally driven run
struct LocalBuild {
    number: u32,
    dir: PathBuf,
    outcome: Cell<BuildOutcome>,
}

impl AnalysisBuild for LocalBuild {
    fn number(&self) -> u32 {
        self.number
    }

    fn build_dir(&self) -> PathBuf {
        self.dir.clone()
    }

    fn set_outcome(&self, outcome: BuildOutcome) {
        self.outcome.set(outcome);
    }
}

/// Baseline loaded from a report file of an earlier build
struct FileReference {
    id: Option<ReferenceId>,
    report: Report,
}

impl ReferenceProvider for FileReference {
    fn analysis_build(&self) -> Option<ReferenceId> {
        self.id.clone()
    }

    fn issues(&self) -> Report {
        self.report.clone()
    }
}

fn handle_diff_command(config: DiffConfig) -> Result<BuildOutcome> {
    let report = load_report(&config.current)?;

    let reference: Box<dyn ReferenceProvider> = match &config.reference {
        Some(path) => Box::new(FileReference {
            id: Some(ReferenceId {
                job: config.job.clone(),
                build: path.display().to_string(),
            }),
            report: load_report(path)?,
        }),
        None => Box::new(NullReferenceProvider),
    };

    let previous = config
        .previous
        .as_deref()
        .map(load_previous_result)
        .transpose()?;

    let gate_config = match &config.config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::default(),
    };
    let gate = ThresholdGate::new(gate_config);

    let owner = LocalBuild {
        number: config.build_number,
        dir: config
            .results_dir
            .join(&config.job)
            .join(config.build_number.to_string()),
        outcome: Cell::new(BuildOutcome::Success),
    };

    let result = AnalysisResult::new(&owner, reference.as_ref(), report, &gate, previous.as_ref());

    write_summary(&result, config.format, config.output.as_deref())?;

    Ok(result.overall_result())
}

fn load_report(path: &Path) -> Result<Report> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("Failed to decode report {}", path.display()))
}

fn load_previous_result(path: &Path) -> Result<AnalysisResult> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read previous result {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("Failed to decode previous result {}", path.display()))
}

fn write_summary(
    result: &AnalysisResult,
    format: trendmap::cli::OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut writer = match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            create_writer(file, format.into())
        }
        None => create_writer(std::io::stdout(), format.into()),
    };
    writer.write_result(result)
}
