use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trendmap")]
#[command(about = "Build-over-build static analysis issue tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Diff the current issue report against a reference build
    Diff {
        /// Current issue report (JSON)
        #[arg(long)]
        current: PathBuf,

        /// Reference build's issue report (JSON); omit when there is no history
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Previous build's analysis result (JSON), feeds streak tracking
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Number of the current build
        #[arg(long, short = 'n')]
        build_number: u32,

        /// Job name recorded in the result
        #[arg(long, default_value = "local")]
        job: String,

        /// Directory where issue partitions are persisted
        #[arg(long, default_value = ".trendmap")]
        results_dir: PathBuf,

        /// Quality gate thresholds (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Write the durable analysis result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
