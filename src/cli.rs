//! Command-line front end: argument definitions and the top-level run loop.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{load_or_default, save_config, DEFAULT_CONFIG_FILE};
use crate::error::TimerError;
use crate::file_manager::{timed_output_path, FileManager, OutputTarget};
use crate::format::format_duration;
use crate::motion::KinematicLimits;

/// Estimate 3D-printer G-code run time and annotate programs with
/// remaining-time messages.
#[derive(Parser, Debug)]
#[command(
    name = "gcode-timer",
    version,
    about = "Estimates G-code print time and inserts M117 remaining-time messages.",
    after_help = "Without -o, each input gets a sibling file with a '.timed' suffix before its extension."
)]
pub struct Cli {
    /// Only print the estimated time for each file, do not generate G-code
    #[arg(short, long)]
    pub info: bool,

    /// Output file name (single input only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the annotated G-code to stdout instead of a file (single input only; overrides -o)
    #[arg(short, long)]
    pub stdout: bool,

    /// Path to the TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the config file, filling in any missing defaults
    #[arg(long, conflicts_with_all = ["inputs", "info", "output", "stdout"])]
    pub create_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// G-code files to process
    #[arg(value_name = "GCODE", required_unless_present = "create_config")]
    pub inputs: Vec<PathBuf>,
}

impl Cli {
    /// Checks clap cannot express: single-output options need exactly one input.
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.info || self.inputs.len() <= 1 {
            return Ok(());
        }
        if self.stdout {
            return Err(TimerError::Usage("--stdout needs exactly one input file".to_string()));
        }
        if self.output.is_some() {
            return Err(TimerError::Usage("--output needs exactly one input file".to_string()));
        }
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Where the annotated copy of `input` goes.
    pub fn output_target(&self, input: &std::path::Path) -> OutputTarget {
        if self.stdout {
            OutputTarget::Stdout
        } else if let Some(output) = &self.output {
            OutputTarget::File(output.clone())
        } else {
            OutputTarget::File(timed_output_path(input))
        }
    }
}

/// Execute the command line.
pub fn run(cli: &Cli) -> Result<(), TimerError> {
    let config_path = cli.config_path();
    let config = load_or_default(&config_path)?;

    if cli.create_config {
        config.validate()?;
        save_config(&config_path, &config)?;
        println!("Config saved to {}", config_path.display());
        return Ok(());
    }

    cli.validate()?;
    config.validate()?;
    let limits = KinematicLimits::from(&config);
    let files = FileManager::new(&limits);

    for input in &cli.inputs {
        let total = files.estimate(input)?;
        if cli.info {
            println!("{} total time: {}", input.display(), format_duration(total.round()));
            continue;
        }
        files.annotate(input, &cli.output_target(input), total)?;
    }
    Ok(())
}
