// src/main.rs - gcode-timer entry point
use clap::Parser;
use gcode_timer::cli::{run, Cli};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    // Logs go to stderr so --stdout output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    tracing::debug!("gcode-timer {}", env!("CARGO_PKG_VERSION"));

    run(&cli).map_err(|e| {
        tracing::error!("{}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })
}
