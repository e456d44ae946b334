use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use dsv7::cli::{Cli, is_stdin};
use dsv7::config::ConfigManager;
use dsv7::file_discovery::FileDiscovery;
use dsv7::output::Output;
use dsv7::runner::{Runner, ValidationResults};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Log to stderr, filtered by `DSV7_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DSV7_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<u8> {
    cli.validate().map_err(anyhow::Error::msg)?;

    let config = ConfigManager::load_config(cli).context("Failed to load configuration")?;
    debug!("Effective configuration: {:?}", config);

    let discovery = FileDiscovery::from_config(&config.files)?;
    let mut paths = Vec::new();
    for path in &cli.paths {
        if is_stdin(path) {
            paths.push(path.clone());
        } else {
            let found = discovery
                .discover_files(path)
                .with_context(|| format!("Failed to discover files in {}", path.display()))?;
            paths.extend(found);
        }
    }

    if paths.is_empty() {
        warn!("No files with extensions {:?} found", config.files.extensions);
    }

    let results = Runner::new(&config).run(&paths);

    let output = Output::new(config.output.format.into(), config.verbosity());
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.format_results(&results).as_bytes())?;
    if config.output.events {
        stdout.write_all(output.format_events(&results).as_bytes())?;
    }
    stdout.flush()?;

    Ok(exit_code(&results))
}

fn exit_code(results: &ValidationResults) -> u8 {
    if results.error_files > 0 {
        2
    } else if results.invalid_files > 0 {
        1
    } else {
        0
    }
}
