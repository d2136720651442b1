//! UI Navigator CLI
//!
//! Drives a navigator built from a TOML configuration with a command script,
//! printing every state change as a JSON line. Useful for checking navigation
//! flows without a running UI.
//!
//! # Usage
//!
//! ```bash
//! # Validate the configuration and print the element table
//! ui-navigator --config navigator.toml check
//!
//! # Run a script
//! ui-navigator --config navigator.toml run flow.nav
//!
//! # With verbose logging
//! RUST_LOG=debug ui-navigator --config navigator.toml run flow.nav
//! ```
//!
//! # Environment Variables
//!
//! - `NAVIGATOR_CONFIG`: Config file path (default: `~/.config/ui-navigator/navigator.toml`)
//! - `NAVIGATOR_DEFAULT_VIEW`: Default view override
//! - `NAVIGATOR_HISTORY_LIMIT`: History limit override
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

mod script;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use navigator_core::{
    default_config_path, load_config_from_path, ConfigOverrides, Layer, NavigatorConfigFile,
    UiNavigator,
};

use crate::script::{parse_script, Command};

#[derive(Debug, Parser)]
#[command(name = "ui-navigator", version, about = "Drive the layered UI navigator from a script")]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "NAVIGATOR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the default view
    #[arg(long, global = true)]
    default_view: Option<String>,

    /// Override the history limit (0 = unlimited)
    #[arg(long, global = true)]
    history_limit: Option<usize>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Validate the configuration and list the declared elements
    Check,
    /// Execute a command script
    Run {
        /// Script file, one command per line
        script: PathBuf,

        /// Print a summary after the script finishes
        #[arg(long)]
        summary: bool,

        /// Stop at the first command the navigator ignores
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load(&cli)?;

    match cli.command {
        CliCommand::Check => check(&config),
        CliCommand::Run {
            script,
            summary,
            strict,
        } => run(&config, &script, summary, strict),
    }
}

/// Load configuration with CLI overrides applied
fn load(cli: &Cli) -> anyhow::Result<NavigatorConfigFile> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path.clone()).with_context(|| {
        format!(
            "loading configuration from {}",
            path.as_ref()
                .map_or_else(|| "<none>".to_string(), |p| p.display().to_string())
        )
    })?;

    let mut overrides = ConfigOverrides::new();
    if let Some(view) = &cli.default_view {
        overrides = overrides.with_default_view(view.clone());
    }
    if let Some(limit) = cli.history_limit {
        overrides = overrides.with_history_limit(limit);
    }
    overrides
        .apply(&mut config)
        .context("applying command-line overrides")?;

    info!(
        source = %config.source(),
        elements = config.elements.len(),
        "Configuration loaded"
    );
    Ok(config)
}

fn check(config: &NavigatorConfigFile) -> anyhow::Result<()> {
    if config.elements.is_empty() {
        bail!("no [[elements]] declared in the configuration");
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{:<20} {:<8} {:>6} {:<10}", "ELEMENT", "LAYER", "ORDER", "PERSISTENT")?;
    for layer in Layer::ALL {
        for element in config.elements.iter().filter(|e| e.layer == layer) {
            writeln!(
                out,
                "{:<20} {:<8} {:>6} {:<10}",
                element.id,
                element.layer.label(),
                element.order,
                element.persistent
            )?;
        }
    }
    match &config.default_view {
        Some(view) => writeln!(out, "default view: {view}")?,
        None => writeln!(out, "default view: (none)")?,
    }
    Ok(())
}

fn run(
    config: &NavigatorConfigFile,
    script_path: &Path,
    summary: bool,
    strict: bool,
) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let commands = parse_script(&source)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    let mut nav = UiNavigator::new(config.navigator.clone());
    let (_, mut changes) = nav.subscribe_channel();
    let report = nav.init(config.build_elements(), config.default_view.clone())?;
    if !report.rejected.is_empty() {
        warn!(rejected = ?report.rejected, "Duplicate elements were not registered");
    }

    let mut out = io::stdout().lock();
    for (index, command) in commands.iter().enumerate() {
        let applied = command.apply(&mut nav);

        while let Ok(change) = changes.try_recv() {
            serde_json::to_writer(&mut out, &change)?;
            writeln!(out)?;
        }
        if *command == Command::State {
            serde_json::to_writer(&mut out, &nav.summary())?;
            writeln!(out)?;
        }

        if !applied && strict {
            bail!("command {} ({command:?}) was ignored by the navigator", index + 1);
        }
    }

    if summary {
        serde_json::to_writer_pretty(&mut out, &nav.summary())?;
        writeln!(out)?;
    }

    info!(commands = commands.len(), "Script finished");
    nav.dispose();
    Ok(())
}
