//! Parley compose screen simulation
//!
//! Runs named scenarios or JSON scripts through the compose controller.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parley_compose::ComposeConfig;
use parley_logging::{LogConfig, ParleySubscriberBuilder};

use parley_simulation::{SCENARIOS, Script, run_scenario, run_script};

#[derive(Parser)]
#[command(
    name = "parley-simulation",
    about = "Drive the compose screen through activation scenarios",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Compose configuration overrides (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios
    List,

    /// Run one built-in scenario, or all of them
    Scenario {
        /// Scenario name (see `list`)
        name: Option<String>,
    },

    /// Run a JSON script
    Script {
        /// Path to the script file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::development()
    } else {
        LogConfig {
            console: parley_logging::ConsoleConfig {
                pretty: true,
                ..Default::default()
            },
            ..LogConfig::default()
        }
    };
    let _guard = ParleySubscriberBuilder::new().with_config(log_config).init();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ComposeConfig::from_json(&json)?
        }
        None => ComposeConfig::default(),
    };

    match cli.command {
        Commands::List => {
            for name in SCENARIOS {
                println!("{}", name);
            }
        }
        Commands::Scenario { name } => {
            let names: Vec<&str> = match &name {
                Some(name) => vec![name.as_str()],
                None => SCENARIOS.to_vec(),
            };
            for name in names {
                let report = run_scenario(name, &config)
                    .with_context(|| format!("unknown scenario: {}", name))?;
                println!("--- {} ---", name);
                print!("{}", report.render());
            }
        }
        Commands::Script { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading script {}", path.display()))?;
            let script = Script::from_json(&json)?;
            let label = path.display().to_string();
            let report = run_script(&label, &script, &config);
            print!("{}", report.render());
        }
    }

    Ok(())
}
