use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

mod app;
mod logging;
mod ui;

use app::{App, AppOutcome};
use registrar::config::{Config, WizardConfig};
use registrar::wizard::StepSequence;

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Guided onboarding for a new business account")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and print the configured step sequence
    Steps {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = StepsFormat::Table)]
        format: StepsFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StepsFormat {
    Table,
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps { format }) => cmd_steps(&config, format)?,
        None => run_tui(config, logging_handle.log_file_path)?,
    }

    Ok(())
}

fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run();

    match &result {
        Ok(AppOutcome::Finished(summary)) => {
            println!("Registration complete");
            println!("{summary}");
        }
        Ok(AppOutcome::Aborted) => println!("Registration cancelled"),
        Err(_) => {}
    }

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result.map(|_| ())
}

fn cmd_steps(config: &Config, format: StepsFormat) -> Result<()> {
    let sequence = config
        .step_sequence()
        .context("Invalid wizard.steps configuration")?;
    print!("{}", render_steps(&sequence, format)?);
    Ok(())
}

/// Config-file shaped wrapper so TOML output can be pasted back in
#[derive(Serialize)]
struct StepsDocument {
    wizard: WizardConfig,
}

fn render_steps(sequence: &StepSequence, format: StepsFormat) -> Result<String> {
    match format {
        StepsFormat::Table => {
            let mut out = format!("{:<4}{:<20}{:<18}{}\n", "ID", "TITLE", "KIND", "REQUIRED");
            out.push_str(&"─".repeat(50));
            out.push('\n');
            for step in sequence.iter() {
                out.push_str(&format!(
                    "{:<4}{:<20}{:<18}{}\n",
                    step.id,
                    step.title,
                    step.kind,
                    if step.required { "yes" } else { "no" }
                ));
            }
            Ok(out)
        }
        StepsFormat::Json => {
            let mut out = serde_json::to_string_pretty(sequence.as_slice())
                .context("Failed to serialize steps to JSON")?;
            out.push('\n');
            Ok(out)
        }
        StepsFormat::Toml => {
            let document = StepsDocument {
                wizard: WizardConfig {
                    steps: sequence.as_slice().to_vec(),
                },
            };
            toml::to_string_pretty(&document).context("Failed to serialize steps to TOML")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar::wizard::{default_steps, StepDescriptor, StepKind};

    fn sequence() -> StepSequence {
        StepSequence::new(default_steps()).unwrap()
    }

    #[test]
    fn test_cli_parses_steps_format() {
        let cli = Cli::try_parse_from(["registrar", "--debug", "steps", "--format", "json"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Some(Commands::Steps {
                format: StepsFormat::Json
            })
        ));
    }

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::try_parse_from(["registrar", "-c", "custom.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_render_steps_table() {
        let out = render_steps(&sequence(), StepsFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[2].starts_with("1   Company"));
        assert!(lines[2].ends_with("yes"));
        assert!(lines[7].contains("collaborators"));
    }

    #[test]
    fn test_render_steps_json() {
        let out = render_steps(&sequence(), StepsFormat::Json).unwrap();
        let parsed: Vec<StepDescriptor> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, default_steps());
    }

    #[test]
    fn test_render_steps_toml_reloads_as_config() {
        let out = render_steps(&sequence(), StepsFormat::Toml).unwrap();
        let parsed: Config = toml::from_str(&out).unwrap();
        assert_eq!(parsed.wizard.steps.len(), 6);
        assert_eq!(parsed.wizard.steps[5].kind, StepKind::Collaborators);
    }
}
