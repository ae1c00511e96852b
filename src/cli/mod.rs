//! Command-line interface.
//!
//! `clipms` with no subcommand runs the media server. The `config`
//! subcommands print the effective configuration or its JSON schema.

pub mod formatting;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    ClipmsError, Result,
    config::{Config, Selection},
};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "clipms", version)]
#[command(about = "Publish the last copied URI as a MediaServer2 item on the session bus")]
pub struct Cli {
    /// Subcommand; runs the server when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    pub run: RunArgs,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the media server (default)
    Run(RunArgs),
    /// Inspect configuration
    Config {
        /// What to print
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show {
        /// Config file to read instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the configuration JSON schema
    Schema,
}

/// Options for running the server. Flags override the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Config file to read instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Application name used in the bus name and object paths
    #[arg(long)]
    pub app_name: Option<String>,

    /// Clipboard selection to watch
    #[arg(long, value_enum)]
    pub selection: Option<Selection>,

    /// Poll interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

impl RunArgs {
    /// Loads the config file and applies command-line overrides.
    ///
    /// # Errors
    /// Returns error if the file can't be loaded or the merged result is
    /// invalid.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overrides `config` with every flag that was given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(app_name) = &self.app_name {
            config.server.app_name = app_name.clone();
        }
        if let Some(selection) = self.selection {
            config.server.selection = selection;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.server.poll_interval_ms = interval_ms;
        }
    }
}

/// Output of a `config` subcommand.
///
/// # Errors
/// Returns error if the config can't be loaded or serialized.
pub fn config_output(action: &ConfigCommand) -> Result<String> {
    match action {
        ConfigCommand::Show { config } => Config::load(config.as_deref())?.to_toml_string(),
        ConfigCommand::Schema => serde_json::to_string_pretty(&Config::json_schema())
            .map_err(|e| ClipmsError::Serialization {
                what: "config schema",
                details: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn no_subcommand_runs_with_top_level_flags() {
        let cli = Cli::try_parse_from(["clipms", "--app-name", "desk", "--selection", "primary"])
            .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.run.app_name.as_deref(), Some("desk"));
        assert_eq!(cli.run.selection, Some(Selection::Primary));
    }

    #[test]
    fn run_subcommand_takes_its_own_flags() {
        let cli = Cli::try_parse_from(["clipms", "run", "--interval-ms", "250"]).unwrap();

        let Some(Command::Run(args)) = &cli.command else {
            panic!("expected the run subcommand");
        };
        assert_eq!(args.interval_ms, Some(250));
    }

    #[test]
    fn config_subcommand_is_parsed() {
        let cli = Cli::try_parse_from(["clipms", "config", "schema"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigCommand::Schema
            })
        ));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\napp_name = \"from_file\"\npoll_interval_ms = 900\n").unwrap();

        let args = RunArgs {
            config: Some(path),
            interval_ms: Some(100),
            ..RunArgs::default()
        };
        let config = args.load_config().unwrap();

        assert_eq!(config.server.app_name, "from_file");
        assert_eq!(config.server.poll_interval_ms, 100);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let args = RunArgs {
            config: Some(path),
            app_name: Some(String::from("not valid")),
            ..RunArgs::default()
        };

        assert!(matches!(
            args.load_config(),
            Err(ClipmsError::InvalidConfigField { .. })
        ));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(ClipmsError::IoError { .. })));
    }

    #[test]
    fn schema_output_is_json() {
        let output = config_output(&ConfigCommand::Schema).unwrap();
        let schema: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert!(schema["properties"]["server"].is_object());
    }
}
