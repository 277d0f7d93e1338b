//! Roster CLI - console for the user administration API

mod commands;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::Commands;
use roster_client::ConsoleConfig;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage users, linked accounts and permissions")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding the saved session and logs
    #[arg(short = 'd', long, global = true)]
    state_dir: Option<PathBuf>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "60")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn load_config(&self) -> Result<ConsoleConfig> {
        let mut config = ConsoleConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
            config.validate().context("Invalid --base-url")?;
        }
        if let Some(dir) = &self.state_dir {
            config.storage.state_dir = Some(dir.clone());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    logging::init_logging(cli.log_level.into(), &config.state_dir(), cli.no_file_log)?;
    debug!(base_url = %config.api.base_url, "Starting roster");

    let outcome = if cli.timeout == 0 {
        cli.command.execute(&config).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(&config)).await {
            Ok(result) => result,
            Err(_) => {
                error!("Command timed out after {} seconds", cli.timeout);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = outcome {
        error!("Command failed: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{PermissionCommands, UserCommands};
    use roster_core::Role;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_list_filters() {
        let cli = Cli::try_parse_from([
            "roster", "users", "list", "--search", "ana", "--role", "gerente",
        ])
        .unwrap();

        match cli.command {
            Commands::Users {
                command: UserCommands::List { search, role, status },
            } => {
                assert_eq!(search.as_deref(), Some("ana"));
                assert_eq!(role, Some(Role::Manager));
                assert!(status.is_none());
            }
            _ => panic!("expected users list"),
        }
    }

    #[test]
    fn test_parse_permissions_set_accepts_empty_list() {
        let cli = Cli::try_parse_from(["roster", "permissions", "set", "u-1"]).unwrap();

        match cli.command {
            Commands::Permissions {
                command: PermissionCommands::Set { user_id, permissions },
            } => {
                assert_eq!(user_id, "u-1");
                assert!(permissions.is_empty());
            }
            _ => panic!("expected permissions set"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "roster",
            "whoami",
            "--base-url",
            "https://admin.example.com/api",
            "--no-file-log",
            "-t",
            "0",
        ])
        .unwrap();

        assert!(cli.no_file_log);
        assert_eq!(cli.timeout, 0);
        assert_eq!(cli.base_url.as_deref(), Some("https://admin.example.com/api"));
    }

    #[test]
    fn test_login_requires_password() {
        let result = Cli::try_parse_from(["roster", "login", "--email", "a@b.com"]);
        if std::env::var_os("ROSTER_PASSWORD").is_none() {
            assert!(result.is_err());
        }
    }
}
