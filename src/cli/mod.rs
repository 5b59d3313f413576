//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Caspian using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Caspian - Data Lake Archival Tool
#[derive(Parser, Debug)]
#[command(name = "caspian")]
#[command(version, about, long_about = None)]
#[command(author = "Caspian Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "caspian.toml", env = "CASPIAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CASPIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a local file to object storage and record it in the catalog
    Archive(commands::archive::ArchiveArgs),

    /// Restore an archived file and verify its checksum
    Restore(commands::restore::RestoreArgs),

    /// Delete stale archived objects and their catalog rows
    Cleanup(commands::cleanup::CleanupArgs),

    /// Show catalog statistics
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_archive() {
        let cli = Cli::parse_from(["caspian", "archive", "--file", "report.csv"]);
        assert_eq!(cli.config, "caspian.toml");
        assert!(matches!(cli.command, Commands::Archive(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["caspian", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["caspian", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_restore() {
        let cli = Cli::parse_from([
            "caspian", "restore", "--key", "a/b.txt", "--output", "b.txt",
        ]);
        assert!(matches!(cli.command, Commands::Restore(_)));
    }

    #[test]
    fn test_cli_parse_cleanup_flags() {
        let cli = Cli::parse_from([
            "caspian",
            "cleanup",
            "--older-than-days",
            "7",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Cleanup(args) => {
                assert_eq!(args.older_than_days, 7);
                assert!(args.dry_run);
            }
            other => panic!("expected cleanup, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["caspian", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["caspian", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
