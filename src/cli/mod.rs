//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for reqflow using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// reqflow - procurement requisition workflow over a shared spreadsheet
#[derive(Parser, Debug)]
#[command(name = "reqflow")]
#[command(version, about, long_about = None)]
#[command(author = "reqflow Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "reqflow.toml", env = "REQFLOW_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REQFLOW_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new requisition
    Submit(commands::submit::SubmitArgs),

    /// Record an approval decision
    Approve(commands::approve::ApproveArgs),

    /// Update receipt progress
    Receive(commands::receive::ReceiveArgs),

    /// Record a receipt-approval decision
    ApproveReceipt(commands::approve::ApproveReceiptArgs),

    /// Mark a requisition read-only
    Lock(commands::lock::LockArgs),

    /// Make read-only requisitions editable again
    Unlock(commands::lock::UnlockArgs),

    /// Search requisitions
    Search(commands::search::SearchArgs),

    /// Group approved requisitions into purchase-order lines
    Summary(commands::summary::SummaryArgs),

    /// Show a work queue
    Queue(commands::queue::QueueArgs),

    /// Show the status of one requisition
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Run the command and return its exit code
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Submit(args) => args.execute(config_path).await,
            Commands::Approve(args) => args.execute(config_path).await,
            Commands::Receive(args) => args.execute(config_path).await,
            Commands::ApproveReceipt(args) => args.execute(config_path).await,
            Commands::Lock(args) => args.execute(config_path).await,
            Commands::Unlock(args) => args.execute(config_path).await,
            Commands::Search(args) => args.execute(config_path).await,
            Commands::Summary(args) => args.execute(config_path).await,
            Commands::Queue(args) => args.execute(config_path).await,
            Commands::Status(args) => args.execute(config_path).await,
            Commands::ValidateConfig(args) => args.execute(config_path).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApprovalStatus, ReceiptStatus};

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["reqflow", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["reqflow", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_approve_reject() {
        let cli = Cli::parse_from([
            "reqflow",
            "approve",
            "20250718-001",
            "--status",
            "rejected",
            "--reason",
            "over budget",
            "--account",
            "lin",
        ]);
        match cli.command {
            Commands::Approve(args) => {
                assert_eq!(args.status, ApprovalStatus::Rejected);
                assert_eq!(args.reason.as_deref(), Some("over budget"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_receive_alias() {
        let cli = Cli::parse_from([
            "reqflow",
            "receive",
            "20250718-001",
            "--status",
            "in progress",
            "--account",
            "wu",
        ]);
        match cli.command {
            Commands::Receive(args) => assert_eq!(args.status, ReceiptStatus::InProgress),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_unlock_requires_key_or_all() {
        let result = Cli::try_parse_from(["reqflow", "unlock", "--password", "pw"]);
        assert!(result.is_err());
        let cli = Cli::parse_from(["reqflow", "unlock", "--all", "--password", "pw"]);
        assert!(matches!(cli.command, Commands::Unlock(_)));
    }

    #[test]
    fn test_cli_parse_queue() {
        let cli = Cli::parse_from(["reqflow", "queue", "receipt"]);
        assert!(matches!(cli.command, Commands::Queue(_)));
    }
}
