//! CLI argument parsing for hasp.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the command structure; actual implementations are in the
//! `commands` module. All input arrives through arguments or environment
//! variables; nothing in the binary reads interactive input.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hasp: workspace source-file write-protection vault.
///
/// Discovers source files across heterogeneous project layouts under a
/// workspace root and toggles their filesystem write-protection as a unit,
/// recording the outcome in a durable account record.
#[derive(Parser, Debug)]
#[command(name = "hasp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for hasp.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision the state directory and the initial account record.
    ///
    /// Creates the state directory (default `.hasp/`, overridable via
    /// HASP_STATE_DIR), a default config.yaml, and the account record with
    /// status `unlocked`.
    Init(InitArgs),

    /// List the source files discovered under a workspace root.
    ///
    /// Classifies the root as a single- or multi-project workspace and
    /// prints the deduplicated set of source file paths. Read-only.
    Scan(ScanArgs),

    /// Lock every discovered source file (make read-only).
    ///
    /// Scans the workspace, clears write permission on each file, and
    /// records the aggregate outcome in the account record.
    Lock(ProtectArgs),

    /// Unlock every discovered source file (restore write permission).
    Unlock(ProtectArgs),

    /// Show recorded and live protection status for a workspace.
    Status(StatusArgs),

    /// Account record management.
    ///
    /// Show the record or replace individual fields.
    Account(AccountCommand),

    /// Check credentials against the account record.
    Verify(CredentialArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Identity for the new account record.
    #[arg(long)]
    pub identity: String,

    /// Secret for the new account record.
    #[arg(long)]
    pub secret: String,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Workspace root directory to scan.
    pub root: PathBuf,
}

/// Arguments for the `lock` and `unlock` commands.
#[derive(Parser, Debug)]
pub struct ProtectArgs {
    /// Workspace root directory to operate on.
    pub root: PathBuf,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Workspace root directory to report on.
    pub root: PathBuf,
}

/// Account management subcommands.
#[derive(Parser, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub action: AccountAction,
}

/// Actions available under `hasp account`.
#[derive(Subcommand, Debug)]
pub enum AccountAction {
    /// Display the account record (secret masked).
    Show,

    /// Replace the account identity.
    SetIdentity(SetFieldArgs),

    /// Replace the account secret. The new value is never echoed.
    SetSecret(SetFieldArgs),
}

/// Arguments for `account set-identity` and `account set-secret`.
#[derive(Parser, Debug)]
pub struct SetFieldArgs {
    /// The new field value.
    pub value: String,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Credentials for gated commands.
///
/// Flags take precedence; the HASP_IDENTITY and HASP_SECRET environment
/// variables are the fallback.
#[derive(Parser, Debug, Default)]
pub struct CredentialArgs {
    /// Account identity. Falls back to HASP_IDENTITY.
    #[arg(long)]
    pub identity: Option<String>,

    /// Account secret. Falls back to HASP_SECRET.
    #[arg(long)]
    pub secret: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
