//! Command implementations for hasp.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the credential-resolution helpers shared by the
//! gated commands.

mod account;
mod init;
mod protect;
mod scan;
mod status;

use crate::cli::{AccountAction, AccountCommand, Command, CredentialArgs};
use crate::config::Config;
use crate::context::{self, AppContext};
use crate::error::{HaspError, Result};
use crate::record::{AccountRecord, RecordStore};

/// Environment variable fallback for the account identity.
pub const IDENTITY_ENV: &str = "HASP_IDENTITY";

/// Environment variable fallback for the account secret.
pub const SECRET_ENV: &str = "HASP_SECRET";

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => init::cmd_init(args),
        Command::Scan(args) => scan::cmd_scan(args),
        Command::Lock(args) => protect::cmd_lock(args),
        Command::Unlock(args) => protect::cmd_unlock(args),
        Command::Status(args) => status::cmd_status(args),
        Command::Account(cmd) => dispatch_account(cmd),
        Command::Verify(args) => account::cmd_verify(args),
    }
}

/// Dispatch account subcommands.
fn dispatch_account(cmd: AccountCommand) -> Result<()> {
    match cmd.action {
        AccountAction::Show => account::cmd_show(),
        AccountAction::SetIdentity(args) => account::cmd_set_identity(args),
        AccountAction::SetSecret(args) => account::cmd_set_secret(args),
    }
}

/// Resolve context, config, and record store for an initialized deployment.
///
/// A missing config file falls back to defaults so a hand-provisioned state
/// directory still works.
pub(crate) fn open_store() -> Result<(AppContext, Config, RecordStore)> {
    let ctx = context::require_initialized()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();
    let store = RecordStore::new(ctx.record_path(&config.record_file));
    Ok((ctx, config, store))
}

/// Resolve credentials from flags, falling back to the environment.
pub(crate) fn resolve_credentials(args: &CredentialArgs) -> Result<(String, String)> {
    let identity = args
        .identity
        .clone()
        .or_else(|| std::env::var(IDENTITY_ENV).ok())
        .ok_or_else(|| {
            HaspError::UserError(format!(
                "missing identity: pass --identity or set {}",
                IDENTITY_ENV
            ))
        })?;

    let secret = args
        .secret
        .clone()
        .or_else(|| std::env::var(SECRET_ENV).ok())
        .ok_or_else(|| {
            HaspError::UserError(format!(
                "missing secret: pass --secret or set {}",
                SECRET_ENV
            ))
        })?;

    Ok((identity, secret))
}

/// Load the record and require matching credentials.
pub(crate) fn authenticate(store: &RecordStore, args: &CredentialArgs) -> Result<AccountRecord> {
    let (identity, secret) = resolve_credentials(args)?;
    let record = store.load()?;
    if !record.matches(&identity, &secret) {
        return Err(HaspError::UserError(
            "invalid identity or secret".to_string(),
        ));
    }
    Ok(record)
}
