//! State directory resolution for hasp.
//!
//! All durable state (the account record, the configuration file, and the
//! audit log) lives in one state directory. Commands resolve that directory
//! through this module so every invocation targets the same files regardless
//! of which subcommand runs.
//!
//! The directory is taken from the `HASP_STATE_DIR` environment variable when
//! set, and defaults to `.hasp/` under the current working directory.

use crate::error::{HaspError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the state directory location.
pub const STATE_DIR_ENV: &str = "HASP_STATE_DIR";

/// Default state directory name, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".hasp";

/// Configuration file name within the state directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Audit log file name within the state directory.
pub const EVENTS_FILE: &str = "events.ndjson";

/// Resolved paths for a hasp invocation.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Absolute or caller-relative path to the state directory.
    pub state_dir: PathBuf,
}

impl AppContext {
    /// Resolve the context from the environment.
    ///
    /// Uses `HASP_STATE_DIR` when set, otherwise `.hasp/` under the current
    /// working directory.
    pub fn resolve() -> Result<Self> {
        if let Ok(dir) = env::var(STATE_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(Self::resolve_from(dir));
        }

        let cwd = env::current_dir().map_err(|e| {
            HaspError::Io(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(cwd.join(DEFAULT_STATE_DIR)))
    }

    /// Resolve the context from a specific state directory.
    ///
    /// This is useful for testing or when the directory is already known.
    pub fn resolve_from<P: AsRef<Path>>(state_dir: P) -> Self {
        Self {
            state_dir: state_dir.as_ref().to_path_buf(),
        }
    }

    /// Path to the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.state_dir.join(CONFIG_FILE)
    }

    /// Path to the audit log file.
    pub fn events_path(&self) -> PathBuf {
        self.state_dir.join(EVENTS_FILE)
    }

    /// Path to the account record file, whose name comes from configuration.
    pub fn record_path(&self, record_file: &str) -> PathBuf {
        self.state_dir.join(record_file)
    }

    /// Whether the state directory has been provisioned.
    pub fn is_initialized(&self) -> bool {
        self.state_dir.is_dir()
    }
}

/// Resolve the context and require an initialized state directory.
///
/// Commands other than `init` call this so a missing state directory produces
/// one consistent, actionable error.
pub fn require_initialized() -> Result<AppContext> {
    let ctx = AppContext::resolve()?;
    if !ctx.is_initialized() {
        return Err(HaspError::UserError(format!(
            "state directory '{}' not found.\nRun `hasp init --identity <name> --secret <secret>` first.",
            ctx.state_dir.display()
        )));
    }
    Ok(ctx)
}
