//! The durable account record.
//!
//! Exactly one record exists per state directory. It is a three-line plain
//! text file, newline-terminated, in fixed order:
//!
//! ```text
//! <identity>
//! <secret>
//! <status>
//! ```
//!
//! `status` is `locked` or `unlocked` and reflects the last bulk operation
//! outcome. Identity and secret are never empty. The record is only ever
//! rewritten whole, through [`RecordStore`]'s atomic replace, and the
//! in-memory value is always a re-read of what is on disk.

mod store;

#[cfg(test)]
mod tests;

pub use store::RecordStore;

use crate::error::{HaspError, Result};

/// Aggregate protection status recorded after a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// The last bulk operation locked the workspace.
    Locked,
    /// The last bulk operation unlocked the workspace (also the initial state).
    Unlocked,
}

impl LockStatus {
    /// The on-disk spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::Locked => "locked",
            LockStatus::Unlocked => "unlocked",
        }
    }

    /// Parse the on-disk spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "locked" => Some(LockStatus::Locked),
            "unlocked" => Some(LockStatus::Unlocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for LockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three replaceable fields of the record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Identity,
    Secret,
    Status,
}

impl RecordField {
    /// Field name for messages and audit details.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Identity => "identity",
            RecordField::Secret => "secret",
            RecordField::Status => "status",
        }
    }
}

/// In-memory view of the account record.
///
/// The secret is deliberately not exposed: callers authenticate through
/// [`matches`](Self::matches) and the store rewrites the file itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Account identity (login name).
    pub identity: String,
    pub(crate) secret: String,
    /// Last recorded bulk operation outcome.
    pub status: LockStatus,
}

impl AccountRecord {
    /// Build a record, enforcing the non-empty field invariant.
    pub fn new(identity: &str, secret: &str, status: LockStatus) -> Result<Self> {
        if identity.is_empty() {
            return Err(HaspError::UserError(
                "identity must not be empty".to_string(),
            ));
        }
        if secret.is_empty() {
            return Err(HaspError::UserError("secret must not be empty".to_string()));
        }
        Ok(Self {
            identity: identity.to_string(),
            secret: secret.to_string(),
            status,
        })
    }

    /// Parse the three-line record format.
    ///
    /// Fewer than three lines, an empty identity or secret, or an unknown
    /// status is a malformed record. Lines past the third are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < 3 {
            return Err(HaspError::MalformedRecord(format!(
                "expected three lines, found {}",
                lines.len()
            )));
        }

        let (identity, secret, status_raw) = (lines[0], lines[1], lines[2]);
        if identity.is_empty() {
            return Err(HaspError::MalformedRecord("identity is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(HaspError::MalformedRecord("secret is empty".to_string()));
        }
        let status = LockStatus::parse(status_raw).ok_or_else(|| {
            HaspError::MalformedRecord(format!("unknown status '{}'", status_raw))
        })?;

        Ok(Self {
            identity: identity.to_string(),
            secret: secret.to_string(),
            status,
        })
    }

    /// Serialize to the three-line file format, newline-terminated.
    pub fn to_file_string(&self) -> String {
        format!("{}\n{}\n{}\n", self.identity, self.secret, self.status)
    }

    /// Exact, case-sensitive credential check.
    pub fn matches(&self, identity: &str, secret: &str) -> bool {
        self.identity == identity && self.secret == secret
    }
}

impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRecord")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .field("status", &self.status)
            .finish()
    }
}
