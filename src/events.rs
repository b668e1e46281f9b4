//! Audit logging for hasp.
//!
//! Every state-changing action is appended to an NDJSON log (one JSON object
//! per line) at `events.ndjson` in the state directory. The log is advisory:
//! the core never reads it back, and commands treat append failures as
//! warnings rather than aborting the action that already happened.
//!
//! Each event carries:
//! - `ts`: RFC3339 timestamp
//! - `action`: the action performed (init, scan, lock, ...)
//! - `actor`: the owner string (e.g. `user@HOST`)
//! - `details`: freeform object with action-specific details

use crate::context::AppContext;
use crate::error::{HaspError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// State directory provisioned
    Init,
    /// Workspace scanned
    Scan,
    /// Bulk lock operation
    Lock,
    /// Bulk unlock operation
    Unlock,
    /// Account identity replaced
    IdentityChange,
    /// Account secret replaced
    SecretChange,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::Scan => write!(f, "scan"),
            EventAction::Lock => write!(f, "lock"),
            EventAction::Unlock => write!(f, "unlock"),
            EventAction::IdentityChange => write!(f, "identity_change"),
            EventAction::SecretChange => write!(f, "secret_change"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g. `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is determined
    /// from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| HaspError::UserError(format!("failed to serialize event: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the audit log.
///
/// The file is created on first use. Each append results in one line with a
/// trailing newline.
pub fn append_event(ctx: &AppContext, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if !ctx.state_dir.exists() {
        fs::create_dir_all(&ctx.state_dir).map_err(|e| {
            HaspError::Io(format!(
                "failed to create state directory '{}': {}",
                ctx.state_dir.display(),
                e
            ))
        })?;
    }

    let events_path = ctx.events_path();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_path)
        .map_err(|e| {
            HaspError::Io(format!(
                "failed to open events log '{}': {}",
                events_path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        HaspError::Io(format!(
            "failed to append to events log '{}': {}",
            events_path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn event_serializes_to_single_line() {
        let event = Event::new(EventAction::Lock).with_details(json!({
            "root": "/workspace",
            "succeeded": 3,
        }));

        let line = event.to_ndjson_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"action\":\"lock\""));
        assert!(line.contains("\"succeeded\":3"));
    }

    #[test]
    fn action_display_matches_serialized_form() {
        let event = Event::new(EventAction::IdentityChange);
        let line = event.to_ndjson_line().unwrap();
        assert!(line.contains(&format!("\"{}\"", EventAction::IdentityChange)));
    }

    #[test]
    fn actor_has_user_at_host_shape() {
        let event = Event::new(EventAction::Init);
        assert!(event.actor.contains('@'));
    }

    #[test]
    fn append_event_creates_log_and_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = AppContext::resolve_from(temp_dir.path().join("state"));

        append_event(&ctx, &Event::new(EventAction::Init)).unwrap();
        append_event(&ctx, &Event::new(EventAction::Scan)).unwrap();

        let content = fs::read_to_string(ctx.events_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Event = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.action, EventAction::Init);
        let second: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.action, EventAction::Scan);
    }
}
