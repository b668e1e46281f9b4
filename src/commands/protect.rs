//! Implementation of the `hasp lock` and `hasp unlock` commands.
//!
//! Both follow the same shape: authenticate, scan the workspace, apply the
//! bulk permission change, record the aggregate outcome in the account
//! record, and append an audit event. Per-file failures are reported and the
//! batch keeps going; the recorded status only moves when the whole batch
//! succeeded, so it always names a state the workspace actually reached.

use super::{authenticate, open_store};
use crate::cli::ProtectArgs;
use crate::config::Config;
use crate::context::AppContext;
use crate::error::{HaspError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::protect::ProtectedSet;
use crate::record::{LockStatus, RecordStore};
use crate::scan::WorkspaceScanner;
use serde_json::json;

/// Direction of a bulk permission change.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Lock,
    Unlock,
}

impl Mode {
    fn verb(&self) -> &'static str {
        match self {
            Mode::Lock => "lock",
            Mode::Unlock => "unlock",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Mode::Lock => "Locked",
            Mode::Unlock => "Unlocked",
        }
    }

    fn target_status(&self) -> LockStatus {
        match self {
            Mode::Lock => LockStatus::Locked,
            Mode::Unlock => LockStatus::Unlocked,
        }
    }

    fn event_action(&self) -> EventAction {
        match self {
            Mode::Lock => EventAction::Lock,
            Mode::Unlock => EventAction::Unlock,
        }
    }
}

/// Execute the `hasp lock` command.
pub fn cmd_lock(args: ProtectArgs) -> Result<()> {
    let (ctx, config, store) = open_store()?;
    run_at(&ctx, &config, &store, &args, Mode::Lock)
}

/// Execute the `hasp unlock` command.
pub fn cmd_unlock(args: ProtectArgs) -> Result<()> {
    let (ctx, config, store) = open_store()?;
    run_at(&ctx, &config, &store, &args, Mode::Unlock)
}

/// Run one bulk operation against a resolved deployment.
fn run_at(
    ctx: &AppContext,
    config: &Config,
    store: &RecordStore,
    args: &ProtectArgs,
    mode: Mode,
) -> Result<()> {
    authenticate(store, &args.credentials)?;

    let scanner = WorkspaceScanner::new(&args.root, &config.scan)?;
    let files = scanner.scan()?;
    let set = ProtectedSet::from_paths(files);

    if set.is_empty() {
        println!("No source files found under '{}'.", args.root.display());
        return Ok(());
    }

    let outcome = match mode {
        Mode::Lock => set.lock_all(),
        Mode::Unlock => set.unlock_all(),
    };

    for failure in &outcome.failed {
        eprintln!(
            "error: could not {} '{}': {}",
            mode.verb(),
            failure.path.display(),
            failure.reason
        );
    }

    if outcome.is_complete() {
        store.set_status(mode.target_status())?;
    }

    let event = Event::new(mode.event_action()).with_details(json!({
        "root": args.root.display().to_string(),
        "attempted": outcome.attempted(),
        "succeeded": outcome.succeeded,
        "failed": outcome.failed.len(),
    }));
    if let Err(e) = append_event(ctx, &event) {
        eprintln!("warning: failed to log {} event: {}", mode.event_action(), e);
    }

    if outcome.is_complete() {
        println!(
            "{} {} file(s) under '{}'.",
            mode.past_tense(),
            outcome.succeeded,
            args.root.display()
        );
        Ok(())
    } else {
        Err(HaspError::ProtectFailure(format!(
            "failed to {} {} of {} files",
            mode.verb(),
            outcome.failed.len(),
            outcome.attempted()
        )))
    }
}
