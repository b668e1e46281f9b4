//! Implementation of the `hasp status` command.
//!
//! Shows the recorded status from the account record next to a live tally of
//! per-file lock states. The record is advisory (last bulk outcome); the
//! tally is what the filesystem says right now, so the two can disagree
//! after a partial failure or outside interference.

use super::open_store;
use crate::cli::StatusArgs;
use crate::error::Result;
use crate::protect::ProtectedSet;
use crate::scan::WorkspaceScanner;

/// Execute the `hasp status` command.
pub fn cmd_status(args: StatusArgs) -> Result<()> {
    let (_ctx, config, store) = open_store()?;
    let record = store.load()?;

    let scanner = WorkspaceScanner::new(&args.root, &config.scan)?;
    let set = ProtectedSet::from_paths(scanner.scan()?);
    let summary = set.summarize();

    println!("Workspace: {}", args.root.display());
    println!("Recorded status: {}", record.status);
    println!("Discovered files: {}", set.len());
    println!("  locked:   {}", summary.locked);
    println!("  unlocked: {}", summary.unlocked);
    if summary.unknown > 0 {
        println!("  unknown:  {}", summary.unknown);
    }

    Ok(())
}
