//! Implementation of the `hasp scan` command.
//!
//! Read-only: prints the discovered source file set for a workspace root.
//! Works without an initialized state directory (defaults apply); when state
//! exists, the scan is recorded in the audit log.

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::context::AppContext;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::scan::WorkspaceScanner;
use serde_json::json;

/// Execute the `hasp scan` command.
pub fn cmd_scan(args: ScanArgs) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    let scanner = WorkspaceScanner::new(&args.root, &config.scan)?;
    let files = scanner.scan()?;

    if files.is_empty() {
        println!("No source files found under '{}'.", args.root.display());
    } else {
        for file in &files {
            println!("{}", file.display());
        }
        println!();
        println!("{} file(s).", files.len());
    }

    if ctx.is_initialized() {
        let event = Event::new(EventAction::Scan).with_details(json!({
            "root": args.root.display().to_string(),
            "files": files.len(),
        }));
        if let Err(e) = append_event(&ctx, &event) {
            eprintln!("warning: failed to log scan event: {}", e);
        }
    }

    Ok(())
}
