//! Implementation of the `hasp init` command.
//!
//! Provisions the state directory: a default config.yaml (kept if one is
//! already present) and the initial account record with status `unlocked`.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::context::AppContext;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::record::{AccountRecord, LockStatus, RecordStore};
use serde_json::json;

/// Execute the `hasp init` command.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let ctx = AppContext::resolve()?;
    init_at(&ctx, &args)
}

/// Provision state under a resolved context.
fn init_at(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    let config_path = ctx.config_path();
    let config = if config_path.is_file() {
        Config::load(&config_path)?
    } else {
        let config = Config::default();
        config.save(&config_path)?;
        config
    };

    let store = RecordStore::new(ctx.record_path(&config.record_file));
    let record = AccountRecord::new(&args.identity, &args.secret, LockStatus::Unlocked)?;
    store.create(&record)?;

    let event = Event::new(EventAction::Init).with_details(json!({
        "identity": record.identity,
        "record_file": config.record_file,
    }));
    if let Err(e) = append_event(ctx, &event) {
        eprintln!("warning: failed to log init event: {}", e);
    }

    println!("Initialized hasp state in '{}'.", ctx.state_dir.display());
    println!("Account identity: {}", record.identity);
    Ok(())
}
