//! Implementation of the `hasp account` and `hasp verify` commands.
//!
//! Field replacements are credential-gated and flow through the record
//! store's atomic replace. The secret never appears in output; after an
//! update only the identity is echoed back.

use super::{authenticate, open_store};
use crate::cli::{CredentialArgs, SetFieldArgs};
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::record::RecordField;
use serde_json::json;

/// Execute `hasp account show`.
pub fn cmd_show() -> Result<()> {
    let (_ctx, _config, store) = open_store()?;
    let record = store.load()?;

    println!("Identity: {}", record.identity);
    println!("Secret:   *******");
    println!("Status:   {}", record.status);
    Ok(())
}

/// Execute `hasp account set-identity`.
pub fn cmd_set_identity(args: SetFieldArgs) -> Result<()> {
    set_field(args, RecordField::Identity, EventAction::IdentityChange)
}

/// Execute `hasp account set-secret`.
pub fn cmd_set_secret(args: SetFieldArgs) -> Result<()> {
    set_field(args, RecordField::Secret, EventAction::SecretChange)
}

fn set_field(args: SetFieldArgs, field: RecordField, action: EventAction) -> Result<()> {
    let (ctx, _config, store) = open_store()?;
    authenticate(&store, &args.credentials)?;

    let updated = store.replace_field(field, &args.value)?;

    let mut details = json!({ "field": field.as_str() });
    if field == RecordField::Identity {
        details["identity"] = json!(updated.identity);
    }
    let event = Event::new(action).with_details(details);
    if let Err(e) = append_event(&ctx, &event) {
        eprintln!("warning: failed to log {} event: {}", action, e);
    }

    match field {
        RecordField::Identity => println!("Identity changed to '{}'.", updated.identity),
        _ => println!("Secret updated."),
    }
    Ok(())
}

/// Execute `hasp verify`.
pub fn cmd_verify(args: CredentialArgs) -> Result<()> {
    let (_ctx, _config, store) = open_store()?;
    let record = authenticate(&store, &args)?;

    println!("Credentials OK for '{}'.", record.identity);
    Ok(())
}
