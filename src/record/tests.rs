//! Tests for the account record and its store.

use super::*;
use crate::error::HaspError;
use std::fs;
use tempfile::TempDir;

fn store_with(content: &str) -> (TempDir, RecordStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("account.dat");
    fs::write(&path, content).unwrap();
    (dir, RecordStore::new(path))
}

#[test]
fn parse_reads_three_fields_in_order() {
    let record = AccountRecord::parse("alice\nhunter2\nunlocked\n").unwrap();
    assert_eq!(record.identity, "alice");
    assert_eq!(record.status, LockStatus::Unlocked);
    assert!(record.matches("alice", "hunter2"));
}

#[test]
fn parse_rejects_two_line_record() {
    let result = AccountRecord::parse("alice\nhunter2\n");
    match result {
        Err(HaspError::MalformedRecord(msg)) => assert!(msg.contains("found 2")),
        other => panic!("expected malformed record error, got {:?}", other),
    }
}

#[test]
fn parse_rejects_empty_identity_and_secret() {
    assert!(matches!(
        AccountRecord::parse("\nhunter2\nunlocked\n"),
        Err(HaspError::MalformedRecord(_))
    ));
    assert!(matches!(
        AccountRecord::parse("alice\n\nunlocked\n"),
        Err(HaspError::MalformedRecord(_))
    ));
}

#[test]
fn parse_rejects_unknown_status() {
    assert!(matches!(
        AccountRecord::parse("alice\nhunter2\npending\n"),
        Err(HaspError::MalformedRecord(_))
    ));
}

#[test]
fn parse_ignores_lines_past_the_third() {
    let record = AccountRecord::parse("alice\nhunter2\nlocked\ntrailing junk\n").unwrap();
    assert_eq!(record.status, LockStatus::Locked);
}

#[test]
fn file_string_round_trips() {
    let record = AccountRecord::new("alice", "hunter2", LockStatus::Locked).unwrap();
    let reparsed = AccountRecord::parse(&record.to_file_string()).unwrap();
    assert_eq!(reparsed, record);
}

#[test]
fn load_fails_with_io_error_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("missing.dat"));
    assert!(matches!(store.load(), Err(HaspError::Io(_))));
}

#[test]
fn create_then_load() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("account.dat"));
    let record = AccountRecord::new("alice", "hunter2", LockStatus::Unlocked).unwrap();

    store.create(&record).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap(), record);
}

#[test]
fn create_refuses_to_clobber_existing_record() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");
    let record = AccountRecord::new("bob", "secret", LockStatus::Unlocked).unwrap();
    assert!(matches!(store.create(&record), Err(HaspError::UserError(_))));
}

#[test]
fn replace_identity_keeps_other_fields() {
    let (_dir, store) = store_with("alice\nhunter2\nlocked\n");

    let updated = store.replace_field(RecordField::Identity, "bob").unwrap();
    assert_eq!(updated.identity, "bob");
    assert_eq!(updated.status, LockStatus::Locked);
    assert!(updated.matches("bob", "hunter2"));
}

#[test]
fn replace_secret_keeps_other_fields() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");

    let updated = store.replace_field(RecordField::Secret, "correct-horse").unwrap();
    assert_eq!(updated.identity, "alice");
    assert_eq!(updated.status, LockStatus::Unlocked);
    assert!(updated.matches("alice", "correct-horse"));
    assert!(!updated.matches("alice", "hunter2"));
}

#[test]
fn replace_status_keeps_other_fields() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");

    let updated = store.replace_field(RecordField::Status, "locked").unwrap();
    assert_eq!(updated.status, LockStatus::Locked);
    assert!(updated.matches("alice", "hunter2"));
}

#[test]
fn repeated_replacements_accumulate() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");

    store.replace_field(RecordField::Identity, "bob").unwrap();
    store.replace_field(RecordField::Secret, "new-secret").unwrap();
    let record = store.set_status(LockStatus::Locked).unwrap();

    assert_eq!(record.identity, "bob");
    assert_eq!(record.status, LockStatus::Locked);
    assert!(record.matches("bob", "new-secret"));

    // Disk agrees with the returned view.
    assert_eq!(store.load().unwrap(), record);
}

#[test]
fn replace_rejects_empty_identity_and_secret() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");

    assert!(matches!(
        store.replace_field(RecordField::Identity, ""),
        Err(HaspError::UserError(_))
    ));
    assert!(matches!(
        store.replace_field(RecordField::Secret, ""),
        Err(HaspError::UserError(_))
    ));

    // The record on disk is untouched.
    assert!(store.load().unwrap().matches("alice", "hunter2"));
}

#[test]
fn replace_rejects_invalid_status_value() {
    let (_dir, store) = store_with("alice\nhunter2\nunlocked\n");

    assert!(matches!(
        store.replace_field(RecordField::Status, "half-locked"),
        Err(HaspError::UserError(_))
    ));
    assert_eq!(store.load().unwrap().status, LockStatus::Unlocked);
}

#[test]
fn replace_leaves_no_temp_file_behind() {
    let (dir, store) = store_with("alice\nhunter2\nunlocked\n");

    store.replace_field(RecordField::Status, "locked").unwrap();
    assert!(!dir.path().join(".account.dat.tmp").exists());
}

#[test]
fn replace_on_malformed_record_fails_without_writing() {
    let (_dir, store) = store_with("alice\nhunter2\n");

    assert!(matches!(
        store.replace_field(RecordField::Status, "locked"),
        Err(HaspError::MalformedRecord(_))
    ));
    // Still the original two lines.
    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, "alice\nhunter2\n");
}

#[test]
fn matches_is_exact_and_case_sensitive() {
    let record = AccountRecord::new("alice", "hunter2", LockStatus::Unlocked).unwrap();

    assert!(record.matches("alice", "hunter2"));
    assert!(!record.matches("Alice", "hunter2"));
    assert!(!record.matches("alice", "Hunter2"));
    assert!(!record.matches("alice", "hunter2 "));
}

#[test]
fn debug_output_redacts_the_secret() {
    let record = AccountRecord::new("alice", "hunter2", LockStatus::Unlocked).unwrap();
    let debug = format!("{:?}", record);
    assert!(debug.contains("alice"));
    assert!(!debug.contains("hunter2"));
}
