//! Exit code constants for the hasp CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad credentials, uninitialized state)
//! - 2: I/O failure (unreadable root, unreadable record)
//! - 3: Malformed account record
//! - 4: Protection failure (one or more files could not be locked/unlocked)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid credentials, or uninitialized state.
pub const USER_ERROR: i32 = 1;

/// I/O failure: the workspace root or the account record could not be read.
pub const IO_FAILURE: i32 = 2;

/// Malformed account record: fewer than three fields or empty identity/secret.
pub const MALFORMED_RECORD: i32 = 3;

/// Protection failure: a bulk lock/unlock operation left failures behind.
pub const PROTECT_FAILURE: i32 = 4;
