//! Filesystem utilities for hasp.
//!
//! This module provides the atomic write primitive that keeps the account
//! record durable: the record file is replaced in a single rename and is
//! never observable in a partially written or missing state.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
