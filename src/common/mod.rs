//! Common types and utilities shared across pagereplay.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (PageId, ProcessId)
//! - The per-run logical clock (Tick, Clock)

pub mod config;
pub mod error;
mod page_id;
mod process_id;
mod tick;

pub use error::{Error, Result};
pub use page_id::{pages, PageId};
pub use process_id::ProcessId;
pub use tick::{Clock, Tick};
