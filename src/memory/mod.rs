//! Simulated process memory.
//!
//! A [`MemoryState`] is created fresh for every (process, policy) run and
//! dropped when the run ends; nothing carries over between runs.

mod memory_state;

pub use memory_state::MemoryState;
