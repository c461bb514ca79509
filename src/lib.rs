//! pagereplay - replays per-process page reference strings against
//! swappable page-replacement policies and compares their fault counts.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           pagereplay                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Simulation Layer (simulation/)                │   │
//! │  │   SimulationConfig → Simulation → replay → RunReport     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Policy Layer (policy/)  [Runtime Swappable]      │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  LIFO | MRU | OPT-Lookahead-X | LFU | LRU-X | WS │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │      Memory Layer (memory/) + Data Structures (ds/)      │   │
//! │  │         MemoryState (load order, faults) + PageList      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, ProcessId, Tick, Error, config)
//! - [`ds`] - Page list and slot arena used by the policies
//! - [`memory`] - Per-run resident set and fault counter
//! - [`policy`] - The replacement policies and their factory
//! - [`simulation`] - Input parsing, replay driver and reports
//!
//! # Quick Start
//! ```
//! use pagereplay::{PolicyKind, Simulation, SimulationConfig};
//!
//! let input = "\
//! 20 4096 3 2 1 5 1
//! 1 3 1 2 3 4 1 2 5 1 2 3 4 5
//! ";
//! let sim = Simulation::new(SimulationConfig::parse(input).unwrap());
//!
//! let report = sim.run(PolicyKind::Lifo, 0).unwrap();
//! assert_eq!(report.total_faults(), 8);
//! print!("{}", report);
//! ```

pub mod common;
pub mod ds;
pub mod memory;
pub mod policy;
pub mod simulation;

// Re-export commonly used items at crate root for convenience
pub use common::{pages, Clock, Error, PageId, ProcessId, Result, Tick};
pub use memory::MemoryState;
pub use policy::{Access, Policy, PolicyKind, Reference, ReplacementPolicy, WorkingSetBounds};
pub use simulation::{
    replay, Process, ProcessOutcome, ReplayStats, RunReport, Simulation, SimulationConfig,
    StatsSnapshot,
};
