//! Replay driver: one process through one policy instance.

use log::{debug, trace};

use crate::common::{Clock, Error, PageId, ProcessId, Result};
use crate::memory::MemoryState;
use crate::policy::{Reference, ReplacementPolicy, WorkingSetBounds};
use crate::simulation::Process;

/// Result of replaying one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub process_id: ProcessId,

    /// References that missed.
    pub faults: u64,

    /// References that found their page resident.
    pub hits: u64,

    /// Faults that removed a page.
    pub evictions: u64,

    /// Faults that left more pages resident than frames.
    pub overflow_loads: u64,

    /// Resident pages at the end of the run, oldest load first.
    pub resident: Vec<PageId>,

    /// Working-set size range, for policies that track it.
    pub working_set: Option<WorkingSetBounds>,
}

/// Replay `process` through `policy` from empty memory.
///
/// The clock starts at zero and advances once per reference, so the first
/// reference is stamped `Tick(1)`. `policy` should be freshly constructed;
/// state it carries from an earlier run leaks into this one.
///
/// # Errors
/// - `Error::CapacityExceeded` if a policy that does not allow overflow
///   returns with more pages resident than the process has frames
///
/// # Example
/// ```
/// use pagereplay::policy::{Policy, PolicyKind};
/// use pagereplay::simulation::{replay, Process};
/// use pagereplay::{pages, ProcessId};
///
/// let process = Process::new(ProcessId::new(1), 2, pages(&[1, 2, 1, 3]));
/// let mut policy = Policy::new(PolicyKind::Lifo, 0);
/// let outcome = replay(&process, &mut policy).unwrap();
/// assert_eq!(outcome.faults, 3);
/// ```
pub fn replay<P: ReplacementPolicy + ?Sized>(
    process: &Process,
    policy: &mut P,
) -> Result<ProcessOutcome> {
    let mut memory = MemoryState::new(process.frame_capacity);
    let mut clock = Clock::new();
    let mut hits = 0u64;
    let mut evictions = 0u64;
    let mut overflow_loads = 0u64;

    for (position, &page) in process.references.iter().enumerate() {
        let reference = Reference {
            page,
            tick: clock.advance(),
            position,
            sequence: &process.references,
        };

        let access = policy.on_reference(&mut memory, &reference);
        trace!("{} {} at {}: {:?}", process.id, page, reference.tick, access);

        if !access.is_fault() {
            hits += 1;
        }
        if let Some(victim) = access.evicted() {
            evictions += 1;
            debug!("{} evicted {} to load {}", process.id, victim, page);
        }

        if !memory.within_capacity() {
            if !policy.allows_overflow() {
                return Err(Error::CapacityExceeded {
                    process: process.id,
                    resident: memory.resident_count(),
                    capacity: memory.capacity(),
                });
            }
            if access.is_fault() {
                overflow_loads += 1;
                debug!(
                    "{} loaded {} past capacity ({} resident, {} frames)",
                    process.id,
                    page,
                    memory.resident_count(),
                    memory.capacity()
                );
            }
        }
    }

    debug_assert_eq!(
        hits + memory.fault_count(),
        process.references.len() as u64
    );

    Ok(ProcessOutcome {
        process_id: process.id,
        faults: memory.fault_count(),
        hits,
        evictions,
        overflow_loads,
        resident: memory.resident_pages(),
        working_set: policy.working_set_bounds(),
    })
}
