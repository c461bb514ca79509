//! Per-policy run reports.

use std::fmt;

use crate::common::ProcessId;
use crate::policy::{PolicyKind, WorkingSetBounds};
use crate::simulation::ProcessOutcome;

/// Outcome of running one policy over every process.
///
/// `Display` renders the plain-text comparison report:
/// ```text
/// Using LIFO Algorithm:
/// Total Faults
/// Current Page Fault For 1: 8
/// -- Total Replacements: 8 --
/// ```
/// Working-Set reports add the min/max working-set size lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub parameter: usize,
    /// One entry per process, in input order.
    pub outcomes: Vec<ProcessOutcome>,
}

impl RunReport {
    /// Faults summed over all processes.
    pub fn total_faults(&self) -> u64 {
        self.outcomes.iter().map(|o| o.faults).sum()
    }

    /// Working-set size range across every process, if tracked.
    pub fn working_set(&self) -> Option<WorkingSetBounds> {
        self.outcomes
            .iter()
            .filter_map(|o| o.working_set)
            .reduce(WorkingSetBounds::merge)
    }

    /// Outcome for the first process with `id`.
    pub fn outcome(&self, id: ProcessId) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.process_id == id)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Using {} Algorithm:", self.policy)?;
        writeln!(f, "Total Faults")?;
        for outcome in &self.outcomes {
            writeln!(
                f,
                "Current Page Fault For {}: {}",
                outcome.process_id.0, outcome.faults
            )?;
        }
        writeln!(f, "-- Total Replacements: {} --", self.total_faults())?;
        writeln!(f)?;

        if self.policy == PolicyKind::WorkingSet {
            if let Some(bounds) = self.working_set() {
                writeln!(f, "Min Working Set Size: {}", bounds.min)?;
                writeln!(f, "Max Working Set Size: {}", bounds.max)?;
            }
        }
        Ok(())
    }
}
