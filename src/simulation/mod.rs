//! Simulation layer: input, replay and reporting.
//!
//! # Components
//! - [`SimulationConfig`] - parsed settings and process records
//! - [`replay`] - drives one process through one policy instance
//! - [`Simulation`] - runs a policy over every process, sequentially or in
//!   parallel, and compares all policies
//! - [`RunReport`] - per-policy outcome with the text report
//! - [`ReplayStats`] - counters accumulated across runs

mod config;
mod driver;
mod process;
mod report;
mod stats;

use std::thread;

use log::info;
use parking_lot::Mutex;

use crate::common::config::NO_PARAMETER;
use crate::common::Result;
use crate::policy::{Policy, PolicyKind};

pub use config::{GlobalSettings, SimulationConfig};
pub use driver::{replay, ProcessOutcome};
pub use process::Process;
pub use report::RunReport;
pub use stats::{ReplayStats, StatsSnapshot};

/// Runs policies over the processes of one configuration.
///
/// Every (process, policy) pair gets a freshly built policy and empty
/// memory, so runs never observe each other.
///
/// # Usage
/// ```
/// use pagereplay::{PolicyKind, Simulation, SimulationConfig};
///
/// let config = SimulationConfig::parse("12 4096 3 2 1 4 1\n1 3 1 2 3 4 1 2\n").unwrap();
/// let sim = Simulation::new(config);
///
/// let report = sim.run(PolicyKind::Lifo, 0).unwrap();
/// assert_eq!(report.total_faults(), 4);
///
/// for report in sim.compare().unwrap() {
///     println!("{}", report);
/// }
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    stats: ReplayStats,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            stats: ReplayStats::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Counters accumulated over every run of this simulation.
    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Parameter a comparison run hands to `kind`.
    pub fn default_parameter(&self, kind: PolicyKind) -> usize {
        if kind.takes_parameter() {
            self.config.settings.lookahead_or_window_size
        } else {
            NO_PARAMETER
        }
    }

    /// Run `kind` over every process, one after another.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` for LRU-X with `param` 0
    /// - the first replay error; later processes are not run
    pub fn run(&self, kind: PolicyKind, param: usize) -> Result<RunReport> {
        kind.check_parameter(param)?;
        info!(
            "running {} (parameter {}) over {} process(es)",
            kind,
            param,
            self.config.processes.len()
        );

        let mut outcomes = Vec::with_capacity(self.config.processes.len());
        for process in &self.config.processes {
            let mut policy = Policy::new(kind, param);
            let outcome = replay(process, &mut policy)?;
            self.stats.record(&outcome);
            outcomes.push(outcome);
        }

        Ok(self.finish(kind, param, outcomes))
    }

    /// Run `kind` over every process, one thread per process.
    ///
    /// Produces the same report as [`run`](Self::run); outcomes keep input
    /// order.
    ///
    /// # Errors
    /// Same parameter check as [`run`](Self::run), then the error of the
    /// earliest failing process in input order.
    pub fn run_parallel(&self, kind: PolicyKind, param: usize) -> Result<RunReport> {
        kind.check_parameter(param)?;
        info!(
            "running {} (parameter {}) over {} process(es) in parallel",
            kind,
            param,
            self.config.processes.len()
        );

        let results = Mutex::new(Vec::with_capacity(self.config.processes.len()));
        thread::scope(|scope| {
            for (index, process) in self.config.processes.iter().enumerate() {
                let results = &results;
                let stats = &self.stats;
                scope.spawn(move || {
                    let mut policy = Policy::new(kind, param);
                    let result = replay(process, &mut policy);
                    if let Ok(outcome) = &result {
                        stats.record(outcome);
                    }
                    results.lock().push((index, result));
                });
            }
        });

        let mut results = results.into_inner();
        results.sort_by_key(|(index, _)| *index);
        let outcomes = results
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>>>()?;

        Ok(self.finish(kind, param, outcomes))
    }

    /// Run every policy with its configured parameter, in report order.
    pub fn compare(&self) -> Result<Vec<RunReport>> {
        PolicyKind::ALL
            .into_iter()
            .map(|kind| self.run(kind, self.default_parameter(kind)))
            .collect()
    }

    fn finish(&self, kind: PolicyKind, param: usize, outcomes: Vec<ProcessOutcome>) -> RunReport {
        let report = RunReport {
            policy: kind,
            parameter: param,
            outcomes,
        };
        info!("{} finished with {} total faults", kind, report.total_faults());
        report
    }
}
