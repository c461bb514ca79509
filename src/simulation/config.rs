//! Simulation input: global settings plus process records.
//!
//! # Text format
//! ```text
//! <total_frames> <page_size> <frames_per_process|delta> <lookahead|window>
//!     <min_free> <max_free> <num_processes>
//! <process_id> <frame_capacity> <page> <page> <page> ...
//! <process_id> <frame_capacity> <page> ...
//! ```
//!
//! The settings are one line, wrapped above for width. Fields are whitespace
//! separated. Blank lines are skipped. Only the per-process frame capacity
//! and the lookahead/window value drive the policies; the other settings are
//! carried through unchanged.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::common::config::GLOBAL_SETTINGS_FIELDS;
use crate::common::{Error, PageId, ProcessId, Result};
use crate::simulation::Process;

/// Settings line of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalSettings {
    pub total_page_frames: u64,
    pub page_size: u64,
    pub frames_per_process_or_delta: u64,
    /// X for LRU-X, L for the lookahead policy, τ for Working-Set.
    pub lookahead_or_window_size: usize,
    pub min_free_pool_size: u64,
    pub max_free_pool_size: u64,
    pub num_processes: usize,
}

/// Everything a comparison run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub settings: GlobalSettings,
    pub processes: Vec<Process>,
}

impl SimulationConfig {
    /// Read and parse an input file.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be read
    /// - `Error::Parse` if its contents are malformed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse input text.
    ///
    /// # Errors
    /// `Error::Parse` with the 1-based line number of the first problem.
    ///
    /// # Example
    /// ```
    /// use pagereplay::SimulationConfig;
    ///
    /// let config = SimulationConfig::parse("20 4096 3 2 1 5 1\n7 3 1 2 3 1\n").unwrap();
    /// assert_eq!(config.settings.lookahead_or_window_size, 2);
    /// assert_eq!(config.processes[0].references.len(), 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (settings_line, settings_text) = lines
            .next()
            .ok_or_else(|| Error::parse(1, "missing global settings"))?;
        let settings = parse_settings(settings_line, settings_text)?;

        let mut processes = Vec::with_capacity(settings.num_processes);
        let mut last_line = settings_line;
        for (line_no, line) in lines.by_ref().take(settings.num_processes) {
            processes.push(parse_process(line_no, line)?);
            last_line = line_no;
        }

        if processes.len() < settings.num_processes {
            return Err(Error::parse(
                last_line + 1,
                format!(
                    "expected {} process records, found {}",
                    settings.num_processes,
                    processes.len()
                ),
            ));
        }

        let extra = lines.count();
        if extra > 0 {
            warn!(
                "ignoring {} line(s) after the {} declared process records",
                extra, settings.num_processes
            );
        }

        Ok(Self {
            settings,
            processes,
        })
    }
}

impl FromStr for SimulationConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_field<T: FromStr>(line: usize, name: &str, token: Option<&str>) -> Result<T> {
    let token = token.ok_or_else(|| Error::parse(line, format!("missing {}", name)))?;
    token
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid {}: {:?}", name, token)))
}

fn parse_settings(line: usize, text: &str) -> Result<GlobalSettings> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != GLOBAL_SETTINGS_FIELDS {
        return Err(Error::parse(
            line,
            format!(
                "global settings need {} fields, found {}",
                GLOBAL_SETTINGS_FIELDS,
                tokens.len()
            ),
        ));
    }

    let mut fields = tokens.into_iter();
    let settings = GlobalSettings {
        total_page_frames: parse_field(line, "total page frames", fields.next())?,
        page_size: parse_field(line, "page size", fields.next())?,
        frames_per_process_or_delta: parse_field(line, "frames per process", fields.next())?,
        lookahead_or_window_size: parse_field(line, "lookahead/window size", fields.next())?,
        min_free_pool_size: parse_field(line, "minimum free pool size", fields.next())?,
        max_free_pool_size: parse_field(line, "maximum free pool size", fields.next())?,
        num_processes: parse_field(line, "process count", fields.next())?,
    };

    if settings.lookahead_or_window_size == 0 {
        return Err(Error::parse(line, "lookahead/window size must be at least 1"));
    }
    Ok(settings)
}

fn parse_process(line: usize, text: &str) -> Result<Process> {
    let mut tokens = text.split_whitespace();
    let id: u32 = parse_field(line, "process id", tokens.next())?;
    let frame_capacity: usize = parse_field(line, "frame capacity", tokens.next())?;
    if frame_capacity == 0 {
        return Err(Error::parse(line, "frame capacity must be at least 1"));
    }

    let references = tokens
        .map(|token| parse_field::<u32>(line, "page id", Some(token)).map(PageId))
        .collect::<Result<Vec<_>>>()?;

    Ok(Process::new(ProcessId::new(id), frame_capacity, references))
}
