//! Configuration constants for pagereplay.

/// Input file read by the binary when no path is given.
pub const DEFAULT_INPUT_PATH: &str = "input.txt";

/// Parameter handed to policies that take none (LIFO, MRU, LFU).
pub const NO_PARAMETER: usize = 0;

/// Number of integers on the global settings line of an input file.
pub const GLOBAL_SETTINGS_FIELDS: usize = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_INPUT_PATH, "input.txt");
        assert_eq!(NO_PARAMETER, 0);
        assert_eq!(GLOBAL_SETTINGS_FIELDS, 7);
    }
}
