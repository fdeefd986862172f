//! Compile-time capacities and runtime delimiter settings.
//!
//! Every buffer in the engine is a fixed-size `heapless` container; the
//! constants below size them. Change them here to fit the target's RAM.

/// Maximum number of parameters a single service can declare.
pub const MAX_PARAMS: usize = 4;

/// Maximum length (bytes) stored in a `Text` slot. Numeric parameters are
/// converted from the full token.
pub const PARAM_TEXT_LEN: usize = 32;

/// Maximum length (bytes) of one input line.
pub const LINE_MAX_LEN: usize = 128;

/// Default registry capacity.
pub const MAX_SERVICES: usize = 16;

/// Separates the command token from its parameters: `PID=1;2;3`.
pub const CMD_DELIMITER: &str = "=";

/// Separates the parameters from each other: `PID=1;2;3`.
pub const PARAM_DELIMITER: &str = ";";

/// Runtime delimiter configuration.
///
/// Each delimiter is a *set* of characters: any character of the string ends
/// a token, so `";,"` accepts both `1;2` and `1,2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub cmd_delimiter: &'static str,
    pub param_delimiter: &'static str,
}

impl Config {
    pub const fn new(cmd_delimiter: &'static str, param_delimiter: &'static str) -> Self {
        Self {
            cmd_delimiter,
            param_delimiter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(CMD_DELIMITER, PARAM_DELIMITER)
    }
}
