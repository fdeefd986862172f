//! Error types.
//!
//! None of these is fatal: the dispatcher reports each one on the diagnostic
//! stream and keeps polling. They are also returned so the application can
//! react to them.

use thiserror::Error;

use crate::config::MAX_PARAMS;

/// Outcome of a failed dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// The line was blank after trimming.
    #[error("empty input")]
    EmptyInput,

    /// No registered service carries the parsed token.
    #[error("unknown token")]
    UnknownToken,

    /// A service matched but its parameters could not be split.
    #[error("execution error")]
    ExecutionError,
}

/// Failure of the parameter splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplitError {
    /// The service declares more parameters than a service can hold.
    #[error("parameter count {count} exceeds capacity {}", MAX_PARAMS)]
    ParamCountInvalid { count: usize },
}

/// Failure of a registry mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room left for another service.
    #[error("registry full ({capacity} services)")]
    Full { capacity: usize },
}
