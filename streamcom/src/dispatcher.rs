//! The engine: one poll cycle turns one input line into callback invocations.
//!
//! ```text
//! available? ─no─> Idle
//!     │yes
//! read line ─> verify ─blank─> "...EMPTY STRING RECEIVED ..."
//!     │
//! split token/remainder ─> scan every service
//!     │ per match: split params ─> convert ─> callback
//!     │
//! no match ─────────────> "...UNKNOWN TOKEN - ..."
//! last match failed ────> "...ERROR: CANNOT EXECUTE FUNCTION..."
//! ```
//!
//! The diagnostics above are written to the stream verbatim; they are part of
//! the wire protocol.

use log::{debug, trace, warn};

use crate::config::{Config, MAX_SERVICES};
use crate::convert::convert_all;
use crate::error::{DispatchError, RegistryError};
use crate::input::{ParamScratch, split_command, verify};
use crate::registry::Registry;
use crate::service::{Context, Service};
use crate::stream::{LineBuffer, Stream};

const MSG_EMPTY_INPUT: &str = "...EMPTY STRING RECEIVED ...\r\n";
const MSG_EXECUTION_ERROR: &str = "...ERROR: CANNOT EXECUTE FUNCTION...\r\n";
const MSG_PARAM_COUNT: &str = "...NUMBER OF PARAMETER OUT OF BOUNDS...\r\n";

/// Result of a successful [`StreamCom::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was pending on the stream.
    Idle,
    /// A line was processed; `matches` services carried its token.
    Dispatched { matches: usize },
}

/// Line-oriented command dispatcher bound to one stream.
///
/// # Type Parameters
/// - `S`: the transport.
/// - `NS`: registry capacity.
///
/// Services are borrowed for `'a`; their slots keep pointing at caller-owned
/// storage, which the application reads after each dispatch.
pub struct StreamCom<'a, S: Stream, const NS: usize = MAX_SERVICES> {
    stream: S,
    registry: Registry<'a, NS>,
    config: Config,
    reset_requested: bool,
}

impl<'a, S: Stream, const NS: usize> StreamCom<'a, S, NS> {
    /// Engine with the default `=` / `;` delimiters.
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, Config::default())
    }

    /// Engine with custom delimiters. Built-in services, when enabled, are
    /// registered first.
    pub fn with_config(stream: S, config: Config) -> Self {
        #[allow(unused_mut)]
        let mut engine = Self {
            stream,
            registry: Registry::new(),
            config,
            reset_requested: false,
        };

        #[cfg(feature = "builtins")]
        for service in crate::builtins::services() {
            // a registry too small for the built-ins keeps what fits
            if engine.registry.add(service).is_err() {
                break;
            }
        }

        engine
    }

    /// Appends a whole service table in order, without the duplicate-token
    /// check. Stops at the first service that no longer fits.
    pub fn init(&mut self, services: &'a [Service<'a>]) -> Result<(), RegistryError> {
        for service in services {
            self.registry.push(service)?;
        }
        Ok(())
    }

    /// Registers `service` unless its token is already present.
    pub fn add_service(&mut self, service: &'a Service<'a>) -> Result<(), RegistryError> {
        self.registry.add(service)
    }

    pub fn remove_service(&mut self, index: usize) -> Option<&'a Service<'a>> {
        self.registry.remove(index)
    }

    pub fn remove_service_by_token(&mut self, token: &str) -> Option<&'a Service<'a>> {
        self.registry.remove_by_token(token)
    }

    pub fn service_exists(&self, token: &str) -> Option<usize> {
        self.registry.exists(token)
    }

    pub fn service_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &Registry<'a, NS> {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes the help listing to the stream.
    pub fn print_help(&mut self) {
        let _ = self.registry.describe(&mut self.stream);
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// `true` once a callback asked for a device reset.
    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }

    /// Returns and clears the reset request.
    pub fn take_reset_request(&mut self) -> bool {
        core::mem::take(&mut self.reset_requested)
    }

    /// Runs one cycle: if the stream has input, reads one line and
    /// dispatches it. Never blocks.
    pub fn poll(&mut self) -> Result<Outcome, DispatchError> {
        if !self.stream.available() {
            return Ok(Outcome::Idle);
        }

        let mut line = LineBuffer::new();
        self.stream.read_line(&mut line);
        trace!("received {:?}", line.as_str());

        self.dispatch_line(&line).map(|matches| Outcome::Dispatched { matches })
    }

    /// Dispatches `raw` as if it had been read from the stream. Returns the
    /// number of services that matched.
    ///
    /// Every service whose token matches is processed, in registry order; the
    /// result reflects the last one. Callbacks run for each match, also when
    /// its parameters could not be split.
    pub fn dispatch_line(&mut self, raw: &str) -> Result<usize, DispatchError> {
        let Self {
            stream,
            registry,
            config,
            reset_requested,
        } = self;

        let Some(line) = verify(raw) else {
            let _ = stream.write_str(MSG_EMPTY_INPUT);
            return Err(DispatchError::EmptyInput);
        };

        let (token, remainder) = split_command(line, config.cmd_delimiter);
        trace!("token '{}', remainder '{}'", token, remainder);

        let services = registry.as_slice();
        let mut scratch = ParamScratch::new();
        let mut status = false;
        let mut matches = 0;

        for &service in services {
            if service.token() != token {
                continue;
            }
            matches += 1;

            status = if service.param_count() == 0 {
                true
            } else {
                match scratch.fill(remainder, config.param_delimiter, service.param_count()) {
                    Ok(_) => {
                        convert_all(service, &scratch);
                        true
                    }
                    Err(e) => {
                        warn!("'{}': {}", token, e);
                        let _ = stream.write_str(MSG_PARAM_COUNT);
                        false
                    }
                }
            };
            debug!("matched '{}' (status {})", token, status);

            if let Some(callback) = service.get_callback() {
                let mut ctx = Context::new(&mut *stream, service, services, &mut *reset_requested);
                callback(&mut ctx);
            }
        }

        if matches == 0 {
            let _ = write!(
                stream,
                "...UNKNOWN TOKEN - {} - Status = {} - Found = {}\r\n",
                line,
                u8::from(status),
                u8::from(matches > 0)
            );
            return Err(DispatchError::UnknownToken);
        }

        if !status {
            let _ = stream.write_str(MSG_EXECUTION_ERROR);
            return Err(DispatchError::ExecutionError);
        }

        Ok(matches)
    }
}
