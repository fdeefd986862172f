#![cfg_attr(not(test), no_std)]
//! # StreamCom
//!
//! A zero-heap, `no_std` command dispatcher for line-oriented text streams
//! (serial, telnet). Each line names a registered service and carries its
//! parameters; the engine converts them into typed storage owned by the
//! application and then invokes the service's callback.
//!
//! ## Wire format
//! ```text
//! <TOKEN>[=<p1>[;<p2>...]][\r\n]
//! ```
//! - Delimiters are configurable ([`Config`]); each is a set of characters.
//! - Tokens are matched exactly (case-sensitive).
//! - At most [`MAX_PARAMS`] parameters per service.
//!
//! ## Parameter kinds
//! | Slot      | Storage             | Conversion                   |
//! |-----------|---------------------|------------------------------|
//! | `Int8`    | `Cell<i8>`          | integer prefix, truncated    |
//! | `Int16`   | `Cell<i16>`         | integer prefix, truncated    |
//! | `Int32`   | `Cell<i32>`         | integer prefix, truncated    |
//! | `Int64`   | `Cell<i64>`         | integer prefix               |
//! | `Float32` | `Cell<f32>`         | decimal prefix               |
//! | `Float64` | `Cell<f64>`         | decimal prefix               |
//! | `Text`    | `RefCell<ParamText>`| verbatim, bounded            |
//! | `Raw`     | `&dyn Any`          | never written                |
//!
//! Text that is not a number converts to zero.
//!
//! ## Usage
//! ```ignore
//! let gain = Cell::new(0i32);
//! let set_i = Service::new("SET_I").param(Slot::Int32(&gain));
//!
//! let mut com: StreamCom<'_, _> = StreamCom::new(uart);
//! com.add_service(&set_i)?;
//! loop {
//!     let _ = com.poll();
//!     // gain.get() holds the last value sent
//! }
//! ```
//!
//! ## Diagnostics
//! Failures are written to the stream (`...EMPTY STRING RECEIVED ...`,
//! `...UNKNOWN TOKEN - ...`, `...ERROR: CANNOT EXECUTE FUNCTION...`,
//! `...NUMBER OF PARAMETER OUT OF BOUNDS...`) and returned as
//! [`DispatchError`]. None of them stops the engine.
//!
//! ## Features
//! - `builtins` (default): registers `RESET`, `HELP` and `SIZE`.
//! - `defmt`: derives `defmt::Format` for the error and kind enums.

pub mod config;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod registry;
pub mod service;
pub mod stream;
pub mod types;

#[cfg(feature = "builtins")]
pub mod builtins;

pub use config::{Config, MAX_PARAMS, MAX_SERVICES};
pub use dispatcher::{Outcome, StreamCom};
pub use error::{DispatchError, RegistryError, SplitError};
pub use registry::Registry;
pub use service::{Callback, Context, Service, Slot};
pub use stream::{LineBuffer, Stream};
pub use types::{ParamText, ParameterKind, Value};
