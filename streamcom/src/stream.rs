//! Transport contract.
//!
//! The engine does not care whether bytes come from a UART, a telnet socket
//! or a test fixture. It only needs to know whether input is pending, to pull
//! one line, and to write text back. Output goes through `core::fmt::Write`
//! so `write!`/`writeln!` work directly on any stream.

use core::fmt;

use heapless::String;

use crate::config::LINE_MAX_LEN;

/// One raw input line as handed over by the transport.
pub type LineBuffer = String<LINE_MAX_LEN>;

/// A line-based, non-blocking byte stream.
pub trait Stream: fmt::Write {
    /// Returns `true` if unread input is pending. Must not block.
    fn available(&mut self) -> bool;

    /// Reads one line into `line` (which the caller has cleared).
    ///
    /// Only called after `available()` returned `true`. The line may keep its
    /// terminator; the dispatcher normalizes it. Input beyond the buffer
    /// capacity is the transport's to drop.
    fn read_line(&mut self, line: &mut LineBuffer);
}

impl<T: Stream + ?Sized> Stream for &mut T {
    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn read_line(&mut self, line: &mut LineBuffer) {
        (**self).read_line(line)
    }
}
