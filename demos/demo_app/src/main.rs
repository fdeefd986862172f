//! Host stand-in for a board talking StreamCom over its serial port.
//!
//! Type commands on stdin, e.g. `SET_I=42` or `PID=15;0.12;0.23`.
//! `HELP` lists the services, `RESET` ends the program.
//! Set `RUST_LOG=debug` to watch the dispatcher.

use core::fmt::{self, Write as _};
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{error, info};
use streamcom::types::copy_truncated;
use streamcom::{Context, LineBuffer, Service, Slot, Stream, StreamCom};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Stdin lines handed over by a reader thread, stdout as output.
struct ConsoleStream {
    lines: Receiver<String>,
    pending: Option<String>,
    closed: bool,
}

impl ConsoleStream {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            lines: rx,
            pending: None,
            closed: false,
        }
    }

    /// `true` once stdin hit EOF and every line was consumed.
    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_none()
    }
}

impl fmt::Write for ConsoleStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut out = io::stdout().lock();
        out.write_all(s.as_bytes()).and_then(|_| out.flush()).map_err(|_| fmt::Error)
    }
}

impl Stream for ConsoleStream {
    fn available(&mut self) -> bool {
        if self.pending.is_none() {
            match self.lines.try_recv() {
                Ok(line) => self.pending = Some(line),
                Err(TryRecvError::Disconnected) => self.closed = true,
                Err(TryRecvError::Empty) => {}
            }
        }
        self.pending.is_some()
    }

    fn read_line(&mut self, line: &mut LineBuffer) {
        if let Some(next) = self.pending.take() {
            copy_truncated(line, &next);
        }
    }
}

fn set_pid(ctx: &mut Context<'_, '_>) {
    let p = ctx.value(0).as_i64().unwrap_or_default();
    let i = ctx.value(1).as_f64().unwrap_or_default();
    let d = ctx.value(2).as_f64().unwrap_or_default();
    let _ = write!(ctx, "PID: P={} I={:.3} D={:.3}\r\n", p, i, d);
}

fn main() {
    env_logger::init();

    let set_i_var = Cell::new(0i32);
    let p = Cell::new(0i32);
    let i = Cell::new(0.0f32);
    let d = Cell::new(0.0f32);

    let services = [
        Service::new("SET_I").param(Slot::Int32(&set_i_var)),
        Service::new("PID")
            .param(Slot::Int32(&p))
            .param(Slot::Float32(&i))
            .param(Slot::Float32(&d))
            .callback(set_pid),
    ];

    let mut com: StreamCom<'_, ConsoleStream> = StreamCom::new(ConsoleStream::spawn());
    if let Err(e) = com.init(&services) {
        error!("cannot register services: {}", e);
        return;
    }
    info!("{} services registered, waiting for commands", com.service_count());

    let mut last_set_i = set_i_var.get();
    loop {
        if let Err(e) = com.poll() {
            info!("dispatch failed: {}", e);
        }

        if set_i_var.get() != last_set_i {
            last_set_i = set_i_var.get();
            println!("SET_I changed to {}", last_set_i);
        }

        if com.take_reset_request() {
            info!("reset requested, exiting");
            break;
        }
        if com.stream().is_closed() {
            break;
        }

        thread::sleep(POLL_INTERVAL);
    }
}
