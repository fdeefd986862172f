//! Services every engine starts with: `RESET`, `HELP`, `SIZE`.

use core::fmt::Write;

use log::info;

use crate::service::{Context, Service};

fn reset(ctx: &mut Context<'_, '_>) {
    let _ = ctx.write_str("STREAM_COM: Reset\r\n");
    info!("reset requested");
    ctx.request_reset();
}

fn help(ctx: &mut Context<'_, '_>) {
    let _ = ctx.print_help();
}

fn size(ctx: &mut Context<'_, '_>) {
    let count = ctx.service_count();
    let _ = write!(ctx, "STREAM_COM: {} services\r\n", count);
}

const BUILTINS: [Service<'static>; 3] = [
    Service::new("RESET").callback(reset),
    Service::new("HELP").callback(help),
    Service::new("SIZE").callback(size),
];

/// The built-in service table, in registration order.
///
/// `RESET` only raises the engine's reset request; restarting the board is
/// left to the application polling `StreamCom::take_reset_request`.
pub fn services() -> &'static [Service<'static>] {
    &BUILTINS
}
