//! Service definitions: token, typed parameter slots, callback.
//!
//! A service never owns the storage its parameters are written to. Each
//! [`Slot`] borrows a caller-owned `Cell`/`RefCell`, so the application keeps
//! reading its values while the service stays registered:
//!
//! ```ignore
//! let p = Cell::new(0i32);
//! let i = Cell::new(0.0f32);
//! let pid = Service::new("PID")
//!     .param(Slot::Int32(&p))
//!     .param(Slot::Float32(&i))
//!     .callback(on_pid);
//! ```

use core::any::Any;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::config::MAX_PARAMS;
use crate::registry::describe_services;
use crate::stream::Stream;
use crate::types::{ParamText, ParameterKind, Value};

/// Handler invoked after a service matched.
pub type Callback = fn(&mut Context<'_, '_>);

/// One parameter slot: kind tag plus a borrowed, caller-owned location.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    Int8(&'a Cell<i8>),
    Int16(&'a Cell<i16>),
    Int32(&'a Cell<i32>),
    Int64(&'a Cell<i64>),
    Float32(&'a Cell<f32>),
    Float64(&'a Cell<f64>),
    Text(&'a RefCell<ParamText>),
    /// Opaque value handed to the callback as-is, never written.
    Raw(&'a (dyn Any + 'static)),
    None,
}

impl<'a> Slot<'a> {
    pub const fn kind(&self) -> ParameterKind {
        match self {
            Slot::Int8(_) => ParameterKind::Int8,
            Slot::Int16(_) => ParameterKind::Int16,
            Slot::Int32(_) => ParameterKind::Int32,
            Slot::Int64(_) => ParameterKind::Int64,
            Slot::Float32(_) => ParameterKind::Float32,
            Slot::Float64(_) => ParameterKind::Float64,
            Slot::Text(_) => ParameterKind::Text,
            Slot::Raw(_) => ParameterKind::Raw,
            Slot::None => ParameterKind::None,
        }
    }

    /// Reads the current content of the referenced storage.
    ///
    /// A `Text` slot that is mutably borrowed elsewhere reads as empty text.
    pub fn value(&self) -> Value {
        match *self {
            Slot::Int8(c) => Value::Int8(c.get()),
            Slot::Int16(c) => Value::Int16(c.get()),
            Slot::Int32(c) => Value::Int32(c.get()),
            Slot::Int64(c) => Value::Int64(c.get()),
            Slot::Float32(c) => Value::Float32(c.get()),
            Slot::Float64(c) => Value::Float64(c.get()),
            Slot::Text(t) => Value::Text(t.try_borrow().map(|t| t.clone()).unwrap_or_default()),
            Slot::Raw(_) => Value::Raw,
            Slot::None => Value::None,
        }
    }

    /// Downcasts a `Raw` slot to the registrant's type.
    pub fn raw<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Slot::Raw(r) => r.downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// One command definition.
///
/// `param_count` may exceed [`MAX_PARAMS`] when more parameters are declared
/// than fit; such a service is kept but every dispatch to it fails with
/// `ExecutionError` instead of silently dropping parameters.
#[derive(Clone, Copy)]
pub struct Service<'a> {
    token: &'a str,
    slots: [Slot<'a>; MAX_PARAMS],
    param_count: usize,
    callback: Option<Callback>,
}

impl<'a> Service<'a> {
    /// A service without parameters and without callback.
    pub const fn new(token: &'a str) -> Self {
        Self {
            token,
            slots: [Slot::None; MAX_PARAMS],
            param_count: 0,
            callback: None,
        }
    }

    /// Table form: all slots, the number of active ones and the callback.
    pub const fn with_slots(
        token: &'a str,
        slots: [Slot<'a>; MAX_PARAMS],
        param_count: usize,
        callback: Option<Callback>,
    ) -> Self {
        Self {
            token,
            slots,
            param_count,
            callback,
        }
    }

    /// Appends one parameter slot.
    pub const fn param(mut self, slot: Slot<'a>) -> Self {
        if self.param_count < MAX_PARAMS {
            self.slots[self.param_count] = slot;
        }
        self.param_count += 1;
        self
    }

    pub const fn callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub const fn token(&self) -> &'a str {
        self.token
    }

    /// Declared parameter count.
    pub const fn param_count(&self) -> usize {
        self.param_count
    }

    /// Active slots (at most `MAX_PARAMS`).
    pub fn slots(&self) -> &[Slot<'a>] {
        &self.slots[..self.param_count.min(MAX_PARAMS)]
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<'a>> {
        self.slots().get(index)
    }

    pub const fn get_callback(&self) -> Option<Callback> {
        self.callback
    }

    /// `true` if the declared count fits the slot capacity.
    pub const fn is_dispatchable(&self) -> bool {
        self.param_count <= MAX_PARAMS
    }
}

impl fmt::Debug for Service<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("token", &self.token)
            .field("slots", &self.slots())
            .field("param_count", &self.param_count)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// What a callback gets to work with.
///
/// Gives access to the output stream, the matched service's slot block and a
/// read-only view of the owning engine (its registry and reset request).
/// `Context` implements `fmt::Write`, so `write!(ctx, ..)` goes to the stream.
pub struct Context<'c, 'a> {
    stream: &'c mut dyn Stream,
    service: &'a Service<'a>,
    services: &'c [&'a Service<'a>],
    reset_requested: &'c mut bool,
}

impl<'c, 'a> Context<'c, 'a> {
    pub(crate) fn new(
        stream: &'c mut dyn Stream,
        service: &'a Service<'a>,
        services: &'c [&'a Service<'a>],
        reset_requested: &'c mut bool,
    ) -> Self {
        Self {
            stream,
            service,
            services,
            reset_requested,
        }
    }

    pub fn stream(&mut self) -> &mut dyn Stream {
        &mut *self.stream
    }

    pub fn token(&self) -> &'a str {
        self.service.token()
    }

    /// The matched service's active slots.
    pub fn params(&self) -> &'a [Slot<'a>] {
        self.service.slots()
    }

    pub fn param_count(&self) -> usize {
        self.service.param_count()
    }

    /// Current value of parameter `index`; `Value::None` past the end.
    pub fn value(&self, index: usize) -> Value {
        self.service.slot(index).map(Slot::value).unwrap_or(Value::None)
    }

    /// Number of services registered in the owning engine.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn services(&self) -> impl Iterator<Item = &'a Service<'a>> {
        self.services.iter().copied()
    }

    /// Writes the engine's help listing to the stream.
    pub fn print_help(&mut self) -> fmt::Result {
        describe_services(self.services, &mut *self.stream)
    }

    /// Asks the application to restart the device. Read back through
    /// `StreamCom::take_reset_request`.
    pub fn request_reset(&mut self) {
        *self.reset_requested = true;
    }
}

impl fmt::Write for Context<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.stream.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Board {
        id: u32,
    }

    fn noop(_: &mut Context<'_, '_>) {}

    #[test]
    fn test_builder_appends_slots() {
        let a = Cell::new(0i32);
        let b = Cell::new(0.0f32);
        let s = Service::new("PID").param(Slot::Int32(&a)).param(Slot::Float32(&b)).callback(noop);

        assert_eq!(s.token(), "PID");
        assert_eq!(s.param_count(), 2);
        assert_eq!(s.slots().len(), 2);
        assert_eq!(s.slots()[1].kind(), ParameterKind::Float32);
        assert!(s.get_callback().is_some());
        assert!(s.is_dispatchable());
    }

    #[test]
    fn test_builder_overflow_keeps_declared_count() {
        let c = Cell::new(0i8);
        let mut s = Service::new("WIDE");
        for _ in 0..MAX_PARAMS + 1 {
            s = s.param(Slot::Int8(&c));
        }
        assert_eq!(s.param_count(), MAX_PARAMS + 1);
        assert_eq!(s.slots().len(), MAX_PARAMS);
        assert!(!s.is_dispatchable());
    }

    #[test]
    fn test_table_form() {
        let v = Cell::new(0i32);
        let s = Service::with_slots(
            "SET_I",
            [Slot::Int32(&v), Slot::None, Slot::None, Slot::None],
            1,
            None,
        );
        assert_eq!(s.param_count(), 1);
        assert_eq!(s.slot(0).map(Slot::kind), Some(ParameterKind::Int32));
        assert!(s.slot(1).is_none());
        assert!(s.get_callback().is_none());
    }

    #[test]
    fn test_const_service() {
        const SVC: Service<'static> = Service::new("CONST");
        assert_eq!(SVC.token(), "CONST");
        assert_eq!(SVC.param_count(), 0);
    }

    #[test]
    fn test_slot_values() {
        let i = Cell::new(-5i16);
        let f = Cell::new(2.5f64);
        let t = RefCell::new(ParamText::new());
        let _ = t.borrow_mut().push_str("hi");

        assert_eq!(Slot::Int16(&i).value(), Value::Int16(-5));
        assert_eq!(Slot::Float64(&f).value(), Value::Float64(2.5));
        assert_eq!(Slot::Text(&t).value().as_str(), Some("hi"));
        assert_eq!(Slot::None.value(), Value::None);
    }

    #[test]
    fn test_raw_downcast() {
        let board = Board { id: 7 };
        let slot = Slot::Raw(&board);
        assert_eq!(slot.kind(), ParameterKind::Raw);
        assert_eq!(slot.raw::<Board>(), Some(&Board { id: 7 }));
        assert_eq!(slot.raw::<u32>(), None);
        assert_eq!(slot.value(), Value::Raw);
    }
}
