//! Ordered, fixed-capacity collection of service references.

use core::fmt;

use heapless::Vec;
use log::{debug, warn};

use crate::config::MAX_SERVICES;
use crate::error::RegistryError;
use crate::service::Service;

/// Registered services in insertion order.
///
/// The registry only stores references; the services and the storage their
/// slots point to must outlive it, which the `'a` lifetime enforces.
///
/// # Type Parameters
/// - `NS`: maximum number of services.
pub struct Registry<'a, const NS: usize = MAX_SERVICES> {
    services: Vec<&'a Service<'a>, NS>,
}

impl<'a, const NS: usize> Registry<'a, NS> {
    pub const fn new() -> Self {
        Self { services: Vec::new() }
    }

    /// Adds `service` unless a service with the same token is present.
    ///
    /// A duplicate token is a silent no-op; only a full registry is an error.
    pub fn add(&mut self, service: &'a Service<'a>) -> Result<(), RegistryError> {
        if let Some(index) = self.exists(service.token()) {
            debug!("service '{}' already registered at {}", service.token(), index);
            return Ok(());
        }
        self.push(service)
    }

    /// Appends `service` without the duplicate-token check.
    ///
    /// Used for the bulk initial list. Duplicates registered this way are all
    /// dispatched for a matching line.
    pub fn push(&mut self, service: &'a Service<'a>) -> Result<(), RegistryError> {
        self.services.push(service).map_err(|_| {
            warn!("registry full, dropping service '{}'", service.token());
            RegistryError::Full { capacity: NS }
        })?;
        debug!("registered service '{}' ({} params)", service.token(), service.param_count());
        Ok(())
    }

    /// Removes the service at `index`, keeping the order of the others.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<&'a Service<'a>> {
        if index >= self.services.len() {
            return None;
        }
        let removed = self.services.remove(index);
        debug!("removed service '{}' from {}", removed.token(), index);
        Some(removed)
    }

    /// Removes the first service carrying `token`, if any.
    pub fn remove_by_token(&mut self, token: &str) -> Option<&'a Service<'a>> {
        let index = self.exists(token)?;
        self.remove(index)
    }

    /// Index of the first service whose token equals `token` exactly.
    pub fn exists(&self, token: &str) -> Option<usize> {
        self.services.iter().position(|s| s.token() == token)
    }

    pub fn get(&self, index: usize) -> Option<&'a Service<'a>> {
        self.services.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Service<'a>> {
        self.services.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a Service<'a>] {
        self.services.as_slice()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        NS
    }

    /// Writes the help listing for every registered service.
    pub fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        describe_services(self.as_slice(), out)
    }
}

impl<const NS: usize> Default for Registry<'_, NS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Help listing: each service's token and the kind of every declared slot,
/// in registry order.
pub fn describe_services<W: fmt::Write + ?Sized>(services: &[&Service<'_>], out: &mut W) -> fmt::Result {
    out.write_str("The following commands are available:\r\n\r\n")?;
    out.write_str("Service: 0 ---------\r\n")?;

    for (i, service) in services.iter().enumerate() {
        write!(out, "Command: {}\r\n", service.token())?;

        if service.param_count() > 0 {
            write!(out, "Parameters ({}):\r\n", service.param_count())?;
            for (j, slot) in service.slots().iter().enumerate() {
                write!(out, "  - Parameter {}: {}\r\n", j + 1, slot.kind())?;
            }
        } else {
            out.write_str("No parameters.\r\n")?;
        }

        write!(out, "Service: {} ---------\r\n", i + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use std::string::String;

    use super::*;
    use crate::service::Slot;

    #[test]
    fn test_add_and_exists() {
        let a = Service::new("A");
        let b = Service::new("B");
        let mut r: Registry<'_, 4> = Registry::new();

        r.add(&a).unwrap();
        r.add(&b).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.exists("A"), Some(0));
        assert_eq!(r.exists("B"), Some(1));
        assert_eq!(r.exists("C"), None);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let first = Service::new("SET_I");
        let second = Service::new("SET_I");
        let mut r: Registry<'_, 4> = Registry::new();

        r.add(&first).unwrap();
        r.add(&second).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.exists("SET_I"), Some(0));
        assert!(core::ptr::eq(r.get(0).unwrap(), &first));
    }

    #[test]
    fn test_push_allows_duplicates() {
        let first = Service::new("X");
        let second = Service::new("X");
        let mut r: Registry<'_, 4> = Registry::new();

        r.push(&first).unwrap();
        r.push(&second).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.exists("X"), Some(0));
    }

    #[test]
    fn test_full_registry() {
        let a = Service::new("A");
        let b = Service::new("B");
        let mut r: Registry<'_, 1> = Registry::new();

        r.add(&a).unwrap();
        assert_eq!(r.add(&b), Err(RegistryError::Full { capacity: 1 }));
        assert_eq!(r.len(), 1);
        // a duplicate of a present token is still fine when full
        assert_eq!(r.add(&a), Ok(()));
    }

    #[test]
    fn test_remove_by_index_keeps_order() {
        let a = Service::new("A");
        let b = Service::new("B");
        let c = Service::new("C");
        let mut r: Registry<'_, 4> = Registry::new();
        for s in [&a, &b, &c] {
            r.add(s).unwrap();
        }

        assert_eq!(r.remove(1).map(|s| s.token()), Some("B"));
        assert_eq!(r.iter().map(|s| s.token()).collect::<std::vec::Vec<_>>(), ["A", "C"]);

        assert!(r.remove(5).is_none());
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_remove_by_token() {
        let a = Service::new("A");
        let x = Service::new("X");
        let mut r: Registry<'_, 4> = Registry::new();
        r.add(&a).unwrap();
        r.add(&x).unwrap();

        assert!(r.remove_by_token("X").is_some());
        assert_eq!(r.len(), 1);
        assert_eq!(r.exists("X"), None);

        assert!(r.remove_by_token("X").is_none());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let a = Service::new("HELP");
        let mut r: Registry<'_, 2> = Registry::new();
        r.add(&a).unwrap();
        assert_eq!(r.exists("help"), None);
    }

    #[test]
    fn test_describe_lists_services_in_order() {
        let i = Cell::new(0i32);
        let f = Cell::new(0.0f32);
        let set_i = Service::new("SET_I").param(Slot::Int32(&i));
        let pid = Service::new("PID")
            .param(Slot::Int32(&i))
            .param(Slot::Float32(&f))
            .param(Slot::Float32(&f));
        let help = Service::new("HELP");

        let mut r: Registry<'_, 4> = Registry::new();
        for s in [&set_i, &pid, &help] {
            r.add(s).unwrap();
        }

        let mut out = String::new();
        r.describe(&mut out).unwrap();

        let commands: std::vec::Vec<&str> =
            out.lines().filter_map(|l| l.strip_prefix("Command: ")).map(str::trim_end).collect();
        assert_eq!(commands, ["SET_I", "PID", "HELP"]);

        assert!(out.contains("Parameters (1):\r\n  - Parameter 1: Signed 32-bit integer\r\n"));
        assert!(out.contains("  - Parameter 3: Floating-point number\r\n"));
        assert!(out.contains("Command: HELP\r\nNo parameters.\r\nService: 3 ---------"));
    }
}
