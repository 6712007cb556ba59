//! Uniform property access over the device backends
//!
//! Callers hold a `Box<dyn PropertyAdaptor>` and never learn which backend
//! serves them. Failures are reported through `AdaptorError`; the provided
//! `get_property` / `set_property` wrappers log them and collapse them into an
//! empty string or `false`.

mod error;
pub mod xinput;
pub mod xsetwacom;

pub use error::AdaptorError;
pub use xinput::XinputAdaptor;
pub use xsetwacom::XsetwacomAdaptor;

use tracing::{debug, error, warn};

use crate::property::Property;

pub trait PropertyAdaptor {
    /// Short backend name used in diagnostics
    fn backend_name(&self) -> &'static str;

    /// Name of the device this adaptor is bound to
    fn device_name(&self) -> &str;

    /// Properties declared by this backend's table
    fn properties(&self) -> Vec<Property>;

    fn supports_property(&self, property: Property) -> bool;

    fn try_get_property(&self, property: Property) -> Result<String, AdaptorError>;

    fn try_set_property(&self, property: Property, value: &str) -> Result<(), AdaptorError>;

    /// Read a property, returning an empty string on failure
    fn get_property(&self, property: Property) -> String {
        match self.try_get_property(property) {
            Ok(value) => {
                debug!(backend = self.backend_name(), device = self.device_name(), property = %property, value = %value, "Read property");
                value
            }
            Err(err) => {
                log_failure(self.backend_name(), self.device_name(), property, None, &err);
                String::new()
            }
        }
    }

    /// Write a property, returning whether it was applied
    fn set_property(&self, property: Property, value: &str) -> bool {
        match self.try_set_property(property, value) {
            Ok(()) => {
                debug!(backend = self.backend_name(), device = self.device_name(), property = %property, value = %value, "Applied property");
                true
            }
            Err(err) => {
                log_failure(self.backend_name(), self.device_name(), property, Some(value), &err);
                false
            }
        }
    }
}

fn log_failure(
    backend: &str,
    device: &str,
    property: Property,
    value: Option<&str>,
    err: &AdaptorError,
) {
    let operation = if value.is_some() { "set" } else { "get" };
    match err {
        // Asking a backend for a property it never declared is a caller bug
        AdaptorError::Unsupported { .. } => {
            warn!(backend, device, property = %property, value = ?value, operation, error = %err, "Unsupported property access")
        }
        _ => {
            error!(backend, device, property = %property, value = ?value, operation, error = %err, "Property access failed")
        }
    }
}
