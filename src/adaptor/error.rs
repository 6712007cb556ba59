use std::time::Duration;

use thiserror::Error;

use crate::property::Property;
use crate::types::ValueError;

/// Failure of a property read or write
#[derive(Debug, Error)]
pub enum AdaptorError {
    /// The property is not in the backend's table
    #[error("property '{property}' is not supported by the {backend} backend")]
    Unsupported {
        property: Property,
        backend: &'static str,
    },

    /// The device handle is not open or the tool can not be reached
    #[error("device '{device}' is not available: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    /// The value can not be encoded for the backend
    #[error("can not convert '{value}' for property '{property}': {source}")]
    Conversion {
        property: Property,
        value: String,
        #[source]
        source: ValueError,
    },

    /// A native device call failed
    #[error("{operation} failed on device '{device}': {reason}")]
    Protocol {
        device: String,
        operation: String,
        reason: String,
    },

    /// The external tool failed to run or reported an error
    #[error("'{command}' failed: {reason}")]
    Execution { command: String, reason: String },

    /// The external tool did not finish in time
    #[error("'{command}' did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

impl AdaptorError {
    pub fn conversion(property: Property, value: &str, source: ValueError) -> Self {
        AdaptorError::Conversion {
            property,
            value: value.to_string(),
            source,
        }
    }

    pub fn protocol(device: &str, operation: impl Into<String>, error: &anyhow::Error) -> Self {
        AdaptorError::Protocol {
            device: device.to_string(),
            operation: operation.into(),
            reason: format!("{error:#}"),
        }
    }
}
