//! Routes property access for one device across several adaptors

use tracing::debug;

use crate::adaptor::{AdaptorError, PropertyAdaptor};
use crate::property::Property;

/// Ordered set of adaptors bound to the same device
///
/// Reads are served by the first adaptor supporting a property. Writes go to
/// every supporting adaptor and only succeed if all of them succeed.
pub struct TabletBackend {
    device_name: String,
    adaptors: Vec<Box<dyn PropertyAdaptor>>,
}

impl TabletBackend {
    pub fn new(device_name: &str) -> Self {
        Self {
            device_name: device_name.to_string(),
            adaptors: Vec::new(),
        }
    }

    pub fn add_adaptor(&mut self, adaptor: Box<dyn PropertyAdaptor>) {
        debug!(device = %self.device_name, backend = adaptor.backend_name(), "Registered adaptor");
        self.adaptors.push(adaptor);
    }

    pub fn with_adaptor(mut self, adaptor: Box<dyn PropertyAdaptor>) -> Self {
        self.add_adaptor(adaptor);
        self
    }

    fn unsupported(property: Property) -> AdaptorError {
        AdaptorError::Unsupported {
            property,
            backend: "configured",
        }
    }
}

impl PropertyAdaptor for TabletBackend {
    fn backend_name(&self) -> &'static str {
        "tablet"
    }

    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn properties(&self) -> Vec<Property> {
        let mut properties: Vec<Property> = Vec::new();
        for property in self.adaptors.iter().flat_map(|adaptor| adaptor.properties()) {
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
        properties
    }

    fn supports_property(&self, property: Property) -> bool {
        self.adaptors
            .iter()
            .any(|adaptor| adaptor.supports_property(property))
    }

    fn try_get_property(&self, property: Property) -> Result<String, AdaptorError> {
        self.adaptors
            .iter()
            .find(|adaptor| adaptor.supports_property(property))
            .ok_or_else(|| Self::unsupported(property))?
            .try_get_property(property)
    }

    fn try_set_property(&self, property: Property, value: &str) -> Result<(), AdaptorError> {
        let mut supported = false;
        let mut first_error = None;

        for adaptor in self.adaptors.iter().filter(|a| a.supports_property(property)) {
            supported = true;
            if let Err(err) = adaptor.try_set_property(property, value) {
                debug!(backend = adaptor.backend_name(), property = %property, error = %err, "Adaptor rejected value");
                first_error.get_or_insert(err);
            }
        }

        match (supported, first_error) {
            (false, _) => Err(Self::unsupported(property)),
            (true, Some(err)) => Err(err),
            (true, None) => Ok(()),
        }
    }
}
