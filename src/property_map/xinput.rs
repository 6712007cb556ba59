use crate::property::Property;

/// Native value layout of an XInput property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// `count` 32-bit floats
    Float(usize),
    /// `count` integers, stored in whatever format the device declares
    Long(usize),
    /// Screen area written through the coordinate transformation matrix
    ScreenSpace,
}

/// Mapping of a `Property` to an XInput device property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XinputProperty {
    pub id: Property,
    pub key: &'static str,
    pub shape: ValueShape,
}

static TABLE: &[XinputProperty] = &[
    XinputProperty {
        id: Property::CURSOR_ACCEL_PROFILE,
        key: "Device Accel Profile",
        shape: ValueShape::Long(1),
    },
    XinputProperty {
        id: Property::CURSOR_ACCEL_ADAPTIVE_DECELERATION,
        key: "Device Accel Adaptive Deceleration",
        shape: ValueShape::Float(1),
    },
    XinputProperty {
        id: Property::CURSOR_ACCEL_CONSTANT_DECELERATION,
        key: "Device Accel Constant Deceleration",
        shape: ValueShape::Float(1),
    },
    XinputProperty {
        id: Property::CURSOR_ACCEL_VELOCITY_SCALING,
        key: "Device Accel Velocity Scaling",
        shape: ValueShape::Float(1),
    },
    XinputProperty {
        id: Property::SCREEN_SPACE,
        key: crate::constants::x11::COORDINATE_TRANSFORMATION_MATRIX,
        shape: ValueShape::ScreenSpace,
    },
];

impl XinputProperty {
    pub fn map(property: Property) -> Option<&'static XinputProperty> {
        TABLE.iter().find(|entry| entry.id == property)
    }

    pub fn ids() -> Vec<Property> {
        TABLE.iter().map(|entry| entry.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_known_property() {
        let entry = XinputProperty::map(Property::CURSOR_ACCEL_PROFILE).unwrap();
        assert_eq!(entry.key, "Device Accel Profile");
        assert_eq!(entry.shape, ValueShape::Long(1));
    }

    #[test]
    fn test_map_unknown_property() {
        assert!(XinputProperty::map(Property::AREA).is_none());
        assert!(XinputProperty::map(Property::BUTTON1).is_none());
    }

    #[test]
    fn test_ids_match_table() {
        let ids = XinputProperty::ids();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains(&Property::SCREEN_SPACE));
    }
}
