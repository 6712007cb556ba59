use crate::property::Property;

/// Mapping of a `Property` to an xsetwacom parameter name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsetwacomProperty {
    pub id: Property,
    pub key: &'static str,
}

const fn entry(id: Property, key: &'static str) -> XsetwacomProperty {
    XsetwacomProperty { id, key }
}

static TABLE: &[XsetwacomProperty] = &[
    entry(Property::ABS_WHEEL_UP, "AbsWheelUp"),
    entry(Property::ABS_WHEEL_DOWN, "AbsWheelDown"),
    entry(Property::ABS_WHEEL2_UP, "AbsWheel2Up"),
    entry(Property::ABS_WHEEL2_DOWN, "AbsWheel2Down"),
    entry(Property::AREA, "Area"),
    entry(Property::BUTTON1, "Button 1"),
    entry(Property::BUTTON2, "Button 2"),
    entry(Property::BUTTON3, "Button 3"),
    entry(Property::BUTTON4, "Button 4"),
    entry(Property::BUTTON5, "Button 5"),
    entry(Property::BUTTON6, "Button 6"),
    entry(Property::BUTTON7, "Button 7"),
    entry(Property::BUTTON8, "Button 8"),
    entry(Property::BUTTON9, "Button 9"),
    entry(Property::BUTTON10, "Button 10"),
    entry(Property::BUTTON11, "Button 11"),
    entry(Property::BUTTON12, "Button 12"),
    entry(Property::BUTTON13, "Button 13"),
    entry(Property::BUTTON14, "Button 14"),
    entry(Property::BUTTON15, "Button 15"),
    entry(Property::BUTTON16, "Button 16"),
    entry(Property::BUTTON17, "Button 17"),
    entry(Property::BUTTON18, "Button 18"),
    entry(Property::GESTURE, "Gesture"),
    entry(Property::MAP_TO_OUTPUT, "MapToOutput"),
    entry(Property::MODE, "Mode"),
    entry(Property::PRESSURE_CURVE, "PressureCurve"),
    entry(Property::RAW_SAMPLE, "RawSample"),
    entry(Property::REL_WHEEL_UP, "RelWheelUp"),
    entry(Property::REL_WHEEL_DOWN, "RelWheelDown"),
    entry(Property::RESET_AREA, "ResetArea"),
    entry(Property::ROTATE, "Rotate"),
    entry(Property::SCROLL_DISTANCE, "ScrollDistance"),
    entry(Property::STRIP_LEFT_UP, "StripLeftUp"),
    entry(Property::STRIP_LEFT_DOWN, "StripLeftDown"),
    entry(Property::STRIP_RIGHT_UP, "StripRightUp"),
    entry(Property::STRIP_RIGHT_DOWN, "StripRightDown"),
    entry(Property::SUPPRESS, "Suppress"),
    entry(Property::TABLET_PC_BUTTON, "TabletPCButton"),
    entry(Property::TAP_TIME, "TapTime"),
    entry(Property::THRESHOLD, "Threshold"),
    entry(Property::TOUCH, "Touch"),
    entry(Property::ZOOM_DISTANCE, "ZoomDistance"),
];

impl XsetwacomProperty {
    pub const AREA: XsetwacomProperty = entry(Property::AREA, "Area");
    pub const RESET_AREA: XsetwacomProperty = entry(Property::RESET_AREA, "ResetArea");
    pub const ROTATE: XsetwacomProperty = entry(Property::ROTATE, "Rotate");

    pub fn map(property: Property) -> Option<&'static XsetwacomProperty> {
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
    fn test_button_keys_use_xsetwacom_spelling() {
        assert_eq!(XsetwacomProperty::map(Property::BUTTON3).unwrap().key, "Button 3");
        assert_eq!(XsetwacomProperty::map(Property::BUTTON18).unwrap().key, "Button 18");
    }

    #[test]
    fn test_xinput_only_properties_are_absent() {
        assert!(XsetwacomProperty::map(Property::SCREEN_SPACE).is_none());
        assert!(XsetwacomProperty::map(Property::CURSOR_ACCEL_PROFILE).is_none());
    }

    #[test]
    fn test_special_entries_match_table() {
        assert_eq!(XsetwacomProperty::map(Property::AREA), Some(&XsetwacomProperty::AREA));
        assert_eq!(XsetwacomProperty::map(Property::ROTATE), Some(&XsetwacomProperty::ROTATE));
        assert_eq!(XsetwacomProperty::map(Property::RESET_AREA), Some(&XsetwacomProperty::RESET_AREA));
    }
}
