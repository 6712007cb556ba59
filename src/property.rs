//! Normalized tablet property identifiers
//!
//! A `Property` is an opaque key shared by every backend. Backends map it to
//! their own parameter names through the tables in `property_map`.

use std::fmt;

/// Identifier of one logical tablet setting, compared by key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Property(&'static str);

impl Property {
    pub const ABS_WHEEL_UP: Property = Property("AbsWheelUp");
    pub const ABS_WHEEL_DOWN: Property = Property("AbsWheelDown");
    pub const ABS_WHEEL2_UP: Property = Property("AbsWheel2Up");
    pub const ABS_WHEEL2_DOWN: Property = Property("AbsWheel2Down");
    pub const AREA: Property = Property("Area");
    pub const BUTTON1: Property = Property("Button1");
    pub const BUTTON2: Property = Property("Button2");
    pub const BUTTON3: Property = Property("Button3");
    pub const BUTTON4: Property = Property("Button4");
    pub const BUTTON5: Property = Property("Button5");
    pub const BUTTON6: Property = Property("Button6");
    pub const BUTTON7: Property = Property("Button7");
    pub const BUTTON8: Property = Property("Button8");
    pub const BUTTON9: Property = Property("Button9");
    pub const BUTTON10: Property = Property("Button10");
    pub const BUTTON11: Property = Property("Button11");
    pub const BUTTON12: Property = Property("Button12");
    pub const BUTTON13: Property = Property("Button13");
    pub const BUTTON14: Property = Property("Button14");
    pub const BUTTON15: Property = Property("Button15");
    pub const BUTTON16: Property = Property("Button16");
    pub const BUTTON17: Property = Property("Button17");
    pub const BUTTON18: Property = Property("Button18");
    pub const CURSOR_ACCEL_PROFILE: Property = Property("CursorAccelProfile");
    pub const CURSOR_ACCEL_ADAPTIVE_DECELERATION: Property = Property("CursorAccelAdaptiveDeceleration");
    pub const CURSOR_ACCEL_CONSTANT_DECELERATION: Property = Property("CursorAccelConstantDeceleration");
    pub const CURSOR_ACCEL_VELOCITY_SCALING: Property = Property("CursorAccelVelocityScaling");
    pub const GESTURE: Property = Property("Gesture");
    pub const MAP_TO_OUTPUT: Property = Property("MapToOutput");
    pub const MODE: Property = Property("Mode");
    pub const PRESSURE_CURVE: Property = Property("PressureCurve");
    pub const RAW_SAMPLE: Property = Property("RawSample");
    pub const REL_WHEEL_UP: Property = Property("RelWheelUp");
    pub const REL_WHEEL_DOWN: Property = Property("RelWheelDown");
    pub const RESET_AREA: Property = Property("ResetArea");
    pub const ROTATE: Property = Property("Rotate");
    pub const SCREEN_SPACE: Property = Property("ScreenSpace");
    pub const SCROLL_DISTANCE: Property = Property("ScrollDistance");
    pub const STRIP_LEFT_UP: Property = Property("StripLeftUp");
    pub const STRIP_LEFT_DOWN: Property = Property("StripLeftDown");
    pub const STRIP_RIGHT_UP: Property = Property("StripRightUp");
    pub const STRIP_RIGHT_DOWN: Property = Property("StripRightDown");
    pub const SUPPRESS: Property = Property("Suppress");
    pub const TABLET_PC_BUTTON: Property = Property("TabletPCButton");
    pub const TAP_TIME: Property = Property("TapTime");
    pub const THRESHOLD: Property = Property("Threshold");
    pub const TOUCH: Property = Property("Touch");
    pub const ZOOM_DISTANCE: Property = Property("ZoomDistance");

    const ALL: &'static [Property] = &[
        Self::ABS_WHEEL_UP,
        Self::ABS_WHEEL_DOWN,
        Self::ABS_WHEEL2_UP,
        Self::ABS_WHEEL2_DOWN,
        Self::AREA,
        Self::BUTTON1,
        Self::BUTTON2,
        Self::BUTTON3,
        Self::BUTTON4,
        Self::BUTTON5,
        Self::BUTTON6,
        Self::BUTTON7,
        Self::BUTTON8,
        Self::BUTTON9,
        Self::BUTTON10,
        Self::BUTTON11,
        Self::BUTTON12,
        Self::BUTTON13,
        Self::BUTTON14,
        Self::BUTTON15,
        Self::BUTTON16,
        Self::BUTTON17,
        Self::BUTTON18,
        Self::CURSOR_ACCEL_PROFILE,
        Self::CURSOR_ACCEL_ADAPTIVE_DECELERATION,
        Self::CURSOR_ACCEL_CONSTANT_DECELERATION,
        Self::CURSOR_ACCEL_VELOCITY_SCALING,
        Self::GESTURE,
        Self::MAP_TO_OUTPUT,
        Self::MODE,
        Self::PRESSURE_CURVE,
        Self::RAW_SAMPLE,
        Self::REL_WHEEL_UP,
        Self::REL_WHEEL_DOWN,
        Self::RESET_AREA,
        Self::ROTATE,
        Self::SCREEN_SPACE,
        Self::SCROLL_DISTANCE,
        Self::STRIP_LEFT_UP,
        Self::STRIP_LEFT_DOWN,
        Self::STRIP_RIGHT_UP,
        Self::STRIP_RIGHT_DOWN,
        Self::SUPPRESS,
        Self::TABLET_PC_BUTTON,
        Self::TAP_TIME,
        Self::THRESHOLD,
        Self::TOUCH,
        Self::ZOOM_DISTANCE,
    ];

    pub fn key(&self) -> &'static str {
        self.0
    }

    /// Every known property, in declaration order
    pub fn all() -> &'static [Property] {
        Self::ALL
    }

    /// Case-insensitive lookup by key; unknown keys yield `None`
    pub fn find(key: &str) -> Option<Property> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|property| property.0.eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
