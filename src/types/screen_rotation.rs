use std::fmt;

/// Tablet rotation as understood by xsetwacom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenRotation {
    None,
    Cw,
    Ccw,
    Half,
    /// Follow the screen rotation
    Auto,
    /// Follow the screen rotation, inverted
    AutoInverted,
}

impl ScreenRotation {
    const ALL: [ScreenRotation; 6] = [
        ScreenRotation::None,
        ScreenRotation::Cw,
        ScreenRotation::Ccw,
        ScreenRotation::Half,
        ScreenRotation::Auto,
        ScreenRotation::AutoInverted,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScreenRotation::None => "none",
            ScreenRotation::Cw => "cw",
            ScreenRotation::Ccw => "ccw",
            ScreenRotation::Half => "half",
            ScreenRotation::Auto => "auto",
            ScreenRotation::AutoInverted => "auto-inverted",
        }
    }

    /// Case-insensitive lookup; unknown keys yield `None`
    pub fn find(key: &str) -> Option<ScreenRotation> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|rotation| rotation.key().eq_ignore_ascii_case(key))
    }

    /// True for rotations a device can be set to directly
    pub fn is_concrete(&self) -> bool {
        matches!(
            self,
            ScreenRotation::None | ScreenRotation::Cw | ScreenRotation::Ccw | ScreenRotation::Half
        )
    }
}

impl fmt::Display for ScreenRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
