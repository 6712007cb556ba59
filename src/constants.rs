//! Application-wide constants
//!
//! Tool names, XInput property names and configuration defaults used
//! throughout the application.

/// xsetwacom tool invocation
pub mod xsetwacom {
    /// Default program name, resolved through PATH
    pub const PROGRAM: &str = "xsetwacom";

    /// Sub-command reading a parameter
    pub const GET: &str = "get";

    /// Sub-command writing a parameter
    pub const SET: &str = "set";

    /// Parameter name prefix for button parameters
    pub const BUTTON: &str = "Button";
}

/// Subprocess wait bounds
pub mod command {
    /// Default time a tool invocation may take before it is killed
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

    /// Lower bound accepted from configuration
    pub const MIN_TIMEOUT_MS: u64 = 100;

    /// Upper bound accepted from configuration
    pub const MAX_TIMEOUT_MS: u64 = 60_000;

    /// Interval between `try_wait` polls
    pub const POLL_INTERVAL_MS: u64 = 5;
}

/// XInput protocol constants
pub mod x11 {
    /// XInput major version required for XI2 device properties
    pub const XI_MAJOR: u16 = 2;

    /// XInput minor version requested
    pub const XI_MINOR: u16 = 2;

    /// RandR major version required for monitor queries
    pub const RANDR_MAJOR: u32 = 1;

    /// RandR minor version required for monitor queries
    pub const RANDR_MINOR: u32 = 5;

    /// Atom name of the float property type
    pub const FLOAT_TYPE: &str = "FLOAT";

    /// Property holding the 3x3 input transformation
    pub const COORDINATE_TRANSFORMATION_MATRIX: &str = "Coordinate Transformation Matrix";

    /// Number of entries in the transformation matrix
    pub const MATRIX_SIZE: usize = 9;
}

/// Configuration file location
pub mod config {
    /// Application config directory name (under ~/.config/)
    pub const APP_DIR: &str = "tabletprops";

    /// Config filename
    pub const FILENAME: &str = "config.toml";

    /// Default log level when neither LOG_LEVEL nor the config file set one
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
