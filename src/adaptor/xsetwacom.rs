//! External tool backend driving `xsetwacom`

use std::collections::HashMap;

use tracing::{debug, warn};

use super::{AdaptorError, PropertyAdaptor};
use crate::command::ToolRunner;
use crate::constants::xsetwacom::{BUTTON, GET, SET};
use crate::property::Property;
use crate::property_map::XsetwacomProperty;
use crate::types::{ButtonShortcut, ScreenRotation, TabletArea, ValueError};

const BACKEND: &str = "xsetwacom";

/// Button number of a `Button <N>` parameter (case-insensitive, optional space)
fn button_number(param: &str) -> Option<&str> {
    let prefix = param.get(..BUTTON.len())?;
    if !prefix.eq_ignore_ascii_case(BUTTON) {
        return None;
    }
    let number = param[BUTTON.len()..].trim_start();
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        Some(number)
    } else {
        None
    }
}

/// Split `Button <digits>` into two tokens; xsetwacom rejects it as one argument
fn parameter_tokens(param: &str) -> Vec<String> {
    if let Some(number) = param.strip_prefix("Button ") {
        if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
            return vec![BUTTON.to_string(), number.to_string()];
        }
    }
    vec![param.to_string()]
}

pub struct XsetwacomAdaptor<R> {
    device: String,
    button_map: HashMap<String, String>,
    runner: R,
    check_exit_status: bool,
}

impl<R: ToolRunner> XsetwacomAdaptor<R> {
    pub fn new(device: &str, runner: R) -> Self {
        Self::with_button_map(device, HashMap::new(), runner)
    }

    /// `button_map` translates hardware button numbers to X11 button numbers
    pub fn with_button_map(device: &str, button_map: HashMap<String, String>, runner: R) -> Self {
        Self {
            device: device.to_string(),
            button_map,
            runner,
            check_exit_status: false,
        }
    }

    /// Also treat a non-zero exit status as failure
    pub fn check_exit_status(mut self, enabled: bool) -> Self {
        self.check_exit_status = enabled;
        self
    }

    fn lookup(&self, property: Property) -> Result<&'static XsetwacomProperty, AdaptorError> {
        XsetwacomProperty::map(property).ok_or(AdaptorError::Unsupported {
            property,
            backend: BACKEND,
        })
    }

    /// Translate tablet button numbers in the parameter name to X11 button numbers
    pub fn convert_parameter(&self, param: &XsetwacomProperty) -> String {
        let Some(hw_button) = button_number(param.key) else {
            return param.key.to_string();
        };

        let x11_button = self
            .button_map
            .get(hw_button)
            .filter(|mapped| !mapped.is_empty())
            .map(String::as_str)
            .unwrap_or(hw_button);

        debug!(hw_button, x11_button, "Mapping tablet button to X11 button");
        format!("{BUTTON} {x11_button}")
    }

    fn command_args(&self, verb: &str, param: &str, value: &str) -> Vec<String> {
        let mut args = vec![verb.to_string(), self.device.clone()];
        args.extend(parameter_tokens(param));
        if !value.is_empty() {
            args.push(value.to_string());
        }
        args
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.runner.program(), args.join(" "))
    }

    fn get_parameter(&self, param: &str) -> Result<String, AdaptorError> {
        let args = self.command_args(GET, param, "");
        let output = self.runner.run(&args)?;
        let value = output.stdout.replace('\n', "");

        if self.check_exit_status && !output.success {
            return Err(AdaptorError::Execution {
                command: self.describe(&args),
                reason: format!("non-zero exit status: {}", output.stderr.trim()),
            });
        }
        if !output.stderr.trim().is_empty() {
            if value.is_empty() {
                return Err(AdaptorError::Execution {
                    command: self.describe(&args),
                    reason: output.stderr.trim().to_string(),
                });
            }
            warn!(device = %self.device, param, stderr = %output.stderr.trim(), "xsetwacom reported warnings");
        }

        Ok(value)
    }

    fn set_parameter(&self, param: &str, value: &str) -> Result<(), AdaptorError> {
        let args = self.command_args(SET, param, value);
        let output = self.runner.run(&args)?;

        if !output.stderr.is_empty() {
            return Err(AdaptorError::Execution {
                command: self.describe(&args),
                reason: output.stderr.trim().to_string(),
            });
        }
        if !output.success {
            if self.check_exit_status {
                return Err(AdaptorError::Execution {
                    command: self.describe(&args),
                    reason: "non-zero exit status".to_string(),
                });
            }
            debug!(device = %self.device, param, "xsetwacom exited with non-zero status but printed no error");
        }

        Ok(())
    }

    fn convert_button_shortcut(param: &XsetwacomProperty, value: &str) -> Result<String, ValueError> {
        if button_number(param.key).is_some() {
            value.parse::<ButtonShortcut>().map(|shortcut| shortcut.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    fn set_area(&self, value: &str) -> Result<(), AdaptorError> {
        let area: TabletArea = value
            .parse()
            .map_err(|err| AdaptorError::conversion(Property::AREA, value, err))?;

        if area.is_empty() {
            return self.set_parameter(XsetwacomProperty::RESET_AREA.key, "");
        }

        self.set_parameter(XsetwacomProperty::AREA.key, &area.to_string())
    }

    fn set_rotation(&self, value: &str) -> Result<(), AdaptorError> {
        let rotation = if value.trim().is_empty() {
            ScreenRotation::None
        } else {
            ScreenRotation::find(value).ok_or_else(|| {
                AdaptorError::conversion(
                    Property::ROTATE,
                    value,
                    ValueError::UnknownRotation(value.to_string()),
                )
            })?
        };

        // Auto modes follow the screen and are not a rotation the device accepts
        if !rotation.is_concrete() {
            return Err(AdaptorError::conversion(
                Property::ROTATE,
                value,
                ValueError::UnknownRotation(rotation.key().to_string()),
            ));
        }

        self.set_parameter(XsetwacomProperty::ROTATE.key, rotation.key())
    }
}

impl<R: ToolRunner> PropertyAdaptor for XsetwacomAdaptor<R> {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn device_name(&self) -> &str {
        &self.device
    }

    fn properties(&self) -> Vec<Property> {
        XsetwacomProperty::ids()
    }

    fn supports_property(&self, property: Property) -> bool {
        XsetwacomProperty::map(property).is_some()
    }

    fn try_get_property(&self, property: Property) -> Result<String, AdaptorError> {
        let param = self.lookup(property)?;
        let converted = self.convert_parameter(param);
        let raw = self.get_parameter(&converted)?;

        let value = Self::convert_button_shortcut(param, &raw).unwrap_or_else(|err| {
            warn!(device = %self.device, property = %property, value = %raw, error = %err, "Keeping unrecognized button value");
            raw.clone()
        });

        debug!(device = %self.device, property = %property, value = %value, "Read property from xsetwacom");
        Ok(value)
    }

    fn try_set_property(&self, property: Property, value: &str) -> Result<(), AdaptorError> {
        let param = self.lookup(property)?;
        debug!(device = %self.device, property = %property, value, "Setting property with xsetwacom");

        if property == Property::AREA {
            return self.set_area(value);
        }
        if property == Property::ROTATE {
            return self.set_rotation(value);
        }

        let converted_param = self.convert_parameter(param);
        let converted_value = Self::convert_button_shortcut(param, value)
            .map_err(|err| AdaptorError::conversion(property, value, err))?;

        self.set_parameter(&converted_param, &converted_value)
    }
}
