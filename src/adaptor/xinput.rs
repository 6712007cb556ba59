//! Direct device backend over XInput device properties

use anyhow::Result;
use tracing::{debug, warn};

use super::{AdaptorError, PropertyAdaptor};
use crate::property::Property;
use crate::property_map::{ValueShape, XinputProperty};
use crate::types::{join_numbers, parse_floats, parse_integers, Rect, ValueError};

const BACKEND: &str = "xinput";

/// One open input device
pub trait InputDevice {
    fn get_float_property(&self, key: &str, count: usize) -> Result<Vec<f32>>;

    fn get_long_property(&self, key: &str, count: usize) -> Result<Vec<i64>>;

    fn set_float_property(&self, key: &str, values: &[f32]) -> Result<()>;

    fn set_long_property(&self, key: &str, values: &[i64]) -> Result<()>;

    fn set_coordinate_transformation_matrix(
        &self,
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Result<()>;
}

/// Locates input devices by name
pub trait DeviceFinder {
    type Device: InputDevice;

    fn find_device(&self, name: &str) -> Result<Option<Self::Device>>;
}

/// Supplies the geometry of all attached displays
pub trait ScreenGeometry {
    fn screens(&self) -> Result<Vec<Rect>>;
}

/// Scale and offset of the affine map from tablet to virtual desktop
///
/// ```text
/// | scale_x  0        offset_x |
/// | 0        scale_y  offset_y |
/// | 0        0        1        |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CoordinateTransform {
    /// Map the tablet onto `area` (`x y w h` pixels) of `desktop`.
    /// Returns `None` when the desktop has no extent.
    pub fn for_area(area: [i64; 4], desktop: Rect) -> Option<Self> {
        if desktop.width <= 0 || desktop.height <= 0 {
            return None;
        }
        let [x, y, w, h] = area.map(|v| v as f64);
        let desktop_w = desktop.width as f64;
        let desktop_h = desktop.height as f64;

        Some(Self {
            scale_x: (w / desktop_w) as f32,
            scale_y: (h / desktop_h) as f32,
            offset_x: (x / desktop_w) as f32,
            offset_y: (y / desktop_h) as f32,
        })
    }

    /// Recover the transform from a row-major 3x3 matrix
    pub fn from_matrix(matrix: &[f32]) -> Option<Self> {
        match matrix {
            [scale_x, _, offset_x, _, scale_y, offset_y, _, _, _] => Some(Self {
                scale_x: *scale_x,
                scale_y: *scale_y,
                offset_x: *offset_x,
                offset_y: *offset_y,
            }),
            _ => None,
        }
    }

    #[rustfmt::skip]
    pub fn matrix(&self) -> [f32; 9] {
        [
            self.scale_x, 0.0, self.offset_x,
            0.0, self.scale_y, self.offset_y,
            0.0, 0.0, 1.0,
        ]
    }

    /// Inverse of `for_area`, rounded to whole pixels
    pub fn to_area(&self, desktop: Rect) -> [i64; 4] {
        let desktop_w = desktop.width as f64;
        let desktop_h = desktop.height as f64;
        [
            (self.offset_x as f64 * desktop_w).round() as i64,
            (self.offset_y as f64 * desktop_h).round() as i64,
            (self.scale_x as f64 * desktop_w).round() as i64,
            (self.scale_y as f64 * desktop_h).round() as i64,
        ]
    }
}

pub struct XinputAdaptor<D, G> {
    device_name: String,
    device: Option<D>,
    geometry: G,
}

impl<D: InputDevice, G: ScreenGeometry> XinputAdaptor<D, G> {
    /// Bind to `device_name`; the device is looked up immediately and the
    /// adaptor stays unavailable if it can not be found
    pub fn new<F>(device_name: &str, finder: &F, geometry: G) -> Self
    where
        F: DeviceFinder<Device = D>,
    {
        let device = match finder.find_device(device_name) {
            Ok(Some(device)) => Some(device),
            Ok(None) => {
                warn!(device = device_name, "XInput device not found");
                None
            }
            Err(err) => {
                warn!(device = device_name, error = %format!("{err:#}"), "Failed to look up XInput device");
                None
            }
        };

        Self {
            device_name: device_name.to_string(),
            device,
            geometry,
        }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    fn lookup(&self, property: Property) -> Result<(&'static XinputProperty, &D), AdaptorError> {
        let entry = XinputProperty::map(property).ok_or(AdaptorError::Unsupported {
            property,
            backend: BACKEND,
        })?;
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| AdaptorError::DeviceUnavailable {
                device: self.device_name.clone(),
                reason: "no XInput device with this name is attached".to_string(),
            })?;
        Ok((entry, device))
    }

    fn virtual_desktop(&self) -> Result<Rect, AdaptorError> {
        let screens = self
            .geometry
            .screens()
            .map_err(|err| AdaptorError::protocol(&self.device_name, "query display geometry", &err))?;
        let desktop = Rect::bounding(&screens);
        debug!(?desktop, screens = screens.len(), "Computed virtual desktop");
        Ok(desktop)
    }

    fn zero_desktop_error(&self, desktop: Rect) -> AdaptorError {
        AdaptorError::Protocol {
            device: self.device_name.clone(),
            operation: "compute coordinate transformation matrix".to_string(),
            reason: format!("virtual desktop has no extent ({}x{})", desktop.width, desktop.height),
        }
    }

    fn map_tablet_to_screen(&self, device: &D, entry: &XinputProperty, value: &str) -> Result<(), AdaptorError> {
        let area = parse_integers(value, 4)
            .map_err(|err| AdaptorError::conversion(entry.id, value, err))?;
        let area = [area[0], area[1], area[2], area[3]];

        let desktop = self.virtual_desktop()?;
        let transform = CoordinateTransform::for_area(area, desktop)
            .ok_or_else(|| self.zero_desktop_error(desktop))?;

        debug!(
            device = %self.device_name,
            w = transform.scale_x,
            h = transform.scale_y,
            offset_x = transform.offset_x,
            offset_y = transform.offset_y,
            "Applying coordinate transformation matrix"
        );

        device
            .set_coordinate_transformation_matrix(
                transform.offset_x,
                transform.offset_y,
                transform.scale_x,
                transform.scale_y,
            )
            .map_err(|err| AdaptorError::protocol(&self.device_name, format!("set '{}'", entry.key), &err))
    }

    fn read_screen_space(&self, device: &D, entry: &XinputProperty) -> Result<String, AdaptorError> {
        let matrix = device
            .get_float_property(entry.key, crate::constants::x11::MATRIX_SIZE)
            .map_err(|err| AdaptorError::protocol(&self.device_name, format!("get '{}'", entry.key), &err))?;
        let transform = CoordinateTransform::from_matrix(&matrix).ok_or_else(|| AdaptorError::Protocol {
            device: self.device_name.clone(),
            operation: format!("get '{}'", entry.key),
            reason: format!("expected 9 matrix entries, got {}", matrix.len()),
        })?;

        let desktop = self.virtual_desktop()?;
        if desktop.is_empty() {
            return Err(self.zero_desktop_error(desktop));
        }
        Ok(join_numbers(&transform.to_area(desktop)))
    }
}

impl<D: InputDevice, G: ScreenGeometry> PropertyAdaptor for XinputAdaptor<D, G> {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn properties(&self) -> Vec<Property> {
        XinputProperty::ids()
    }

    fn supports_property(&self, property: Property) -> bool {
        XinputProperty::map(property).is_some()
    }

    fn try_get_property(&self, property: Property) -> Result<String, AdaptorError> {
        let (entry, device) = self.lookup(property)?;
        let failed = |err: anyhow::Error| {
            AdaptorError::protocol(&self.device_name, format!("get '{}'", entry.key), &err)
        };

        match entry.shape {
            ValueShape::Float(count) => device
                .get_float_property(entry.key, count)
                .map(|values| join_numbers(&values))
                .map_err(failed),
            ValueShape::Long(count) => device
                .get_long_property(entry.key, count)
                .map(|values| join_numbers(&values))
                .map_err(failed),
            ValueShape::ScreenSpace => self.read_screen_space(device, entry),
        }
    }

    fn try_set_property(&self, property: Property, value: &str) -> Result<(), AdaptorError> {
        let (entry, device) = self.lookup(property)?;
        let failed = |err: anyhow::Error| {
            AdaptorError::protocol(&self.device_name, format!("set '{}'", entry.key), &err)
        };
        let invalid = |err: ValueError| AdaptorError::conversion(property, value, err);

        match entry.shape {
            ValueShape::Float(count) => {
                let values = parse_floats(value, count).map_err(invalid)?;
                device.set_float_property(entry.key, &values).map_err(failed)
            }
            ValueShape::Long(count) => {
                let values = parse_integers(value, count).map_err(invalid)?;
                device.set_long_property(entry.key, &values).map_err(failed)
            }
            ValueShape::ScreenSpace => self.map_tablet_to_screen(device, entry, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        GetFloat(String, usize),
        GetLong(String, usize),
        SetFloat(String, Vec<f32>),
        SetLong(String, Vec<i64>),
        SetMatrix(f32, f32, f32, f32),
    }

    #[derive(Clone, Default)]
    struct MockDevice {
        calls: Rc<RefCell<Vec<Call>>>,
        floats: Vec<f32>,
        longs: Vec<i64>,
        fail: bool,
    }

    impl InputDevice for MockDevice {
        fn get_float_property(&self, key: &str, count: usize) -> Result<Vec<f32>> {
            self.calls.borrow_mut().push(Call::GetFloat(key.to_string(), count));
            if self.fail {
                anyhow::bail!("BadValue");
            }
            Ok(self.floats.clone())
        }

        fn get_long_property(&self, key: &str, count: usize) -> Result<Vec<i64>> {
            self.calls.borrow_mut().push(Call::GetLong(key.to_string(), count));
            if self.fail {
                anyhow::bail!("BadValue");
            }
            Ok(self.longs.clone())
        }

        fn set_float_property(&self, key: &str, values: &[f32]) -> Result<()> {
            self.calls.borrow_mut().push(Call::SetFloat(key.to_string(), values.to_vec()));
            Ok(())
        }

        fn set_long_property(&self, key: &str, values: &[i64]) -> Result<()> {
            self.calls.borrow_mut().push(Call::SetLong(key.to_string(), values.to_vec()));
            Ok(())
        }

        fn set_coordinate_transformation_matrix(
            &self,
            offset_x: f32,
            offset_y: f32,
            width: f32,
            height: f32,
        ) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(Call::SetMatrix(offset_x, offset_y, width, height));
            Ok(())
        }
    }

    struct MockFinder {
        device: Option<MockDevice>,
    }

    impl DeviceFinder for MockFinder {
        type Device = MockDevice;

        fn find_device(&self, _name: &str) -> Result<Option<MockDevice>> {
            Ok(self.device.clone())
        }
    }

    struct FixedScreens(Vec<Rect>);

    impl ScreenGeometry for FixedScreens {
        fn screens(&self) -> Result<Vec<Rect>> {
            Ok(self.0.clone())
        }
    }

    fn dual_head() -> FixedScreens {
        FixedScreens(vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)])
    }

    fn adaptor(device: MockDevice, screens: FixedScreens) -> XinputAdaptor<MockDevice, FixedScreens> {
        XinputAdaptor::new("Wacom Stylus", &MockFinder { device: Some(device) }, screens)
    }

    #[test]
    fn test_unavailable_device_returns_empty() {
        let finder = MockFinder { device: None };
        let adaptor = XinputAdaptor::new("Missing Pen", &finder, dual_head());

        assert!(!adaptor.is_available());
        assert_eq!(adaptor.get_property(Property::CURSOR_ACCEL_PROFILE), "");
        assert!(matches!(
            adaptor.try_get_property(Property::CURSOR_ACCEL_PROFILE),
            Err(AdaptorError::DeviceUnavailable { .. })
        ));
        assert!(!adaptor.set_property(Property::CURSOR_ACCEL_PROFILE, "1"));
    }

    #[test]
    fn test_unsupported_property_skips_device() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        assert!(!adaptor.supports_property(Property::AREA));
        assert!(matches!(
            adaptor.try_get_property(Property::AREA),
            Err(AdaptorError::Unsupported { .. })
        ));
        assert!(matches!(
            adaptor.try_set_property(Property::BUTTON1, "button 1"),
            Err(AdaptorError::Unsupported { .. })
        ));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_get_long_property() {
        let device = MockDevice {
            longs: vec![2],
            ..Default::default()
        };
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        assert_eq!(adaptor.get_property(Property::CURSOR_ACCEL_PROFILE), "2");
        assert_eq!(
            calls.borrow().as_slice(),
            &[Call::GetLong("Device Accel Profile".to_string(), 1)]
        );
    }

    #[test]
    fn test_get_float_property() {
        let device = MockDevice {
            floats: vec![1.5],
            ..Default::default()
        };
        let adaptor = adaptor(device, dual_head());

        assert_eq!(
            adaptor.get_property(Property::CURSOR_ACCEL_VELOCITY_SCALING),
            "1.5"
        );
    }

    #[test]
    fn test_get_failure_is_protocol_error() {
        let device = MockDevice {
            fail: true,
            ..Default::default()
        };
        let adaptor = adaptor(device, dual_head());

        assert!(matches!(
            adaptor.try_get_property(Property::CURSOR_ACCEL_ADAPTIVE_DECELERATION),
            Err(AdaptorError::Protocol { .. })
        ));
        assert_eq!(adaptor.get_property(Property::CURSOR_ACCEL_ADAPTIVE_DECELERATION), "");
    }

    #[test]
    fn test_set_float_and_long() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        assert!(adaptor.set_property(Property::CURSOR_ACCEL_CONSTANT_DECELERATION, "2.5"));
        assert!(adaptor.set_property(Property::CURSOR_ACCEL_PROFILE, "-1"));
        assert_eq!(
            calls.borrow().as_slice(),
            &[
                Call::SetFloat("Device Accel Constant Deceleration".to_string(), vec![2.5]),
                Call::SetLong("Device Accel Profile".to_string(), vec![-1]),
            ]
        );
    }

    #[test]
    fn test_set_rejects_malformed_number() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        assert!(matches!(
            adaptor.try_set_property(Property::CURSOR_ACCEL_PROFILE, "fast"),
            Err(AdaptorError::Conversion { .. })
        ));
        assert!(matches!(
            adaptor.try_set_property(Property::CURSOR_ACCEL_VELOCITY_SCALING, "1 2"),
            Err(AdaptorError::Conversion { .. })
        ));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_screen_space_sets_matrix() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        assert!(adaptor.set_property(Property::SCREEN_SPACE, "1920 0 1920 1080"));
        assert_eq!(calls.borrow().as_slice(), &[Call::SetMatrix(0.5, 0.0, 0.5, 1.0)]);
    }

    #[test]
    fn test_screen_space_rejects_bad_area() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, dual_head());

        for value in ["", "0 0 1920", "0 0 1920 1080 1", "0 0 wide 1080"] {
            assert!(matches!(
                adaptor.try_set_property(Property::SCREEN_SPACE, value),
                Err(AdaptorError::Conversion { .. })
            ));
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_screen_space_zero_desktop_fails() {
        let device = MockDevice::default();
        let calls = device.calls.clone();
        let adaptor = adaptor(device, FixedScreens(Vec::new()));

        assert!(matches!(
            adaptor.try_set_property(Property::SCREEN_SPACE, "0 0 100 100"),
            Err(AdaptorError::Protocol { .. })
        ));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_screen_space_reads_back_area() {
        let device = MockDevice {
            floats: vec![0.5, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            ..Default::default()
        };
        let adaptor = adaptor(device, dual_head());

        assert_eq!(adaptor.get_property(Property::SCREEN_SPACE), "1920 0 1920 1080");
    }

    #[test]
    fn test_transform_matrix_layout() {
        let desktop = Rect::new(0, 0, 4000, 2000);
        let transform = CoordinateTransform::for_area([1000, 500, 2000, 1000], desktop).unwrap();
        assert_eq!(transform.matrix(), [0.5, 0.0, 0.25, 0.0, 0.5, 0.25, 0.0, 0.0, 1.0]);
        assert_eq!(CoordinateTransform::from_matrix(&transform.matrix()), Some(transform));
        assert_eq!(transform.to_area(desktop), [1000, 500, 2000, 1000]);
    }

    #[test]
    fn test_transform_zero_desktop() {
        assert_eq!(CoordinateTransform::for_area([0, 0, 10, 10], Rect::new(0, 0, 0, 1080)), None);
        assert_eq!(CoordinateTransform::for_area([0, 0, 10, 10], Rect::new(0, 0, 1920, 0)), None);
        assert_eq!(CoordinateTransform::from_matrix(&[1.0, 0.0]), None);
    }
}
