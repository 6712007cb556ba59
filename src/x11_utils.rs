use std::rc::Rc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as RandrExt;
use x11rb::protocol::xinput::{self, ConnectionExt as XinputExt};
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt as XprotoExt, PropMode, Window};
use x11rb::rust_connection::RustConnection;

use crate::adaptor::xinput::{CoordinateTransform, DeviceFinder, InputDevice, ScreenGeometry};
use crate::constants::x11;
use crate::types::Rect;

/// XI2 device id matching every device
const XI_ALL_DEVICES: u16 = 0;

/// Pre-cached X11 atoms to avoid repeated roundtrips
#[derive(Debug, Clone, Copy)]
pub struct CachedAtoms {
    pub float: Atom,
    pub coordinate_transformation_matrix: Atom,
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            float: intern(conn, x11::FLOAT_TYPE, false)?,
            coordinate_transformation_matrix: intern(conn, x11::COORDINATE_TRANSFORMATION_MATRIX, false)?,
        })
    }
}

fn intern(conn: &RustConnection, name: &str, only_if_exists: bool) -> Result<Atom> {
    Ok(conn
        .intern_atom(only_if_exists, name.as_bytes())
        .with_context(|| format!("Failed to intern {name} atom"))?
        .reply()
        .with_context(|| format!("Failed to get reply for {name} atom"))?
        .atom)
}

/// XInput session shared by device handles and the geometry query
#[derive(Clone)]
pub struct X11Input {
    conn: Rc<RustConnection>,
    root: Window,
    root_size: Rect,
    atoms: CachedAtoms,
}

impl X11Input {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11 display")?;
        let screen = conn
            .setup()
            .roots
            .get(screen_num)
            .context("X11 server reported no screen for the default display")?;
        let root = screen.root;
        let root_size = Rect::new(0, 0, screen.width_in_pixels.into(), screen.height_in_pixels.into());

        let version = conn
            .xinput_xi_query_version(x11::XI_MAJOR, x11::XI_MINOR)
            .context("XInput extension is not available")?
            .reply()
            .context("Failed to query XInput version")?;
        info!(
            major = version.major_version,
            minor = version.minor_version,
            "successfully connected to x11: screen={screen_num}"
        );

        let atoms = CachedAtoms::new(&conn)?;

        Ok(Self {
            conn: Rc::new(conn),
            root,
            root_size,
            atoms,
        })
    }

    fn query_devices(&self) -> Result<Vec<xinput::XIDeviceInfo>> {
        Ok(self
            .conn
            .xinput_xi_query_device(XI_ALL_DEVICES)
            .context("Failed to query XInput devices")?
            .reply()
            .context("Failed to get reply for XInput device query")?
            .infos)
    }

    /// Names of all XInput devices, in server order
    pub fn device_names(&self) -> Result<Vec<String>> {
        Ok(self
            .query_devices()?
            .iter()
            .map(|info| String::from_utf8_lossy(&info.name).into_owned())
            .collect())
    }

    fn monitors(&self) -> Result<Vec<Rect>> {
        self.conn
            .randr_query_version(x11::RANDR_MAJOR, x11::RANDR_MINOR)
            .context("RandR extension is not available")?
            .reply()
            .context("Failed to get reply for RandR version query")?;

        let monitors = self
            .conn
            .randr_get_monitors(self.root, true)
            .context("Failed to query RandR monitors")?
            .reply()
            .context("Failed to get reply for RandR monitor query")?
            .monitors;

        Ok(monitors
            .iter()
            .map(|m| Rect::new(m.x.into(), m.y.into(), m.width.into(), m.height.into()))
            .collect())
    }
}

impl DeviceFinder for X11Input {
    type Device = X11InputDevice;

    fn find_device(&self, name: &str) -> Result<Option<X11InputDevice>> {
        let device = self
            .query_devices()?
            .into_iter()
            .find(|info| info.name == name.as_bytes())
            .map(|info| {
                debug!(device = name, id = info.deviceid, "Found XInput device");
                X11InputDevice {
                    conn: Rc::clone(&self.conn),
                    id: info.deviceid,
                    atoms: self.atoms,
                }
            });
        Ok(device)
    }
}

impl ScreenGeometry for X11Input {
    fn screens(&self) -> Result<Vec<Rect>> {
        match self.monitors() {
            Ok(monitors) if !monitors.is_empty() => Ok(monitors),
            Ok(_) => {
                debug!(root = ?self.root_size, "No RandR monitors reported, using root window size");
                Ok(vec![self.root_size])
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "RandR monitor query failed, using root window size");
                Ok(vec![self.root_size])
            }
        }
    }
}

/// Open handle on one XInput device
pub struct X11InputDevice {
    conn: Rc<RustConnection>,
    id: u16,
    atoms: CachedAtoms,
}

impl X11InputDevice {
    fn property_atom(&self, key: &str) -> Result<Atom> {
        let atom = intern(&self.conn, key, true)?;
        if atom == x11rb::NONE {
            bail!("device property '{key}' does not exist");
        }
        Ok(atom)
    }

    fn read(&self, key: &str, count: usize) -> Result<(Atom, Atom, xinput::XIGetPropertyItems)> {
        let property = self.property_atom(key)?;
        let reply = self
            .conn
            .xinput_xi_get_property(self.id, false, property, Atom::from(AtomEnum::ANY), 0, count as u32)
            .with_context(|| format!("Failed to request property '{key}'"))?
            .reply()
            .with_context(|| format!("Failed to read property '{key}' from device {}", self.id))?;

        if reply.type_ == x11rb::NONE {
            bail!("device {} has no property '{key}'", self.id);
        }
        Ok((property, reply.type_, reply.items))
    }

    fn write(&self, property: Atom, type_: Atom, num_items: usize, items: &xinput::XIChangePropertyAux) -> Result<()> {
        self.conn
            .xinput_xi_change_property(self.id, PropMode::REPLACE, property, type_, num_items as u32, items)
            .context("Failed to send XIChangeProperty")?
            .check()
            .with_context(|| format!("Device {} rejected property change", self.id))?;
        Ok(())
    }
}

impl InputDevice for X11InputDevice {
    fn get_float_property(&self, key: &str, count: usize) -> Result<Vec<f32>> {
        let (_, type_, items) = self.read(key, count)?;
        if type_ != self.atoms.float {
            bail!("property '{key}' is not of type FLOAT");
        }
        match items {
            xinput::XIGetPropertyItems::Data32(values) => {
                Ok(values.into_iter().take(count).map(f32::from_bits).collect())
            }
            _ => bail!("property '{key}' does not use 32 bit items"),
        }
    }

    fn get_long_property(&self, key: &str, count: usize) -> Result<Vec<i64>> {
        let (_, _, items) = self.read(key, count)?;
        let values: Vec<i64> = match items {
            xinput::XIGetPropertyItems::Data8(values) => values.into_iter().map(|v| v as i8 as i64).collect(),
            xinput::XIGetPropertyItems::Data16(values) => values.into_iter().map(|v| v as i16 as i64).collect(),
            xinput::XIGetPropertyItems::Data32(values) => values.into_iter().map(|v| v as i32 as i64).collect(),
            _ => bail!("property '{key}' has an unknown item format"),
        };
        Ok(values.into_iter().take(count).collect())
    }

    fn set_float_property(&self, key: &str, values: &[f32]) -> Result<()> {
        let property = self.property_atom(key)?;
        let items = xinput::XIChangePropertyAux::Data32(values.iter().map(|v| v.to_bits()).collect());
        self.write(property, self.atoms.float, values.len(), &items)
    }

    fn set_long_property(&self, key: &str, values: &[i64]) -> Result<()> {
        // Keep the format the driver declared for this property
        let (property, type_, current) = self.read(key, values.len())?;
        let out_of_range = |v: &i64| anyhow::anyhow!("value {v} does not fit property '{key}'");

        let items = match current {
            xinput::XIGetPropertyItems::Data8(_) => xinput::XIChangePropertyAux::Data8(
                values
                    .iter()
                    .map(|v| i8::try_from(*v).map(|v| v as u8).map_err(|_| out_of_range(v)))
                    .collect::<Result<_>>()?,
            ),
            xinput::XIGetPropertyItems::Data16(_) => xinput::XIChangePropertyAux::Data16(
                values
                    .iter()
                    .map(|v| i16::try_from(*v).map(|v| v as u16).map_err(|_| out_of_range(v)))
                    .collect::<Result<_>>()?,
            ),
            xinput::XIGetPropertyItems::Data32(_) => xinput::XIChangePropertyAux::Data32(
                values
                    .iter()
                    .map(|v| i32::try_from(*v).map(|v| v as u32).map_err(|_| out_of_range(v)))
                    .collect::<Result<_>>()?,
            ),
            _ => bail!("property '{key}' has an unknown item format"),
        };
        self.write(property, type_, values.len(), &items)
    }

    fn set_coordinate_transformation_matrix(
        &self,
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let matrix = CoordinateTransform {
            scale_x: width,
            scale_y: height,
            offset_x,
            offset_y,
        }
        .matrix();
        let items = xinput::XIChangePropertyAux::Data32(matrix.iter().map(|v| v.to_bits()).collect());
        self.write(
            self.atoms.coordinate_transformation_matrix,
            self.atoms.float,
            matrix.len(),
            &items,
        )
    }
}
