//! Static per-backend property tables
//!
//! Each backend declares the properties it supports together with its native
//! parameter name. Tables are compile-time constants and never change.

pub mod xinput;
pub mod xsetwacom;

pub use xinput::{ValueShape, XinputProperty};
pub use xsetwacom::XsetwacomProperty;
