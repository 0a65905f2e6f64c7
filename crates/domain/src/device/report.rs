//! Structured per-device status snapshot.

use std::fmt;

use serde::Serialize;

use super::{RampDirection, SecurityStatus, Timestamp};
use crate::id::{DeviceId, DeviceKind};

/// Variant-specific state of one device, ready to render.
///
/// The camera's `security_status` is `None` while the camera is off: the
/// stored value is stale and must not be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceReport {
    Light {
        id: DeviceId,
        on: bool,
        brightness: u8,
        ramp: Option<RampDirection>,
        last_changed: Timestamp,
    },
    Thermostat {
        id: DeviceId,
        on: bool,
        temperature: f64,
        last_changed: Timestamp,
    },
    Camera {
        id: DeviceId,
        on: bool,
        security_status: Option<SecurityStatus>,
        last_changed: Timestamp,
    },
}

impl DeviceReport {
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Light { .. } => DeviceKind::Light,
            Self::Thermostat { .. } => DeviceKind::Thermostat,
            Self::Camera { .. } => DeviceKind::Camera,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        match self {
            Self::Light { id, .. } | Self::Thermostat { id, .. } | Self::Camera { id, .. } => id,
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        match self {
            Self::Light { on, .. } | Self::Thermostat { on, .. } | Self::Camera { on, .. } => *on,
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} ",
            self.kind().display_name(),
            self.id(),
            on_off(self.is_on())
        )?;
        match self {
            Self::Light {
                brightness, ramp, ..
            } => match ramp {
                Some(RampDirection::Up) => write!(f, "(Brightness: {brightness}, ramping up)"),
                Some(RampDirection::Down) => write!(f, "(Brightness: {brightness}, ramping down)"),
                None => write!(f, "(Brightness: {brightness})"),
            },
            Self::Thermostat { temperature, .. } => {
                write!(f, "(Temperature: {temperature}\u{2103})")
            }
            Self::Camera {
                security_status, ..
            } => match security_status {
                Some(status) => write!(f, "(Security Status: {status})"),
                None => f.write_str(
                    "(Security Status: unable to get the security status, the camera is OFF)",
                ),
            },
        }
    }
}
