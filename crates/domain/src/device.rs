//! Device — a simulated smart-home appliance with identity and on/off status.
//!
//! Three variants exist: [`Light`], [`Thermostat`] and [`Camera`]. They share
//! the [`Switchable`] capability set and are stored in the registry wrapped in
//! the [`Device`] enum, which also produces a structured [`DeviceReport`] so
//! callers never need to inspect the concrete type to render it.

mod camera;
mod light;
mod report;
mod thermostat;

pub use camera::{Camera, SecurityStatus};
pub use light::{Light, MAX_BRIGHTNESS, RampDirection, RampStep};
pub use report::DeviceReport;
pub use thermostat::Thermostat;

use chrono::{DateTime, Utc};

use crate::id::{DeviceId, DeviceKey, DeviceKind};

/// UTC timestamp of the last on/off transition.
pub type Timestamp = DateTime<Utc>;

/// Identity and on/off lifecycle shared by every device variant.
///
/// `turn_on` / `turn_off` are no-ops when the device is already in the
/// requested state; both return the resulting status.
pub trait Switchable {
    fn id(&self) -> &DeviceId;

    /// Replace the identifier without any validation.
    fn set_id(&mut self, id: DeviceId) -> &DeviceId;

    fn is_on(&self) -> bool;

    fn set_status(&mut self, on: bool) -> bool;

    fn turn_on(&mut self) -> bool;

    fn turn_off(&mut self) -> bool;

    fn last_changed(&self) -> Timestamp;
}

/// On/off flag plus the time it last flipped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Power {
    on: bool,
    last_changed: Timestamp,
}

impl Power {
    pub(crate) fn new(on: bool) -> Self {
        Self {
            on,
            last_changed: Utc::now(),
        }
    }

    pub(crate) fn is_on(&self) -> bool {
        self.on
    }

    pub(crate) fn last_changed(&self) -> Timestamp {
        self.last_changed
    }

    /// Set the flag, touching `last_changed` only on an actual transition.
    pub(crate) fn set(&mut self, on: bool) -> bool {
        if self.on != on {
            self.on = on;
            self.last_changed = Utc::now();
        }
        self.on
    }
}

/// Tagged wrapper over the concrete device variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Light(Light),
    Thermostat(Thermostat),
    Camera(Camera),
}

impl Device {
    /// Build a device of `kind` in its initial state (off, zero readings).
    #[must_use]
    pub fn with_defaults(kind: DeviceKind, id: impl Into<DeviceId>) -> Self {
        match kind {
            DeviceKind::Light => Self::Light(Light::new(id)),
            DeviceKind::Thermostat => Self::Thermostat(Thermostat::new(id)),
            DeviceKind::Camera => Self::Camera(Camera::new(id)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::Thermostat(_) => DeviceKind::Thermostat,
            Self::Camera(_) => DeviceKind::Camera,
        }
    }

    /// The composite `(kind, id)` key of this device.
    #[must_use]
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.kind(), self.id().clone())
    }

    /// Whether this device is the one addressed by `key`.
    #[must_use]
    pub fn matches(&self, key: &DeviceKey) -> bool {
        self.kind() == key.kind && self.id() == &key.id
    }

    /// Snapshot the variant-specific state for rendering.
    #[must_use]
    pub fn report(&self) -> DeviceReport {
        match self {
            Self::Light(light) => DeviceReport::Light {
                id: light.id().clone(),
                on: light.is_on(),
                brightness: light.brightness(),
                ramp: light.ramp(),
                last_changed: light.last_changed(),
            },
            Self::Thermostat(thermostat) => DeviceReport::Thermostat {
                id: thermostat.id().clone(),
                on: thermostat.is_on(),
                temperature: thermostat.temperature(),
                last_changed: thermostat.last_changed(),
            },
            Self::Camera(camera) => DeviceReport::Camera {
                id: camera.id().clone(),
                on: camera.is_on(),
                security_status: camera
                    .is_on()
                    .then(|| camera.security_status().clone()),
                last_changed: camera.last_changed(),
            },
        }
    }

    #[must_use]
    pub fn as_light(&self) -> Option<&Light> {
        match self {
            Self::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match self {
            Self::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_thermostat_mut(&mut self) -> Option<&mut Thermostat> {
        match self {
            Self::Thermostat(thermostat) => Some(thermostat),
            _ => None,
        }
    }

    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        match self {
            Self::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Switchable {
        match self {
            Self::Light(d) => d,
            Self::Thermostat(d) => d,
            Self::Camera(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Switchable {
        match self {
            Self::Light(d) => d,
            Self::Thermostat(d) => d,
            Self::Camera(d) => d,
        }
    }
}

impl Switchable for Device {
    fn id(&self) -> &DeviceId {
        self.inner().id()
    }

    fn set_id(&mut self, id: DeviceId) -> &DeviceId {
        self.inner_mut().set_id(id)
    }

    fn is_on(&self) -> bool {
        self.inner().is_on()
    }

    fn set_status(&mut self, on: bool) -> bool {
        self.inner_mut().set_status(on)
    }

    fn turn_on(&mut self) -> bool {
        self.inner_mut().turn_on()
    }

    fn turn_off(&mut self) -> bool {
        self.inner_mut().turn_off()
    }

    fn last_changed(&self) -> Timestamp {
        self.inner().last_changed()
    }
}

impl From<Light> for Device {
    fn from(light: Light) -> Self {
        Self::Light(light)
    }
}

impl From<Thermostat> for Device {
    fn from(thermostat: Thermostat) -> Self {
        Self::Thermostat(thermostat)
    }
}

impl From<Camera> for Device {
    fn from(camera: Camera) -> Self {
        Self::Camera(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_off_device_for_every_kind() {
        for kind in DeviceKind::ALL {
            let device = Device::with_defaults(kind, "X1");
            assert_eq!(device.kind(), kind);
            assert!(!device.is_on());
            assert_eq!(device.id().as_str(), "X1");
        }
    }

    #[test]
    fn should_converge_to_last_call_regardless_of_start_state() {
        for kind in DeviceKind::ALL {
            for start_on in [false, true] {
                let mut device = Device::with_defaults(kind, "D");
                device.set_status(start_on);

                device.turn_on();
                device.turn_off();
                assert!(!device.is_on(), "{kind} starting {start_on}");

                device.turn_off();
                device.turn_on();
                assert!(device.is_on(), "{kind} starting {start_on}");
            }
        }
    }

    #[test]
    fn should_return_resulting_status_from_toggles() {
        let mut device = Device::with_defaults(DeviceKind::Thermostat, "T1");
        assert!(device.turn_on());
        assert!(device.turn_on());
        assert!(!device.turn_off());
    }

    #[test]
    fn should_accept_any_id_through_set_id() {
        let mut device = Device::with_defaults(DeviceKind::Camera, "C1");
        assert_eq!(device.set_id(DeviceId::new("")).as_str(), "");
        assert_eq!(device.key(), DeviceKey::new(DeviceKind::Camera, ""));
    }

    #[test]
    fn should_match_only_same_kind_and_id() {
        let device = Device::with_defaults(DeviceKind::Light, "A");
        assert!(device.matches(&DeviceKey::new(DeviceKind::Light, "A")));
        assert!(!device.matches(&DeviceKey::new(DeviceKind::Camera, "A")));
        assert!(!device.matches(&DeviceKey::new(DeviceKind::Light, "B")));
    }

    #[test]
    fn should_hide_security_status_in_report_when_camera_off() {
        let mut camera = Camera::new("C1").with_status(true);
        camera.set_security_status(SecurityStatus::Unsafe);
        let mut device = Device::from(camera);

        let DeviceReport::Camera {
            security_status, ..
        } = device.report()
        else {
            panic!("expected camera report");
        };
        assert_eq!(security_status, Some(SecurityStatus::Unsafe));

        device.turn_off();
        let DeviceReport::Camera {
            security_status, ..
        } = device.report()
        else {
            panic!("expected camera report");
        };
        assert_eq!(security_status, None);
        assert_eq!(
            device.as_camera_mut().map(|c| c.security_status().clone()),
            Some(SecurityStatus::Unsafe)
        );
    }

    #[test]
    fn should_expose_typed_views_only_for_matching_variant() {
        let mut device = Device::from(Thermostat::new("T1"));
        assert!(device.as_light().is_none());
        assert!(device.as_camera_mut().is_none());
        assert!(device.as_thermostat_mut().is_some());
    }

    #[test]
    fn should_touch_last_changed_only_on_transition() {
        let mut power = Power::new(false);
        let before = power.last_changed();
        assert!(!power.set(false));
        assert_eq!(power.last_changed(), before);
        assert!(power.set(true));
        assert!(power.last_changed() >= before);
    }
}
