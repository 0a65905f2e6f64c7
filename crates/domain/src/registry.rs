//! Registry — the ordered, in-memory collection of all active devices.
//!
//! Insertion order is preserved. The registry enforces no uniqueness; callers
//! that need it check [`Registry::contains_key`] before [`Registry::add`].

use crate::device::{Camera, Device, DeviceReport, Light, RampStep, Switchable, Thermostat};
use crate::id::{DeviceId, DeviceKey};

#[derive(Debug, Default, Clone)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a device.
    pub fn add(&mut self, device: impl Into<Device>) {
        self.devices.push(device.into());
    }

    /// The live device sequence, in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Remove the earliest inserted device whose id is `id`, whatever its kind.
    ///
    /// Returns `None` and leaves the registry untouched when nothing matches.
    pub fn remove(&mut self, id: &DeviceId) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.id() == id)?;
        Some(self.devices.remove(index))
    }

    /// Remove the device addressed by `(kind, id)`.
    pub fn remove_key(&mut self, key: &DeviceKey) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.matches(key))?;
        Some(self.devices.remove(index))
    }

    #[must_use]
    pub fn contains_key(&self, key: &DeviceKey) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &DeviceKey) -> Option<&Device> {
        self.devices.iter().find(|d| d.matches(key))
    }

    pub fn get_mut(&mut self, key: &DeviceKey) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.matches(key))
    }

    pub fn light_mut(&mut self, id: &DeviceId) -> Option<&mut Light> {
        self.devices
            .iter_mut()
            .filter_map(Device::as_light_mut)
            .find(|l| l.id() == id)
    }

    pub fn thermostat_mut(&mut self, id: &DeviceId) -> Option<&mut Thermostat> {
        self.devices
            .iter_mut()
            .filter_map(Device::as_thermostat_mut)
            .find(|t| t.id() == id)
    }

    pub fn camera_mut(&mut self, id: &DeviceId) -> Option<&mut Camera> {
        self.devices
            .iter_mut()
            .filter_map(Device::as_camera_mut)
            .find(|c| c.id() == id)
    }

    /// Reports for every device, in insertion order.
    #[must_use]
    pub fn reports(&self) -> Vec<DeviceReport> {
        self.devices.iter().map(Device::report).collect()
    }

    /// Whether any light still has an armed ramp.
    #[must_use]
    pub fn is_ramping(&self) -> bool {
        self.devices
            .iter()
            .filter_map(Device::as_light)
            .any(Light::is_ramping)
    }

    /// Step every armed ramp by one unit.
    ///
    /// Returns `true` while at least one ramp is still armed afterwards.
    pub fn advance_ramps(&mut self) -> bool {
        let mut pending = false;
        for light in self.devices.iter_mut().filter_map(Device::as_light_mut) {
            if let RampStep::Advanced(_) = light.step_ramp() {
                pending = true;
            }
        }
        pending
    }
}
