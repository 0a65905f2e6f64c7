//! Dashboard service — the monitoring workflow over the registry.
//!
//! Everything a dashboard front-end does to devices goes through here:
//! registering with per-kind id uniqueness, keyed removal, power toggles
//! that arm brightness ramps, slider-style adjustments, security scans and
//! the textual status summary. The ramp itself advances only when the
//! caller awaits [`Dashboard::next_tick`].

use std::ops::ControlFlow;
use std::time::Duration;

use homedash_domain::device::{Device, DeviceReport, MAX_BRIGHTNESS, SecurityStatus, Switchable};
use homedash_domain::error::{HomeDashError, NotFoundError, ValidationError};
use homedash_domain::id::{DeviceId, DeviceKey, DeviceKind};
use homedash_domain::registry::Registry;

use crate::animation::AnimationDriver;

/// Application service owning the registry and the brightness animation.
pub struct Dashboard {
    registry: Registry,
    animation: AnimationDriver<Registry>,
    tick_period: Duration,
}

impl Dashboard {
    /// Create an empty dashboard whose ramps advance once per `tick_period`.
    #[must_use]
    pub fn new(tick_period: Duration) -> Self {
        Self {
            registry: Registry::new(),
            animation: AnimationDriver::new(),
            tick_period,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Whether a brightness ramp is currently being animated.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Register a new device of `kind` in its initial (off) state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] for a blank id and
    /// [`ValidationError::DuplicateId`] when a device of the same kind
    /// already uses `id`. Devices of different kinds may share an id.
    #[tracing::instrument(skip(self))]
    pub fn add_device(&mut self, kind: DeviceKind, id: &str) -> Result<DeviceKey, HomeDashError> {
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let key = DeviceKey::new(kind, id);
        if self.registry.contains_key(&key) {
            return Err(ValidationError::DuplicateId { kind, id: key.id }.into());
        }

        self.registry.add(Device::with_defaults(kind, id));
        tracing::info!(device = %key, "device added");
        Ok(key)
    }

    /// Remove the device addressed by `key`.
    ///
    /// An unknown key is a no-op. The animation stops once no ramp is left.
    #[tracing::instrument(skip(self))]
    pub fn remove_device(&mut self, key: &DeviceKey) -> Option<Device> {
        let removed = self.registry.remove_key(key);
        self.after_removal(removed)
    }

    /// Remove the earliest registered device with `id`, whatever its kind.
    #[tracing::instrument(skip(self))]
    pub fn remove_by_id(&mut self, id: &DeviceId) -> Option<Device> {
        let removed = self.registry.remove(id);
        self.after_removal(removed)
    }

    /// Flip the power state of a device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] if `key` is not registered.
    pub fn toggle(&mut self, key: &DeviceKey) -> Result<bool, HomeDashError> {
        let on = self
            .registry
            .get(key)
            .ok_or_else(|| NotFoundError::from(key))?
            .is_on();
        self.set_power(key, !on)
    }

    /// Switch a device on or off; returns the resulting status.
    ///
    /// Lights only arm their ramp here and the animation is started; the
    /// other kinds switch immediately. Already being in the requested state
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] if `key` is not registered.
    #[tracing::instrument(skip(self))]
    pub fn set_power(&mut self, key: &DeviceKey, on: bool) -> Result<bool, HomeDashError> {
        let device = self
            .registry
            .get_mut(key)
            .ok_or_else(|| NotFoundError::from(key))?;

        let (status, ramping) = match device {
            Device::Light(light) => {
                let status = if on {
                    light.begin_turn_on()
                } else {
                    light.begin_turn_off()
                };
                (status, light.is_ramping())
            }
            other => (if on { other.turn_on() } else { other.turn_off() }, false),
        };

        tracing::info!(device = %key, on = status, "power changed");
        if ramping {
            self.start_animation();
        }
        Ok(status)
    }

    /// Set a light's brightness directly, cancelling its ramp.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] above 100,
    /// [`HomeDashError::NotFound`] if no light has `id`, and
    /// [`ValidationError::DeviceOff`] while the light is off.
    #[tracing::instrument(skip(self))]
    pub fn set_brightness(&mut self, id: &DeviceId, value: u16) -> Result<u8, HomeDashError> {
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_BRIGHTNESS)
            .ok_or(ValidationError::BrightnessOutOfRange(value))?;
        let key = DeviceKey::new(DeviceKind::Light, id.clone());
        let light = self
            .registry
            .light_mut(id)
            .ok_or_else(|| NotFoundError::from(&key))?;
        if !light.is_on() {
            return Err(ValidationError::DeviceOff(key).into());
        }

        let brightness = light.set_brightness(value);
        if !self.registry.is_ramping() {
            self.stop_animation();
        }
        Ok(brightness)
    }

    /// Set a thermostat's temperature.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] if no thermostat has `id` and
    /// [`ValidationError::DeviceOff`] while it is off.
    #[tracing::instrument(skip(self))]
    pub fn set_temperature(&mut self, id: &DeviceId, value: f64) -> Result<f64, HomeDashError> {
        let key = DeviceKey::new(DeviceKind::Thermostat, id.clone());
        let thermostat = self
            .registry
            .thermostat_mut(id)
            .ok_or_else(|| NotFoundError::from(&key))?;
        if !thermostat.is_on() {
            return Err(ValidationError::DeviceOff(key).into());
        }
        Ok(thermostat.set_temperature(value))
    }

    /// Run a security scan on a camera, storing a fresh random status.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] if no camera has `id` and
    /// [`ValidationError::DeviceOff`] while it is off.
    #[tracing::instrument(skip(self))]
    pub fn scan_security(&mut self, id: &DeviceId) -> Result<SecurityStatus, HomeDashError> {
        let key = DeviceKey::new(DeviceKind::Camera, id.clone());
        let camera = self
            .registry
            .camera_mut(id)
            .ok_or_else(|| NotFoundError::from(&key))?;
        if !camera.is_on() {
            return Err(ValidationError::DeviceOff(key).into());
        }
        let status = camera.set_random_security_status().clone();
        tracing::info!(device = %key, %status, "security scan");
        Ok(status)
    }

    #[must_use]
    pub fn reports(&self) -> Vec<DeviceReport> {
        self.registry.reports()
    }

    /// One line per device, or a placeholder when nothing is registered.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.registry.is_empty() {
            return "No devices registered.".to_string();
        }
        self.registry
            .reports()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wait for the next animation tick and advance every armed ramp.
    ///
    /// Returns `true` while ramps remain. Pending forever when nothing is
    /// animating.
    pub async fn next_tick(&mut self) -> bool {
        let flow = self.animation.tick(&mut self.registry).await;
        tracing::trace!(done = flow.is_break(), "animation tick");
        if flow.is_break() {
            tracing::debug!("animation finished");
        }
        flow.is_continue()
    }

    fn start_animation(&mut self) {
        if self.animation.is_running() {
            return;
        }
        self.animation.start(self.tick_period, |registry: &mut Registry| {
            if registry.advance_ramps() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
        tracing::debug!(period = ?self.tick_period, "animation started");
    }

    fn stop_animation(&mut self) {
        if self.animation.stop() {
            tracing::debug!("animation stopped");
        }
    }

    fn after_removal(&mut self, removed: Option<Device>) -> Option<Device> {
        match &removed {
            Some(device) => tracing::info!(device = %device.key(), "device removed"),
            None => tracing::debug!("nothing to remove"),
        }
        if !self.registry.is_ramping() {
            self.stop_animation();
        }
        removed
    }
}
