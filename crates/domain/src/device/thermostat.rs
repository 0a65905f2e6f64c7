//! Thermostat — on/off plus an externally set target temperature.

use super::{Power, Switchable, Timestamp};
use crate::id::DeviceId;

/// A thermostat whose temperature is only ever set by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Thermostat {
    id: DeviceId,
    power: Power,
    temperature: f64,
}

impl Thermostat {
    /// A thermostat that is off at 0.0.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            power: Power::new(false),
            temperature: 0.0,
        }
    }

    #[must_use]
    pub fn with_status(mut self, on: bool) -> Self {
        self.power = Power::new(on);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// No range validation is applied.
    pub fn set_temperature(&mut self, temperature: f64) -> f64 {
        self.temperature = temperature;
        self.temperature
    }
}

impl Switchable for Thermostat {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn set_id(&mut self, id: DeviceId) -> &DeviceId {
        self.id = id;
        &self.id
    }

    fn is_on(&self) -> bool {
        self.power.is_on()
    }

    fn set_status(&mut self, on: bool) -> bool {
        self.power.set(on)
    }

    fn turn_on(&mut self) -> bool {
        self.power.set(true)
    }

    fn turn_off(&mut self) -> bool {
        self.power.set(false)
    }

    fn last_changed(&self) -> Timestamp {
        self.power.last_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_off_at_zero_degrees() {
        let thermostat = Thermostat::new("T1");
        assert!(!thermostat.is_on());
        assert!(thermostat.temperature().abs() < f64::EPSILON);
    }

    #[test]
    fn should_keep_temperature_across_power_changes() {
        let mut thermostat = Thermostat::new("T1");
        thermostat.set_temperature(22.5);
        assert!(thermostat.turn_on());
        assert!((thermostat.temperature() - 22.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_accept_out_of_range_temperature() {
        let mut thermostat = Thermostat::new("T1").with_temperature(18.0);
        let set = thermostat.set_temperature(-273.5);
        assert!((set + 273.5).abs() < f64::EPSILON);
    }
}
