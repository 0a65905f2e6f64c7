//! Smart light — on/off plus a brightness level ramped toward a bound.
//!
//! Turning the light on or off moves brightness one unit at a time toward
//! [`MAX_BRIGHTNESS`] or zero. [`Light::begin_turn_on`] /
//! [`Light::begin_turn_off`] only arm the ramp; each [`Light::step_ramp`]
//! call (one animation tick) advances it by one unit. The [`Switchable`]
//! `turn_on` / `turn_off` run the whole ramp at once.

use serde::Serialize;

use super::{Power, Switchable, Timestamp};
use crate::id::DeviceId;

/// Upper brightness bound.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Which bound an armed ramp is heading to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RampDirection {
    Up,
    Down,
}

impl RampDirection {
    /// Brightness at which the ramp ends.
    #[must_use]
    pub fn bound(self) -> u8 {
        match self {
            Self::Up => MAX_BRIGHTNESS,
            Self::Down => 0,
        }
    }
}

/// Outcome of a single [`Light::step_ramp`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStep {
    /// No ramp is armed; brightness untouched.
    Idle,
    /// Moved one unit; the bound is still ahead.
    Advanced(u8),
    /// The bound was reached and the ramp is disarmed.
    Reached(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    id: DeviceId,
    power: Power,
    brightness: u8,
    ramp: Option<RampDirection>,
}

impl Light {
    /// A light that is off at brightness 0.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            power: Power::new(false),
            brightness: 0,
            ramp: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, on: bool) -> Self {
        self.power = Power::new(on);
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self
    }

    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set brightness directly, clamped to [`MAX_BRIGHTNESS`].
    ///
    /// Any armed ramp is cancelled.
    pub fn set_brightness(&mut self, brightness: u8) -> u8 {
        self.ramp = None;
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self.brightness
    }

    #[must_use]
    pub fn ramp(&self) -> Option<RampDirection> {
        self.ramp
    }

    #[must_use]
    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    /// Switch on and arm an upward ramp without moving brightness.
    ///
    /// No-op when already on.
    pub fn begin_turn_on(&mut self) -> bool {
        self.begin_transition(true)
    }

    /// Switch off and arm a downward ramp without moving brightness.
    ///
    /// No-op when already off.
    pub fn begin_turn_off(&mut self) -> bool {
        self.begin_transition(false)
    }

    /// Advance the armed ramp by one unit.
    pub fn step_ramp(&mut self) -> RampStep {
        let Some(direction) = self.ramp else {
            return RampStep::Idle;
        };

        match direction {
            RampDirection::Up if self.brightness < MAX_BRIGHTNESS => self.brightness += 1,
            RampDirection::Down if self.brightness > 0 => self.brightness -= 1,
            _ => {}
        }

        if self.brightness == direction.bound() {
            self.ramp = None;
            RampStep::Reached(self.brightness)
        } else {
            RampStep::Advanced(self.brightness)
        }
    }

    fn begin_transition(&mut self, on: bool) -> bool {
        if self.power.is_on() == on {
            return on;
        }
        self.power.set(on);
        self.ramp = Some(if on {
            RampDirection::Up
        } else {
            RampDirection::Down
        });
        on
    }

    fn run_ramp(&mut self) {
        while let RampStep::Advanced(_) = self.step_ramp() {}
    }
}

impl Switchable for Light {
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

    /// Flipping the status re-aims an armed ramp at the matching bound.
    fn set_status(&mut self, on: bool) -> bool {
        if self.ramp.is_some() && self.power.is_on() != on {
            self.ramp = Some(if on {
                RampDirection::Up
            } else {
                RampDirection::Down
            });
        }
        self.power.set(on)
    }

    fn turn_on(&mut self) -> bool {
        if !self.power.is_on() {
            self.begin_turn_on();
            self.run_ramp();
        }
        self.power.is_on()
    }

    fn turn_off(&mut self) -> bool {
        if self.power.is_on() {
            self.begin_turn_off();
            self.run_ramp();
        }
        self.power.is_on()
    }

    fn last_changed(&self) -> Timestamp {
        self.power.last_changed()
    }
}
