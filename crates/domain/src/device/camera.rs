//! Security camera — on/off plus the outcome of the last security scan.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::{Power, Switchable, Timestamp};
use crate::id::DeviceId;

/// Result of a security scan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityStatus {
    Safe,
    Unsafe,
    /// No scan has been requested yet.
    #[default]
    Unset,
}

impl SecurityStatus {
    /// Whether this is an actual scan outcome rather than the placeholder.
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Safe | Self::Unsafe)
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.write_str("SAFE"),
            Self::Unsafe => f.write_str("UNSAFE"),
            Self::Unset => f.write_str("Request a security scan to get the status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    id: DeviceId,
    power: Power,
    security_status: SecurityStatus,
}

impl Camera {
    /// A camera that is off and has not been scanned.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            power: Power::new(false),
            security_status: SecurityStatus::Unset,
        }
    }

    #[must_use]
    pub fn with_status(mut self, on: bool) -> Self {
        self.power = Power::new(on);
        self
    }

    #[must_use]
    pub fn with_security_status(mut self, status: SecurityStatus) -> Self {
        self.security_status = status;
        self
    }

    /// The stored status, even if the camera has since been turned off.
    #[must_use]
    pub fn security_status(&self) -> &SecurityStatus {
        &self.security_status
    }

    pub fn set_security_status(&mut self, status: SecurityStatus) -> &SecurityStatus {
        self.security_status = status;
        &self.security_status
    }

    /// Draw `SAFE` or `UNSAFE` uniformly and store it, whatever the power state.
    pub fn set_random_security_status(&mut self) -> &SecurityStatus {
        self.set_random_security_status_with(&mut rand::thread_rng())
    }

    /// Same as [`set_random_security_status`](Self::set_random_security_status)
    /// with a caller-provided generator.
    pub fn set_random_security_status_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> &SecurityStatus {
        self.security_status = if rng.gen_bool(0.5) {
            SecurityStatus::Safe
        } else {
            SecurityStatus::Unsafe
        };
        &self.security_status
    }
}

impl Switchable for Camera {
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

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn should_start_off_and_unset() {
        let camera = Camera::new("C1");
        assert!(!camera.is_on());
        assert_eq!(camera.security_status(), &SecurityStatus::Unset);
        assert!(!camera.security_status().is_drawn());
    }

    #[test]
    fn should_only_draw_safe_or_unsafe_and_observe_both() {
        let mut camera = Camera::new("C1").with_status(true);
        let mut seen_safe = false;
        let mut seen_unsafe = false;

        for _ in 0..200 {
            match camera.set_random_security_status() {
                SecurityStatus::Safe => seen_safe = true,
                SecurityStatus::Unsafe => seen_unsafe = true,
                SecurityStatus::Unset => panic!("random draw produced the placeholder"),
            }
        }

        assert!(seen_safe);
        assert!(seen_unsafe);
    }

    #[test]
    fn should_draw_even_when_camera_is_off() {
        let mut camera = Camera::new("C1");
        let mut rng = StdRng::seed_from_u64(7);
        assert!(camera.set_random_security_status_with(&mut rng).is_drawn());
        assert!(!camera.is_on());
    }

    #[test]
    fn should_keep_security_status_after_turning_off() {
        let mut camera = Camera::new("C1")
            .with_status(true)
            .with_security_status(SecurityStatus::Safe);
        camera.turn_off();
        assert_eq!(camera.security_status(), &SecurityStatus::Safe);
    }

    #[test]
    fn should_display_placeholder_for_unset_status() {
        assert_eq!(
            SecurityStatus::Unset.to_string(),
            "Request a security scan to get the status"
        );
        assert_eq!(SecurityStatus::Unsafe.to_string(), "UNSAFE");
    }

    #[test]
    fn should_serialize_status_in_upper_case() {
        let json = serde_json::to_string(&SecurityStatus::Safe).unwrap();
        assert_eq!(json, "\"SAFE\"");
    }
}
