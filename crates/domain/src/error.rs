//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Removing an absent device from the registry is not an error.

use crate::id::{DeviceId, DeviceKey, DeviceKind};

/// Base error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum HomeDashError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),
}

/// Input rejected before it reaches a device or the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("device id is not provided")]
    EmptyId,

    #[error("device with id '{id}' already exists for {kind}")]
    DuplicateId { kind: DeviceKind, id: DeviceId },

    #[error("unknown device kind '{0}'")]
    UnknownKind(String),

    #[error("brightness {0} is outside 0..=100")]
    BrightnessOutOfRange(u16),

    #[error("{0} is off")]
    DeviceOff(DeviceKey),
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{id}' not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl From<&DeviceKey> for NotFoundError {
    fn from(key: &DeviceKey) -> Self {
        Self {
            entity: key.kind.display_name(),
            id: key.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: HomeDashError = ValidationError::EmptyId.into();
        assert!(matches!(
            err,
            HomeDashError::Validation(ValidationError::EmptyId)
        ));
    }

    #[test]
    fn should_describe_duplicate_id_with_kind_and_id() {
        let err = ValidationError::DuplicateId {
            kind: DeviceKind::Thermostat,
            id: DeviceId::from("T1"),
        };
        assert_eq!(
            err.to_string(),
            "device with id 'T1' already exists for Thermostat"
        );
    }

    #[test]
    fn should_build_not_found_from_device_key() {
        let key = DeviceKey::new(DeviceKind::Camera, "C9");
        let err = NotFoundError::from(&key);
        assert_eq!(err.to_string(), "Security Camera 'C9' not found");
    }

    #[test]
    fn should_name_device_when_it_is_off() {
        let err = ValidationError::DeviceOff(DeviceKey::new(DeviceKind::Light, "L1"));
        assert_eq!(err.to_string(), "SmartLight#L1 is off");
    }
}
