//! Device identity: free-text identifiers, device kinds and the composite key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// User-supplied device identifier (e.g. `"L1"`).
///
/// Any string is accepted here; emptiness and uniqueness are checked where
/// devices are registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The concrete variant of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    #[serde(alias = "smart_light")]
    Light,
    Thermostat,
    #[serde(alias = "security_camera")]
    Camera,
}

impl DeviceKind {
    /// All kinds, in the order the dashboard lists them.
    pub const ALL: [Self; 3] = [Self::Light, Self::Thermostat, Self::Camera];

    /// Human readable name (`Smart Light`, `Thermostat`, `Security Camera`).
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Light => "Smart Light",
            Self::Thermostat => "Thermostat",
            Self::Camera => "Security Camera",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Light => "SmartLight",
            Self::Thermostat => "Thermostat",
            Self::Camera => "SecurityCamera",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "light" | "smartlight" => Ok(Self::Light),
            "thermostat" => Ok(Self::Thermostat),
            "camera" | "securitycamera" => Ok(Self::Camera),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Composite `(kind, id)` key identifying exactly one registered device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceKey {
    pub kind: DeviceKind,
    pub id: DeviceId,
}

impl DeviceKey {
    #[must_use]
    pub fn new(kind: DeviceKind, id: impl Into<DeviceId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.label(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_raw_identifier() {
        assert_eq!(DeviceId::from("L1").to_string(), "L1");
    }

    #[test]
    fn should_report_empty_identifier() {
        assert!(DeviceId::new("").is_empty());
        assert!(!DeviceId::new("T1").is_empty());
    }

    #[test]
    fn should_parse_kind_ignoring_case_and_separators() {
        assert_eq!("Smart Light".parse::<DeviceKind>(), Ok(DeviceKind::Light));
        assert_eq!("smart_light".parse::<DeviceKind>(), Ok(DeviceKind::Light));
        assert_eq!("THERMOSTAT".parse::<DeviceKind>(), Ok(DeviceKind::Thermostat));
        assert_eq!(
            "security-camera".parse::<DeviceKind>(),
            Ok(DeviceKind::Camera)
        );
    }

    #[test]
    fn should_reject_unknown_kind() {
        let result = "toaster".parse::<DeviceKind>();
        assert_eq!(result, Err(ValidationError::UnknownKind("toaster".into())));
    }

    #[test]
    fn should_display_key_as_dropdown_label() {
        let key = DeviceKey::new(DeviceKind::Camera, "C1");
        assert_eq!(key.to_string(), "SecurityCamera#C1");
    }

    #[test]
    fn should_distinguish_keys_of_different_kinds_with_same_id() {
        let light = DeviceKey::new(DeviceKind::Light, "X");
        let camera = DeviceKey::new(DeviceKind::Camera, "X");
        assert_ne!(light, camera);
    }

    #[test]
    fn should_roundtrip_kind_through_serde_json() {
        let json = serde_json::to_string(&DeviceKind::Thermostat).unwrap();
        assert_eq!(json, "\"thermostat\"");
        let parsed: DeviceKind = serde_json::from_str("\"security_camera\"").unwrap();
        assert_eq!(parsed, DeviceKind::Camera);
    }

    #[test]
    fn should_serialize_id_as_plain_string() {
        let json = serde_json::to_string(&DeviceId::from("T1")).unwrap();
        assert_eq!(json, "\"T1\"");
    }
}
