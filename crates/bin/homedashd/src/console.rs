//! Headless console — one command per line, rendered as plain text.

use std::error::Error;
use std::io;
use std::str::FromStr;

use homedash_app::services::dashboard::Dashboard;
use homedash_domain::error::{HomeDashError, ValidationError};
use homedash_domain::id::{DeviceId, DeviceKey, DeviceKind};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Printed once at start-up.
pub const HELP_HINT: &str = "homedash ready, type 'help' for commands";

const HELP: &str = "\
commands:
  add <kind> <id>             register a device (kind: light, thermostat, camera)
  remove <kind> <id>          remove that device
  remove <id>                 remove the first device with this id
  toggle <kind> <id>          flip a device on/off
  on <kind> <id>              switch a device on
  off <kind> <id>             switch a device off
  brightness <id> <0-100>     set a light's brightness (light must be on)
  temperature <id> <value>    set a thermostat's temperature (must be on)
  scan <id>                   request a camera security status (must be on)
  status [json]               show every device
  list                        show registered devices
  help                        show this text
  quit                        exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { kind: DeviceKind, id: String },
    RemoveKey(DeviceKey),
    RemoveId(DeviceId),
    Toggle(DeviceKey),
    Power { key: DeviceKey, on: bool },
    Brightness { id: DeviceId, value: u16 },
    Temperature { id: DeviceId, value: f64 },
    Scan(DeviceId),
    Status { json: bool },
    List,
    Help,
    Quit,
}

/// Why a line could not be parsed or executed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("invalid device kind")]
    Kind(#[from] ValidationError),

    #[error(transparent)]
    Dashboard(#[from] HomeDashError),

    #[error("failed to render JSON")]
    Json(#[from] serde_json::Error),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match (verb.to_ascii_lowercase().as_str(), args) {
            ("add", [kind, id]) => Ok(Self::Add {
                kind: kind.parse()?,
                id: (*id).to_string(),
            }),
            ("add", _) => Err(CommandError::Usage("add <kind> <id>")),
            ("remove" | "rm", [kind, id]) => Ok(Self::RemoveKey(key(kind, id)?)),
            ("remove" | "rm", [id]) => Ok(Self::RemoveId(DeviceId::from(*id))),
            ("remove" | "rm", _) => Err(CommandError::Usage("remove [<kind>] <id>")),
            ("toggle", [kind, id]) => Ok(Self::Toggle(key(kind, id)?)),
            ("toggle", _) => Err(CommandError::Usage("toggle <kind> <id>")),
            ("on", [kind, id]) => Ok(Self::Power {
                key: key(kind, id)?,
                on: true,
            }),
            ("off", [kind, id]) => Ok(Self::Power {
                key: key(kind, id)?,
                on: false,
            }),
            ("on" | "off", _) => Err(CommandError::Usage("on|off <kind> <id>")),
            ("brightness", [id, value]) => Ok(Self::Brightness {
                id: DeviceId::from(*id),
                value: value
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber((*value).to_string()))?,
            }),
            ("brightness", _) => Err(CommandError::Usage("brightness <id> <0-100>")),
            ("temperature" | "temp", [id, value]) => Ok(Self::Temperature {
                id: DeviceId::from(*id),
                value: value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| CommandError::InvalidNumber((*value).to_string()))?,
            }),
            ("temperature" | "temp", _) => Err(CommandError::Usage("temperature <id> <value>")),
            ("scan", [id]) => Ok(Self::Scan(DeviceId::from(*id))),
            ("scan", _) => Err(CommandError::Usage("scan <id>")),
            ("status", []) => Ok(Self::Status { json: false }),
            ("status", [format]) if format.eq_ignore_ascii_case("json") => {
                Ok(Self::Status { json: true })
            }
            ("status", _) => Err(CommandError::Usage("status [json]")),
            ("list" | "ls", []) => Ok(Self::List),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "exit", _) => Ok(Self::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn key(kind: &str, id: &str) -> Result<DeviceKey, CommandError> {
    Ok(DeviceKey::new(kind.parse()?, id))
}

/// Run `command` against the dashboard and render its outcome.
///
/// # Errors
///
/// Returns [`CommandError::Dashboard`] when the dashboard rejects the
/// operation, or [`CommandError::Json`] if rendering JSON fails.
pub fn execute(dashboard: &mut Dashboard, command: Command) -> Result<String, CommandError> {
    let output = match command {
        Command::Add { kind, id } => {
            dashboard.add_device(kind, &id)?;
            format!("{kind} added successfully.")
        }
        Command::RemoveKey(key) => removed(dashboard.remove_device(&key).map(|d| d.key())),
        Command::RemoveId(id) => removed(dashboard.remove_by_id(&id).map(|d| d.key())),
        Command::Toggle(key) => {
            dashboard.toggle(&key)?;
            device_line(dashboard, &key)
        }
        Command::Power { key, on } => {
            dashboard.set_power(&key, on)?;
            device_line(dashboard, &key)
        }
        Command::Brightness { id, value } => {
            let set = dashboard.set_brightness(&id, value)?;
            format!("{} {id} brightness set to {set}.", DeviceKind::Light)
        }
        Command::Temperature { id, value } => {
            let set = dashboard.set_temperature(&id, value)?;
            format!("{} {id} temperature set to {set}\u{2103}.", DeviceKind::Thermostat)
        }
        Command::Scan(id) => {
            let status = dashboard.scan_security(&id)?;
            format!("Security Status: {status}")
        }
        Command::Status { json: false } => dashboard.summary(),
        Command::Status { json: true } => serde_json::to_string_pretty(&dashboard.reports())?,
        Command::List => {
            let devices = dashboard.registry().list();
            if devices.is_empty() {
                "No devices registered.".to_string()
            } else {
                devices
                    .iter()
                    .map(|d| d.key().to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => "bye".to_string(),
    };
    Ok(output)
}

fn removed(key: Option<DeviceKey>) -> String {
    match key {
        Some(key) => format!("Removed {key}."),
        None => "Nothing to remove.".to_string(),
    }
}

fn device_line(dashboard: &Dashboard, key: &DeviceKey) -> String {
    dashboard
        .registry()
        .get(key)
        .map(|d| d.report().to_string())
        .unwrap_or_default()
}

/// Read the next input line, decoding invalid UTF-8 lossily.
///
/// Bytes read so far stay in `buf` if the future is dropped, so this is safe
/// to poll from a `tokio::select!` branch as long as `buf` outlives the loop.
/// Returns `None` at end of input.
///
/// # Errors
///
/// Returns the underlying I/O error when reading fails.
pub async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let read = reader.read_until(b'\n', buf).await?;
    if read == 0 && buf.is_empty() {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    Ok(Some(line))
}

/// Render an error followed by its chain of sources.
#[must_use]
pub fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
