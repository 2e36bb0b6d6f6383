//! NEO Smartbox remote-control entities.
//!
//! This is the receiving side of the card's `remote.send_command` calls: each
//! command token is translated into a device key press and handed to a
//! [`KeyActionSink`]. The integration's own `neo_smartbox.*` services (key
//! actions and navigation) end at the same sink. Getting the action onto the
//! network is the sink's job.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::card::SERVICE_DOMAIN;
use crate::card::SERVICE_NAME;
use crate::host::Attributes;
use crate::host::EntityState;
use crate::host::ServiceDispatcher;
use crate::host::StateProvider;
use crate::host::StateSnapshot;

pub const MANUFACTURER: &str = "Telekom Slovenia";

/// Domain of the integration's own services.
pub const DOMAIN: &str = "neo_smartbox";
pub const REMOTE_KEY_ACTION: &str = "remote_key_action";
pub const NAVIGATE_TO_CUSTOM_ACTION: &str = "navigate_to_custom_action";
pub const NAVIGATE_TO_LIVE_CHANNEL: &str = "navigate_to_live_channel";

/// Command token -> device key name.
const KEY_NAMES: &[(&str, &str)] = &[
    ("power", "Power"),
    ("rewind", "Rewind"),
    ("play_pause", "Play"),
    ("forward", "Forward"),
    ("up", "CursorUp"),
    ("down", "CursorDown"),
    ("left", "CursorLeft"),
    ("right", "CursorRight"),
    ("ok", "Select"),
    ("back", "Back"),
    ("home", "Home"),
    ("menu", "TvGuide"),
    ("volume_down", "VolumeDown"),
    ("volume_mute", "VolumeMute"),
    ("volume_up", "VolumeUp"),
    ("channel_up", "ChannelUp"),
    ("channel_down", "ChannelDown"),
];

/// Device key name for a command token, if the box has one.
pub fn key_name(command: &str) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(token, _)| *token == command)
        .map(|(_, key)| *key)
}

/// Every command token the box has a key for, in table order.
pub fn key_tokens() -> impl Iterator<Item = &'static str> {
    KEY_NAMES.iter().map(|(token, _)| *token)
}

/// Navigation path that tunes the box to a live TV channel.
pub fn live_channel_path(channel_id: &str) -> String {
    format!("app://player/livetv/id/{}", channel_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    #[serde(rename = "dt_stb", alias = "stb")]
    Stb,
    #[serde(rename = "dt_tv", alias = "tv")]
    SmartTv,
}

impl DeviceKind {
    pub fn model(&self) -> &'static str {
        match self {
            DeviceKind::Stb => "NEO Smartbox",
            DeviceKind::SmartTv => "NEO TV Lite",
        }
    }
}

/// A single key press for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAction {
    pub device_id: String,
    pub key_name: &'static str,
    pub key_repeat: u32,
    pub long_press: bool,
}

/// A request to open an app path on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigateAction {
    pub device_id: String,
    pub navigate_path: String,
}

pub trait KeyActionSink {
    fn send_key_action(&self, action: KeyAction);

    fn navigate_action(&self, action: NavigateAction);
}

/// In-memory journal of every action delivered to it.
#[derive(Debug, Default)]
pub struct KeyActionLog {
    actions: Mutex<Vec<KeyAction>>,
    navigations: Mutex<Vec<NavigateAction>>,
}

impl KeyActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<KeyAction> {
        // Each entry is pushed whole, so a poisoned journal is still consistent.
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn navigations(&self) -> Vec<NavigateAction> {
        self.navigations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl KeyActionSink for KeyActionLog {
    fn send_key_action(&self, action: KeyAction) {
        info!(
            device_id = %action.device_id,
            key_name = action.key_name,
            long_press = action.long_press,
            key_repeat = action.key_repeat,
            "key action"
        );
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(action);
    }

    fn navigate_action(&self, action: NavigateAction) {
        info!(
            device_id = %action.device_id,
            navigate_path = %action.navigate_path,
            "navigate action"
        );
        self.navigations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(action);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SendOptions {
    #[serde(default)]
    pub long_press: bool,
    #[serde(default)]
    pub repeat: u32,
}

/// Remote entity for one NEO device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmartboxRemote {
    pub entity_id: String,
    pub device_id: String,
    pub name: String,
    pub kind: DeviceKind,
}

impl SmartboxRemote {
    /// Tokens this entity understands.
    pub fn commands(&self) -> Vec<&'static str> {
        key_tokens().collect()
    }

    pub fn state(&self) -> EntityState {
        let mut extra = serde_json::Map::new();
        extra.insert("device_id".to_string(), self.device_id.clone().into());
        extra.insert("model".to_string(), self.kind.model().into());
        extra.insert("manufacturer".to_string(), MANUFACTURER.into());
        EntityState {
            state: Some("on".to_string()),
            attributes: Attributes {
                friendly_name: Some(self.name.clone()),
                extra,
            },
        }
    }

    /// Press each supported key in order. Unsupported tokens are skipped.
    pub fn send_command<S>(&self, commands: &[String], opts: SendOptions, sink: &S)
    where
        S: KeyActionSink + ?Sized,
    {
        for command in commands {
            let Some(key_name) = key_name(command) else {
                warn!(entity_id = %self.entity_id, %command, "unsupported command");
                continue;
            };
            sink.send_key_action(KeyAction {
                device_id: self.device_id.clone(),
                key_name,
                key_repeat: opts.repeat,
                long_press: opts.long_press,
            });
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid send_command payload: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("payload has no entity_id")]
    MissingEntity,
}

/// A value given either once or as a list, as service payloads allow.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSendCommand {
    entity_id: Option<OneOrMany>,
    command: OneOrMany,
    #[serde(flatten)]
    opts: SendOptions,
}

/// Devices addressed by a `neo_smartbox.*` service call.
#[derive(Debug, Deserialize)]
struct Target {
    device_id: Option<OneOrMany>,
    entity_id: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
struct DeviceServiceCall {
    #[serde(flatten)]
    target: Target,
    action: Option<String>,
    channel_id: Option<String>,
    #[serde(default)]
    long_press: bool,
}

/// Parsed `remote.send_command` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCommand {
    pub entity_ids: Vec<String>,
    pub commands: Vec<String>,
    pub opts: SendOptions,
}

impl SendCommand {
    pub fn from_payload(data: serde_json::Value) -> Result<Self, PayloadError> {
        let raw: RawSendCommand = serde_json::from_value(data)?;
        let entity_ids = raw
            .entity_id
            .map(OneOrMany::into_vec)
            .filter(|ids| !ids.is_empty())
            .ok_or(PayloadError::MissingEntity)?;
        Ok(Self {
            entity_ids,
            commands: raw.command.into_vec(),
            opts: raw.opts,
        })
    }
}

/// Host-side owner of the remote entities.
///
/// Acts as the card's host object: it publishes a state record per remote and
/// routes `remote.send_command` calls to the matching entity.
pub struct RemoteHost {
    remotes: BTreeMap<String, SmartboxRemote>,
    states: StateSnapshot,
    sink: Arc<dyn KeyActionSink + Send + Sync>,
}

impl std::fmt::Debug for RemoteHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHost")
            .field("remotes", &self.remotes)
            .field("sink", &"<sink>")
            .finish()
    }
}

impl RemoteHost {
    pub fn new(
        remotes: impl IntoIterator<Item = SmartboxRemote>,
        sink: Arc<dyn KeyActionSink + Send + Sync>,
    ) -> Self {
        let remotes: BTreeMap<String, SmartboxRemote> = remotes
            .into_iter()
            .map(|r| (r.entity_id.clone(), r))
            .collect();
        let states = remotes
            .values()
            .map(|r| (r.entity_id.clone(), r.state()))
            .collect();
        Self {
            remotes,
            states,
            sink,
        }
    }

    pub fn remote(&self, entity_id: &str) -> Option<&SmartboxRemote> {
        self.remotes.get(entity_id)
    }

    pub fn states(&self) -> &StateSnapshot {
        &self.states
    }

    /// Whether one of the remotes is the device `device_id`.
    pub fn owns_device(&self, device_id: &str) -> bool {
        self.remotes.values().any(|r| r.device_id == device_id)
    }

    /// Device ids addressed by `target`, deduplicated in order. Entity ids
    /// resolve through their remote; unknown ids are logged and skipped.
    fn resolve_devices(&self, target: Target) -> Vec<String> {
        let mut devices: Vec<String> = Vec::new();

        for device_id in target.device_id.map(OneOrMany::into_vec).unwrap_or_default() {
            if !self.owns_device(&device_id) {
                error!(%device_id, "device not found");
                continue;
            }
            if !devices.contains(&device_id) {
                devices.push(device_id);
            }
        }

        for entity_id in target.entity_id.map(OneOrMany::into_vec).unwrap_or_default() {
            let Some(remote) = self.remotes.get(&entity_id) else {
                error!(%entity_id, "entity not found");
                continue;
            };
            if !devices.contains(&remote.device_id) {
                devices.push(remote.device_id.clone());
            }
        }

        devices
    }

    fn handle_device_service(
        &self,
        service: &str,
        data: serde_json::Value,
    ) -> Result<(), PayloadError> {
        let call: DeviceServiceCall = serde_json::from_value(data)?;

        match service {
            REMOTE_KEY_ACTION => {
                let Some(action) = call.action.filter(|a| !a.is_empty()) else {
                    error!("action type not found");
                    return Ok(());
                };
                let Some(key_name) = key_name(&action) else {
                    error!(%action, "unknown key action");
                    return Ok(());
                };
                for device_id in self.resolve_devices(call.target) {
                    self.sink.send_key_action(KeyAction {
                        device_id,
                        key_name,
                        key_repeat: 0,
                        long_press: call.long_press,
                    });
                }
            }
            NAVIGATE_TO_CUSTOM_ACTION => {
                let Some(action) = call.action.filter(|a| !a.is_empty()) else {
                    error!("action type not found");
                    return Ok(());
                };
                self.navigate(call.target, &action);
            }
            NAVIGATE_TO_LIVE_CHANNEL => {
                let Some(channel_id) = call.channel_id.filter(|c| !c.is_empty()) else {
                    error!("channel id not found");
                    return Ok(());
                };
                self.navigate(call.target, &live_channel_path(&channel_id));
            }
            _ => debug!(domain = DOMAIN, service, "no handler for service"),
        }
        Ok(())
    }

    fn navigate(&self, target: Target, navigate_path: &str) {
        for device_id in self.resolve_devices(target) {
            self.sink.navigate_action(NavigateAction {
                device_id,
                navigate_path: navigate_path.to_string(),
            });
        }
    }

    fn handle_send_command(&self, data: serde_json::Value) -> Result<(), PayloadError> {
        let call = SendCommand::from_payload(data)?;
        if call.commands.is_empty() {
            return Ok(());
        }
        for entity_id in &call.entity_ids {
            match self.remotes.get(entity_id) {
                Some(remote) => remote.send_command(&call.commands, call.opts, self.sink.as_ref()),
                None => warn!(%entity_id, "send_command for unknown remote"),
            }
        }
        Ok(())
    }
}

impl StateProvider for RemoteHost {
    fn friendly_name(&self, entity_id: &str) -> Option<&str> {
        self.states.friendly_name(entity_id)
    }
}

impl ServiceDispatcher for RemoteHost {
    fn call_service(&self, domain: &str, service: &str, data: serde_json::Value) {
        let result = match (domain, service) {
            (SERVICE_DOMAIN, SERVICE_NAME) => self.handle_send_command(data),
            (DOMAIN, _) => self.handle_device_service(service, data),
            _ => {
                debug!(domain, service, "no handler for service");
                return;
            }
        };
        if let Err(e) = result {
            warn!("dropping {}.{} call: {}", domain, service, e);
        }
    }
}
