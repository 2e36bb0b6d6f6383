//! Device actions offered for NEO devices in automations.
//!
//! Every key action and the two navigation actions are listed per device.
//! Running an action turns it into a `neo_smartbox.*` service call.

use serde::Deserialize;
use serde::Serialize;
use tracing::error;

use crate::host::ServiceCall;
use crate::host::ServiceDispatcher;
use crate::remote;
use crate::remote::RemoteHost;

pub const NAVIGATE_TO: &str = "navigate_to";

/// One entry of a device's action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceAction {
    pub device_id: String,
    pub domain: &'static str,
    #[serde(rename = "type")]
    pub action_type: &'static str,
}

/// Actions available for `device_id`.
///
/// Navigation is always listed. Key actions are only listed for devices that
/// belong to one of the host's remotes.
pub fn available_actions(host: &RemoteHost, device_id: &str) -> Vec<DeviceAction> {
    let action = |action_type: &'static str| DeviceAction {
        device_id: device_id.to_string(),
        domain: remote::DOMAIN,
        action_type,
    };

    let mut actions = vec![action(NAVIGATE_TO), action(remote::NAVIGATE_TO_LIVE_CHANNEL)];
    if host.owns_device(device_id) {
        actions.extend(remote::key_tokens().map(action));
    }
    actions
}

/// A configured device action, as stored in an automation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceActionConfig {
    pub device_id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub long_press: bool,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl DeviceActionConfig {
    /// The service call this action makes, or `None` when a required field is
    /// missing.
    pub fn service_call(&self) -> Option<ServiceCall> {
        let navigate_path = match self.action_type.as_str() {
            NAVIGATE_TO => match self.destination.as_deref().filter(|d| !d.is_empty()) {
                Some(destination) => destination.to_string(),
                None => {
                    error!(destination = ?self.destination, "invalid destination");
                    return None;
                }
            },
            remote::NAVIGATE_TO_LIVE_CHANNEL => {
                match self.channel_id.as_deref().filter(|c| !c.is_empty()) {
                    Some(channel_id) => remote::live_channel_path(channel_id),
                    None => {
                        error!("channel id is required for navigate_to_live_channel");
                        return None;
                    }
                }
            }
            key => {
                if remote::key_name(key).is_none() {
                    error!(action_type = key, "unknown device action");
                    return None;
                }
                return Some(ServiceCall::new(
                    remote::DOMAIN,
                    remote::REMOTE_KEY_ACTION,
                    serde_json::json!({
                        "device_id": [self.device_id],
                        "action": key,
                        "long_press": self.long_press,
                    }),
                ));
            }
        };

        Some(ServiceCall::new(
            remote::DOMAIN,
            remote::NAVIGATE_TO_CUSTOM_ACTION,
            serde_json::json!({
                "device_id": [self.device_id],
                "action": navigate_path,
            }),
        ))
    }

    /// Run the action against `hass`. Invalid actions do nothing.
    pub fn run<H>(&self, hass: &H)
    where
        H: ServiceDispatcher + ?Sized,
    {
        if let Some(call) = self.service_call() {
            hass.call_service(&call.domain, &call.service, call.data);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::remote::DeviceKind;
    use crate::remote::KeyActionLog;
    use crate::remote::SmartboxRemote;

    fn host() -> (RemoteHost, Arc<KeyActionLog>) {
        let log = Arc::new(KeyActionLog::new());
        let remote = SmartboxRemote {
            entity_id: "remote.bedroom".to_string(),
            device_id: "tv-0002".to_string(),
            name: "Bedroom".to_string(),
            kind: DeviceKind::SmartTv,
        };
        (RemoteHost::new([remote], log.clone()), log)
    }

    fn config(action_type: &str) -> DeviceActionConfig {
        DeviceActionConfig {
            device_id: "tv-0002".to_string(),
            action_type: action_type.to_string(),
            long_press: false,
            destination: None,
            channel_id: None,
        }
    }

    #[test]
    fn test_available_actions() {
        let (host, _) = host();

        let owned = available_actions(&host, "tv-0002");
        assert_eq!(owned.len(), 2 + 17);
        assert_eq!(owned[0].action_type, NAVIGATE_TO);
        assert_eq!(owned[1].action_type, "navigate_to_live_channel");
        assert!(owned.iter().any(|a| a.action_type == "volume_mute"));
        assert!(owned.iter().all(|a| a.domain == "neo_smartbox"));

        let foreign = available_actions(&host, "stb-9999");
        assert_eq!(foreign.len(), 2);
    }

    #[test]
    fn test_action_serializes_type() {
        let (host, _) = host();
        let json = serde_json::to_value(&available_actions(&host, "tv-0002")[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "device_id": "tv-0002",
                "domain": "neo_smartbox",
                "type": "navigate_to",
            })
        );
    }

    #[test]
    fn test_key_action_call() {
        let mut action = config("menu");
        action.long_press = true;
        let call = action.service_call().unwrap();

        assert_eq!(call.domain, "neo_smartbox");
        assert_eq!(call.service, "remote_key_action");
        assert_eq!(
            call.data,
            serde_json::json!({"device_id": ["tv-0002"], "action": "menu", "long_press": true})
        );
    }

    #[test]
    fn test_navigation_calls() {
        let mut action = config("navigate_to");
        assert_eq!(action.service_call(), None);
        action.destination = Some("app://settings".to_string());
        assert_eq!(
            action.service_call().unwrap().data,
            serde_json::json!({"device_id": ["tv-0002"], "action": "app://settings"})
        );

        let mut action = config("navigate_to_live_channel");
        assert_eq!(action.service_call(), None);
        action.channel_id = Some("101".to_string());
        let call = action.service_call().unwrap();
        assert_eq!(call.service, "navigate_to_custom_action");
        assert_eq!(call.data["action"], "app://player/livetv/id/101");

        assert_eq!(config("voice_search").service_call(), None);
    }

    #[test]
    fn test_run_reaches_device() {
        let (host, log) = host();

        let mut action = config("navigate_to_live_channel");
        action.channel_id = Some("5".to_string());
        action.run(&host);
        config("power").run(&host);
        config("navigate_to").run(&host);

        assert_eq!(log.navigations().len(), 1);
        assert_eq!(log.navigations()[0].navigate_path, "app://player/livetv/id/5");
        assert_eq!(log.actions().len(), 1);
        assert_eq!(log.actions()[0].key_name, "Power");
    }

    #[test]
    fn test_config_from_json() {
        let action: DeviceActionConfig = serde_json::from_value(serde_json::json!({
            "device_id": "tv-0002",
            "type": "ok",
        }))
        .unwrap();
        assert_eq!(action, config("ok"));
    }
}
