//! Command tokens emitted by the remote card.

use serde::Deserialize;
use serde::Serialize;
use strum::AsRefStr;
use strum::Display;
use strum::EnumCount;
use strum::EnumIter;
use strum::EnumString;
use strum::IntoEnumIterator;

/// A single button press sent to a remote-control entity.
///
/// The string form (`Display`, `FromStr`, serde) is the token carried in the
/// `command` field of a `remote.send_command` service call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RemoteCommand {
    Power,
    Rewind,
    PlayPause,
    Forward,
    Up,
    Left,
    Ok,
    Right,
    Down,
    Back,
    Home,
    Menu,
    VolumeDown,
    VoiceSearch,
    VolumeUp,
}

impl RemoteCommand {
    /// The wire token, e.g. `"play_pause"`.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn iter() -> impl Iterator<Item = RemoteCommand> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Short human-readable description of what the button does.
    pub fn description(&self) -> &'static str {
        match self {
            RemoteCommand::Power => "Power on/off the device",
            RemoteCommand::Rewind => "Rewind media",
            RemoteCommand::PlayPause => "Play or pause media",
            RemoteCommand::Forward => "Fast forward media",
            RemoteCommand::Up => "Navigate up",
            RemoteCommand::Left => "Navigate left",
            RemoteCommand::Ok => "Select (OK)",
            RemoteCommand::Right => "Navigate right",
            RemoteCommand::Down => "Navigate down",
            RemoteCommand::Back => "Go back",
            RemoteCommand::Home => "Return to home screen",
            RemoteCommand::Menu => "Open guide",
            RemoteCommand::VolumeDown => "Decrease volume",
            RemoteCommand::VoiceSearch => "Start voice search",
            RemoteCommand::VolumeUp => "Increase volume",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::EnumCount;

    use super::*;

    #[test]
    fn test_tokens_are_snake_case() {
        assert_eq!(RemoteCommand::PlayPause.as_str(), "play_pause");
        assert_eq!(RemoteCommand::VoiceSearch.to_string(), "voice_search");
        assert_eq!(RemoteCommand::Ok.as_str(), "ok");
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            RemoteCommand::from_str("volume_up").unwrap(),
            RemoteCommand::VolumeUp
        );
        assert!(RemoteCommand::from_str("volume_mute").is_err());
        assert!(RemoteCommand::from_str("Power").is_err());
    }

    #[test]
    fn test_closed_set() {
        let tokens: Vec<String> = RemoteCommand::iter().map(|c| c.to_string()).collect();
        assert_eq!(tokens.len(), RemoteCommand::COUNT);
        assert_eq!(
            tokens,
            [
                "power",
                "rewind",
                "play_pause",
                "forward",
                "up",
                "left",
                "ok",
                "right",
                "down",
                "back",
                "home",
                "menu",
                "volume_down",
                "voice_search",
                "volume_up",
            ]
        );
    }

    #[test]
    fn test_serde_uses_token() {
        let json = serde_json::to_value(RemoteCommand::VolumeDown).unwrap();
        assert_eq!(json, serde_json::json!("volume_down"));

        let cmd: RemoteCommand = serde_json::from_value(serde_json::json!("menu")).unwrap();
        assert_eq!(cmd, RemoteCommand::Menu);
    }
}
