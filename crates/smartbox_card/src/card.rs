//! The NEO Smartbox remote card.
//!
//! The host pushes a configuration and a state object into the card in any
//! order. Once both are present every update rebuilds the whole [`View`];
//! clicks on the view's controls become `remote.send_command` service calls.

use std::sync::Arc;

use linkme::distributed_slice;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::command::RemoteCommand;
use crate::host::Hass;
use crate::host::ServiceDispatcher;
use crate::host::StateProvider;
use crate::icons::Icon;
use crate::registry;
use crate::registry::CardDescriptor;
use crate::view::Element;
use crate::view::Tag;
use crate::view::View;

/// Custom element name the card registers under.
pub const ELEMENT_NAME: &str = "neo-smartbox-remote-card";

/// Shown when neither a friendly name nor an entity id is available.
pub const PLACEHOLDER_NAME: &str = "NEO Smartbox";

/// Layout-size hint reported to host grid layouts.
pub const CARD_SIZE: u32 = 6;

pub const SERVICE_DOMAIN: &str = "remote";
pub const SERVICE_NAME: &str = "send_command";

const STYLESHEET: &str = include_str!("../assets/remote-card.css");

#[distributed_slice(registry::CARDS)]
fn remote_card_descriptor() -> CardDescriptor {
    CardDescriptor {
        element: ELEMENT_NAME,
        name: "NEO Smartbox Remote",
        description: "A card to control your NEO Smartbox device.",
        preview: true,
    }
}

/// Card configuration as written in the dashboard.
///
/// Only `entity` is recognised; other keys (such as the dashboard's `type`)
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub entity: Option<String>,
}

impl CardConfig {
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Configuration or state not supplied yet; nothing is rendered.
    Uninitialized,
    /// Both inputs present; the view reflects the latest of each.
    Ready,
}

#[derive(Default)]
pub struct RemoteCard {
    config: Option<CardConfig>,
    hass: Option<Arc<dyn Hass + Send + Sync>>,
    view: Option<View>,
}

impl std::fmt::Debug for RemoteCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCard")
            .field("config", &self.config)
            .field("hass", &self.hass.as_ref().map(|_| "<hass>"))
            .field("phase", &self.phase())
            .finish()
    }
}

impl RemoteCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_config(&mut self, config: CardConfig) {
        self.config = Some(config);
        self.render();
    }

    /// Replace the host state object. The previous one is dropped, not merged.
    pub fn set_state(&mut self, hass: Arc<dyn Hass + Send + Sync>) {
        self.hass = Some(hass);
        self.render();
    }

    pub fn preferred_size(&self) -> u32 {
        CARD_SIZE
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    pub fn phase(&self) -> CardPhase {
        if self.view.is_some() {
            CardPhase::Ready
        } else {
            CardPhase::Uninitialized
        }
    }

    /// The current view, or `None` until both inputs have been supplied.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    pub fn to_html(&self) -> String {
        self.view.as_ref().map(View::to_html).unwrap_or_default()
    }

    /// Send `command` to the configured entity.
    ///
    /// Silently does nothing while configuration or state is missing.
    pub fn dispatch_action(&self, command: RemoteCommand) {
        let (Some(config), Some(hass)) = (&self.config, &self.hass) else {
            debug!(%command, "card not ready, ignoring action");
            return;
        };

        let entity_id = config.entity.as_deref();
        info!(%command, entity_id = ?entity_id, "sending remote command");

        hass.call_service(
            SERVICE_DOMAIN,
            SERVICE_NAME,
            serde_json::json!({
                "entity_id": entity_id,
                "command": command,
            }),
        );
    }

    /// A user click on the control bound to `command`.
    ///
    /// Returns false without dispatching when the current view has no such
    /// control (including before the first render).
    pub fn press(&self, command: RemoteCommand) -> bool {
        let bound = self
            .view
            .as_ref()
            .and_then(|view| view.binding(command))
            .is_some();
        if bound {
            self.dispatch_action(command);
        }
        bound
    }

    fn render(&mut self) {
        let (Some(config), Some(hass)) = (&self.config, &self.hass) else {
            return;
        };

        let entity_id = config.entity.as_deref();
        let name = display_name(entity_id.and_then(|id| hass.friendly_name(id)), entity_id);
        self.view = Some(build_view(title_of(name)));
    }
}

/// Friendly name, else entity id, else the placeholder. Empty strings count
/// as missing.
pub fn display_name<'a>(friendly_name: Option<&'a str>, entity_id: Option<&'a str>) -> &'a str {
    friendly_name
        .filter(|s| !s.is_empty())
        .or(entity_id.filter(|s| !s.is_empty()))
        .unwrap_or(PLACEHOLDER_NAME)
}

/// The header shows only the first half of the display name (rounded down,
/// counted in characters).
pub fn title_of(name: &str) -> String {
    let half = name.chars().count() / 2;
    name.chars().take(half).collect()
}

fn build_view(title: String) -> View {
    let header = Element::div("card-header")
        .child(Element::div("card-title").text(title))
        .child(button("power-button", RemoteCommand::Power, Icon::Power));

    let media = Element::div("media-controls")
        .child(button("media-button", RemoteCommand::Rewind, Icon::Rewind))
        .child(button("play-pause", RemoteCommand::PlayPause, Icon::PlayPause))
        .child(button("media-button", RemoteCommand::Forward, Icon::FastForward));

    let dpad = Element::div("dpad")
        .child(
            button("dpad-button", RemoteCommand::Up, Icon::ChevronUp)
                .style("grid-column: 2; grid-row: 1;"),
        )
        .child(
            button("dpad-button", RemoteCommand::Left, Icon::ChevronLeft)
                .style("grid-column: 1; grid-row: 2;"),
        )
        .child(
            Element::div("dpad-center")
                .on_click(RemoteCommand::Ok)
                .child(Element::div("dpad-center-text").text("ok")),
        )
        .child(
            button("dpad-button", RemoteCommand::Right, Icon::ChevronRight)
                .style("grid-column: 3; grid-row: 2;"),
        )
        .child(
            button("dpad-button", RemoteCommand::Down, Icon::ChevronDown)
                .style("grid-column: 2; grid-row: 3;"),
        );

    let nav = Element::div("nav-row")
        .child(button("nav-button", RemoteCommand::Back, Icon::Back))
        .child(button("nav-button", RemoteCommand::Home, Icon::Home))
        .child(button("nav-button", RemoteCommand::Menu, Icon::Menu));

    let voice = Element::div("voice-controls")
        .child(button("voice-button", RemoteCommand::VolumeDown, Icon::VolumeDown))
        .child(button("mic-button", RemoteCommand::VoiceSearch, Icon::Microphone))
        .child(button("voice-button", RemoteCommand::VolumeUp, Icon::VolumeUp));

    let root = Element::new(Tag::HaCard).child(header).child(
        Element::div("remote-container")
            .child(media)
            .child(dpad)
            .child(nav)
            .child(voice),
    );

    View::new(STYLESHEET, root)
}

fn button(class: &'static str, command: RemoteCommand, icon: Icon) -> Element {
    Element::div(class).on_click(command).icon(icon)
}
