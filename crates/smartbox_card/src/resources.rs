//! Dashboard resource registration for the card's frontend module.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// URL the card module is served from.
pub const CARD_RESOURCE_URL: &str = "/static/neo_smartbox-card.js";

/// The card's frontend module, served at [`CARD_RESOURCE_URL`].
pub const CARD_MODULE: &str = include_str!("../assets/neo_smartbox-card.js");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    /// Resources are managed by the dashboard's own store.
    #[default]
    Storage,
    /// Resources are listed by hand in the dashboard YAML.
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
    pub res_type: String,
}

/// The dashboard's resource list.
///
/// Items saved by the dashboard are only visible once the store is loaded.
#[derive(Debug, Default, Serialize)]
pub struct ResourceStore {
    pub mode: DashboardMode,
    #[serde(skip)]
    loaded: bool,
    #[serde(skip)]
    saved: Vec<Resource>,
    items: Vec<Resource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOutcome {
    Created,
    AlreadyPresent,
    ManualSetupRequired,
}

impl ResourceStore {
    /// An unloaded store backed by the dashboard's `saved` resources.
    pub fn new(mode: DashboardMode, saved: Vec<Resource>) -> Self {
        Self {
            mode,
            loaded: false,
            saved,
            items: Vec::new(),
        }
    }

    /// A storage-mode store that already holds `items`.
    pub fn with_items(items: Vec<Resource>) -> Self {
        Self {
            mode: DashboardMode::Storage,
            loaded: true,
            saved: Vec::new(),
            items,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    fn load(&mut self) {
        debug!(count = self.saved.len(), "loading dashboard resources");
        self.items.append(&mut self.saved);
        self.loaded = true;
    }
}

/// Make sure the dashboard loads the card module.
///
/// In storage mode the resource is created once and never duplicated. In YAML
/// mode nothing is written. The manual entry is logged in both modes.
pub fn register_card_resource(store: &mut ResourceStore) -> ResourceOutcome {
    info!(
        "card module served at {url}; in YAML mode add it to the dashboard resources:\n  - url: {url}\n    type: module",
        url = CARD_RESOURCE_URL
    );

    if store.mode == DashboardMode::Yaml {
        return ResourceOutcome::ManualSetupRequired;
    }

    if !store.is_loaded() {
        store.load();
    }

    if store.items.iter().any(|item| item.url == CARD_RESOURCE_URL) {
        return ResourceOutcome::AlreadyPresent;
    }

    store.items.push(Resource {
        url: CARD_RESOURCE_URL.to_string(),
        res_type: "module".to_string(),
    });
    ResourceOutcome::Created
}
