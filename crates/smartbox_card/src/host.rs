//! Narrow view of the dashboard host.
//!
//! The card only ever reads `states[id].attributes.friendly_name` and calls
//! `call_service`, so that is all these traits expose.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Attributes of an entity state record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Display name of the entity, if the host knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// Everything else the host attaches; carried along untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single entity's state record as pushed by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,
}

impl EntityState {
    pub fn with_friendly_name(name: impl Into<String>) -> Self {
        Self {
            state: None,
            attributes: Attributes {
                friendly_name: Some(name.into()),
                extra: serde_json::Map::new(),
            },
        }
    }
}

/// Mapping of entity id to state record. Replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    entities: HashMap<String, EntityState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.entities.insert(entity_id.into(), state);
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.entities.get(entity_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<(String, EntityState)> for StateSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, EntityState)>>(iter: T) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

/// Read access to the host's live entity states.
pub trait StateProvider {
    /// `friendly_name` attribute of `entity_id`, if the entity exists and has one.
    fn friendly_name(&self, entity_id: &str) -> Option<&str>;
}

impl StateProvider for StateSnapshot {
    fn friendly_name(&self, entity_id: &str) -> Option<&str> {
        self.get(entity_id)?.attributes.friendly_name.as_deref()
    }
}

/// The host's generic service-call mechanism.
///
/// Calls are fire-and-forget: delivery failures belong to the host.
pub trait ServiceDispatcher {
    fn call_service(&self, domain: &str, service: &str, data: serde_json::Value);
}

/// Everything the card needs from the host object.
pub trait Hass: StateProvider + ServiceDispatcher {}

impl<T: StateProvider + ServiceDispatcher + ?Sized> Hass for T {}

/// A recorded service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: serde_json::Value,
}

impl ServiceCall {
    pub fn new(domain: &str, service: &str, data: serde_json::Value) -> Self {
        Self {
            domain: domain.to_string(),
            service: service.to_string(),
            data,
        }
    }
}
