//! Card registry.
//!
//! Mirrors the two host-side listings a custom card has to appear in: the
//! element registry (name -> definition) and the card-picker listing that
//! dashboard tooling reads. Registration is keyed by element name and is
//! idempotent; a second registration only logs a warning.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::sync::Mutex;

use linkme::distributed_slice;
use serde::Serialize;
use tracing::info;
use tracing::warn;

/// Cards compiled into this crate. Each entry builds its descriptor.
#[distributed_slice]
pub static CARDS: [fn() -> CardDescriptor];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDescriptor {
    /// Custom element name, e.g. `neo-smartbox-remote-card`.
    pub element: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the picker may render a live preview.
    pub preview: bool,
}

impl CardDescriptor {
    pub fn picker_entry(&self) -> CustomCard {
        CustomCard {
            card_type: self.element.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            preview: self.preview,
        }
    }
}

/// An entry in the card-picker listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomCard {
    #[serde(rename = "type")]
    pub card_type: String,
    pub name: String,
    pub description: String,
    pub preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    AlreadyRegistered,
}

#[derive(Debug, Default)]
pub struct CardRegistry {
    elements: BTreeMap<&'static str, CardDescriptor>,
    custom_cards: Vec<CustomCard>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every card in [`CARDS`].
    pub fn with_builtin_cards() -> Self {
        let mut registry = Self::new();
        for descriptor in CARDS {
            registry.register(descriptor());
        }
        registry
    }

    pub fn register(&mut self, descriptor: CardDescriptor) -> Registration {
        if self.elements.contains_key(descriptor.element) {
            warn!(element = descriptor.element, "card already registered");
            return Registration::AlreadyRegistered;
        }

        info!(element = descriptor.element, "card registered");
        self.custom_cards.push(descriptor.picker_entry());
        self.elements.insert(descriptor.element, descriptor);
        Registration::Registered
    }

    pub fn get(&self, element: &str) -> Option<&CardDescriptor> {
        self.elements.get(element)
    }

    pub fn is_registered(&self, element: &str) -> bool {
        self.elements.contains_key(element)
    }

    /// The picker listing, in registration order.
    pub fn custom_cards(&self) -> &[CustomCard] {
        &self.custom_cards
    }
}

static GLOBAL: LazyLock<Mutex<CardRegistry>> = LazyLock::new(Mutex::default);

/// The process-wide registry.
pub fn global() -> &'static Mutex<CardRegistry> {
    &GLOBAL
}

/// Register `descriptor` in the process-wide registry.
pub fn register_global(descriptor: CardDescriptor) -> Registration {
    // Mutations are a presence check plus one push/insert, so a poisoned
    // registry is still consistent.
    let mut registry = GLOBAL.lock().unwrap_or_else(|e| e.into_inner());
    registry.register(descriptor)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::card::ELEMENT_NAME;

    fn descriptor(element: &'static str) -> CardDescriptor {
        CardDescriptor {
            element,
            name: "Test Card",
            description: "A card for tests.",
            preview: false,
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_register_twice_warns_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut registry = CardRegistry::new();
        let (first, second) = tracing::subscriber::with_default(subscriber, || {
            (
                registry.register(descriptor("test-card")),
                registry.register(descriptor("test-card")),
            )
        });

        assert_eq!(first, Registration::Registered);
        assert_eq!(second, Registration::AlreadyRegistered);
        assert_eq!(registry.custom_cards().len(), 1);
        assert!(registry.is_registered("test-card"));
        assert!(!registry.is_registered("other-card"));

        let logs = captured.contents();
        assert_eq!(logs.matches("card already registered").count(), 1);
        assert!(logs.contains("WARN"));
    }

    #[test]
    fn test_picker_entry_serializes_type() {
        let json = serde_json::to_value(descriptor("test-card").picker_entry()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "test-card",
                "name": "Test Card",
                "description": "A card for tests.",
                "preview": false,
            })
        );
    }

    #[test]
    fn test_builtin_cards_include_remote() {
        let registry = CardRegistry::with_builtin_cards();
        let remote = registry.get(ELEMENT_NAME).unwrap();
        assert_eq!(remote.name, "NEO Smartbox Remote");
        assert!(remote.preview);
        assert_eq!(registry.custom_cards()[0].card_type, ELEMENT_NAME);
    }

    #[test]
    fn test_global_registration_is_idempotent() {
        let element = "global-test-card";
        let first = register_global(descriptor(element));
        let second = register_global(descriptor(element));

        assert_eq!(first, Registration::Registered);
        assert_eq!(second, Registration::AlreadyRegistered);

        let registry = global().lock().unwrap();
        let entries = registry
            .custom_cards()
            .iter()
            .filter(|c| c.card_type == element)
            .count();
        assert_eq!(entries, 1);
    }
}
