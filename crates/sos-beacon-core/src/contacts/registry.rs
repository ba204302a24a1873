use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// A single emergency contact entry.
///
/// Immutable once added to the registry. Uniqueness is not enforced;
/// the same name/number pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Display name of the contact.
    pub name: String,
    /// Phone number (or transport address) of the contact.
    pub number: String,
}

/// Insertion-ordered, append-only collection of emergency contacts.
///
/// Kept in memory for the lifetime of the coordinator; there is no
/// removal and no persistence across restarts.
#[derive(Debug, Default)]
pub struct ContactRegistry {
    entries: Vec<Contact>,
}

impl ContactRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a contact, preserving insertion order.
    ///
    /// Both fields are trimmed before validation. Fails with
    /// [`CoreError::InvalidContact`] if either field is empty after
    /// trimming, leaving the registry unchanged.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn add(&mut self, name: &str, number: &str) -> CoreResult<()> {
        let name = name.trim();
        let number = number.trim();

        if name.is_empty() {
            return Err(CoreError::InvalidContact {
                reason: "contact name is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if number.is_empty() {
            return Err(CoreError::InvalidContact {
                reason: "contact number is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.entries.push(Contact {
            name: name.to_string(),
            number: number.to_string(),
        });

        info!(name = %name, total = self.entries.len(), "Contact added");

        Ok(())
    }

    /// Snapshot of the current entries in insertion order.
    pub fn list(&self) -> Vec<Contact> {
        debug!(count = self.entries.len(), "Contact list read");
        self.entries.clone()
    }

    /// Number of registered contacts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
