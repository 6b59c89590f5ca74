//! Per-entry configuration for the fan platform.

use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Everything the platform reads from one stored configuration entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Per-category toggles for entity creation.
    pub enabled_entities: EnabledEntities,
    /// User options attached to the entry.
    pub options: EntryOptions,
}

impl EntryConfig {
    /// Deserialize from the host's stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error when the stored value does not
    /// match the expected shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Per-category toggles for entity creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnabledEntities {
    /// Create fan entities for fan-typed actions.
    pub fans: bool,
}

impl Default for EnabledEntities {
    fn default() -> Self {
        Self { fans: true }
    }
}

/// User options attached to the entry.
///
/// Both flags default to `true`; turning a behavior off takes an explicit
/// `false` in the stored entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryOptions {
    /// Surface each fan as its own device, linked to the controller.
    #[serde(rename = "treatAsDevice", default = "default_true")]
    pub treat_as_device: bool,
    /// Copy the action's location into the device's suggested area.
    #[serde(rename = "importLocations", default = "default_true")]
    pub import_locations: bool,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            treat_as_device: true,
            import_locations: true,
        }
    }
}
