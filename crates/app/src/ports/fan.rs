//! The fan-entity contract a platform implements.

use std::future::Future;

use nhc_domain::device::DeviceInfo;
use nhc_domain::features::FanFeatures;

/// One controllable fan surfaced to the host.
///
/// Property getters are synchronous reads of display state. The two command
/// handlers are async — they end in a hub command send. New state comes back
/// through the platform's own push path, never through return values here.
pub trait FanEntity: Send + Sync {
    /// Stable identifier, unique across the integration.
    fn unique_id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// On/off flag mirrored from the underlying output.
    fn is_on(&self) -> bool;

    /// The currently active preset-mode name.
    fn preset_mode(&self) -> String;

    /// The fixed ordered list of preset-mode names, ascending by speed.
    fn preset_modes(&self) -> &'static [&'static str];

    /// Capability flags advertised to the host.
    fn supported_features(&self) -> FanFeatures;

    /// Whether the host should poll this entity for state. Push-only
    /// entities return `false`.
    fn should_poll(&self) -> bool {
        true
    }

    /// Device-registry metadata, resolved once at construction.
    fn device_info(&self) -> &DeviceInfo;

    /// Apply a percentage in `[0, 100]` by snapping it to a preset.
    fn set_percentage(&self, percentage: u8) -> impl Future<Output = ()> + Send;

    /// Apply a preset by name. Unrecognized names are ignored.
    fn set_preset_mode(&self, preset_mode: &str) -> impl Future<Output = ()> + Send;
}
