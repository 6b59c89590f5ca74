//! The fan entity — one per fan-typed hub action.

use std::sync::{Arc, Mutex, MutexGuard};

use nhc_app::ports::fan::FanEntity;
use nhc_app::update_bus::UpdateHandle;
use nhc_domain::device::DeviceInfo;
use nhc_domain::error::NhcError;
use nhc_domain::features::FanFeatures;
use nhc_domain::percentage::percentage_to_ordered_list_item;
use nhc_domain::speed::{FanSpeed, PRESET_MODES};

use crate::DOMAIN;
use crate::config::EntryOptions;
use crate::hub::{Action, NikoHub};

/// A hub fan action surfaced as a host entity.
///
/// Holds a non-owning reference to its action — the hub stays responsible
/// for the action's lifetime. The cached preset name is written here only;
/// action state is written by the hub only.
pub struct NikoFan {
    action: Arc<Action>,
    unique_id: String,
    name: String,
    is_on: bool,
    preset_mode: Mutex<String>,
    supported_features: FanFeatures,
    device_info: DeviceInfo,
    updates: UpdateHandle,
}

impl NikoFan {
    /// Build the entity for `action`, resolving device metadata once.
    ///
    /// # Errors
    ///
    /// Returns [`NhcError::Validation`] when the synthesized device record
    /// fails validation.
    pub fn new(
        action: Arc<Action>,
        hub: &NikoHub,
        options: &EntryOptions,
        updates: UpdateHandle,
    ) -> Result<Self, NhcError> {
        let unique_id = format!("fan-{}", action.action_id());
        let device_info = resolve_device_info(&unique_id, &action, hub, options)?;

        Ok(Self {
            unique_id,
            name: action.name().to_string(),
            is_on: action.is_on(),
            preset_mode: Mutex::new(action.fan_speed().as_preset().to_string()),
            supported_features: FanFeatures::SET_SPEED | FanFeatures::PRESET_MODE,
            device_info,
            updates,
            action,
        })
    }

    /// The backing hub action's id.
    #[must_use]
    pub fn action_id(&self) -> u32 {
        self.action.action_id()
    }

    /// Hub push path: cache the reported state verbatim and ask the host to
    /// re-read this entity. The hub is trusted to send recognized preset
    /// names; nothing is validated here.
    pub fn update_state(&self, state: impl Into<String>) {
        *self.lock_preset_mut() = state.into();
        self.schedule_update();
    }

    fn schedule_update(&self) {
        self.updates.schedule_update(&self.unique_id);
    }

    async fn send_speed(&self, preset: &str) {
        match FanSpeed::from_preset(preset) {
            Some(speed) => self.action.set_fan_speed(speed).await,
            None => tracing::debug!(preset, "ignoring unknown preset mode"),
        }
    }

    fn lock_preset(&self) -> String {
        self.preset_mode
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |g| g.clone())
    }

    fn lock_preset_mut(&self) -> MutexGuard<'_, String> {
        self.preset_mode
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn resolve_device_info(
    unique_id: &str,
    action: &Action,
    hub: &NikoHub,
    options: &EntryOptions,
) -> Result<DeviceInfo, NhcError> {
    if !options.treat_as_device {
        // All such fans collapse onto the controller's own device record.
        return Ok(hub.device_info().clone());
    }

    let (via_domain, via_id) = hub.via_device();
    let mut builder = DeviceInfo::builder()
        .identifier(DOMAIN, unique_id)
        .name(action.name())
        .manufacturer("Niko")
        .model("P.O.M")
        .via_device(via_domain, via_id);
    if options.import_locations {
        builder = builder.suggested_area(action.location());
    }
    builder.build()
}

impl FanEntity for NikoFan {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn preset_mode(&self) -> String {
        self.lock_preset()
    }

    fn preset_modes(&self) -> &'static [&'static str] {
        &PRESET_MODES
    }

    fn supported_features(&self) -> FanFeatures {
        self.supported_features
    }

    /// State arrives by hub push only.
    fn should_poll(&self) -> bool {
        false
    }

    fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    async fn set_percentage(&self, percentage: u8) {
        if let Some(preset) = percentage_to_ordered_list_item(&PRESET_MODES, percentage) {
            self.send_speed(preset).await;
        }
        // The refresh runs even when no command was issued.
        self.schedule_update();
    }

    async fn set_preset_mode(&self, preset_mode: &str) {
        self.send_speed(preset_mode).await;
        // The refresh runs even when no command was issued.
        self.schedule_update();
    }
}
