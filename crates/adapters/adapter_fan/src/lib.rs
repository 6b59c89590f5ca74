//! # nhc-adapter-fan
//!
//! Niko Home Control fan platform — exposes the hub's fan-typed actions as
//! host fan entities.
//!
//! ## How it works
//!
//! [`setup_entry`] walks the hub's action list and builds one [`NikoFan`]
//! per fan-typed action, registering each with the hub (for push routing)
//! and handing the full list to the host's registration callback. Speed
//! commands translate the host's percentage / preset vocabulary onto the
//! hub's four discrete codes; state pushes travel the other way through
//! [`NikoHub::dispatch_state`].
//!
//! ## Dependency rule
//!
//! Depends on `nhc-app` (port traits) and `nhc-domain` only.

pub mod config;
mod fan;
pub mod hub;

pub use config::{EnabledEntities, EntryConfig, EntryOptions};
pub use fan::NikoFan;
pub use hub::{Action, ActionInfo, ActionType, HubCommand, NikoHub};

use std::sync::Arc;

use nhc_app::ports::registry::EntityRegistry;
use nhc_app::update_bus::UpdateHandle;
use nhc_domain::error::NhcError;

/// Integration domain prefix used in unique ids and device identifiers.
pub const DOMAIN: &str = "niko_home_control";

/// Build and register one fan entity per fan-typed hub action.
///
/// Skipped entirely when the entry disables the fan category — the registry
/// callback is then never invoked. Otherwise every constructed entity is
/// appended to the hub's routing list and passed to `registry` in a single
/// call with an initial state fetch requested; zero matching actions is a
/// valid, empty registration.
///
/// # Errors
///
/// Returns [`NhcError::Validation`] when device metadata for an action
/// cannot be built.
pub fn setup_entry<R>(
    hub: &NikoHub,
    config: &EntryConfig,
    updates: &UpdateHandle,
    registry: &mut R,
) -> Result<(), NhcError>
where
    R: EntityRegistry<NikoFan>,
{
    if !config.enabled_entities.fans {
        tracing::debug!("fan entities disabled for this entry, skipping setup");
        return Ok(());
    }

    let mut entities = Vec::new();
    for action in hub.actions() {
        if action.action_type() != ActionType::Fan {
            continue;
        }
        let entity = Arc::new(NikoFan::new(
            Arc::clone(action),
            hub,
            &config.options,
            updates.clone(),
        )?);
        hub.register_entity(Arc::clone(&entity));
        entities.push(entity);
    }

    tracing::info!(count = entities.len(), "fan entities registered");
    registry.add_entities(entities, true);
    Ok(())
}
