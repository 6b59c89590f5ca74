//! In-memory model of a Niko Home Control hub connection.
//!
//! The hub owns the controller's action list and routes state pushes to the
//! entities registered against it. Outbound commands leave through a bounded
//! channel whose receiving half belongs to the embedding transport; this
//! module stops at that boundary.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use nhc_domain::device::DeviceInfo;
use nhc_domain::error::{NhcError, NotFoundError};
use nhc_domain::speed::FanSpeed;

use crate::DOMAIN;
use crate::fan::NikoFan;

/// Capacity of the outbound command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Integer type tag the controller attaches to every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Relay = 1,
    Dimmer = 2,
    Fan = 3,
    Cover = 4,
}

impl ActionType {
    /// Decode the controller's integer tag. Unknown tags have no type.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Relay),
            2 => Some(Self::Dimmer),
            3 => Some(Self::Fan),
            4 => Some(Self::Cover),
            _ => None,
        }
    }
}

/// One row of the controller's action enumeration.
///
/// `is_on` and `speed` carry the state reported at enumeration time; the
/// speed is only meaningful for fan-typed actions.
#[derive(Debug, Clone)]
pub struct ActionInfo {
    pub action_id: u32,
    pub name: String,
    pub location: String,
    pub action_type: ActionType,
    pub is_on: bool,
    pub speed: FanSpeed,
}

/// Command for the transport task to deliver to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubCommand {
    /// Switch a fan action to a discrete speed.
    SetFanSpeed { action_id: u32, speed: FanSpeed },
}

/// Mutable half of an action. Written by the hub only.
#[derive(Debug, Clone)]
struct ActionState {
    is_on: bool,
    speed: FanSpeed,
}

/// One controllable output on the hub.
///
/// Identity fields never change. The state pair is written by the hub when
/// the controller reports a change and only read by entities — the two
/// write domains stay disjoint.
#[derive(Debug)]
pub struct Action {
    action_id: u32,
    name: String,
    location: String,
    action_type: ActionType,
    state: Mutex<ActionState>,
    commands: mpsc::Sender<HubCommand>,
}

impl Action {
    fn new(info: ActionInfo, commands: mpsc::Sender<HubCommand>) -> Self {
        Self {
            action_id: info.action_id,
            name: info.name,
            location: info.location,
            action_type: info.action_type,
            state: Mutex::new(ActionState {
                is_on: info.is_on,
                speed: info.speed,
            }),
            commands,
        }
    }

    #[must_use]
    pub fn action_id(&self) -> u32 {
        self.action_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.lock_state().is_on
    }

    #[must_use]
    pub fn fan_speed(&self) -> FanSpeed {
        self.lock_state().speed
    }

    /// Ask the controller to switch this output to `speed`.
    ///
    /// Issues exactly one command. Delivery is the transport's concern — a
    /// closed channel drops the command silently.
    pub async fn set_fan_speed(&self, speed: FanSpeed) {
        let command = HubCommand::SetFanSpeed {
            action_id: self.action_id,
            speed,
        };
        if self.commands.send(command).await.is_err() {
            tracing::debug!(
                action_id = self.action_id,
                "command channel closed, command dropped"
            );
        }
    }

    fn apply_speed(&self, speed: FanSpeed) {
        self.lock_state_mut().speed = speed;
    }

    fn lock_state(&self) -> ActionState {
        self.state
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |g| g.clone())
    }

    fn lock_state_mut(&self) -> MutexGuard<'_, ActionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// The gateway object representing one physical controller.
pub struct NikoHub {
    controller_id: String,
    actions: Vec<Arc<Action>>,
    entities: Mutex<Vec<Arc<NikoFan>>>,
    device_info: DeviceInfo,
}

impl NikoHub {
    /// Build a hub from the controller's action enumeration.
    ///
    /// Returns the hub and the receiving half of the outbound command
    /// channel, which the embedding transport drains.
    ///
    /// # Errors
    ///
    /// Returns [`NhcError::Validation`] when `name` is empty.
    pub fn new(
        controller_id: impl Into<String>,
        name: impl Into<String>,
        infos: Vec<ActionInfo>,
    ) -> Result<(Self, mpsc::Receiver<HubCommand>), NhcError> {
        let controller_id = controller_id.into();
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let device_info = DeviceInfo::builder()
            .identifier(DOMAIN, controller_id.as_str())
            .name(name)
            .manufacturer("Niko")
            .model("Connected Controller")
            .build()?;

        let actions = infos
            .into_iter()
            .map(|info| Arc::new(Action::new(info, tx.clone())))
            .collect();

        Ok((
            Self {
                controller_id,
                actions,
                entities: Mutex::new(Vec::new()),
                device_info,
            },
            rx,
        ))
    }

    /// The controller's actions, in enumeration order.
    #[must_use]
    pub fn actions(&self) -> &[Arc<Action>] {
        &self.actions
    }

    /// Shared fallback device record for entities not treated as devices.
    #[must_use]
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// `(domain, id)` link entities use to point at this controller.
    #[must_use]
    pub fn via_device(&self) -> (String, String) {
        (DOMAIN.to_string(), self.controller_id.clone())
    }

    /// Register an entity for state routing.
    pub fn register_entity(&self, entity: Arc<NikoFan>) {
        self.lock_entities().push(entity);
    }

    /// Snapshot of the registered entities.
    #[must_use]
    pub fn entities(&self) -> Vec<Arc<NikoFan>> {
        self.lock_entities().clone()
    }

    /// Route a state push from the controller.
    ///
    /// Updates the action's stored speed, then forwards the matching preset
    /// name to every entity registered for that action. No command is
    /// issued on this path.
    ///
    /// # Errors
    ///
    /// Returns [`NhcError::NotFound`] for an unknown `action_id`.
    pub fn dispatch_state(&self, action_id: u32, speed: FanSpeed) -> Result<(), NhcError> {
        let action = self
            .actions
            .iter()
            .find(|action| action.action_id() == action_id)
            .ok_or_else(|| NotFoundError {
                entity: "Action",
                id: action_id.to_string(),
            })?;

        action.apply_speed(speed);

        let entities = self.lock_entities();
        for entity in entities.iter().filter(|e| e.action_id() == action_id) {
            entity.update_state(speed.as_preset());
        }
        tracing::debug!(action_id, state = %speed, "state push dispatched");
        Ok(())
    }

    fn lock_entities(&self) -> MutexGuard<'_, Vec<Arc<NikoFan>>> {
        self.entities
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan_info(action_id: u32) -> ActionInfo {
        ActionInfo {
            action_id,
            name: format!("Fan {action_id}"),
            location: "Bathroom".to_string(),
            action_type: ActionType::Fan,
            is_on: true,
            speed: FanSpeed::Low,
        }
    }

    #[test]
    fn should_decode_known_action_type_tags() {
        assert_eq!(ActionType::from_code(1), Some(ActionType::Relay));
        assert_eq!(ActionType::from_code(2), Some(ActionType::Dimmer));
        assert_eq!(ActionType::from_code(3), Some(ActionType::Fan));
        assert_eq!(ActionType::from_code(4), Some(ActionType::Cover));
        assert_eq!(ActionType::from_code(9), None);
    }

    #[test]
    fn should_expose_actions_in_enumeration_order() {
        let (hub, _rx) = NikoHub::new(
            "controller-1",
            "Niko Home Control",
            vec![fan_info(5), fan_info(2), fan_info(9)],
        )
        .unwrap();

        let ids: Vec<u32> = hub.actions().iter().map(|a| a.action_id()).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn should_build_shared_device_record_for_the_controller() {
        let (hub, _rx) = NikoHub::new("controller-1", "Niko Home Control", vec![]).unwrap();

        let info = hub.device_info();
        assert_eq!(
            info.identifiers,
            vec![(DOMAIN.to_string(), "controller-1".to_string())]
        );
        assert_eq!(info.name, "Niko Home Control");
        assert_eq!(info.manufacturer.as_deref(), Some("Niko"));
        assert_eq!(info.model.as_deref(), Some("Connected Controller"));
        assert_eq!(
            hub.via_device(),
            (DOMAIN.to_string(), "controller-1".to_string())
        );
    }

    #[test]
    fn should_reject_empty_controller_name() {
        let result = NikoHub::new("controller-1", "", vec![]);
        assert!(matches!(result, Err(NhcError::Validation(_))));
    }

    #[tokio::test]
    async fn should_issue_exactly_one_command_per_speed_request() {
        let (hub, mut rx) = NikoHub::new("c", "Niko Home Control", vec![fan_info(1)]).unwrap();

        hub.actions()[0].set_fan_speed(FanSpeed::High).await;

        assert_eq!(
            rx.try_recv().unwrap(),
            HubCommand::SetFanSpeed {
                action_id: 1,
                speed: FanSpeed::High
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_drop_commands_when_transport_is_gone() {
        let (hub, rx) = NikoHub::new("c", "Niko Home Control", vec![fan_info(1)]).unwrap();
        drop(rx);

        hub.actions()[0].set_fan_speed(FanSpeed::Low).await;
    }

    #[test]
    fn should_update_action_speed_on_dispatch() {
        let (hub, _rx) = NikoHub::new("c", "Niko Home Control", vec![fan_info(1)]).unwrap();

        hub.dispatch_state(1, FanSpeed::VeryHigh).unwrap();

        assert_eq!(hub.actions()[0].fan_speed(), FanSpeed::VeryHigh);
    }

    #[test]
    fn should_return_not_found_for_unknown_action() {
        let (hub, _rx) = NikoHub::new("c", "Niko Home Control", vec![fan_info(1)]).unwrap();

        let result = hub.dispatch_state(99, FanSpeed::Low);
        assert!(matches!(result, Err(NhcError::NotFound(_))));
    }

    #[test]
    fn should_keep_identity_fields_stable() {
        let (hub, _rx) = NikoHub::new("c", "Niko Home Control", vec![fan_info(7)]).unwrap();

        let action = &hub.actions()[0];
        assert_eq!(action.action_id(), 7);
        assert_eq!(action.name(), "Fan 7");
        assert_eq!(action.location(), "Bathroom");
        assert_eq!(action.action_type(), ActionType::Fan);
        assert!(action.is_on());
        assert_eq!(action.fan_speed(), FanSpeed::Low);
    }
}
