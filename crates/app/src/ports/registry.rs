//! Entity registration — how a platform hands its entities to the host.

use std::sync::Arc;

use crate::ports::fan::FanEntity;

/// Callback surface a platform invokes exactly once per setup, with every
/// entity it constructed.
///
/// `request_initial_update` asks the host to read each entity's state right
/// after registration instead of waiting for the first push.
pub trait EntityRegistry<E: FanEntity> {
    fn add_entities(&mut self, entities: Vec<Arc<E>>, request_initial_update: bool);
}

/// Plain closures work as registries, which keeps wiring and tests short.
impl<E: FanEntity, F> EntityRegistry<E> for F
where
    F: FnMut(Vec<Arc<E>>, bool),
{
    fn add_entities(&mut self, entities: Vec<Arc<E>>, request_initial_update: bool) {
        self(entities, request_initial_update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhc_domain::device::DeviceInfo;
    use nhc_domain::features::FanFeatures;

    struct StubFan {
        device_info: DeviceInfo,
    }

    impl StubFan {
        fn new() -> Self {
            Self {
                device_info: DeviceInfo::builder()
                    .identifier("stub", "fan-0")
                    .name("Stub fan")
                    .build()
                    .unwrap(),
            }
        }
    }

    impl FanEntity for StubFan {
        fn unique_id(&self) -> &str {
            "fan-0"
        }

        fn name(&self) -> &str {
            "Stub fan"
        }

        fn is_on(&self) -> bool {
            false
        }

        fn preset_mode(&self) -> String {
            "low".to_string()
        }

        fn preset_modes(&self) -> &'static [&'static str] {
            &["low"]
        }

        fn supported_features(&self) -> FanFeatures {
            FanFeatures::empty()
        }

        fn device_info(&self) -> &DeviceInfo {
            &self.device_info
        }

        async fn set_percentage(&self, _percentage: u8) {}

        async fn set_preset_mode(&self, _preset_mode: &str) {}
    }

    #[test]
    fn should_accept_a_closure_as_registry() {
        let mut received = Vec::new();
        let mut initial_update = false;
        {
            let mut registry = |entities: Vec<Arc<StubFan>>, request: bool| {
                received = entities;
                initial_update = request;
            };
            registry.add_entities(vec![Arc::new(StubFan::new())], true);
        }
        assert_eq!(received.len(), 1);
        assert!(initial_update);
    }

    #[test]
    fn should_poll_by_default() {
        let fan = StubFan::new();
        assert!(fan.should_poll());
    }
}
