//! Device metadata surfaced to the host's device registry.

use serde::{Deserialize, Serialize};

use crate::error::{NhcError, ValidationError};

/// Registry metadata describing the device an entity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// `(domain, id)` pairs uniquely naming the device.
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    /// Link to the bridge/gateway device this one is reached through.
    pub via_device: Option<(String, String)>,
    /// Area hint picked up from the controller's location data.
    pub suggested_area: Option<String>,
}

impl DeviceInfo {
    /// Create a builder for constructing a [`DeviceInfo`].
    #[must_use]
    pub fn builder() -> DeviceInfoBuilder {
        DeviceInfoBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NhcError::Validation`] when `name` is empty or no
    /// identifier was given.
    pub fn validate(&self) -> Result<(), NhcError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.identifiers.is_empty() {
            return Err(ValidationError::NoIdentifiers.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceInfo`].
#[derive(Debug, Default)]
pub struct DeviceInfoBuilder {
    identifiers: Vec<(String, String)>,
    name: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
    via_device: Option<(String, String)>,
    suggested_area: Option<String>,
}

impl DeviceInfoBuilder {
    /// Add one `(domain, id)` identifier pair.
    #[must_use]
    pub fn identifier(mut self, domain: impl Into<String>, id: impl Into<String>) -> Self {
        self.identifiers.push((domain.into(), id.into()));
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Link to the gateway device this one is reached through.
    #[must_use]
    pub fn via_device(mut self, domain: impl Into<String>, id: impl Into<String>) -> Self {
        self.via_device = Some((domain.into(), id.into()));
        self
    }

    #[must_use]
    pub fn suggested_area(mut self, area: impl Into<String>) -> Self {
        self.suggested_area = Some(area.into());
        self
    }

    /// Build and validate the record.
    ///
    /// # Errors
    ///
    /// Returns [`NhcError::Validation`] when invariants fail.
    pub fn build(self) -> Result<DeviceInfo, NhcError> {
        let info = DeviceInfo {
            identifiers: self.identifiers,
            name: self.name.unwrap_or_default(),
            manufacturer: self.manufacturer,
            model: self.model,
            via_device: self.via_device,
            suggested_area: self.suggested_area,
        };
        info.validate()?;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_a_full_record() {
        let info = DeviceInfo::builder()
            .identifier("niko_home_control", "fan-1")
            .name("Bathroom fan")
            .manufacturer("Niko")
            .model("P.O.M")
            .via_device("niko_home_control", "controller-1")
            .suggested_area("Bathroom")
            .build()
            .unwrap();

        assert_eq!(
            info.identifiers,
            vec![("niko_home_control".to_string(), "fan-1".to_string())]
        );
        assert_eq!(info.name, "Bathroom fan");
        assert_eq!(info.manufacturer.as_deref(), Some("Niko"));
        assert_eq!(info.model.as_deref(), Some("P.O.M"));
        assert_eq!(
            info.via_device,
            Some(("niko_home_control".to_string(), "controller-1".to_string()))
        );
        assert_eq!(info.suggested_area.as_deref(), Some("Bathroom"));
    }

    #[test]
    fn should_leave_optional_fields_unset() {
        let info = DeviceInfo::builder()
            .identifier("niko_home_control", "fan-2")
            .name("Attic fan")
            .build()
            .unwrap();

        assert_eq!(info.manufacturer, None);
        assert_eq!(info.via_device, None);
        assert_eq!(info.suggested_area, None);
    }

    #[test]
    fn should_reject_empty_name() {
        let result = DeviceInfo::builder()
            .identifier("niko_home_control", "fan-3")
            .build();
        assert!(matches!(result, Err(NhcError::Validation(_))));
    }

    #[test]
    fn should_reject_missing_identifiers() {
        let result = DeviceInfo::builder().name("Nameless").build();
        assert!(matches!(result, Err(NhcError::Validation(_))));
    }

    #[test]
    fn should_compare_records_by_value() {
        let build = || {
            DeviceInfo::builder()
                .identifier("niko_home_control", "fan-4")
                .name("Hallway fan")
                .build()
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let info = DeviceInfo::builder()
            .identifier("niko_home_control", "fan-5")
            .name("Kitchen fan")
            .manufacturer("Niko")
            .build()
            .unwrap();
        let json = serde_json::to_string(&info).unwrap();
        let parsed: DeviceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, info);
    }
}
