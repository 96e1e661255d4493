use crate::estimate::{estimate, ScanEstimate};
use crate::targets;
use assetscan_api::{Result as ApiResult, ScanJobRequest};
use assetscan_core::{ScanSettings, Schedule, TargetSpec};

/// Scan configuration as entered by the operator, before parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanDraft {
    /// Job name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Comma-separated addresses
    pub raw_addresses: String,
    /// Comma-separated CIDR blocks and ranges
    pub raw_segments: String,
    /// Whether the job repeats
    pub recurring: bool,
    /// Recurrence for recurring jobs
    pub schedule: Schedule,
    /// Feature toggles
    pub settings: ScanSettings,
}

impl ScanDraft {
    /// Draft with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parsed targets.
    #[must_use]
    pub fn targets(&self) -> TargetSpec {
        targets::parse(&self.raw_addresses, &self.raw_segments)
    }

    /// Estimate for the current field values.
    #[must_use]
    pub fn estimate(&self) -> ScanEstimate {
        estimate(&self.targets(), &self.settings)
    }

    /// Build and validate the request.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`](assetscan_api::ApiError::InvalidRequest)
    /// when the draft is incomplete.
    pub fn into_request(self) -> ApiResult<ScanJobRequest> {
        let targets = self.targets();
        let request = ScanJobRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            targets,
            recurring: self.recurring,
            schedule: if self.recurring {
                self.schedule
            } else {
                Schedule::None
            },
            settings: self.settings,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscan_api::ApiError;

    #[test]
    fn test_into_request_parses_fields() {
        let draft = ScanDraft {
            raw_addresses: "10.0.0.1, 10.0.0.2".to_string(),
            raw_segments: "192.168.1.0/24".to_string(),
            description: "  office  ".to_string(),
            ..ScanDraft::new(" Office sweep ")
        };
        let request = draft.into_request().expect("valid draft");
        assert_eq!(request.name, "Office sweep");
        assert_eq!(request.description, "office");
        assert_eq!(request.targets.addresses.len(), 2);
        assert_eq!(request.targets.segments, vec!["192.168.1.0/24"]);
        assert_eq!(request.schedule, Schedule::None);
    }

    #[test]
    fn test_schedule_dropped_for_one_off() {
        let draft = ScanDraft {
            raw_addresses: "10.0.0.1".to_string(),
            schedule: Schedule::Daily,
            ..ScanDraft::new("one-off")
        };
        assert_eq!(draft.into_request().unwrap().schedule, Schedule::None);
    }

    #[test]
    fn test_recurring_without_schedule_rejected() {
        let draft = ScanDraft {
            raw_addresses: "10.0.0.1".to_string(),
            recurring: true,
            ..ScanDraft::new("nightly")
        };
        assert!(matches!(
            draft.into_request(),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_empty_targets_rejected() {
        let draft = ScanDraft {
            raw_addresses: " , ".to_string(),
            ..ScanDraft::new("nothing")
        };
        assert!(draft.into_request().is_err());
    }

    #[test]
    fn test_estimate_uses_default_settings() {
        let draft = ScanDraft {
            raw_segments: "10.0.0.1-10".to_string(),
            ..ScanDraft::new("range")
        };
        let est = draft.estimate();
        assert_eq!(est.total_targets, 10);
        // four features enabled by default: 10 * 2 * 1.8
        assert_eq!(est.duration_label, "~36 seconds");
    }
}
