use serde::{Deserialize, Serialize};
use crate::errors::DashboardError;
use super::status::Status;

/// One participant-stage document for a month/country/stage combination.
///
/// Every field is optional at the storage boundary: imported sheets are
/// sparse, and the aggregator handles gaps instead of rejecting rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub month: Option<String>,
    pub country: Option<String>,
    pub batch: Option<String>,
    pub stage: Option<String>,
    pub program: Option<String>,
    /// Assigned by whoever produced the record, never by the aggregator.
    pub status: Option<Status>,
    /// 0-100 contribution to overall progress.
    pub progress: Option<f64>,
    pub participants: Option<f64>,
    pub training: Option<f64>,
    pub workshops: Option<f64>,
    pub completion: Option<f64>,
    pub stage1: Option<f64>,
    pub stage2: Option<f64>,
    pub stage3: Option<f64>,
    pub stage4: Option<f64>,
    pub total_progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Record {
    /// Numeric columns in storage order, paired with their wire names.
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("progress", self.progress),
            ("participants", self.participants),
            ("training", self.training),
            ("workshops", self.workshops),
            ("completion", self.completion),
            ("stage1", self.stage1),
            ("stage2", self.stage2),
            ("stage3", self.stage3),
            ("stage4", self.stage4),
            ("totalProgress", self.total_progress),
        ]
    }

    /// Checks a manually entered record before it reaches the store.
    ///
    /// Manual entry is stricter than bulk import: the stage must be named
    /// and progress must sit within 0-100.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.stage.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(DashboardError::InvalidRecord("stage is required".into()));
        }

        for (name, value) in self.numeric_fields() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(DashboardError::InvalidRecord(format!("{} must be a finite number", name)));
                }
            }
        }

        if let Some(progress) = self.progress {
            if !(0.0..=100.0).contains(&progress) {
                return Err(DashboardError::InvalidRecord(format!(
                    "progress must be between 0 and 100, got {}",
                    progress
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> Record {
        Record {
            month: Some("2024-03".into()),
            country: Some("UAE".into()),
            stage: Some("Onboarding".into()),
            status: Some(Status::OnTrack),
            progress: Some(45.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let record = Record { total_progress: Some(80.0), ..base_record() };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["totalProgress"], 80.0);
        assert_eq!(value["status"], "onTrack");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_record_rejects_unknown_status_in_json() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"stage":"Training","status":"late"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        assert!(base_record().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_stage() {
        let record = Record { stage: None, ..base_record() };
        assert!(matches!(record.validate(), Err(DashboardError::InvalidRecord(_))));

        let record = Record { stage: Some("  ".into()), ..base_record() };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_progress_range() {
        let record = Record { progress: Some(120.0), ..base_record() };
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("between 0 and 100"));

        let record = Record { progress: Some(100.0), ..base_record() };
        assert!(record.validate().is_ok());
    }
}
