use serde::{Deserialize, Serialize};
use super::record::Record;
use super::status::Status;

/// Grouped per-record detail served alongside the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub basic_info: BasicInfo,
    pub metrics: RecordMetrics,
    pub stages: StageCounters,
    pub activities: Activities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub country: Option<String>,
    pub batch: Option<String>,
    pub stage: Option<String>,
    pub program: Option<String>,
    pub status: Option<Status>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetrics {
    pub completion: Option<f64>,
    pub participants: Option<f64>,
    pub progress: Option<f64>,
    pub total_progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCounters {
    pub stage1: Option<f64>,
    pub stage2: Option<f64>,
    pub stage3: Option<f64>,
    pub stage4: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activities {
    pub training: Option<f64>,
    pub workshops: Option<f64>,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        Self {
            basic_info: BasicInfo {
                country: record.country.clone(),
                batch: record.batch.clone(),
                stage: record.stage.clone(),
                program: record.program.clone(),
                status: record.status,
                month: record.month.clone(),
            },
            metrics: RecordMetrics {
                completion: record.completion,
                participants: record.participants,
                progress: record.progress,
                total_progress: record.total_progress,
            },
            stages: StageCounters {
                stage1: record.stage1,
                stage2: record.stage2,
                stage3: record.stage3,
                stage4: record.stage4,
            },
            activities: Activities {
                training: record.training,
                workshops: record.workshops,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_groups_fields() {
        let record = Record {
            country: Some("Canada".into()),
            stage: Some("Training".into()),
            status: Some(Status::Delayed),
            progress: Some(30.0),
            total_progress: Some(55.0),
            stage2: Some(4.0),
            workshops: Some(2.0),
            ..Default::default()
        };

        let value = serde_json::to_value(RecordView::from(&record)).unwrap();
        assert_eq!(value["basicInfo"]["country"], "Canada");
        assert_eq!(value["basicInfo"]["status"], "delayed");
        assert_eq!(value["metrics"]["totalProgress"], 55.0);
        assert_eq!(value["stages"]["stage2"], 4.0);
        assert!(value["stages"]["stage1"].is_null());
        assert_eq!(value["activities"]["workshops"], 2.0);
    }
}
