use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};
use crate::db::Database;
use crate::errors::DashboardError;
use crate::models::{Record, Status};
use super::schema::ROW_SCHEMA;

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month pattern"));

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Rows whose key already existed with identical values.
    pub unchanged: usize,
    /// Rows whose status text matched no known status and was dropped.
    pub coerced_statuses: usize,
    /// Rows whose month is not `YYYY-MM`. They are still imported.
    pub nonstandard_months: usize,
    /// Rows whose progress fell outside 0-100 and was clamped.
    pub clamped_progress: usize,
}

impl ImportReport {
    pub fn message(&self) -> String {
        format!("Processed {} new and {} existing documents", self.inserted, self.updated)
    }
}

/// Tallies gathered while turning rows into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub coerced_statuses: usize,
    pub nonstandard_months: usize,
    pub clamped_progress: usize,
}

/// Validate and convert loosely typed rows into records.
///
/// Any invalid row fails the whole batch so nothing partial is written.
pub fn normalize_rows(rows: &[Value]) -> Result<(Vec<Record>, NormalizeStats), DashboardError> {
    let compiled = jsonschema::JSONSchema::compile(&ROW_SCHEMA)
        .map_err(|e| DashboardError::Internal(format!("Row schema compilation error: {}", e)))?;

    let mut stats = NormalizeStats::default();
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if let Err(errors) = compiled.validate(row) {
            let messages: Vec<String> = errors
                .map(|e| format!("{} at {}", e, e.instance_path))
                .collect();
            return Err(DashboardError::Import(format!("Row {}: {}", index + 1, messages.join("; "))));
        }

        let obj = row.as_object()
            .ok_or_else(|| DashboardError::Import(format!("Row {}: expected an object", index + 1)))?;

        let record = row_to_record(index, obj, &mut stats)?;
        records.push(record);
    }

    Ok((records, stats))
}

/// Normalise and upsert rows into the store.
pub fn import_rows(db: &Database, rows: &[Value], max_rows: usize) -> Result<ImportReport, DashboardError> {
    if rows.is_empty() {
        return Err(DashboardError::Import("No data to insert".into()));
    }
    if rows.len() > max_rows {
        return Err(DashboardError::Import(format!(
            "Import of {} rows exceeds the limit of {}",
            rows.len(),
            max_rows
        )));
    }

    let (records, stats) = normalize_rows(rows)?;
    let summary = db.upsert_many(&records)?;

    debug!(rows = rows.len(), inserted = summary.inserted, updated = summary.updated, "Rows upserted");

    Ok(ImportReport {
        rows: rows.len(),
        inserted: summary.inserted,
        updated: summary.updated,
        unchanged: summary.unchanged,
        coerced_statuses: stats.coerced_statuses,
        nonstandard_months: stats.nonstandard_months,
        clamped_progress: stats.clamped_progress,
    })
}

fn row_to_record(index: usize, obj: &Map<String, Value>, stats: &mut NormalizeStats) -> Result<Record, DashboardError> {
    let month = text_field(obj, "month");
    if let Some(m) = &month {
        if !MONTH_PATTERN.is_match(m) {
            stats.nonstandard_months += 1;
        }
    }

    let status = match text_field(obj, "status") {
        Some(raw) => match Status::normalize(&raw) {
            Some(status) => Some(status),
            None => {
                warn!(row = index + 1, status = %raw, "Unrecognized status, storing without one");
                stats.coerced_statuses += 1;
                None
            }
        },
        None => None,
    };

    let number = |key: &str| number_field(index, obj, key);

    let progress = number("progress")?.map(|p| {
        let clamped = p.clamp(0.0, 100.0);
        if clamped != p {
            warn!(row = index + 1, progress = p, "Progress outside 0-100, clamping");
            stats.clamped_progress += 1;
        }
        clamped
    });

    Ok(Record {
        month,
        country: text_field(obj, "country"),
        batch: text_field(obj, "batch"),
        stage: text_field(obj, "stage"),
        program: text_field(obj, "program"),
        status,
        progress,
        participants: number("participants")?,
        training: number("training")?,
        workshops: number("workshops")?,
        completion: number("completion")?,
        stage1: number("stage1")?,
        stage2: number("stage2")?,
        stage3: number("stage3")?,
        stage4: number("stage4")?,
        total_progress: number("totalProgress")?,
        ..Default::default()
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(index: usize, obj: &Map<String, Value>, key: &str) -> Result<Option<f64>, DashboardError> {
    match obj.get(key) {
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim().trim_end_matches('%').trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| DashboardError::Import(format!(
                    "Row {}: field '{}' is not a number: '{}'",
                    index + 1,
                    key,
                    s
                )))
        }
        _ => Ok(None),
    }
}
