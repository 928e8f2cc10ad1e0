use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use crate::errors::DashboardError;
use crate::models::{Record, RecordFilter, Status};
use super::schema::RECORD_COLUMNS;
use super::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    /// The key exists and every supplied field already matches.
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl UpsertSummary {
    fn add(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl Database {
    pub fn fetch_all(&self) -> Result<Vec<Record>, DashboardError> {
        self.fetch_matching(&RecordFilter::default())
    }

    pub fn fetch_matching(&self, filter: &RecordFilter) -> Result<Vec<Record>, DashboardError> {
        let constraints = filter.constraints();
        let mut sql = format!("SELECT {} FROM records", RECORD_COLUMNS);
        if !constraints.is_empty() {
            let clauses: Vec<String> = constraints.iter()
                .enumerate()
                .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY rowid");

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)
            .map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let values = constraints.iter().map(|(_, v)| *v);
        let rows = stmt.query_map(rusqlite::params_from_iter(values), row_to_record)
            .map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<usize, DashboardError> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;
        Ok(n as usize)
    }

    /// Insert or update the record stored under its `(month, country, stage)` key.
    pub fn upsert_record(&self, record: &Record) -> Result<UpsertOutcome, DashboardError> {
        let conn = self.lock()?;
        upsert_on(&conn, record)
    }

    /// Upsert a batch atomically: either every record lands or none does.
    pub fn upsert_many(&self, records: &[Record]) -> Result<UpsertSummary, DashboardError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()
            .map_err(|e| DashboardError::Database(format!("Failed to begin transaction: {}", e)))?;

        let mut summary = UpsertSummary::default();
        for record in records {
            summary.add(upsert_on(&tx, record)?);
        }

        tx.commit()
            .map_err(|e| DashboardError::Database(format!("Failed to commit import: {}", e)))?;
        Ok(summary)
    }
}

fn key_part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn upsert_on(conn: &Connection, record: &Record) -> Result<UpsertOutcome, DashboardError> {
    let now = Utc::now().to_rfc3339();
    let month = key_part(&record.month);
    let country = key_part(&record.country);
    let stage = key_part(&record.stage);
    let status = record.status.map(|s| s.as_str());

    let existing: Option<String> = conn.query_row(
        "SELECT id FROM records WHERE month = ?1 AND country = ?2 AND stage = ?3",
        rusqlite::params![month, country, stage],
        |row| row.get(0),
    ).optional()
        .map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

    match existing {
        Some(id) => {
            // Columns the incoming record leaves empty keep their stored value.
            // The row is only touched when some supplied value differs.
            let changed = conn.execute(
                "UPDATE records SET
                    batch = COALESCE(?2, batch),
                    program = COALESCE(?3, program),
                    status = COALESCE(?4, status),
                    progress = COALESCE(?5, progress),
                    participants = COALESCE(?6, participants),
                    training = COALESCE(?7, training),
                    workshops = COALESCE(?8, workshops),
                    completion = COALESCE(?9, completion),
                    stage1 = COALESCE(?10, stage1),
                    stage2 = COALESCE(?11, stage2),
                    stage3 = COALESCE(?12, stage3),
                    stage4 = COALESCE(?13, stage4),
                    total_progress = COALESCE(?14, total_progress),
                    updated_at = ?15
                 WHERE id = ?1 AND (
                    COALESCE(?2, batch) IS NOT batch
                    OR COALESCE(?3, program) IS NOT program
                    OR COALESCE(?4, status) IS NOT status
                    OR COALESCE(?5, progress) IS NOT progress
                    OR COALESCE(?6, participants) IS NOT participants
                    OR COALESCE(?7, training) IS NOT training
                    OR COALESCE(?8, workshops) IS NOT workshops
                    OR COALESCE(?9, completion) IS NOT completion
                    OR COALESCE(?10, stage1) IS NOT stage1
                    OR COALESCE(?11, stage2) IS NOT stage2
                    OR COALESCE(?12, stage3) IS NOT stage3
                    OR COALESCE(?13, stage4) IS NOT stage4
                    OR COALESCE(?14, total_progress) IS NOT total_progress
                 )",
                rusqlite::params![
                    id,
                    record.batch,
                    record.program,
                    status,
                    record.progress,
                    record.participants,
                    record.training,
                    record.workshops,
                    record.completion,
                    record.stage1,
                    record.stage2,
                    record.stage3,
                    record.stage4,
                    record.total_progress,
                    now,
                ],
            ).map_err(|e| DashboardError::Database(format!("Update failed: {}", e)))?;

            if changed == 0 {
                Ok(UpsertOutcome::Unchanged)
            } else {
                Ok(UpsertOutcome::Updated)
            }
        }
        None => {
            // Ids are always minted here; a caller-supplied id is ignored.
            let id = uuid::Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO records (id, month, country, stage, batch, program, status, progress, participants, training, workshops, completion, stage1, stage2, stage3, stage4, total_progress, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?18)",
                rusqlite::params![
                    id,
                    month,
                    country,
                    stage,
                    record.batch,
                    record.program,
                    status,
                    record.progress,
                    record.participants,
                    record.training,
                    record.workshops,
                    record.completion,
                    record.stage1,
                    record.stage2,
                    record.stage3,
                    record.stage4,
                    record.total_progress,
                    now,
                ],
            ).map_err(|e| DashboardError::Database(format!("Failed to insert record: {}", e)))?;
            Ok(UpsertOutcome::Inserted)
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    let status: Option<String> = row.get(6)?;

    Ok(Record {
        id: row.get(0)?,
        month: non_empty(row.get(1)?),
        country: non_empty(row.get(2)?),
        batch: row.get(3)?,
        stage: non_empty(row.get(4)?),
        program: row.get(5)?,
        status: status.and_then(|s| s.parse::<Status>().ok()),
        progress: row.get(7)?,
        participants: row.get(8)?,
        training: row.get(9)?,
        workshops: row.get(10)?,
        completion: row.get(11)?,
        stage1: row.get(12)?,
        stage2: row.get(13)?,
        stage3: row.get(14)?,
        stage4: row.get(15)?,
        total_progress: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}
