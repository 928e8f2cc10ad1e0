pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    month TEXT NOT NULL DEFAULT '',
    country TEXT NOT NULL DEFAULT '',
    stage TEXT NOT NULL DEFAULT '',
    batch TEXT,
    program TEXT,
    status TEXT,
    progress REAL,
    participants REAL,
    training REAL,
    workshops REAL,
    completion REAL,
    stage1 REAL,
    stage2 REAL,
    stage3 REAL,
    stage4 REAL,
    total_progress REAL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (month, country, stage)
);

CREATE INDEX IF NOT EXISTS idx_records_country ON records(country);
CREATE INDEX IF NOT EXISTS idx_records_batch ON records(batch);
CREATE INDEX IF NOT EXISTS idx_records_stage ON records(stage);
CREATE INDEX IF NOT EXISTS idx_records_program ON records(program);
";

/// Column list shared by every record SELECT, in `row_to_record` order.
pub const RECORD_COLUMNS: &str = "id, month, country, batch, stage, program, status, progress, participants, training, workshops, completion, stage1, stage2, stage3, stage4, total_progress, created_at, updated_at";
