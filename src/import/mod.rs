pub mod files;
pub mod rows;
pub mod schema;

pub use files::{expand_patterns, load_rows};
pub use rows::{import_rows, normalize_rows, ImportReport, NormalizeStats};
