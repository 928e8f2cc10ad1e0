pub mod connection;
pub mod records;
pub mod schema;

pub use connection::Database;
pub use records::{UpsertOutcome, UpsertSummary};

use crate::errors::DashboardError;
use crate::metrics::compute_snapshot;
use crate::models::{Record, RecordFilter, Snapshot};

/// Read side of the record store, as the dashboard consumes it.
pub trait RecordStore {
    fn fetch_all(&self) -> Result<Vec<Record>, DashboardError>;
    fn fetch_matching(&self, filter: &RecordFilter) -> Result<Vec<Record>, DashboardError>;
}

impl RecordStore for Database {
    fn fetch_all(&self) -> Result<Vec<Record>, DashboardError> {
        Database::fetch_all(self)
    }

    fn fetch_matching(&self, filter: &RecordFilter) -> Result<Vec<Record>, DashboardError> {
        Database::fetch_matching(self, filter)
    }
}

/// Load the records once and aggregate them. Returns the filtered records
/// alongside the snapshot so callers can render the detail view.
///
/// The filtered set is cut from the same read as the full set, so it is
/// always a subset even while imports commit concurrently.
pub fn load_snapshot<S: RecordStore + ?Sized>(
    store: &S,
    filter: &RecordFilter,
) -> Result<(Snapshot, Vec<Record>), DashboardError> {
    let all = store.fetch_all()?;
    let filtered: Vec<Record> = if filter.is_unconstrained() {
        all.clone()
    } else {
        all.iter().filter(|r| filter.matches(r)).cloned().collect()
    };
    Ok((compute_snapshot(&all, &filtered), filtered))
}
