use serde::Deserialize;
use super::record::Record;

pub const ALL_COUNTRIES: &str = "All Countries";
pub const ALL_BATCHES: &str = "All Batches";
pub const ALL_STAGES: &str = "All Stages";
pub const ALL_PROGRAMS: &str = "All Programs";

/// Constraint on a single record dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DimensionFilter {
    #[default]
    Any,
    Equals(String),
}

impl DimensionFilter {
    /// Interpret a raw request value. Absent, blank, and the dimension's
    /// "All ..." label all mean no constraint. Surrounding whitespace is
    /// ignored, matching the trimmed values imports store.
    pub fn from_param(raw: Option<&str>, wildcard: &str) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Any,
            Some(v) if v == wildcard => Self::Any,
            Some(v) => Self::Equals(v.to_string()),
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Equals(expected) => value == Some(expected.as_str()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Equals(v) => Some(v),
        }
    }
}

/// Raw filter parameters as the dashboard sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub country: Option<String>,
    pub batch: Option<String>,
    pub stage: Option<String>,
    pub program: Option<String>,
}

/// Active constraints across the four record dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub country: DimensionFilter,
    pub batch: DimensionFilter,
    pub stage: DimensionFilter,
    pub program: DimensionFilter,
}

impl RecordFilter {
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            country: DimensionFilter::from_param(params.country.as_deref(), ALL_COUNTRIES),
            batch: DimensionFilter::from_param(params.batch.as_deref(), ALL_BATCHES),
            stage: DimensionFilter::from_param(params.stage.as_deref(), ALL_STAGES),
            program: DimensionFilter::from_param(params.program.as_deref(), ALL_PROGRAMS),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraints().is_empty()
    }

    /// `(column, value)` pairs for every dimension that carries an equality constraint.
    pub fn constraints(&self) -> Vec<(&'static str, &str)> {
        [
            ("country", &self.country),
            ("batch", &self.batch),
            ("stage", &self.stage),
            ("program", &self.program),
        ]
        .into_iter()
        .filter_map(|(column, filter)| filter.value().map(|v| (column, v)))
        .collect()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.country.matches(record.country.as_deref())
            && self.batch.matches(record.batch.as_deref())
            && self.stage.matches(record.stage.as_deref())
            && self.program.matches(record.program.as_deref())
    }
}
