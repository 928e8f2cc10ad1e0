use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Health classification shared by individual records and derived stage summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "onTrack")]
    OnTrack,
    #[serde(rename = "onprogress")]
    OnProgress,
    #[serde(rename = "delayed")]
    Delayed,
    #[serde(rename = "critical")]
    Critical,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::OnTrack, Status::OnProgress, Status::Delayed, Status::Critical];

    /// Wire name, as stored and served.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "onTrack",
            Self::OnProgress => "onprogress",
            Self::Delayed => "delayed",
            Self::Critical => "critical",
        }
    }

    /// Lenient parse used for spreadsheet rows.
    ///
    /// Ignores case, whitespace, `_` and `-`, and accepts a few spellings the
    /// upstream sheets use ("On Track", "in progress"). Returns `None` for
    /// anything else.
    pub fn normalize(raw: &str) -> Option<Status> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "ontrack" => Some(Self::OnTrack),
            "onprogress" | "inprogress" => Some(Self::OnProgress),
            "delayed" => Some(Self::Delayed),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
