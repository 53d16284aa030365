use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a pairing. Absence of a pairing row is the implicit fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaarufStatus {
    Mediasi,
    #[serde(alias = "Dilamar")]
    Melamar,
    Menikah,
}

impl TaarufStatus {
    pub const ALL: [TaarufStatus; 3] = [TaarufStatus::Mediasi, TaarufStatus::Melamar, TaarufStatus::Menikah];

    pub fn label(self) -> &'static str {
        match self {
            TaarufStatus::Mediasi => "Mediasi",
            TaarufStatus::Melamar => "Melamar",
            TaarufStatus::Menikah => "Menikah",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Mediasi" => Some(TaarufStatus::Mediasi),
            "Melamar" | "Dilamar" => Some(TaarufStatus::Melamar),
            "Menikah" => Some(TaarufStatus::Menikah),
            _ => None,
        }
    }

    /// Stored labels outside the known set read as the initial state.
    pub fn from_column(value: &str) -> Self {
        Self::parse(value).unwrap_or(TaarufStatus::Mediasi)
    }

    fn rank(self) -> u8 {
        match self {
            TaarufStatus::Mediasi => 0,
            TaarufStatus::Melamar => 1,
            TaarufStatus::Menikah => 2,
        }
    }
}

impl fmt::Display for TaarufStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any label may follow any other.
    #[default]
    Permissive,
    /// Stay, or advance exactly one step.
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("unknown pairing status: {0}")]
    UnknownStatus(String),
    #[error("cannot move pairing from {from} to {to}")]
    NotAllowed { from: TaarufStatus, to: TaarufStatus },
}

/// What a status request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Set(TaarufStatus),
    Reset,
}

impl StatusChange {
    /// An empty (or absent) value requests a reset.
    pub fn parse(raw: Option<&str>) -> Result<Self, TransitionError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(StatusChange::Reset),
            Some(value) => TaarufStatus::parse(value)
                .map(StatusChange::Set)
                .ok_or_else(|| TransitionError::UnknownStatus(value.to_string())),
        }
    }
}

impl StatusPolicy {
    pub fn transition(self, from: TaarufStatus, to: TaarufStatus) -> Result<TaarufStatus, TransitionError> {
        match self {
            StatusPolicy::Permissive => Ok(to),
            StatusPolicy::Sequential if to.rank() == from.rank() || to.rank() == from.rank() + 1 => Ok(to),
            StatusPolicy::Sequential => Err(TransitionError::NotAllowed { from, to }),
        }
    }
}
