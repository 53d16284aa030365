use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative level of a mediator, and the participant slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediatorTier {
    #[serde(rename = "Tim Perkawinan Kelompok", alias = "kelompok")]
    Kelompok,
    #[serde(rename = "Tim Perkawinan Desa", alias = "desa")]
    Desa,
    #[serde(rename = "Tim Perkawinan Daerah", alias = "daerah")]
    Daerah,
}

impl MediatorTier {
    pub const ALL: [MediatorTier; 3] = [MediatorTier::Kelompok, MediatorTier::Desa, MediatorTier::Daerah];

    pub fn label(self) -> &'static str {
        match self {
            MediatorTier::Kelompok => "Tim Perkawinan Kelompok",
            MediatorTier::Desa => "Tim Perkawinan Desa",
            MediatorTier::Daerah => "Tim Perkawinan Daerah",
        }
    }
}

impl fmt::Display for MediatorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediatorTier {
    type Err = String;

    /// Accepts the full label or the bare level name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s.trim();
        let level = level.strip_prefix("Tim Perkawinan ").unwrap_or(level);
        match level.to_lowercase().as_str() {
            "kelompok" => Ok(MediatorTier::Kelompok),
            "desa" => Ok(MediatorTier::Desa),
            "daerah" => Ok(MediatorTier::Daerah),
            _ => Err(format!("unknown mediator tier: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_levels() {
        assert_eq!("Tim Perkawinan Desa".parse::<MediatorTier>(), Ok(MediatorTier::Desa));
        assert_eq!("daerah".parse::<MediatorTier>(), Ok(MediatorTier::Daerah));
        assert!("Tim Perkawinan Pusat".parse::<MediatorTier>().is_err());
    }

    #[test]
    fn serializes_as_full_label() {
        let json = serde_json::to_string(&MediatorTier::Kelompok).expect("serialize");
        assert_eq!(json, "\"Tim Perkawinan Kelompok\"");
    }
}
