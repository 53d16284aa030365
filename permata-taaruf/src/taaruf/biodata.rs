use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Laki-laki",
            Sex::Female => "Perempuan",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }

    /// Parse a stored column value; unknown text counts as not recorded.
    pub fn from_column(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Laki-laki" => Ok(Sex::Male),
            "Perempuan" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

/// Marital status recorded on the biodata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Lajang,
    Duda,
    Janda,
}

impl MaritalStatus {
    pub fn label(self) -> &'static str {
        match self {
            MaritalStatus::Lajang => "Lajang",
            MaritalStatus::Duda => "Duda",
            MaritalStatus::Janda => "Janda",
        }
    }

    /// Duda is only meaningful for men and Janda for women.
    pub fn fits(self, sex: Sex) -> bool {
        !matches!(
            (self, sex),
            (MaritalStatus::Duda, Sex::Female) | (MaritalStatus::Janda, Sex::Male)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Sex::Female).expect("serialize");
        assert_eq!(json, "\"Perempuan\"");
        let parsed: Sex = serde_json::from_str("\"Laki-laki\"").expect("parse");
        assert_eq!(parsed, Sex::Male);
    }

    #[test]
    fn unknown_column_value_is_not_recorded() {
        assert_eq!(Sex::from_column(Some("L")), None);
        assert_eq!(Sex::from_column(None), None);
        assert_eq!(Sex::from_column(Some("Perempuan")), Some(Sex::Female));
    }

    #[test]
    fn widowhood_label_must_match_sex() {
        assert!(MaritalStatus::Duda.fits(Sex::Male));
        assert!(!MaritalStatus::Duda.fits(Sex::Female));
        assert!(!MaritalStatus::Janda.fits(Sex::Male));
        assert!(MaritalStatus::Lajang.fits(Sex::Female));
    }
}
