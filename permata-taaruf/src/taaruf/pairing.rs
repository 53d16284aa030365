use uuid::Uuid;

use super::Sex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PairingRuleError {
    #[error("participant {0} has no sex recorded")]
    SexNotRecorded(Uuid),
    #[error("pairing requires one ikhwan and one akhwat")]
    SameSex,
    #[error("a participant cannot be paired with themselves")]
    SelfPairing,
}

/// A pairing's (ikhwan, akhwat) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub ikhwan_id: Uuid,
    pub akhwat_id: Uuid,
}

impl Orientation {
    pub fn partner_of(&self, subject: Uuid) -> Option<Uuid> {
        if self.ikhwan_id == subject {
            Some(self.akhwat_id)
        } else if self.akhwat_id == subject {
            Some(self.ikhwan_id)
        } else {
            None
        }
    }
}

/// Place `a` and `b` into the ikhwan/akhwat columns by their recorded sex.
pub fn orient(a: Uuid, a_sex: Option<Sex>, b: Uuid, b_sex: Option<Sex>) -> Result<Orientation, PairingRuleError> {
    if a == b {
        return Err(PairingRuleError::SelfPairing);
    }
    let a_sex = a_sex.ok_or(PairingRuleError::SexNotRecorded(a))?;
    let b_sex = b_sex.ok_or(PairingRuleError::SexNotRecorded(b))?;
    match (a_sex, b_sex) {
        (Sex::Male, Sex::Female) => Ok(Orientation { ikhwan_id: a, akhwat_id: b }),
        (Sex::Female, Sex::Male) => Ok(Orientation { ikhwan_id: b, akhwat_id: a }),
        _ => Err(PairingRuleError::SameSex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_subject_fills_ikhwan_column() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let o = orient(a, Some(Sex::Male), b, Some(Sex::Female)).expect("orient");
        assert_eq!(o, Orientation { ikhwan_id: a, akhwat_id: b });
        assert_eq!(o.partner_of(a), Some(b));
    }

    #[test]
    fn female_subject_fills_akhwat_column() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let o = orient(a, Some(Sex::Female), b, Some(Sex::Male)).expect("orient");
        assert_eq!(o.ikhwan_id, b);
        assert_eq!(o.akhwat_id, a);
        assert_eq!(o.partner_of(Uuid::new_v4()), None);
    }

    #[test]
    fn same_sex_and_unknown_sex_are_rejected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(orient(a, Some(Sex::Male), b, Some(Sex::Male)), Err(PairingRuleError::SameSex));
        assert_eq!(orient(a, None, b, Some(Sex::Male)), Err(PairingRuleError::SexNotRecorded(a)));
        assert_eq!(orient(a, Some(Sex::Male), a, Some(Sex::Female)), Err(PairingRuleError::SelfPairing));
    }
}
