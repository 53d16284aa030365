use uuid::Uuid;

use super::Sex;

/// Who is looking at a participant profile.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub id: Uuid,
    pub is_admin: bool,
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    #[error("admins do not express interest")]
    Admin,
    #[error("cannot express interest in your own profile")]
    OwnProfile,
    #[error("only ikhwan may express interest")]
    SenderNotMale,
    #[error("interest can only be expressed toward an akhwat")]
    TargetNotFemale,
}

/// Interest flows from a non-admin ikhwan toward an akhwat other than himself.
pub fn check_interest(viewer: &Viewer, target: Uuid, target_sex: Option<Sex>) -> Result<(), Ineligible> {
    if viewer.is_admin {
        return Err(Ineligible::Admin);
    }
    if viewer.id == target {
        return Err(Ineligible::OwnProfile);
    }
    if viewer.sex != Some(Sex::Male) {
        return Err(Ineligible::SenderNotMale);
    }
    if target_sex != Some(Sex::Female) {
        return Err(Ineligible::TargetNotFemale);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ikhwan() -> Viewer {
        Viewer { id: Uuid::new_v4(), is_admin: false, sex: Some(Sex::Male) }
    }

    #[test]
    fn ikhwan_may_signal_akhwat() {
        assert_eq!(check_interest(&ikhwan(), Uuid::new_v4(), Some(Sex::Female)), Ok(()));
    }

    #[test]
    fn each_rejection_has_its_own_reason() {
        let admin = Viewer { is_admin: true, ..ikhwan() };
        assert_eq!(check_interest(&admin, Uuid::new_v4(), Some(Sex::Female)), Err(Ineligible::Admin));

        let me = ikhwan();
        assert_eq!(check_interest(&me, me.id, Some(Sex::Male)), Err(Ineligible::OwnProfile));

        let akhwat = Viewer { sex: Some(Sex::Female), ..ikhwan() };
        assert_eq!(
            check_interest(&akhwat, Uuid::new_v4(), Some(Sex::Female)),
            Err(Ineligible::SenderNotMale)
        );

        assert_eq!(
            check_interest(&ikhwan(), Uuid::new_v4(), Some(Sex::Male)),
            Err(Ineligible::TargetNotFemale)
        );
        assert_eq!(check_interest(&ikhwan(), Uuid::new_v4(), None), Err(Ineligible::TargetNotFemale));
    }

    #[test]
    fn viewer_without_recorded_sex_is_rejected() {
        let viewer = Viewer { sex: None, ..ikhwan() };
        assert_eq!(
            check_interest(&viewer, Uuid::new_v4(), Some(Sex::Female)),
            Err(Ineligible::SenderNotMale)
        );
    }
}
