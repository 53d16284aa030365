use std::collections::HashSet;
use uuid::Uuid;

use super::Sex;

/// Availability view over the pairing table for one subject.
///
/// A candidate must be of the opposite sex and appear in no pairing, except
/// the subject's own current partner who stays selectable.
#[derive(Debug, Default)]
pub struct CandidatePool {
    paired: HashSet<Uuid>,
    current_partner: Option<Uuid>,
}

impl CandidatePool {
    /// `pairings` yields `(ikhwan_id, akhwat_id)` for every pairing row.
    pub fn new(subject: Uuid, pairings: impl IntoIterator<Item = (Uuid, Uuid)>) -> Self {
        let mut paired = HashSet::new();
        let mut current_partner = None;
        for (ikhwan, akhwat) in pairings {
            if ikhwan == subject {
                current_partner = Some(akhwat);
            } else if akhwat == subject {
                current_partner = Some(ikhwan);
            }
            paired.insert(ikhwan);
            paired.insert(akhwat);
        }
        Self { paired, current_partner }
    }

    pub fn current_partner(&self) -> Option<Uuid> {
        self.current_partner
    }

    pub fn is_paired(&self, id: Uuid) -> bool {
        self.paired.contains(&id)
    }

    pub fn admits(&self, subject_sex: Sex, candidate: Uuid, candidate_sex: Option<Sex>) -> bool {
        if candidate_sex != Some(subject_sex.opposite()) {
            return false;
        }
        !self.paired.contains(&candidate) || self.current_partner == Some(candidate)
    }

    /// Keep the admitted entries of `people`, preserving order.
    pub fn filter<T>(
        &self,
        subject_sex: Sex,
        people: impl IntoIterator<Item = T>,
        key: impl Fn(&T) -> (Uuid, Option<Sex>),
    ) -> Vec<T> {
        people
            .into_iter()
            .filter(|p| {
                let (id, sex) = key(p);
                self.admits(subject_sex, id, sex)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        id: Uuid,
        sex: Option<Sex>,
    }

    fn person(sex: Option<Sex>) -> Person {
        Person { id: Uuid::new_v4(), sex }
    }

    #[test]
    fn unpaired_opposite_sex_only() {
        let subject = Uuid::new_v4();
        let free_woman = person(Some(Sex::Female));
        let other_man = person(Some(Sex::Male));
        let unknown = person(None);

        let pool = CandidatePool::new(subject, std::iter::empty());
        let ids: Vec<Uuid> = pool
            .filter(Sex::Male, vec![free_woman, other_man, unknown], |p| (p.id, p.sex))
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn pairing_removes_both_partners_from_other_pools() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rival = Uuid::new_v4();

        let rival_pool = CandidatePool::new(rival, [(a, b)]);
        assert!(!rival_pool.admits(Sex::Male, b, Some(Sex::Female)));
        assert!(!rival_pool.admits(Sex::Female, a, Some(Sex::Male)));
        assert!(rival_pool.current_partner().is_none());
    }

    #[test]
    fn current_partner_stays_selectable() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let pool = CandidatePool::new(a, [(a, b)]);
        assert_eq!(pool.current_partner(), Some(b));
        assert!(pool.admits(Sex::Male, b, Some(Sex::Female)));

        let pool = CandidatePool::new(b, [(a, b)]);
        assert_eq!(pool.current_partner(), Some(a));
        assert!(pool.admits(Sex::Female, a, Some(Sex::Male)));
    }

    #[test]
    fn reset_makes_partners_available_again() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rival = Uuid::new_v4();

        let paired = CandidatePool::new(rival, [(a, b)]);
        assert!(paired.is_paired(a));
        assert!(!paired.admits(Sex::Male, b, Some(Sex::Female)));

        let after_reset = CandidatePool::new(rival, std::iter::empty());
        assert!(!after_reset.is_paired(a));
        assert!(after_reset.admits(Sex::Male, b, Some(Sex::Female)));
        assert!(after_reset.admits(Sex::Female, a, Some(Sex::Male)));
    }
}
