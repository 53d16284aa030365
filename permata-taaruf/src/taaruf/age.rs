use chrono::{Datelike, NaiveDate, Utc};

/// Whole years between `birth` and `today`. `None` when `birth` lies in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

pub fn age_today(birth: Option<NaiveDate>) -> Option<u32> {
    birth.and_then(|b| age_on(b, Utc::now().date_naive()))
}
