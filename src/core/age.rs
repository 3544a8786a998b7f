use chrono::{Datelike, Local, NaiveDate};

use crate::models::Profile;

/// Current calendar date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Age in completed years on `today`
///
/// Returns `None` when the birth date lies after `today`.
#[inline]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Resolve a profile's birth date
///
/// `dob` wins when present; it may be a plain `YYYY-MM-DD` date or a full
/// RFC 3339 timestamp, of which only the date part is used. Older rows carry
/// a year/month/day triple instead.
pub fn birth_date(profile: &Profile) -> Option<NaiveDate> {
    if let Some(dob) = profile.dob.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        return parse_date(dob);
    }

    let year = i32::try_from(profile.birth_year?).ok()?;
    let month = u32::try_from(profile.birth_month?).ok()?;
    let day = u32::try_from(profile.birth_day?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // The date part of a timestamp is the first ten characters
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Age of a profile on `today`, or `None` if unknown
pub fn age_of(profile: &Profile, today: NaiveDate) -> Option<u32> {
    birth_date(profile).and_then(|birth| age_on(birth, today))
}

/// Age of a profile as of now
pub fn current_age(profile: &Profile) -> Option<u32> {
    age_of(profile, today())
}
