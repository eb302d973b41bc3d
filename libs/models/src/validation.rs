//! Format patterns and date helpers shared by the record validators.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub static TEN_DIGIT_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone pattern"));

pub static SIX_DIGIT_POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid postal code pattern"));

pub static PAN_CARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN pattern"));

pub static AADHAAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("valid Aadhaar pattern"));

/// Completed years between `date_of_birth` and `today`, adjusting for a
/// birthday that has not yet occurred this year.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_adjusts_for_pending_birthday() {
        let dob = date(1990, 6, 15);
        assert_eq!(age_in_years(dob, date(2024, 6, 14)), 33);
        assert_eq!(age_in_years(dob, date(2024, 6, 15)), 34);
        assert_eq!(age_in_years(dob, date(2024, 6, 16)), 34);
    }

    #[test]
    fn patterns_accept_and_reject() {
        assert!(TEN_DIGIT_PHONE.is_match("9876543210"));
        assert!(!TEN_DIGIT_PHONE.is_match("98765"));
        assert!(SIX_DIGIT_POSTAL_CODE.is_match("411001"));
        assert!(PAN_CARD.is_match("ABCDE1234F"));
        assert!(!PAN_CARD.is_match("abcde1234f"));
        assert!(AADHAAR.is_match("123456789012"));
        assert!(!AADHAAR.is_match("12345678901"));
    }
}
