use regex::Regex;
use serde::{Deserialize, Serialize};
use shuttle_shared::Masked;
use std::sync::LazyLock;

/// CNIC format: 12345-1234567-1 (15 characters with dashes).
static CNIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{7}-\d{1}$").expect("valid CNIC pattern"));

/// Relation of a family-ticket passenger to the booking employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Child,
    Spouse,
    Parent,
}

/// One family-ticket passenger. Name and relation are required before
/// submission; the CNIC is optional but must match the national format when
/// given. It is masked in Debug output so form state never leaks identity
/// numbers into logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerData {
    pub name: String,
    pub cnic: Masked<String>,
    pub relation: Option<Relation>,
}

impl PassengerData {
    /// Blank form entry, as created when the ticket count grows.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            cnic: Masked(String::new()),
            relation: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.relation.is_some()
    }

    pub fn has_valid_cnic(&self) -> bool {
        is_valid_cnic(self.cnic.inner())
    }
}

impl Default for PassengerData {
    fn default() -> Self {
        Self::blank()
    }
}

/// Validate a CNIC. Empty is valid (the field is optional); anything else
/// must match `\d{5}-\d{7}-\d{1}` exactly.
pub fn is_valid_cnic(cnic: &str) -> bool {
    cnic.is_empty() || CNIC_RE.is_match(cnic)
}

/// Progressive input formatting: strips everything but digits and inserts
/// the group dashes as the number grows, truncating past 13 digits.
pub fn format_cnic(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0..=5 => digits,
        6..=12 => format!("{}-{}", &digits[..5], &digits[5..]),
        _ => format!("{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..13]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_cnic() {
        assert!(is_valid_cnic("12345-1234567-1"));
    }

    #[test]
    fn rejects_undashes_and_short_values() {
        assert!(!is_valid_cnic("123456789012"));
        assert!(!is_valid_cnic("1234-1234567-1"));
        assert!(!is_valid_cnic("12345-1234567-12"));
        assert!(!is_valid_cnic("12345-1234567-x"));
    }

    #[test]
    fn empty_cnic_is_valid_because_optional() {
        assert!(is_valid_cnic(""));
    }

    #[test]
    fn formats_digits_progressively() {
        assert_eq!(format_cnic("123"), "123");
        assert_eq!(format_cnic("12345"), "12345");
        assert_eq!(format_cnic("1234567"), "12345-67");
        assert_eq!(format_cnic("123451234567"), "12345-1234567");
        assert_eq!(format_cnic("1234512345671"), "12345-1234567-1");
        // Non-digits dropped, extra digits truncated
        assert_eq!(format_cnic("12345-1234567-19"), "12345-1234567-1");
        assert_eq!(format_cnic("ab12345cd"), "12345");
    }

    #[test]
    fn blank_passenger_is_incomplete_but_cnic_valid() {
        let passenger = PassengerData::blank();
        assert!(!passenger.is_complete());
        assert!(passenger.has_valid_cnic());
    }

    #[test]
    fn complete_passenger_requires_name_and_relation() {
        let mut passenger = PassengerData::blank();
        passenger.name = "  ".to_string();
        passenger.relation = Some(Relation::Child);
        assert!(!passenger.is_complete());

        passenger.name = "Ayesha".to_string();
        assert!(passenger.is_complete());
    }
}
