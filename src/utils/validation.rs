//! Input patterns shared by request DTOs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mobile or landline number: optional leading `+`, digits and dashes
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9-]{5,18}[0-9]$").expect("Invalid regex")
});

/// Six-digit postal code
pub static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));

/// District code: "86" for the country root, six digits below it
pub static DISTRICT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,6}$").expect("Invalid regex"));

/// Parse a comma separated id list such as `1,2,3`; blanks are skipped.
pub fn parse_id_list(raw: &str) -> Option<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE_RE.is_match("13800000000"));
        assert!(PHONE_RE.is_match("+86-10-1234567"));
        assert!(!PHONE_RE.is_match("12ab"));
        assert!(!PHONE_RE.is_match("123"));
    }

    #[test]
    fn test_zip_pattern() {
        assert!(ZIP_RE.is_match("050000"));
        assert!(!ZIP_RE.is_match("5000"));
        assert!(!ZIP_RE.is_match("05000a"));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2, 3"), Some(vec![1, 2, 3]));
        assert_eq!(parse_id_list("4,,"), Some(vec![4]));
        assert_eq!(parse_id_list(""), Some(vec![]));
        assert_eq!(parse_id_list("1,x"), None);
    }
}
