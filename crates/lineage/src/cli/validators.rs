//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum accepted length of a component id on the command line.
pub const MAX_COMPONENT_ID_LENGTH: usize = 256;

/// Validate a component id.
///
/// Ids are opaque strings in the dataset, so only the obviously wrong
/// inputs are rejected: empty ids, ids containing whitespace or control
/// characters, and absurdly long ids.
pub fn validate_component_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Component ID cannot be empty".to_string());
    }

    if s.len() > MAX_COMPONENT_ID_LENGTH {
        return Err(format!(
            "Component ID cannot exceed {} characters (got {})",
            MAX_COMPONENT_ID_LENGTH,
            s.len()
        ));
    }

    if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!(
            "Component ID '{}' contains an invalid character {:?}",
            s, c
        ));
    }

    Ok(s.to_string())
}

/// Validate free-text search input.
pub fn validate_search_text(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Search text cannot be empty".to_string());
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tbl_users", "tbl_users")]
    #[case("  db_billing_prod  ", "db_billing_prod")]
    #[case("chart-1.a", "chart-1.a")]
    fn accepts_valid_ids(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_component_id(input).unwrap(), expected);
    }

    #[rstest]
    #[case("", "cannot be empty")]
    #[case("   ", "cannot be empty")]
    #[case("tbl users", "invalid character")]
    #[case("tbl\u{7}", "invalid character")]
    fn rejects_invalid_ids(#[case] input: &str, #[case] message: &str) {
        let err = validate_component_id(input).unwrap_err();
        assert!(err.contains(message), "unexpected error: {err}");
    }

    #[test]
    fn rejects_overlong_id() {
        let id = "x".repeat(MAX_COMPONENT_ID_LENGTH + 1);
        assert!(validate_component_id(&id).unwrap_err().contains("cannot exceed"));
    }

    #[test]
    fn search_text_is_trimmed() {
        assert_eq!(validate_search_text("  billing ").unwrap(), "billing");
        assert!(validate_search_text(" ").is_err());
    }
}
