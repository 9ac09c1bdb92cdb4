//! # Validation Utilities
//!
//! Input validation helpers.

/// Names of required fields that are absent or blank.
///
/// ```rust
/// use lib_utils::validation::missing_fields;
///
/// let missing = missing_fields(&[("tokenIn", Some("SUI")), ("amountIn", None)]);
/// assert_eq!(missing, vec!["amountIn"]);
/// ```
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_counts_as_missing() {
        let missing = missing_fields(&[("a", Some("  ")), ("b", Some("x")), ("c", None)]);
        assert_eq!(missing, vec!["a", "c"]);
    }
}
