// File: src/validation.rs
// Purpose: Outcome of validating a whole form

use std::collections::BTreeMap;

/// Result of validating every rule-bearing field, with the first error per field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// Records a field failure. The first message for a field is kept.
    pub fn record_error(&mut self, field: &str, message: String) {
        self.is_valid = false;
        self.errors.entry(field.to_string()).or_insert(message);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Names of the invalid fields, sorted
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let report = ValidationReport::success();
        assert!(report.is_valid);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_first_error_kept() {
        let mut report = ValidationReport::success();
        report.record_error("gender", "pick one".into());
        report.record_error("gender", "pick one again".into());

        assert!(!report.is_valid);
        assert_eq!(report.get_error("gender"), Some("pick one"));
        assert_eq!(report.invalid_fields(), vec!["gender"]);
    }
}
