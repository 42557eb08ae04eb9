//! String validation functions
//!
//! Lengths are counted in characters, not bytes, so `"héllo"` has length 5.

pub const REQUIRED_MESSAGE: &str = "Please fill in this field";

/// Fails when the value is empty
pub fn validate_required(s: &str) -> Result<(), String> {
    if s.is_empty() {
        Err(REQUIRED_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Validates minimum string length
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if s.chars().count() >= min {
        Ok(())
    } else {
        Err(format!("Please enter at least {} characters", min))
    }
}

/// Validates maximum string length
pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if s.chars().count() <= max {
        Ok(())
    } else {
        Err(format!("Please enter at most {} characters", max))
    }
}
