// File: src/error.rs
// Purpose: Errors raised while binding a validator to a form

use formguard_validation_core::RuleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidatorError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidatorError {
    /// A field declares a rule spec the registry cannot compile
    #[error("invalid rules on field '{field}': {source}")]
    InvalidRules {
        field: String,
        #[source]
        source: RuleError,
    },

    /// Two fields share a name but declare different rule specs
    #[error("conflicting rules on field '{field}': `{first}` vs `{second}`")]
    ConflictingRules {
        field: String,
        first: String,
        second: String,
    },
}
