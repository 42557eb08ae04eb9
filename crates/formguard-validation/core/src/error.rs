//! Configuration errors raised while compiling rule specs

use thiserror::Error;

/// A rule spec that cannot be turned into predicates.
///
/// These are integration bugs in the form declaration, never user input
/// problems, so they are reported as soon as the spec is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule not found: {name}")]
    UnknownRule { name: String },

    #[error("empty rule list")]
    EmptySpec,

    #[error("empty rule at position {position} in `{spec}`")]
    EmptyToken { spec: String, position: usize },

    #[error("rule `{rule}` requires an argument")]
    MissingArgument { rule: String },

    #[error("rule `{rule}` does not take an argument (got `{arg}`)")]
    UnexpectedArgument { rule: String, arg: String },

    #[error("invalid argument `{arg}` for rule `{rule}`: {reason}")]
    InvalidArgument {
        rule: String,
        arg: String,
        reason: String,
    },
}
