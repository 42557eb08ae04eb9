//! formguard Validation Core
//!
//! Named validation rules, the `name[:arg]|...` rule-spec mini-language and
//! the compiler that turns a spec into an ordered list of predicates.
//! Used by the form orchestrator and by the WASM bindings alike.
//!
//! ```
//! use formguard_validation_core::RuleRegistry;
//!
//! let registry = RuleRegistry::builtin();
//! let rules = registry.compile("required|min:3").unwrap();
//!
//! assert_eq!(rules.len(), 2);
//! assert_eq!(rules.check("").as_deref(), Some("Please fill in this field"));
//! assert_eq!(rules.check("abc"), None);
//! ```

pub mod compiler;
pub mod email;
pub mod error;
pub mod registry;
pub mod rule;
pub mod spec;
pub mod string;

pub use compiler::{compile, FieldRules};
pub use email::is_valid_email;
pub use error::RuleError;
pub use registry::RuleRegistry;
pub use rule::{CompiledRule, RuleFactory};
pub use spec::{parse_rule_list, RuleSpec};
