//! Named rule factories
//!
//! A [`RuleRegistry`] is built once, never mutated afterwards, and handed to
//! whoever compiles rule specs. Custom rules are added with the consuming
//! `with_*` methods:
//!
//! ```
//! use formguard_validation_core::RuleRegistry;
//!
//! let registry = RuleRegistry::builtin().with_rule("digits", |value: &str| {
//!     (!value.chars().all(|c| c.is_ascii_digit())).then(|| "Digits only".to_string())
//! });
//!
//! let rules = registry.compile("required|digits").unwrap();
//! assert_eq!(rules.check("12a").as_deref(), Some("Digits only"));
//! ```

use std::collections::HashMap;

use crate::compiler::{self, FieldRules};
use crate::email::validate_email;
use crate::error::RuleError;
use crate::rule::{CompiledRule, RuleFactory};
use crate::string::{validate_max_length, validate_min_length, validate_required};

#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// Registry with no rules at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with `required`, `email`, `min` and `max`
    pub fn builtin() -> Self {
        Self::empty()
            .with_factory(
                "required",
                RuleFactory::Predicate(CompiledRule::from_validator("required", validate_required)),
            )
            .with_factory(
                "email",
                RuleFactory::Predicate(CompiledRule::from_validator("email", validate_email)),
            )
            .with_parameterized_rule("min", |arg| {
                let min = parse_length("min", arg)?;
                Ok(CompiledRule::from_validator("min", move |v| {
                    validate_min_length(v, min)
                }))
            })
            .with_parameterized_rule("max", |arg| {
                let max = parse_length("max", arg)?;
                Ok(CompiledRule::from_validator("max", move |v| {
                    validate_max_length(v, max)
                }))
            })
    }

    /// Registers (or replaces) a factory under `name`
    pub fn with_factory(mut self, name: impl Into<String>, factory: RuleFactory) -> Self {
        self.rules.insert(name.into(), factory);
        self
    }

    /// Registers an argument-less rule
    pub fn with_rule<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let name = name.into();
        let rule = CompiledRule::new(name.as_str(), predicate);
        self.with_factory(name, RuleFactory::Predicate(rule))
    }

    /// Registers a rule that is bound to its `name:arg` argument at compile time
    pub fn with_parameterized_rule<F>(self, name: impl Into<String>, binder: F) -> Self
    where
        F: Fn(&str) -> Result<CompiledRule, RuleError> + Send + Sync + 'static,
    {
        self.with_factory(name, RuleFactory::parameterized(binder))
    }

    pub fn get(&self, name: &str) -> Option<&RuleFactory> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compiles a rule spec against this registry
    pub fn compile(&self, spec: &str) -> Result<FieldRules, RuleError> {
        compiler::compile(spec, self)
    }
}

fn parse_length(rule: &str, arg: &str) -> Result<usize, RuleError> {
    arg.parse::<usize>()
        .map_err(|_| RuleError::InvalidArgument {
            rule: rule.to_string(),
            arg: arg.to_string(),
            reason: "expected a non-negative integer".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::REQUIRED_MESSAGE;

    #[test]
    fn test_builtin_names() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.names(), vec!["email", "max", "min", "required"]);
        assert_eq!(registry.len(), 4);
        assert!(RuleRegistry::empty().is_empty());
    }

    #[test]
    fn test_builtin_factory_shapes() {
        let registry = RuleRegistry::builtin();
        assert!(!registry.get("required").unwrap().takes_argument());
        assert!(!registry.get("email").unwrap().takes_argument());
        assert!(registry.get("min").unwrap().takes_argument());
        assert!(registry.get("max").unwrap().takes_argument());
        assert!(registry.get("phone").is_none());
    }

    #[test]
    fn test_required_property() {
        let required = RuleRegistry::builtin()
            .get("required")
            .unwrap()
            .bind("required", None)
            .unwrap();

        for value in ["", "a", "0", "false", " "] {
            assert_eq!(required.check(value).is_none(), !value.is_empty(), "{value:?}");
        }
        assert_eq!(required.check("").as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_min_max_property() {
        let registry = RuleRegistry::builtin();
        let values = ["", "a", "ab", "abc", "abcd", "abcdefghij"];

        for n in 0..6usize {
            let arg = n.to_string();
            let min = registry.get("min").unwrap().bind("min", Some(&arg)).unwrap();
            let max = registry.get("max").unwrap().bind("max", Some(&arg)).unwrap();

            for value in values {
                let len = value.chars().count();
                assert_eq!(min.check(value).is_none(), len >= n, "min:{n} {value:?}");
                assert_eq!(max.check(value).is_none(), len <= n, "max:{n} {value:?}");
            }
        }
    }

    #[test]
    fn test_invalid_length_argument() {
        let err = RuleRegistry::builtin()
            .get("min")
            .unwrap()
            .bind("min", Some("six"))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidArgument { ref arg, .. } if arg == "six"));

        let err = RuleRegistry::builtin()
            .get("max")
            .unwrap()
            .bind("max", Some("-1"))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidArgument { .. }));
    }

    #[test]
    fn test_custom_rule_overrides_builtin() {
        let registry = RuleRegistry::builtin().with_rule("required", |v| {
            v.trim().is_empty().then(|| "blank".to_string())
        });

        let rules = registry.compile("required").unwrap();
        assert_eq!(rules.check("   ").as_deref(), Some("blank"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_custom_parameterized_rule() {
        let registry = RuleRegistry::empty().with_parameterized_rule("prefix", |arg| {
            let prefix = arg.to_string();
            Ok(CompiledRule::new("prefix", move |v| {
                (!v.starts_with(prefix.as_str())).then(|| format!("Must start with '{}'", prefix))
            }))
        });

        let rules = registry.compile("prefix:user_").unwrap();
        assert_eq!(rules.check("user_john"), None);
        assert_eq!(rules.check("admin").as_deref(), Some("Must start with 'user_'"));
    }
}
