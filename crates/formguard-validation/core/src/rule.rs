//! Compiled rules and the factories that produce them

use std::fmt;
use std::sync::Arc;

use crate::error::RuleError;

type Predicate = dyn Fn(&str) -> Option<String> + Send + Sync;
type Binder = dyn Fn(&str) -> Result<CompiledRule, RuleError> + Send + Sync;

/// A pure check from a field value to an optional error message.
///
/// `None` means the value passes. Cloning shares the underlying closure.
#[derive(Clone)]
pub struct CompiledRule {
    name: Arc<str>,
    predicate: Arc<Predicate>,
}

impl CompiledRule {
    pub fn new<F>(name: impl Into<Arc<str>>, predicate: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Wraps a `Result`-style validator such as [`crate::string::validate_required`]
    pub fn from_validator<F>(name: impl Into<Arc<str>>, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::new(name, move |value| validator(value).err())
    }

    /// Rule name, e.g. `"min"`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, value: &str) -> Option<String> {
        (self.predicate)(value)
    }
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Registry entry for a named rule
#[derive(Clone)]
pub enum RuleFactory {
    /// Used as-is; takes no argument (`required`, `email`)
    Predicate(CompiledRule),
    /// Bound to the spec argument at compile time (`min:6`)
    Parameterized(Arc<Binder>),
}

impl RuleFactory {
    pub fn parameterized<F>(binder: F) -> Self
    where
        F: Fn(&str) -> Result<CompiledRule, RuleError> + Send + Sync + 'static,
    {
        RuleFactory::Parameterized(Arc::new(binder))
    }

    /// Produces the predicate for one rule token.
    ///
    /// `name` is only used for error reporting.
    pub fn bind(&self, name: &str, arg: Option<&str>) -> Result<CompiledRule, RuleError> {
        match (self, arg) {
            (RuleFactory::Predicate(rule), None) => Ok(rule.clone()),
            (RuleFactory::Predicate(_), Some(arg)) => Err(RuleError::UnexpectedArgument {
                rule: name.to_string(),
                arg: arg.to_string(),
            }),
            (RuleFactory::Parameterized(binder), Some(arg)) => binder(arg),
            (RuleFactory::Parameterized(_), None) => Err(RuleError::MissingArgument {
                rule: name.to_string(),
            }),
        }
    }

    pub fn takes_argument(&self) -> bool {
        matches!(self, RuleFactory::Parameterized(_))
    }
}

impl fmt::Debug for RuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleFactory::Predicate(rule) => f.debug_tuple("Predicate").field(rule).finish(),
            RuleFactory::Parameterized(_) => f.write_str("Parameterized(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_zero() -> CompiledRule {
        CompiledRule::new("non_zero", |v| (v == "0").then(|| "zero".to_string()))
    }

    #[test]
    fn test_check() {
        let rule = non_zero();
        assert_eq!(rule.name(), "non_zero");
        assert_eq!(rule.check("0").as_deref(), Some("zero"));
        assert_eq!(rule.check("1"), None);
    }

    #[test]
    fn test_from_validator() {
        let rule = CompiledRule::from_validator("required", crate::string::validate_required);
        assert!(rule.check("").is_some());
        assert!(rule.check("x").is_none());
    }

    #[test]
    fn test_bind_predicate() {
        let factory = RuleFactory::Predicate(non_zero());
        assert!(!factory.takes_argument());
        assert!(factory.bind("non_zero", None).is_ok());
        assert_eq!(
            factory.bind("non_zero", Some("5")).unwrap_err(),
            RuleError::UnexpectedArgument {
                rule: "non_zero".into(),
                arg: "5".into()
            }
        );
    }

    #[test]
    fn test_bind_parameterized() {
        let factory = RuleFactory::parameterized(|arg| {
            let forbidden = arg.to_string();
            Ok(CompiledRule::new("not", move |v| {
                (v == forbidden).then(|| format!("must not be {}", forbidden))
            }))
        });
        assert!(factory.takes_argument());

        let rule = factory.bind("not", Some("x")).unwrap();
        assert_eq!(rule.check("x").as_deref(), Some("must not be x"));
        assert_eq!(rule.check("y"), None);

        assert_eq!(
            factory.bind("not", None).unwrap_err(),
            RuleError::MissingArgument { rule: "not".into() }
        );
    }
}
