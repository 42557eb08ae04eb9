//! Rule-spec compiler

use tracing::trace;

use crate::error::RuleError;
use crate::registry::RuleRegistry;
use crate::rule::CompiledRule;
use crate::spec::parse_rule_list;

/// Ordered predicates for one field. Declaration order is evaluation order.
#[derive(Debug, Clone)]
pub struct FieldRules {
    rules: Vec<CompiledRule>,
}

impl FieldRules {
    /// Evaluates the rules in order and returns the first error message
    pub fn check(&self, value: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.check(value).is_none()
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(CompiledRule::name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false` for rules produced by [`compile`]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Turns `"required|min:6|max:50"` into bound predicates.
///
/// Any unknown rule name or malformed argument fails the whole spec.
pub fn compile(spec: &str, registry: &RuleRegistry) -> Result<FieldRules, RuleError> {
    let rules = parse_rule_list(spec)?
        .into_iter()
        .map(|token| {
            let factory = registry
                .get(&token.name)
                .ok_or_else(|| RuleError::UnknownRule {
                    name: token.name.clone(),
                })?;
            factory.bind(&token.name, token.arg.as_deref())
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!(spec, count = rules.len(), "compiled rule spec");
    Ok(FieldRules { rules })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::EMAIL_MESSAGE;
    use crate::string::REQUIRED_MESSAGE;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("required", 1)]
    #[case("required|min:3", 2)]
    #[case("required|min:6|max:50", 3)]
    #[case("email|required|email", 3)]
    fn test_length_matches_token_count(#[case] spec: &str, #[case] expected: usize) {
        let rules = compile(spec, &RuleRegistry::builtin()).unwrap();
        assert_eq!(rules.len(), expected);
        assert_eq!(rules.len(), spec.split('|').count());
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_order_matches_declaration() {
        let rules = compile("max:50|required|email|min:6", &RuleRegistry::builtin()).unwrap();
        assert_eq!(rules.names(), vec!["max", "required", "email", "min"]);
    }

    #[test]
    fn test_short_circuit_on_first_failure() {
        let rules = compile("required|min:6", &RuleRegistry::builtin()).unwrap();
        assert_eq!(rules.check("").as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(
            rules.check("abc").as_deref(),
            Some("Please enter at least 6 characters")
        );
        assert!(rules.is_valid("abcdef"));
    }

    #[test]
    fn test_email_field_scenarios() {
        let rules = compile("required|email", &RuleRegistry::builtin()).unwrap();
        assert_eq!(rules.check("").as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(rules.check("not-an-email").as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(rules.check("a@b.co"), None);
    }

    #[test]
    fn test_unknown_rule_fails_fast() {
        let err = compile("required|phone|min:3", &RuleRegistry::builtin()).unwrap_err();
        assert_eq!(err, RuleError::UnknownRule { name: "phone".into() });
    }

    #[test]
    fn test_argument_errors() {
        let registry = RuleRegistry::builtin();
        assert_eq!(
            compile("min", &registry).unwrap_err(),
            RuleError::MissingArgument { rule: "min".into() }
        );
        assert_eq!(
            compile("required|min:", &registry).unwrap_err(),
            RuleError::MissingArgument { rule: "min".into() }
        );
        assert_eq!(
            compile("required:5", &registry).unwrap_err(),
            RuleError::UnexpectedArgument {
                rule: "required".into(),
                arg: "5".into()
            }
        );
        assert!(matches!(
            compile("max:lots", &registry),
            Err(RuleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_spec_rejected() {
        assert_eq!(
            compile("", &RuleRegistry::builtin()).unwrap_err(),
            RuleError::EmptySpec
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let rules = compile("required|min:2|max:4", &RuleRegistry::builtin()).unwrap();
        for value in ["", "a", "ab", "abcde"] {
            assert_eq!(rules.check(value), rules.check(value));
        }
    }
}
