//! Rule-spec mini-language: `name[:arg]` tokens joined by `|`

use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// One parsed rule token, e.g. `min:6`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub arg: Option<String>,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }
}

impl FromStr for RuleSpec {
    type Err = RuleError;

    /// Splits on the first `:` only, so `pattern:a:b` carries the argument `a:b`.
    /// A blank argument (`min:`) is the same as none.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (token.trim(), None),
        };
        let arg = arg.filter(|a| !a.is_empty()).map(str::to_string);

        if name.is_empty() {
            return Err(RuleError::EmptyToken {
                spec: token.to_string(),
                position: 0,
            });
        }

        Ok(Self {
            name: name.to_string(),
            arg,
        })
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}:{}", self.name, arg),
            None => f.write_str(&self.name),
        }
    }
}

/// Parses a full spec such as `"required|min:6|max:50"` in declaration order
pub fn parse_rule_list(spec: &str) -> Result<Vec<RuleSpec>, RuleError> {
    if spec.trim().is_empty() {
        return Err(RuleError::EmptySpec);
    }

    spec.split('|')
        .enumerate()
        .map(|(position, token)| {
            token.parse::<RuleSpec>().map_err(|err| match err {
                RuleError::EmptyToken { .. } => RuleError::EmptyToken {
                    spec: spec.to_string(),
                    position,
                },
                other => other,
            })
        })
        .collect()
}
