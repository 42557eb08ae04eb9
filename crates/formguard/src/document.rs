// File: src/document.rs
// Purpose: Collection of forms and selector resolution

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::form::Form;

/// Position of a form inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormHandle(pub usize);

/// Every form on a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, rename = "form")]
    pub forms: Vec<Form>,
}

/// Parsed form selector: `form`, `#id`, `.class`, `form#id`, `form.class`
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector<'a> {
    Any,
    Id(&'a str),
    Class(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        let rest = selector.strip_prefix("form").unwrap_or(selector);

        if rest.is_empty() {
            return (!selector.is_empty()).then_some(Selector::Any);
        }
        if let Some(id) = rest.strip_prefix('#') {
            return is_ident(id).then_some(Selector::Id(id));
        }
        if let Some(class) = rest.strip_prefix('.') {
            return is_ident(class).then_some(Selector::Class(class));
        }
        None
    }

    fn matches(&self, form: &Form) -> bool {
        match self {
            Selector::Any => true,
            Selector::Id(id) => form.id.as_deref() == Some(*id),
            Selector::Class(class) => form.classes.iter().any(|c| c == class),
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn add_form(&mut self, form: Form) -> FormHandle {
        self.forms.push(form);
        FormHandle(self.forms.len() - 1)
    }

    /// First form matching `selector`; `None` for no match or an
    /// unsupported selector
    pub fn query_selector(&self, selector: &str) -> Option<FormHandle> {
        let parsed = Selector::parse(selector)?;
        self.forms.iter().position(|f| parsed.matches(f)).map(FormHandle)
    }

    pub fn form(&self, handle: FormHandle) -> Option<&Form> {
        self.forms.get(handle.0)
    }

    pub fn form_mut(&mut self, handle: FormHandle) -> Option<&mut Form> {
        self.forms.get_mut(handle.0)
    }

    /// Parse forms declared as `[[form]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load form declarations from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form file: {:?}", path))
    }
}
