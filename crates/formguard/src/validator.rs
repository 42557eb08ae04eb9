// File: src/validator.rs
// Purpose: Validation orchestrator: binds compiled rules to fields, reacts to
// input/blur/submit, drives the presenter and gates submission

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use formguard_validation_core::{FieldRules, RuleRegistry};
use tracing::{debug, trace, warn};

use crate::aggregate::collect_values;
use crate::config::ValidatorConfig;
use crate::document::{Document, FormHandle};
use crate::error::{Result, ValidatorError};
use crate::form::{FieldId, Form};
use crate::presenter::{GroupPresenter, Presenter, Slot};
use crate::validation::ValidationReport;
use crate::value::FormValues;

type SubmitCallback = Box<dyn FnMut(FormValues)>;

/// Field-level and form-level triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The field's value changed
    Input(FieldId),
    /// The field lost focus
    Blur(FieldId),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Nothing is bound to the event's target, or the trigger is disabled
    Ignored,
    /// Error presentation was cleared without re-validating
    Cleared,
    Validated { valid: bool },
    Submitted(SubmitOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed and the submit callback received the values
    Delivered,
    /// Every field passed and no callback is set: the form was submitted natively
    NativeSubmit,
    /// At least one field failed; nothing was submitted
    Rejected(ValidationReport),
    /// The validator is not attached to any form
    Inert,
}

/// A rule-bearing field, resolved once at construction
#[derive(Debug, Clone)]
struct Binding {
    field: FieldId,
    name: String,
    slot: Slot,
}

/// Builder for [`FormValidator`]
pub struct ValidatorBuilder {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
    presenter: Box<dyn Presenter>,
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self {
            registry: Arc::new(RuleRegistry::builtin()),
            config: ValidatorConfig::default(),
            presenter: Box::new(GroupPresenter),
        }
    }
}

impl ValidatorBuilder {
    pub fn with_registry(mut self, registry: impl Into<Arc<RuleRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Compiles the rules of the form matching `selector`.
    ///
    /// An unmatched selector is not an error: the validator comes back inert
    /// and every event is ignored. Rule specs that do not compile are.
    pub fn build(self, document: &Document, selector: &str) -> Result<FormValidator> {
        let mut validator = FormValidator {
            form: None,
            rules: HashMap::new(),
            bindings: Vec::new(),
            config: self.config,
            presenter: self.presenter,
            on_submit: None,
        };

        let Some(handle) = document.query_selector(selector) else {
            warn!(selector, "no form matches selector; validator is inert");
            return Ok(validator);
        };
        let Some(form) = document.form(handle) else {
            warn!(selector, "selector resolved to a missing form; validator is inert");
            return Ok(validator);
        };

        let mut specs: HashMap<&str, &str> = HashMap::new();

        for id in form.field_ids() {
            let Some(field) = form.field(id) else { continue };
            let Some(spec) = field.rules.as_deref() else { continue };

            if field.name.is_empty() {
                debug!(field = id.0, "skipping rule-bearing field without a name");
                continue;
            }

            match specs.get(field.name.as_str()).copied() {
                Some(first) if first.trim() != spec.trim() => {
                    return Err(ValidatorError::ConflictingRules {
                        field: field.name.clone(),
                        first: first.to_string(),
                        second: spec.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    let compiled = self.registry.compile(spec).map_err(|source| {
                        ValidatorError::InvalidRules {
                            field: field.name.clone(),
                            source,
                        }
                    })?;
                    specs.insert(field.name.as_str(), spec);
                    validator.rules.insert(field.name.clone(), compiled);
                }
            }

            let slot = resolve_slot(form, id, validator.config.presentation.render_errors);
            validator.bindings.push(Binding {
                field: id,
                name: field.name.clone(),
                slot,
            });
        }

        debug!(
            selector,
            fields = validator.bindings.len(),
            "validator attached"
        );
        validator.form = Some(handle);
        Ok(validator)
    }
}

fn resolve_slot(form: &Form, field: FieldId, render_errors: bool) -> Slot {
    if !render_errors {
        return Slot::Detached;
    }
    let Some(group_id) = form.field(field).and_then(|f| f.group.as_deref()) else {
        debug!(field = field.0, "field has no error container; errors will not be rendered");
        return Slot::Detached;
    };
    match form.group_index(group_id) {
        Some(index) => Slot::Group(index),
        None => {
            warn!(
                field = field.0,
                group = group_id,
                "error container not found; errors will not be rendered"
            );
            Slot::Detached
        }
    }
}

/// Validates one form of a [`Document`]
pub struct FormValidator {
    form: Option<FormHandle>,
    rules: HashMap<String, FieldRules>,
    bindings: Vec<Binding>,
    config: ValidatorConfig,
    presenter: Box<dyn Presenter>,
    on_submit: Option<SubmitCallback>,
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("bindings", &self.bindings)
            .field("config", &self.config)
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

impl FormValidator {
    /// Validator with the built-in rules, default config and [`GroupPresenter`]
    pub fn new(document: &Document, selector: &str) -> Result<Self> {
        Self::builder().build(document, selector)
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// True when the selector matched no form
    pub fn is_inert(&self) -> bool {
        self.form.is_none()
    }

    pub fn form_handle(&self) -> Option<FormHandle> {
        self.form
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Compiled rules for a field name
    pub fn rules_for(&self, name: &str) -> Option<&FieldRules> {
        self.rules.get(name)
    }

    /// Rule-bearing fields in document order
    pub fn bound_fields(&self) -> Vec<FieldId> {
        self.bindings.iter().map(|b| b.field).collect()
    }

    /// Where a bound field renders its errors
    pub fn slot_of(&self, field: FieldId) -> Option<Slot> {
        self.binding(field).map(|b| b.slot)
    }

    pub fn set_on_submit<F>(&mut self, callback: F)
    where
        F: FnMut(FormValues) + 'static,
    {
        self.on_submit = Some(Box::new(callback));
    }

    pub fn clear_on_submit(&mut self) {
        self.on_submit = None;
    }

    pub fn has_on_submit(&self) -> bool {
        self.on_submit.is_some()
    }

    pub fn dispatch(&mut self, document: &mut Document, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Input(field) => self.handle_input(document, field),
            FormEvent::Blur(field) => self.handle_blur(document, field),
            FormEvent::Submit => EventOutcome::Submitted(self.submit(document)),
        }
    }

    /// Value changed: drop any shown error without re-validating
    pub fn handle_input(&mut self, document: &mut Document, field: FieldId) -> EventOutcome {
        if !self.config.triggers.clear_on_input {
            return EventOutcome::Ignored;
        }
        let Some(slot) = self.slot_of(field) else {
            return EventOutcome::Ignored;
        };
        let Some(form) = self.form.and_then(|h| document.form_mut(h)) else {
            return EventOutcome::Ignored;
        };

        trace!(field = field.0, "clearing error on input");
        self.presenter.clear_error(form, slot);
        EventOutcome::Cleared
    }

    /// Focus lost: validate the field
    pub fn handle_blur(&mut self, document: &mut Document, field: FieldId) -> EventOutcome {
        if !self.config.triggers.validate_on_blur || self.binding(field).is_none() {
            return EventOutcome::Ignored;
        }
        EventOutcome::Validated {
            valid: self.validate_field(document, field),
        }
    }

    /// Runs the field's rules, renders the outcome and returns whether it passed.
    ///
    /// Fields without rules, disabled fields and fields of an inert validator
    /// are always valid.
    pub fn validate_field(&mut self, document: &mut Document, field: FieldId) -> bool {
        let Some(form) = self.form.and_then(|h| document.form_mut(h)) else {
            return true;
        };
        let Some(binding) = self.bindings.iter().find(|b| b.field == field) else {
            return true;
        };

        run_binding(
            binding,
            &self.rules,
            &self.config,
            &mut *self.presenter,
            form,
        )
        .is_none()
    }

    /// Validates every rule-bearing field without stopping at the first
    /// failure, rendering each outcome
    pub fn validate_all(&mut self, document: &mut Document) -> ValidationReport {
        let mut report = ValidationReport::success();
        let Some(form) = self.form.and_then(|h| document.form_mut(h)) else {
            return report;
        };

        for binding in &self.bindings {
            if let Some(message) = run_binding(
                binding,
                &self.rules,
                &self.config,
                &mut *self.presenter,
                form,
            ) {
                report.record_error(&binding.name, message);
            }
        }

        report
    }

    /// Validates everything, then hands the values to the submit callback or
    /// falls back to native submission. Any failure aborts the submit.
    pub fn submit(&mut self, document: &mut Document) -> SubmitOutcome {
        if self.is_inert() {
            return SubmitOutcome::Inert;
        }

        let report = self.validate_all(document);
        if !report.is_valid {
            debug!(invalid = ?report.invalid_fields(), "submit rejected");
            return SubmitOutcome::Rejected(report);
        }

        let Some(form) = self.form.and_then(|h| document.form_mut(h)) else {
            return SubmitOutcome::Inert;
        };

        match self.on_submit.as_mut() {
            Some(callback) => {
                let values = collect_values(form, &self.config.aggregation);
                debug!(fields = values.len(), "delivering form values");
                callback(values);
                SubmitOutcome::Delivered
            }
            None => {
                debug!("no submit callback; submitting natively");
                form.submit_natively();
                SubmitOutcome::NativeSubmit
            }
        }
    }

    fn binding(&self, field: FieldId) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.field == field)
    }
}

/// Evaluates one binding and renders the result; returns the error message
fn run_binding(
    binding: &Binding,
    rules: &HashMap<String, FieldRules>,
    config: &ValidatorConfig,
    presenter: &mut dyn Presenter,
    form: &mut Form,
) -> Option<String> {
    let disabled = form.field(binding.field).map_or(true, |f| f.disabled);
    let skip_disabled = config.aggregation.skip_disabled;
    if skip_disabled && disabled {
        presenter.clear_error(form, binding.slot);
        return None;
    }
    let field_rules = rules.get(&binding.name)?;

    let value = form.validation_value(binding.field, skip_disabled);
    let message = field_rules.check(&value);

    match &message {
        Some(message) => {
            debug!(field = %binding.name, %message, "field invalid");
            presenter.show_error(form, binding.slot, message);
        }
        None => presenter.clear_error(form, binding.slot),
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, FormGroup};
    use formguard_validation_core::string::REQUIRED_MESSAGE;

    fn signup() -> Document {
        Document::new().with_form(
            Form::new()
                .with_id("signup")
                .with_group(FormGroup::new("name-group"))
                .with_field(
                    Field::text("name")
                        .with_rules("required|min:3")
                        .in_group("name-group"),
                )
                .with_field(Field::text("nickname")),
        )
    }

    #[test]
    fn test_binds_only_rule_bearing_fields() {
        let validator = FormValidator::new(&signup(), "#signup").unwrap();
        assert!(!validator.is_inert());
        assert_eq!(validator.bound_fields(), vec![FieldId(0)]);
        assert_eq!(validator.rules_for("name").unwrap().names(), vec!["required", "min"]);
        assert!(validator.rules_for("nickname").is_none());
        assert_eq!(validator.slot_of(FieldId(0)), Some(Slot::Group(0)));
        assert_eq!(validator.slot_of(FieldId(1)), None);
    }

    #[test]
    fn test_blur_validates_and_input_clears() {
        let mut doc = signup();
        let mut validator = FormValidator::new(&doc, "#signup").unwrap();
        let name = FieldId(0);

        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Blur(name)),
            EventOutcome::Validated { valid: false }
        );
        let group = doc.forms[0].group_of(name).unwrap();
        assert!(group.is_invalid());
        assert_eq!(group.message(), Some(REQUIRED_MESSAGE));

        doc.forms[0].set_value(name, "Al");
        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Input(name)),
            EventOutcome::Cleared
        );
        let group = doc.forms[0].group("name-group").unwrap();
        assert!(!group.is_invalid());
        assert_eq!(group.message(), Some(""));
    }

    #[test]
    fn test_unbound_field_events_ignored() {
        let mut doc = signup();
        let mut validator = FormValidator::new(&doc, "#signup").unwrap();

        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Blur(FieldId(1))),
            EventOutcome::Ignored
        );
        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Input(FieldId(1))),
            EventOutcome::Ignored
        );
        assert!(validator.validate_field(&mut doc, FieldId(1)));
    }

    #[test]
    fn test_disabled_triggers() {
        let mut doc = signup();
        let mut config = ValidatorConfig::default();
        config.triggers.validate_on_blur = false;
        config.triggers.clear_on_input = false;

        let mut validator = FormValidator::builder()
            .with_config(config)
            .build(&doc, "#signup")
            .unwrap();

        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Blur(FieldId(0))),
            EventOutcome::Ignored
        );
        assert!(!doc.forms[0].groups[0].is_invalid());

        // explicit validation still works
        assert!(!validator.validate_field(&mut doc, FieldId(0)));
        assert_eq!(
            validator.dispatch(&mut doc, FormEvent::Input(FieldId(0))),
            EventOutcome::Ignored
        );
        assert!(doc.forms[0].groups[0].is_invalid());
    }

    #[test]
    fn test_conflicting_rules_rejected() {
        let doc = Document::new().with_form(
            Form::new()
                .with_field(Field::radio("plan", "free").with_rules("required"))
                .with_field(Field::radio("plan", "pro").with_rules("required|min:2")),
        );
        let err = FormValidator::new(&doc, "form").unwrap_err();
        assert!(matches!(
            err,
            ValidatorError::ConflictingRules { ref field, .. } if field == "plan"
        ));
    }

    #[test]
    fn test_shared_rules_for_group_members() {
        let doc = Document::new().with_form(
            Form::new()
                .with_field(Field::radio("plan", "free").with_rules("required"))
                .with_field(Field::radio("plan", "pro").with_rules(" required ")),
        );
        let validator = FormValidator::new(&doc, "form").unwrap();
        assert_eq!(validator.bound_fields(), vec![FieldId(0), FieldId(1)]);
        assert_eq!(validator.rules_for("plan").unwrap().len(), 1);
    }

    #[test]
    fn test_render_errors_off_detaches_every_field() {
        let mut config = ValidatorConfig::default();
        config.presentation.render_errors = false;

        let doc = signup();
        let validator = FormValidator::builder()
            .with_config(config)
            .build(&doc, "#signup")
            .unwrap();
        assert_eq!(validator.slot_of(FieldId(0)), Some(Slot::Detached));
    }
}
