// formguard - declarative form validation
// Rule specs on fields, inline errors on blur, submission gated on every rule passing

pub mod aggregate;
pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod presenter;
pub mod validation;
pub mod validator;
pub mod value;

// Re-export framework types
pub use config::{
    AggregationConfig, CheckboxPolicy, PresentationConfig, TriggerConfig, ValidatorConfig,
};
pub use document::{Document, FormHandle};
pub use error::ValidatorError;
pub use form::{Field, FieldId, FieldKind, Form, FormGroup};
pub use presenter::{GroupPresenter, Presenter, Slot};
pub use validation::ValidationReport;
pub use validator::{EventOutcome, FormEvent, FormValidator, SubmitOutcome, ValidatorBuilder};
pub use value::{FileHandle, FileList, FormValue, FormValues};

// Re-export the rule layer
pub use formguard_validation_core as rules;
pub use formguard_validation_core::{CompiledRule, FieldRules, RuleError, RuleRegistry};
