//! formguard Validation WASM
//!
//! WebAssembly bindings for formguard rule checks.
//! Browser code passes the same `required|min:6` specs it puts on its inputs
//! and gets back the first failing message, computed by the same rules the
//! Rust side uses.

use formguard_validation_core::{is_valid_email, RuleError, RuleRegistry};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

static REGISTRY: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::builtin);

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validation error returned to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// One field as sent from JavaScript
#[derive(Deserialize, Debug, Clone)]
pub struct FieldInput {
    pub name: String,
    pub rules: String,
    #[serde(default)]
    pub value: String,
}

/// First failing message for `value` under `rules`
pub fn check_value(rules: &str, value: &str) -> Result<Option<String>, RuleError> {
    Ok(REGISTRY.compile(rules)?.check(value))
}

/// Checks every field and returns one error per failing field, in input order.
///
/// A single bad rule spec fails the whole batch.
pub fn check_fields(fields: &[FieldInput]) -> Result<Vec<FieldError>, RuleError> {
    let mut errors = Vec::new();

    for field in fields {
        let rules = REGISTRY.compile(&field.rules)?;
        if let Some(message) = rules.check(&field.value) {
            errors.push(FieldError {
                field: field.name.clone(),
                message,
            });
        }
    }

    Ok(errors)
}

fn config_error(err: RuleError) -> JsValue {
    let message = format!("formguard: {}", err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Validate a single value
///
/// # Example (JavaScript)
/// ```javascript
/// const message = validateValue('required|email', input.value);
/// if (message) { showError(input, message); }
/// ```
#[wasm_bindgen(js_name = validateValue)]
pub fn validate_value_js(rules: &str, value: &str) -> Result<Option<String>, JsValue> {
    check_value(rules, value).map_err(config_error)
}

/// Throws if the spec does not compile; use at page setup to fail fast
#[wasm_bindgen(js_name = checkRules)]
pub fn check_rules_js(rules: &str) -> Result<(), JsValue> {
    REGISTRY.compile(rules).map(|_| ()).map_err(config_error)
}

/// Validate many fields at once
///
/// # Example (JavaScript)
/// ```javascript
/// const errors = validateFields([
///     { name: 'email', rules: 'required|email', value: 'a@b.co' },
///     { name: 'password', rules: 'required|min:6', value: '123' },
/// ]);
/// // [{ field: 'password', message: 'Please enter at least 6 characters' }]
/// ```
#[wasm_bindgen(js_name = validateFields)]
pub fn validate_fields_js(fields: JsValue) -> Result<JsValue, JsValue> {
    let fields: Vec<FieldInput> = serde_wasm_bindgen::from_value(fields)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse fields: {}", e)))?;

    let errors = check_fields(&fields).map_err(config_error)?;
    Ok(serde_wasm_bindgen::to_value(&errors)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    is_valid_email(email)
}
