// File: src/aggregate.rs
// Purpose: Collect field values into FormValues on submit

use std::collections::btree_map::Entry;

use crate::config::{AggregationConfig, CheckboxPolicy};
use crate::form::{Field, FieldKind, Form};
use crate::value::{FormValue, FormValues};

/// Reads every named field of `form`, rule-bearing or not.
///
/// - radio: the checked sibling's value, `Null` when none is checked
/// - checkbox: see [`CheckboxPolicy`]
/// - file: the selection handle itself, shared rather than copied
/// - select-multiple: the selected options
/// - anything else: the current text
pub fn collect_values(form: &Form, config: &AggregationConfig) -> FormValues {
    let mut values = FormValues::new();

    let fields = form
        .fields
        .iter()
        .filter(|f| !f.name.is_empty())
        .filter(|f| !(config.skip_disabled && f.disabled));

    for field in fields {
        match field.kind {
            FieldKind::Radio => {
                let chosen = form
                    .fields
                    .iter()
                    .filter(|f| !(config.skip_disabled && f.disabled))
                    .find(|f| f.kind == FieldKind::Radio && f.name == field.name && f.checked)
                    .map(|f| FormValue::Text(f.value.clone()))
                    .unwrap_or(FormValue::Null);
                values.insert(field.name.as_str(), chosen);
            }
            FieldKind::Checkbox => match config.checkbox_policy {
                CheckboxPolicy::CheckedFirst => collect_checked_first(&mut values, field),
                CheckboxPolicy::DocumentOrder => collect_document_order(&mut values, field),
            },
            FieldKind::File => values.insert(field.name.as_str(), field.files.clone()),
            FieldKind::SelectMultiple => {
                values.insert(field.name.as_str(), field.selected.clone())
            }
            _ => values.insert(field.name.as_str(), field.value.as_str()),
        }
    }

    values
}

fn collect_checked_first(values: &mut FormValues, field: &Field) {
    let slot = values
        .entry(&field.name)
        .or_insert_with(|| FormValue::List(Vec::new()));

    if !field.checked {
        return;
    }
    match slot {
        FormValue::List(items) => items.push(field.value.clone()),
        other => *other = FormValue::List(vec![field.value.clone()]),
    }
}

// Unchecked boxes overwrite whatever the group collected so far, so the result
// depends on where the unchecked boxes sit in document order.
fn collect_document_order(values: &mut FormValues, field: &Field) {
    if !field.checked {
        values.insert(field.name.as_str(), "");
        return;
    }
    match values.entry(&field.name) {
        Entry::Occupied(mut slot) => match slot.get_mut() {
            FormValue::List(items) => items.push(field.value.clone()),
            other => *other = FormValue::List(vec![field.value.clone()]),
        },
        Entry::Vacant(slot) => {
            slot.insert(FormValue::List(vec![field.value.clone()]));
        }
    }
}
