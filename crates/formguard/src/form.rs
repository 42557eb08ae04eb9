// File: src/form.rs
// Purpose: In-memory form model: fields, their presentation groups, native submission

use serde::{Deserialize, Serialize};

use crate::value::{FileHandle, FileList};

/// Index of a field inside its [`Form`], in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// Input kind; decides how a field is read for validation and aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Search,
    Tel,
    Url,
    Date,
    Hidden,
    Textarea,
    Select,
    SelectMultiple,
    Radio,
    Checkbox,
    File,
}

impl FieldKind {
    /// Radios and checkboxes: fields whose `checked` state matters
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Checkbox)
    }
}

/// One named input element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default)]
    pub kind: FieldKind,

    /// Current text, or the submitted value of a radio/checkbox
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub checked: bool,

    /// Selected options of a `select-multiple`
    #[serde(default)]
    pub selected: Vec<String>,

    #[serde(default)]
    pub files: FileList,

    /// Pipe-delimited rule spec, e.g. `required|min:6`
    #[serde(default)]
    pub rules: Option<String>,

    #[serde(default)]
    pub disabled: bool,

    /// Id of the [`FormGroup`] that shows this field's error
    #[serde(default)]
    pub group: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            checked: false,
            selected: Vec::new(),
            files: FileList::default(),
            rules: None,
            disabled: false,
            group: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Radio).with_value(value)
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox).with_value(value)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_selected(mut self, selected: Vec<String>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_files(mut self, files: Vec<FileHandle>) -> Self {
        self.files = FileList::new(files);
        self
    }

    pub fn has_rules(&self) -> bool {
        self.rules.is_some()
    }
}

/// Presentation container around one or more fields: carries the invalid
/// marker and, optionally, a message slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormGroup {
    pub id: String,

    /// Whether the group has an element to write messages into
    #[serde(default = "default_true")]
    pub message_slot: bool,

    #[serde(skip)]
    invalid: bool,

    #[serde(skip)]
    message: String,
}

fn default_true() -> bool {
    true
}

impl FormGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message_slot: true,
            invalid: false,
            message: String::new(),
        }
    }

    /// Group that can be marked invalid but has nowhere to print the message
    pub fn without_message_slot(id: impl Into<String>) -> Self {
        Self {
            message_slot: false,
            ..Self::new(id)
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Text shown in the message slot; `None` when the group has no slot
    pub fn message(&self) -> Option<&str> {
        self.message_slot.then_some(self.message.as_str())
    }

    pub fn mark_invalid(&mut self, message: &str) {
        self.invalid = true;
        if self.message_slot {
            self.message = message.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.invalid = false;
        self.message.clear();
    }
}

/// A form container and everything inside it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(default)]
    pub groups: Vec<FormGroup>,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(skip)]
    native_submissions: usize,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_group(mut self, group: FormGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: Field) -> FieldId {
        self.fields.push(field);
        FieldId(self.fields.len() - 1)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.0)
    }

    /// First field named `name`
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields.iter().position(|f| f.name == name).map(FieldId)
    }

    /// Field named `name` whose value is `value`, e.g. one radio of a group
    pub fn option_id(&self, name: &str, value: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| f.name == name && f.value == value)
            .map(FieldId)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        (0..self.fields.len()).map(FieldId)
    }

    pub fn group_index(&self, id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&FormGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_at(&self, index: usize) -> Option<&FormGroup> {
        self.groups.get(index)
    }

    pub fn group_at_mut(&mut self, index: usize) -> Option<&mut FormGroup> {
        self.groups.get_mut(index)
    }

    /// Group that presents `field`'s errors, if declared and present
    pub fn group_of(&self, field: FieldId) -> Option<&FormGroup> {
        let group_id = self.field(field)?.group.as_deref()?;
        self.group(group_id)
    }

    /// Types `value` into a field
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        if let Some(f) = self.field_mut(field) {
            f.value = value.into();
        }
    }

    /// Ticks or unticks a checkbox. Checking a radio unchecks its siblings.
    pub fn set_checked(&mut self, field: FieldId, checked: bool) {
        let Some(target) = self.field(field) else {
            return;
        };
        let (name, kind) = (target.name.clone(), target.kind);

        if kind == FieldKind::Radio && checked {
            let siblings = self
                .fields
                .iter_mut()
                .filter(|f| f.kind == FieldKind::Radio && f.name == name);
            for f in siblings {
                f.checked = false;
            }
        }
        if let Some(f) = self.field_mut(field) {
            f.checked = checked;
        }
    }

    pub fn set_selected(&mut self, field: FieldId, selected: Vec<String>) {
        if let Some(f) = self.field_mut(field) {
            f.selected = selected;
        }
    }

    pub fn set_files(&mut self, field: FieldId, files: Vec<FileHandle>) {
        if let Some(f) = self.field_mut(field) {
            f.files = FileList::new(files);
        }
    }

    /// Value a field's rules are checked against.
    ///
    /// Grouped inputs answer for the whole group: a radio reads the checked
    /// sibling's value, a checkbox the checked values joined with `,`. Both
    /// read empty when nothing is checked, so `required` means "pick one".
    /// With `skip_disabled`, disabled siblings count as unchecked.
    pub fn validation_value(&self, field: FieldId, skip_disabled: bool) -> String {
        let Some(f) = self.field(field) else {
            return String::new();
        };
        let mut siblings = self
            .fields
            .iter()
            .filter(|s| s.kind == f.kind && s.name == f.name && s.checked)
            .filter(|s| !(skip_disabled && s.disabled));

        match f.kind {
            FieldKind::Radio => siblings.next().map(|s| s.value.clone()).unwrap_or_default(),
            FieldKind::Checkbox => siblings
                .map(|s| s.value.as_str())
                .collect::<Vec<_>>()
                .join(","),
            FieldKind::SelectMultiple => f.selected.join(","),
            FieldKind::File => f
                .files
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
            _ => f.value.clone(),
        }
    }

    /// Plain submission that bypasses validation
    pub fn submit_natively(&mut self) {
        self.native_submissions += 1;
    }

    pub fn native_submissions(&self) -> usize {
        self.native_submissions
    }
}
