// File: src/value.rs
// Purpose: Aggregated form values handed to the submit callback

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to a user-selected file. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// A file input's selection. Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct FileList(Arc<Vec<FileHandle>>);

impl FileList {
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self(Arc::new(files))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileHandle> {
        self.0.iter()
    }

    /// True when both lists are the same selection, not merely equal
    pub fn same_selection(&self, other: &FileList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for FileList {
    fn eq(&self, other: &Self) -> bool {
        self.same_selection(other) || self.0 == other.0
    }
}

impl Serialize for FileList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FileList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<FileHandle>::deserialize(deserializer).map(FileList::new)
    }
}

impl From<Vec<FileHandle>> for FileList {
    fn from(files: Vec<FileHandle>) -> Self {
        FileList::new(files)
    }
}

/// Value collected for one field name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Text-like inputs, selects, the chosen radio
    Text(String),
    /// Checkbox groups and multi-selects
    List(Vec<String>),
    /// File inputs
    Files(FileList),
    /// Radio group with nothing selected
    Null,
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FormValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&FileList> {
        match self {
            FormValue::Files(files) => Some(files),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FormValue::Text(s) => s.is_empty(),
            FormValue::List(items) => items.is_empty(),
            FormValue::Files(files) => files.is_empty(),
            FormValue::Null => true,
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Text(s) => f.write_str(s),
            FormValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FormValue::Files(files) => {
                let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
                write!(f, "[{}]", names.join(", "))
            }
            FormValue::Null => Ok(()),
        }
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for FormValue {
    fn from(items: Vec<String>) -> Self {
        FormValue::List(items)
    }
}

impl From<FileList> for FormValue {
    fn from(files: FileList) -> Self {
        FormValue::Files(files)
    }
}

/// Field name to value, built fresh on every successful submit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, FormValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Mutable slot for `name`, used while aggregating groups
    pub(crate) fn entry(&mut self, name: &str) -> btree_map::Entry<'_, String, FormValue> {
        self.values.entry(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FormValue> {
        self.values.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Serializing strings, lists and file handles into a JSON value cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a String, &'a FormValue);
    type IntoIter = btree_map::Iter<'a, String, FormValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
