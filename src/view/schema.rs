//! Declarative configuration schemas for view types.
//!
//! A schema is checked against the raw JSON object before it is deserialized into the
//! view's typed configuration, so every violation is reported with a `$.path` at once.

use std::fmt;

use serde_json::{Map, Value};

use crate::foundation::error::{BoardError, BoardResult};

/// Value shape accepted by one field.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 string, length counted in characters.
    Str {
        /// Minimum length.
        #[serde(skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
        /// Maximum length.
        #[serde(skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
    },
    /// Integer.
    Int {
        /// Inclusive lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        /// Inclusive upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Number (integers accepted).
    Float {
        /// Inclusive lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// `true` or `false`.
    Bool,
    /// Homogeneous array.
    List {
        /// Shape of every element.
        item: Box<FieldKind>,
    },
    /// Nested object with its own fields.
    Object {
        /// Allowed fields.
        fields: Vec<FieldRule>,
    },
}

impl FieldKind {
    /// String with optional length bounds.
    pub fn string(min_len: Option<usize>, max_len: Option<usize>) -> Self {
        Self::Str { min_len, max_len }
    }

    /// Integer with optional inclusive bounds.
    pub fn int(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Int { min, max }
    }

    /// Number with optional inclusive bounds.
    pub fn float(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Float { min, max }
    }

    /// Array of `item`.
    pub fn list(item: FieldKind) -> Self {
        Self::List {
            item: Box::new(item),
        }
    }

    /// Object with `fields`.
    pub fn object(fields: Vec<FieldRule>) -> Self {
        Self::Object { fields }
    }
}

/// One named field of a schema.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldRule {
    /// JSON key.
    pub name: String,
    /// Accepted shape.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the key must be present.
    pub required: bool,
    /// Short human-readable description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FieldRule {
    /// Optional field.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: String::new(),
        }
    }

    /// Required field.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            required: true,
            ..Self::optional(name, kind)
        }
    }

    /// Attach a description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

/// Field table for one view type.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ConfigSchema {
    /// Allowed top-level fields, in declaration order.
    pub fields: Vec<FieldRule>,
}

impl ConfigSchema {
    /// Empty schema (accepts only `{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field rule.
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Look up a top-level field.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check `config` against the schema, collecting every violation.
    pub fn validate(&self, config: &Value) -> Result<(), SchemaErrors> {
        let mut errors = Vec::new();
        let mut path = Vec::new();
        match config {
            Value::Object(map) => check_object(&self.fields, map, &mut path, &mut errors),
            _ => errors.push(SchemaError::at(&path, "config must be a JSON object")),
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaErrors { errors })
        }
    }

    /// Turn `key=value` string pairs into a JSON object using each field's kind.
    ///
    /// The result still has to pass [`ConfigSchema::validate`].
    pub fn coerce_pairs(&self, pairs: &[(String, String)]) -> BoardResult<Value> {
        let mut out = Map::new();
        for (key, raw) in pairs {
            let rule = self
                .get(key)
                .ok_or_else(|| BoardError::config(format!("unknown field '{key}'")))?;
            let v = coerce(&rule.kind, raw)
                .map_err(|msg| BoardError::config(format!("field '{key}': {msg}")))?;
            out.insert(key.clone(), v);
        }
        Ok(Value::Object(out))
    }
}

fn coerce(kind: &FieldKind, raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    match kind {
        FieldKind::Str { .. } => Ok(Value::String(raw.to_owned())),
        FieldKind::Int { .. } => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("'{raw}' is not an integer")),
        FieldKind::Float { .. } => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("'{raw}' is not a number")),
        FieldKind::Bool => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        FieldKind::List { item } => {
            if raw.starts_with('[') {
                return serde_json::from_str(raw).map_err(|e| format!("invalid JSON list: {e}"));
            }
            if raw.is_empty() {
                return Ok(Value::Array(Vec::new()));
            }
            raw.split(',')
                .map(|part| coerce(item, part))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        FieldKind::Object { .. } => {
            serde_json::from_str(raw).map_err(|e| format!("invalid JSON object: {e}"))
        }
    }
}

fn check_object(
    rules: &[FieldRule],
    map: &Map<String, Value>,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    for rule in rules {
        path.push(SchemaPathElem::Field(rule.name.clone()));
        match map.get(&rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    errors.push(SchemaError::at(path, "required field is missing"));
                }
            }
            Some(v) => check_value(&rule.kind, v, path, errors),
        }
        path.pop();
    }
    for key in map.keys() {
        if !rules.iter().any(|r| &r.name == key) {
            path.push(SchemaPathElem::Field(key.clone()));
            errors.push(SchemaError::at(path, "unknown field"));
            path.pop();
        }
    }
}

fn check_value(
    kind: &FieldKind,
    v: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    match kind {
        FieldKind::Str { min_len, max_len } => {
            let Some(s) = v.as_str() else {
                errors.push(SchemaError::at(path, "expected a string"));
                return;
            };
            let n = s.chars().count();
            if min_len.is_some_and(|min| n < min) || max_len.is_some_and(|max| n > max) {
                errors.push(SchemaError::at(
                    path,
                    format!("length {n} outside {}", bounds(min_len, max_len)),
                ));
            }
        }
        FieldKind::Int { min, max } => {
            let Some(n) = v.as_i64() else {
                errors.push(SchemaError::at(path, "expected an integer"));
                return;
            };
            if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                errors.push(SchemaError::at(
                    path,
                    format!("{n} outside {}", bounds(min, max)),
                ));
            }
        }
        FieldKind::Float { min, max } => {
            let Some(n) = v.as_f64() else {
                errors.push(SchemaError::at(path, "expected a number"));
                return;
            };
            if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                errors.push(SchemaError::at(
                    path,
                    format!("{n} outside {}", bounds(min, max)),
                ));
            }
        }
        FieldKind::Bool => {
            if !v.is_boolean() {
                errors.push(SchemaError::at(path, "expected true or false"));
            }
        }
        FieldKind::List { item } => {
            let Some(items) = v.as_array() else {
                errors.push(SchemaError::at(path, "expected a list"));
                return;
            };
            for (i, it) in items.iter().enumerate() {
                path.push(SchemaPathElem::Index(i));
                check_value(item, it, path, errors);
                path.pop();
            }
        }
        FieldKind::Object { fields } => match v.as_object() {
            Some(map) => check_object(fields, map, path, errors),
            None => errors.push(SchemaError::at(path, "expected an object")),
        },
    }
}

fn bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(a), Some(b)) => format!("[{a}, {b}]"),
        (Some(a), None) => format!("[{a}, ..)"),
        (None, Some(b)) => format!("(.., {b}]"),
        (None, None) => "(.., ..)".to_owned(),
    }
}

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object key.
    Field(String),
    /// Array index.
    Index(usize),
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Location of the offending value.
    pub path: Vec<SchemaPathElem>,
    /// What is wrong with it.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every violation found in one configuration object.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors {
    /// Violations in field order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for BoardError {
    fn from(e: SchemaErrors) -> Self {
        BoardError::config(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/schema.rs"]
mod tests;
