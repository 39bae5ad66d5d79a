//! Tool parameter descriptors and validation
//!
//! Every tool declares its parameters as a static list of [`ParamSpec`]s.
//! The same list drives both the JSON Schema advertised in `tools/list` and
//! [`validate`], so the two cannot disagree. Validation produces a typed
//! [`Params`] map or a [`ValidationError`] naming the offending field.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use thiserror::Error;

/// Shape and constraint of a single parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Non-empty string
    Str,
    /// Any string, including empty (commit messages)
    Text,
    /// Array of non-empty strings
    StrList,
    Bool,
    /// Integer >= 1
    PositiveInt,
    /// Integer >= 0
    NonNegativeInt,
    /// String drawn from a fixed set
    OneOf(&'static [&'static str]),
}

impl ParamKind {
    fn expected(&self) -> String {
        match self {
            ParamKind::Str => "a non-empty string".to_string(),
            ParamKind::Text => "a string".to_string(),
            ParamKind::StrList => "an array of non-empty strings".to_string(),
            ParamKind::Bool => "a boolean".to_string(),
            ParamKind::PositiveInt => "a positive integer".to_string(),
            ParamKind::NonNegativeInt => "a non-negative integer".to_string(),
            ParamKind::OneOf(allowed) => format!("one of: {}", allowed.join(", ")),
        }
    }

    fn schema(&self) -> Value {
        match self {
            ParamKind::Str => json!({ "type": "string", "minLength": 1 }),
            ParamKind::Text => json!({ "type": "string" }),
            ParamKind::StrList => json!({
                "type": "array",
                "items": { "type": "string", "minLength": 1 }
            }),
            ParamKind::Bool => json!({ "type": "boolean" }),
            ParamKind::PositiveInt => json!({ "type": "integer", "minimum": 1 }),
            ParamKind::NonNegativeInt => json!({ "type": "integer", "minimum": 0 }),
            ParamKind::OneOf(allowed) => json!({ "type": "string", "enum": allowed }),
        }
    }
}

/// Declaration of one tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

/// A validated parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    List(Vec<String>),
    Bool(bool),
    Int(u64),
}

/// Validated parameters for one invocation
///
/// Accessors return "absent" for anything not supplied, so argument builders
/// never have to distinguish a missing value from an unset flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<&'static str, ParamValue>,
}

impl Params {
    /// String value of `name`
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value of `name`, empty when absent
    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ParamValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Boolean value of `name`, false when absent
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParamValue::Bool(true)))
    }

    /// Integer value of `name`
    pub fn int(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ParamValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Whether `name` was supplied
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` was supplied with an effective value; `false` booleans
    /// count as unset
    pub fn is_set(&self, name: &str) -> bool {
        !matches!(self.values.get(name), None | Some(ParamValue::Bool(false)))
    }

    /// Number of supplied parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Why a set of arguments was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter `{field}`")]
    Missing { field: String },

    #[error("parameter `{field}` must be {expected}")]
    WrongKind { field: String, expected: String },

    #[error("unknown parameter `{field}`")]
    Unknown { field: String },

    #[error("parameters `{first}` and `{second}` cannot be used together")]
    Conflict { first: String, second: String },
}

/// Validate `arguments` against `specs`
///
/// `null` arguments are treated as an empty object and `null` values as
/// absent. `conflicts` lists pairs of parameters that may not both be set.
pub fn validate(
    specs: &[ParamSpec],
    conflicts: &[(&str, &str)],
    arguments: &Value,
) -> Result<Params, ValidationError> {
    let empty = Map::new();
    let object = match arguments {
        Value::Null => &empty,
        Value::Object(map) => map,
        _ => return Err(ValidationError::NotAnObject),
    };

    if let Some(field) = object
        .keys()
        .find(|key| !specs.iter().any(|spec| spec.name == key.as_str()))
    {
        return Err(ValidationError::Unknown {
            field: field.clone(),
        });
    }

    let mut params = Params::default();
    for spec in specs {
        match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(ValidationError::Missing {
                        field: spec.name.to_string(),
                    });
                }
            }
            Some(value) => {
                let parsed = parse_value(spec.kind, value).ok_or_else(|| {
                    ValidationError::WrongKind {
                        field: spec.name.to_string(),
                        expected: spec.kind.expected(),
                    }
                })?;
                if spec.required && parsed == ParamValue::List(Vec::new()) {
                    return Err(ValidationError::Missing {
                        field: spec.name.to_string(),
                    });
                }
                params.values.insert(spec.name, parsed);
            }
        }
    }

    for (first, second) in conflicts {
        if params.is_set(first) && params.is_set(second) {
            return Err(ValidationError::Conflict {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }

    Ok(params)
}

fn parse_value(kind: ParamKind, value: &Value) -> Option<ParamValue> {
    match kind {
        ParamKind::Str => value
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| ParamValue::Str(s.to_string())),
        ParamKind::Text => value.as_str().map(|s| ParamValue::Str(s.to_string())),
        ParamKind::StrList => value
            .as_array()?
            .iter()
            .map(|item| item.as_str().filter(|s| !s.is_empty()).map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(ParamValue::List),
        ParamKind::Bool => value.as_bool().map(ParamValue::Bool),
        ParamKind::PositiveInt => value.as_u64().filter(|n| *n >= 1).map(ParamValue::Int),
        ParamKind::NonNegativeInt => value.as_u64().map(ParamValue::Int),
        ParamKind::OneOf(allowed) => value
            .as_str()
            .filter(|s| allowed.contains(s))
            .map(|s| ParamValue::Str(s.to_string())),
    }
}

/// JSON Schema object describing `specs`
pub fn input_schema(specs: &[ParamSpec]) -> Value {
    let mut properties = Map::new();
    for spec in specs {
        let mut schema = spec.kind.schema();
        if let Value::Object(map) = &mut schema {
            map.insert("description".to_string(), json!(spec.description));
        }
        properties.insert(spec.name.to_string(), schema);
    }

    let required: Vec<&str> = specs
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
        .collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}
