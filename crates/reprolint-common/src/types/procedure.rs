//! Procedure documents
//!
//! A procedure document is the structured form of a Methods section produced by
//! the extraction collaborator. Reading is lenient: missing fields fall back to
//! defaults so that an imperfect extraction still yields a report. Numbers where
//! text is expected are read as text, other mistyped fields fall back to their
//! defaults, and parameters that are not objects are skipped. Only shapes that
//! cannot be interpreted at all (a `steps` field that is not a list, a step
//! that is not an object) are rejected, with the offending path.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentError, ReprolintError, Result};
use crate::{DEFAULT_ACTION, DEFAULT_STEP_ID};

/// Where a procedure came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source kind (e.g. "methods_section", "paper_procedure_paste")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Section name within the source (e.g. "Methods")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Any other source metadata, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named parameter extracted from a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name (e.g. "duration_min"); unnamed parameters are ignored for scoring
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Extracted value, kept verbatim (never validated)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
}

impl Parameter {
    /// Create a parameter carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// One experimental step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step identifier, unique within a procedure
    #[serde(default = "default_step_id", deserialize_with = "lenient_step_id")]
    pub id: String,

    /// Action label, matched exactly against the requirements registry
    #[serde(default = "default_action", deserialize_with = "lenient_action")]
    pub action: String,

    /// Original instruction text
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_text: Option<String>,

    /// Extracted parameters, in extraction order
    #[serde(default, deserialize_with = "lenient_parameters")]
    pub parameters: Vec<Parameter>,
}

impl Step {
    /// Create a step with no text and no parameters
    pub fn new(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            raw_text: None,
            parameters: Vec::new(),
        }
    }

    /// Attach the original instruction text
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    /// Append several name-only parameters
    pub fn with_parameter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(names.into_iter().map(Parameter::named));
        self
    }

    /// Provided parameter names as a set (duplicates collapse, order is irrelevant)
    pub fn parameter_names(&self) -> BTreeSet<&str> {
        self.parameters
            .iter()
            .filter_map(|p| p.name.as_deref())
            .collect()
    }

    /// Raw text, or `""` when absent
    pub fn text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or("")
    }
}

/// A structured procedure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ProcedureDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(DocumentError::NotAnObject.into());
        };

        let schema_version = match root.remove("schema_version") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                return Err(DocumentError::at("schema_version", "expected a string").into());
            }
        };

        let source = match root.remove("source") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<SourceInfo>(v)
                    .map_err(|e| ReprolintError::from(DocumentError::at("source", e.to_string())))?,
            ),
        };

        let raw_steps = match root.remove("steps") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(DocumentError::at("steps", "expected an array").into()),
        };

        let mut steps = Vec::with_capacity(raw_steps.len());
        for (index, raw) in raw_steps.into_iter().enumerate() {
            if !raw.is_object() {
                return Err(DocumentError::at(format!("steps -> {index}"), "expected an object").into());
            }
            let step = serde_json::from_value::<Step>(raw).map_err(|e| {
                ReprolintError::from(DocumentError::at(format!("steps -> {index}"), e.to_string()))
            })?;
            steps.push(step);
        }

        Ok(Self {
            schema_version,
            source,
            steps,
        })
    }
}

fn default_step_id() -> String {
    DEFAULT_STEP_ID.to_string()
}

fn default_action() -> String {
    DEFAULT_ACTION.to_string()
}

/// Strings as-is, numbers in their JSON form, anything else absent
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

fn lenient_step_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_else(default_step_id))
}

fn lenient_action<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_else(default_action))
}

fn lenient_parameters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Parameter>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
