/*
[INPUT]:  Operation descriptor + variables, raw response bodies
[OUTPUT]: Wire request body and parsed response envelope
[POS]:    GraphQL layer - request/response envelope
[UPDATE]: When the GraphQL transport format changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{LensError, Result};

/// Body POSTed to the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope<'a> {
    pub operation_name: &'a str,
    pub variables: Value,
    pub query: &'a str,
}

/// Error entry in the top-level `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

impl GraphQlError {
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

/// Parsed GraphQL response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl ResponseEnvelope {
    /// First reported error, if any
    pub fn first_error(&self) -> Option<&GraphQlError> {
        self.errors.as_ref()?.first()
    }

    /// Convert a reported error into `LensError::Api`
    ///
    /// A non-empty `errors` array wins over `data`; partial results are not returned.
    pub fn check_errors(&self) -> Result<()> {
        match self.first_error() {
            Some(err) => Err(LensError::Api {
                reason: err.message.clone(),
                code: err.code().map(str::to_string),
            }),
            None => Ok(()),
        }
    }

    /// Take the value found under `data.<path...>`
    pub fn into_data_at(self, path: &[&str]) -> Result<Value> {
        let mut current = match self.data {
            Some(Value::Null) | None => {
                return Err(LensError::Protocol("response has no data".to_string()));
            }
            Some(data) => data,
        };

        for (depth, key) in path.iter().enumerate() {
            current = match current {
                Value::Object(mut map) => map.remove(*key).ok_or_else(|| {
                    LensError::Protocol(format!("missing data.{}", path[..=depth].join(".")))
                })?,
                other => {
                    return Err(LensError::Protocol(format!(
                        "expected object at data.{}, found {}",
                        path[..depth].join("."),
                        json_type(&other)
                    )));
                }
            };
        }

        Ok(current)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
