use serde::{Deserialize, Serialize};

use crate::path::{self, JsonPath};

/// Retry rule attached to a retryable state. The engine re-enters the state
/// for errors matching `error_equals`, up to `max_attempts`, spacing the
/// attempts by `interval_seconds * backoff_rate^n`. Unset fields fall back
/// to the engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetryPolicy {
    pub error_equals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

/// Catch rule: errors matching `error_equals` route to the `next` state
/// instead of failing the execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatchPolicy {
    pub error_equals: Vec<String>,

    pub next: String,

    #[serde(
        default,
        deserialize_with = "path::opt_json_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub result_path: Option<JsonPath>,
}
