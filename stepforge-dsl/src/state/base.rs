use serde::{Deserialize, Serialize};

use crate::path::{self, JsonPath};
use crate::policy::{CatchPolicy, RetryPolicy};

/// Fields common to every state type, flattened into each state's wire
/// object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(
        default,
        deserialize_with = "path::opt_json_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_path: Option<JsonPath>,

    #[serde(
        default,
        deserialize_with = "path::opt_json_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_path: Option<JsonPath>,

    #[serde(
        default,
        deserialize_with = "path::opt_json_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub result_path: Option<JsonPath>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<Vec<RetryPolicy>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch: Option<Vec<CatchPolicy>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<bool>,
}

impl BaseState {
    pub fn is_end(&self) -> bool {
        self.end.unwrap_or(false)
    }
}
