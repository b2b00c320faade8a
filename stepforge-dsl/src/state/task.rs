use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::BaseState;

/// Invoke-function state. `resource` identifies the externally deployed
/// unit of work; `parameters` is its input document, where keys ending in
/// `.$` are resolved against the state input before invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskState {
    #[serde(flatten)]
    pub base: BaseState,

    pub resource: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_seconds: Option<u32>,
}
