use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::BaseState;
use crate::branch::Branch;

/// Runs every branch concurrently; the state result is the array of branch
/// results in branch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParallelState {
    #[serde(flatten)]
    pub base: BaseState,

    pub branches: Vec<Branch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}
