use serde::{Deserialize, Serialize};

use super::base::BaseState;
use crate::branch::Branch;

/// Iterates `iterator` over the list selected by `items_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapState {
    #[serde(flatten)]
    pub base: BaseState,

    pub items_path: String,

    pub iterator: Branch,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,
}
