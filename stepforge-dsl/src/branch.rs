use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::State;

/// Sub-graph executed inside a Parallel branch or a Map iterator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Branch {
    pub start_at: String,

    pub states: HashMap<String, State>,
}
