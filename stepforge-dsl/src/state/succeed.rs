use serde::{Deserialize, Serialize};

use super::base::BaseState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SucceedState {
    #[serde(flatten)]
    pub base: BaseState,
}
