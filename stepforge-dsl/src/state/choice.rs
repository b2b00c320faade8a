use serde::{Deserialize, Serialize};

use super::base::BaseState;
use crate::logic::ChoiceRule;

/// Branch state. Rules are evaluated in order; `default` receives the
/// execution when no rule matches. Choice states never carry `Next`/`End`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceState {
    #[serde(flatten)]
    pub base: BaseState,

    pub choices: Vec<ChoiceRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
