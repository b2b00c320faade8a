use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::BaseState;

/// Delay state. Exactly one of `seconds`, `seconds_path`, `timestamp` must
/// be set; `seconds_path` reads the duration from the state input at run
/// time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaitState {
    #[serde(flatten)]
    pub base: BaseState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}
