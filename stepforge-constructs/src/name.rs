use serde::{Deserialize, Serialize};

use stepforge_dsl::MAX_STATE_NAME_LEN;

use crate::error::ConstructError;

/// Replacement label used by [`NameOverflow::Relabel`]. Kept under the
/// 80-character bound so a relabeled graph still deploys.
pub const NAME_LENGTH_ERROR_LABEL: &str =
    "Error: state name exceeds the 80-character service limit; shorten the prefix";

/// What to do when a generated state name exceeds the service limit.
///
/// `Relabel` reproduces the historical behavior of substituting a
/// descriptive error label for the state name, for graphs already deployed
/// that way. New graphs should keep the `Fail` default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameOverflow {
    #[default]
    Fail,
    Relabel,
}

/// Builds a full state name: `"<prefix>-<name>"` when `prefix` is
/// non-empty, else `name` alone. Fails when the result exceeds the
/// engine's 80-character state-name limit.
pub fn build_state_name(prefix: &str, name: &str) -> Result<String, ConstructError> {
    build_state_name_with(prefix, name, NameOverflow::Fail)
}

pub fn build_state_name_with(
    prefix: &str,
    name: &str,
    overflow: NameOverflow,
) -> Result<String, ConstructError> {
    let full = if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}-{name}")
    };
    let len = full.chars().count();
    if len <= MAX_STATE_NAME_LEN {
        return Ok(full);
    }
    match overflow {
        NameOverflow::Fail => Err(ConstructError::StateNameTooLong {
            name: full,
            len,
            limit: MAX_STATE_NAME_LEN,
        }),
        NameOverflow::Relabel => {
            tracing::warn!(
                state = %full,
                len,
                "state name exceeds the service limit, substituting the legacy error label"
            );
            Ok(NAME_LENGTH_ERROR_LABEL.to_string())
        }
    }
}
