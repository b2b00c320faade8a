use thiserror::Error;

use stepforge_dsl::ValidationError;
use stepforge_exception::PolicyError;

#[derive(Error, Debug)]
pub enum ConstructError {
    #[error("state name '{name}' exceeds the {limit}-character limit ({len} characters)")]
    StateNameTooLong {
        name: String,
        len: usize,
        limit: usize,
    },

    #[error("duplicate state name '{0}'")]
    DuplicateStateName(String),

    #[error("fragment has no states")]
    EmptyFragment,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}
