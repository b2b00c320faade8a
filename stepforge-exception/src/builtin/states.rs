use crate::registry::{Category, ErrorClass};

/// Wildcard matching any error. Must appear alone in an `ErrorEquals` list.
pub const STATES_ALL: &str = "States.ALL";
pub const TASK_FAILED: &str = "States.TaskFailed";
pub const TIMEOUT: &str = "States.Timeout";
pub const PERMISSIONS: &str = "States.Permissions";
pub const RESULT_PATH_MATCH_FAILURE: &str = "States.ResultPathMatchFailure";
pub const BRANCH_FAILED: &str = "States.BranchFailed";
pub const NO_CHOICE_MATCHED: &str = "States.NoChoiceMatched";

pub(crate) fn classes() -> Vec<ErrorClass> {
    let states = |name, description| ErrorClass {
        name,
        category: Category::States,
        description,
        transient: false,
    };
    vec![
        states(STATES_ALL, "wildcard matching any error"),
        states(TASK_FAILED, "a Task state failed"),
        states(TIMEOUT, "a state ran longer than its TimeoutSeconds"),
        states(PERMISSIONS, "insufficient privileges to invoke the task resource"),
        states(
            RESULT_PATH_MATCH_FAILURE,
            "ResultPath could not be applied to the state input",
        ),
        states(BRANCH_FAILED, "a branch of a Parallel state failed"),
        states(NO_CHOICE_MATCHED, "no Choice rule matched and no Default was set"),
    ]
}
