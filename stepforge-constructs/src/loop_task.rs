use std::collections::HashMap;

use serde_json::Value;

use stepforge_dsl::{
    BaseState, ChoiceRule, ChoiceState, Condition, FailState, JsonPath, PassState, State,
    TaskState, WaitState,
};

use crate::docker::{DockerImageTask, DockerImageTaskProps};
use crate::error::ConstructError;
use crate::fragment::{insert_unique, Fragment};
use crate::function::{DockerFunctionSpec, FunctionRef};
use crate::name::{build_state_name_with, NameOverflow};
use crate::resilient::{ResilientFunctionTask, ResilientFunctionTaskProps};

pub const DEFAULT_WAIT_SECONDS: u64 = 10;
pub const DEFAULT_VERIFY_PATH: &str = "$.VerifyResult";
pub const DEFAULT_VERIFY_STATUS_FIELD: &str = "Status";

pub const STATUS_SUCCEEDED: &str = "SUCCEEDED";
pub const STATUS_FAILED: &str = "FAILED";

#[derive(Debug, Clone)]
pub struct LoopTaskProps {
    /// Input document for both the execute and verify invocations.
    pub function_payload: Option<Value>,
    /// Delay between the execute step (or a non-terminal verdict) and the
    /// next verification.
    pub wait_seconds: u64,
    /// Where the verify step's result lands in the execution document.
    pub verify_path: String,
    /// Field within the verify result that carries the terminal status.
    pub verify_status_field: String,
    pub on_name_overflow: NameOverflow,
}

impl Default for LoopTaskProps {
    fn default() -> Self {
        LoopTaskProps {
            function_payload: None,
            wait_seconds: DEFAULT_WAIT_SECONDS,
            verify_path: DEFAULT_VERIFY_PATH.to_string(),
            verify_status_field: DEFAULT_VERIFY_STATUS_FIELD.to_string(),
            on_name_overflow: NameOverflow::Fail,
        }
    }
}

/// Execute-wait-verify loop over two code-backed functions: run the
/// execute step once, then poll the verify step until it reports
/// `SUCCEEDED` (pass, the fragment's only open exit) or `FAILED` (a
/// terminal Fail sink); any other status loops back to the wait state.
pub fn loop_task(
    name: &str,
    execute_function: &FunctionRef,
    verify_function: &FunctionRef,
    props: LoopTaskProps,
) -> Result<Fragment, ConstructError> {
    let overflow = props.on_name_overflow;
    let execute = ResilientFunctionTask::new(
        &build_state_name_with(name, "Execute", overflow)?,
        execute_function,
        ResilientFunctionTaskProps {
            payload: props.function_payload.clone(),
            result_path: Some(JsonPath::Discard),
            ..Default::default()
        },
    )?;
    let verify = ResilientFunctionTask::new(
        &build_state_name_with(name, "Verify", overflow)?,
        verify_function,
        ResilientFunctionTaskProps {
            payload: props.function_payload.clone(),
            result_path: Some(JsonPath::path(&props.verify_path)),
            ..Default::default()
        },
    )?;
    build_loop(name, execute.into_parts(), verify.into_parts(), &props)
}

/// [`loop_task`] over container-image-backed functions; the execute and
/// verify steps carry the image task's alias-rollover retry in addition to
/// the transient-error policy.
pub fn loop_docker_image_task(
    name: &str,
    execute_spec: &DockerFunctionSpec,
    verify_spec: &DockerFunctionSpec,
    props: LoopTaskProps,
) -> Result<Fragment, ConstructError> {
    let overflow = props.on_name_overflow;
    let execute = DockerImageTask::new(
        &build_state_name_with(name, "Execute", overflow)?,
        execute_spec,
        DockerImageTaskProps {
            function_payload: props.function_payload.clone(),
            result_path: Some(JsonPath::Discard),
            ..Default::default()
        },
    )?;
    let verify = DockerImageTask::new(
        &build_state_name_with(name, "Verify", overflow)?,
        verify_spec,
        DockerImageTaskProps {
            function_payload: props.function_payload.clone(),
            result_path: Some(JsonPath::path(&props.verify_path)),
            ..Default::default()
        },
    )?;
    build_loop(name, execute.into_parts(), verify.into_parts(), &props)
}

fn build_loop(
    name: &str,
    (execute_name, mut execute_state): (String, TaskState),
    (verify_name, mut verify_state): (String, TaskState),
    props: &LoopTaskProps,
) -> Result<Fragment, ConstructError> {
    let overflow = props.on_name_overflow;
    let wait_name = build_state_name_with(name, "Wait", overflow)?;
    let choice_name = build_state_name_with(name, "CheckStatus", overflow)?;
    let pass_name = build_state_name_with(name, "Succeeded", overflow)?;
    let fail_name = build_state_name_with(name, "Failed", overflow)?;

    let status_path = format!("{}.{}", props.verify_path, props.verify_status_field);

    execute_state.base.next = Some(wait_name.clone());
    verify_state.base.next = Some(choice_name.clone());

    let wait_state = WaitState {
        base: BaseState {
            next: Some(verify_name.clone()),
            ..Default::default()
        },
        seconds: Some(props.wait_seconds),
        ..Default::default()
    };

    let choice_state = ChoiceState {
        base: BaseState::default(),
        choices: vec![
            ChoiceRule::new(
                Condition::string_equals(status_path.clone(), STATUS_SUCCEEDED),
                pass_name.clone(),
            ),
            ChoiceRule::new(
                Condition::string_equals(status_path, STATUS_FAILED),
                fail_name.clone(),
            ),
        ],
        // Not finished yet: go around again.
        default: Some(wait_name.clone()),
    };

    let mut states: HashMap<String, State> = HashMap::new();
    insert_unique(&mut states, execute_name.clone(), State::Task(execute_state))?;
    insert_unique(&mut states, wait_name, State::Wait(wait_state))?;
    insert_unique(&mut states, verify_name.clone(), State::Task(verify_state))?;
    insert_unique(&mut states, choice_name, State::Choice(choice_state))?;
    insert_unique(&mut states, pass_name.clone(), State::Pass(PassState::default()))?;
    insert_unique(&mut states, fail_name, State::Fail(FailState::default()))?;

    tracing::debug!(
        name,
        wait_seconds = props.wait_seconds,
        "assembled loop-until-verified fragment"
    );

    Ok(Fragment::from_parts(
        execute_name.clone(),
        states,
        vec![pass_name],
        vec![execute_name, verify_name],
    ))
}
