use std::collections::HashMap;

use serde_json::json;

use stepforge_dsl::{
    BaseState, ChoiceRule, ChoiceState, Condition, JsonPath, ParallelState, PassState,
    RetryPolicy, State, WaitState,
};

use crate::error::ConstructError;
use crate::fragment::{insert_unique, Fragment};
use crate::function::FunctionRef;
use crate::name::{build_state_name_with, NameOverflow};
use crate::resilient::{ResilientFunctionTask, ResilientFunctionTaskProps, RetryProps};

/// Backoff base handed to the jitter calculator alongside the retry count.
pub const JITTER_BACKOFF_BASE: u32 = 2;

#[derive(Debug, Clone)]
pub struct RetryWithJitterProps {
    pub comment: Option<String>,
    pub input_path: Option<JsonPath>,
    pub result_path: Option<JsonPath>,
    /// Which errors re-enter the wrapper, and how many times. The interval
    /// and backoff rate are ignored here: the delay comes from the jitter
    /// calculator, not the engine.
    pub retry: RetryProps,
    pub state_name_prefix: Option<String>,
    pub on_name_overflow: NameOverflow,
}

impl Default for RetryWithJitterProps {
    fn default() -> Self {
        RetryWithJitterProps {
            comment: None,
            input_path: None,
            result_path: None,
            retry: RetryProps::default(),
            state_name_prefix: None,
            on_name_overflow: NameOverflow::Fail,
        }
    }
}

/// Wraps `try_process` with backoff-and-jitter retry control flow.
///
/// The body runs inside a single-branch Parallel state that records the
/// engine's retry counter next to the raw input as `{RetryCount, Input}`.
/// On the first attempt the branch unwraps the input and runs the body
/// immediately; on re-entry it first asks `jitter_function` for a wait
/// duration (`{RetryCount, Backoff}`) and sleeps it. The Parallel carries
/// a zero-interval retry policy so the computed wait is the only delay the
/// engine applies, and its output is unwrapped from the one-element branch
/// result, so callers see the body's own output.
pub fn retry_with_jitter(
    name: &str,
    try_process: Fragment,
    jitter_function: &FunctionRef,
    props: RetryWithJitterProps,
) -> Result<Fragment, ConstructError> {
    let overflow = props.on_name_overflow;
    let prefix = props.state_name_prefix.as_deref().unwrap_or("");

    let parallel_name = build_state_name_with("", name, overflow)?;
    let choice_name = build_state_name_with(prefix, "CheckRetryCount", overflow)?;
    let calc_name = build_state_name_with(prefix, "CalculateJitter", overflow)?;
    let wait_name = build_state_name_with(prefix, "WaitBetweenRetries", overflow)?;
    let unwrap_name = build_state_name_with(prefix, "UnwrapInput", overflow)?;

    let try_start = try_process.start_at().to_string();

    let calc = ResilientFunctionTask::new(
        &calc_name,
        jitter_function,
        ResilientFunctionTaskProps {
            payload: Some(json!({
                "RetryCount.$": "$.RetryCount",
                "Backoff": JITTER_BACKOFF_BASE
            })),
            result_path: Some(JsonPath::path("$.WaitSeconds")),
            ..Default::default()
        },
    )?;
    let (calc_name, mut calc_state) = calc.into_parts();
    calc_state.base.next = Some(wait_name.clone());

    let wait_state = WaitState {
        base: BaseState {
            next: Some(unwrap_name.clone()),
            ..Default::default()
        },
        seconds_path: Some("$.WaitSeconds".to_string()),
        ..Default::default()
    };

    // Restores the raw input wrapped at the Parallel boundary before the
    // body sees it.
    let unwrap_state = PassState {
        base: BaseState {
            output_path: Some(JsonPath::path("$.Input")),
            next: Some(try_start),
            ..Default::default()
        },
        ..Default::default()
    };

    // First attempt skips the jitter path entirely.
    let choice_state = ChoiceState {
        base: BaseState::default(),
        choices: vec![ChoiceRule::new(
            Condition::numeric_greater_than("$.RetryCount", 0u32),
            calc_name.clone(),
        )],
        default: Some(unwrap_name.clone()),
    };

    let mut branch_states: HashMap<String, State> = HashMap::new();
    insert_unique(&mut branch_states, choice_name.clone(), State::Choice(choice_state))?;
    insert_unique(&mut branch_states, calc_name, State::Task(calc_state))?;
    insert_unique(&mut branch_states, wait_name, State::Wait(wait_state))?;
    insert_unique(&mut branch_states, unwrap_name, State::Pass(unwrap_state))?;
    let (_, try_states) = try_process.into_parts();
    for (state_name, state) in try_states {
        insert_unique(&mut branch_states, state_name, state)?;
    }

    let branch =
        Fragment::from_parts(choice_name, branch_states, vec![], vec![]).into_branch()?;

    let parallel = ParallelState {
        base: BaseState {
            comment: props.comment,
            input_path: props.input_path,
            output_path: Some(JsonPath::path("$[0]")),
            result_path: props.result_path,
            retry: Some(vec![RetryPolicy {
                error_equals: props.retry.errors.clone(),
                interval_seconds: Some(0),
                backoff_rate: None,
                max_attempts: Some(props.retry.max_attempts),
            }]),
            ..Default::default()
        },
        branches: vec![branch],
        parameters: Some(json!({
            "RetryCount.$": "$$.State.RetryCount",
            "Input.$": "$"
        })),
    };

    tracing::debug!(
        name = %parallel_name,
        errors = ?props.retry.errors,
        max_attempts = props.retry.max_attempts,
        "assembled retry-with-jitter fragment"
    );

    Ok(Fragment::from_parts(
        parallel_name.clone(),
        HashMap::from([(parallel_name.clone(), State::Parallel(parallel))]),
        vec![parallel_name.clone()],
        vec![parallel_name],
    ))
}
