use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stepforge_dsl::{BaseState, JsonPath, RetryPolicy, State, TaskState};
use stepforge_exception::transient_error_classes;

use crate::error::ConstructError;
use crate::fragment::Fragment;
use crate::function::FunctionRef;
use crate::name::build_state_name;

pub const DEFAULT_RETRY_INTERVAL_SECONDS: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_RATE: f64 = 2.0;
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 6;

/// Definition-time retry configuration. Converted into a wire
/// [`RetryPolicy`] when attached to a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryProps {
    pub errors: Vec<String>,
    pub interval_seconds: u32,
    pub backoff_rate: f64,
    pub max_attempts: u32,
}

impl Default for RetryProps {
    /// The transient-error policy: throttling and platform invocation
    /// failures, exponential backoff at rate 2 from a 2-second interval,
    /// up to 6 attempts.
    fn default() -> Self {
        RetryProps {
            errors: transient_error_classes()
                .into_iter()
                .map(str::to_string)
                .collect(),
            interval_seconds: DEFAULT_RETRY_INTERVAL_SECONDS,
            backoff_rate: DEFAULT_RETRY_BACKOFF_RATE,
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
        }
    }
}

impl RetryProps {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            error_equals: self.errors.clone(),
            interval_seconds: Some(self.interval_seconds),
            backoff_rate: Some(self.backoff_rate),
            max_attempts: Some(self.max_attempts),
        }
    }
}

/// Adds the transient-error retry policy to an invoke task.
pub fn add_default_retry(state: &mut TaskState) {
    state
        .base
        .retry
        .get_or_insert_with(Vec::new)
        .push(RetryProps::default().to_policy());
}

#[derive(Debug, Clone, Default)]
pub struct ResilientFunctionTaskProps {
    pub comment: Option<String>,
    /// Input document for the function; keys ending in `.$` are resolved
    /// against the state input. `None` passes the state input through.
    pub payload: Option<Value>,
    pub input_path: Option<JsonPath>,
    pub result_path: Option<JsonPath>,
    pub output_path: Option<JsonPath>,
    pub timeout_seconds: Option<u32>,
}

/// Invoke-function task with transient-error handling built in: every
/// instance carries the default retry policy, so call sites never repeat
/// it.
#[derive(Debug, Clone)]
pub struct ResilientFunctionTask {
    name: String,
    state: TaskState,
}

impl ResilientFunctionTask {
    pub fn new(
        name: &str,
        function: &FunctionRef,
        props: ResilientFunctionTaskProps,
    ) -> Result<Self, ConstructError> {
        let name = build_state_name("", name)?;
        let mut state = TaskState {
            base: BaseState {
                comment: props.comment,
                input_path: props.input_path,
                output_path: props.output_path,
                result_path: props.result_path,
                ..Default::default()
            },
            resource: function.invoke_resource(),
            parameters: props.payload,
            timeout_seconds: props.timeout_seconds,
            heartbeat_seconds: None,
        };
        add_default_retry(&mut state);
        Ok(ResilientFunctionTask { name, state })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task_state(&self) -> &TaskState {
        &self.state
    }

    /// Appends a further retry rule after the default transient policy.
    pub fn add_retry(&mut self, props: &RetryProps) {
        self.add_retry_policy(props.to_policy());
    }

    /// Appends a raw wire policy; unset fields fall back to the engine
    /// defaults.
    pub fn add_retry_policy(&mut self, policy: RetryPolicy) {
        self.state
            .base
            .retry
            .get_or_insert_with(Vec::new)
            .push(policy);
    }

    pub fn into_fragment(self) -> Fragment {
        Fragment::from_parts(
            self.name.clone(),
            HashMap::from([(self.name.clone(), State::Task(self.state))]),
            vec![self.name.clone()],
            vec![self.name],
        )
    }

    pub(crate) fn into_parts(self) -> (String, TaskState) {
        (self.name, self.state)
    }
}
