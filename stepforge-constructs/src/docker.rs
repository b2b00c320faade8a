use serde_json::Value;

use stepforge_dsl::{JsonPath, RetryPolicy, TaskState};

use crate::error::ConstructError;
use crate::fragment::Fragment;
use crate::function::{DockerFunctionSpec, FunctionRef};
use crate::resilient::{ResilientFunctionTask, ResilientFunctionTaskProps};

/// Image-backed functions sit behind a shared endpoint that can shed load
/// while a new image revision rolls out.
const SERVICE_UNAVAILABLE: &str = "ServiceUnavailableException";

#[derive(Debug, Clone, Default)]
pub struct DockerImageTaskProps {
    pub comment: Option<String>,
    pub function_payload: Option<Value>,
    pub input_path: Option<JsonPath>,
    pub result_path: Option<JsonPath>,
    pub output_path: Option<JsonPath>,
    pub timeout_seconds: Option<u32>,
}

/// Invoke-function task fragment backed by a container image, invoked
/// through its published alias. Carries the resilient transient-error
/// policy plus a retry for alias-rollover unavailability.
#[derive(Debug, Clone)]
pub struct DockerImageTask {
    task: ResilientFunctionTask,
    function: FunctionRef,
}

impl DockerImageTask {
    pub fn new(
        name: &str,
        spec: &DockerFunctionSpec,
        props: DockerImageTaskProps,
    ) -> Result<Self, ConstructError> {
        let function = spec.function_ref();
        let mut task = ResilientFunctionTask::new(
            name,
            &function,
            ResilientFunctionTaskProps {
                comment: props.comment,
                payload: props.function_payload,
                input_path: props.input_path,
                result_path: props.result_path,
                output_path: props.output_path,
                timeout_seconds: props.timeout_seconds,
            },
        )?;
        task.add_retry_policy(RetryPolicy {
            error_equals: vec![SERVICE_UNAVAILABLE.to_string()],
            interval_seconds: None,
            backoff_rate: None,
            max_attempts: None,
        });
        Ok(DockerImageTask { task, function })
    }

    pub fn function_ref(&self) -> &FunctionRef {
        &self.function
    }

    pub fn task_state(&self) -> &TaskState {
        self.task.task_state()
    }

    pub fn into_fragment(self) -> Fragment {
        self.task.into_fragment()
    }

    pub(crate) fn into_parts(self) -> (String, TaskState) {
        self.task.into_parts()
    }
}
