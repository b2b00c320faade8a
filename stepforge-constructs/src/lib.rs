//! Composable state-machine fragments layered on the `stepforge-dsl`
//! definition language: a retry-with-jitter wrapper, a resilient
//! function-invocation task, loop-until-verified fragments, and
//! container-image-backed task fragments. Every construct builds an
//! immutable graph description at definition time; execution, retry
//! timing, and jitter computation belong to the external orchestration
//! engine and the functions it invokes.

pub mod docker;
pub mod error;
pub mod fragment;
pub mod function;
pub mod loop_task;
pub mod name;
pub mod resilient;
pub mod retry_jitter;

pub use docker::{DockerImageTask, DockerImageTaskProps};
pub use error::ConstructError;
pub use fragment::{CatchProps, Fragment};
pub use function::{
    DockerFunctionSpec, FunctionRef, DEFAULT_DOCKER_ALIAS, DEFAULT_DOCKER_MEMORY_MB,
    DEFAULT_DOCKER_TIMEOUT_SECONDS,
};
pub use loop_task::{
    loop_docker_image_task, loop_task, LoopTaskProps, DEFAULT_VERIFY_PATH,
    DEFAULT_VERIFY_STATUS_FIELD, DEFAULT_WAIT_SECONDS, STATUS_FAILED, STATUS_SUCCEEDED,
};
pub use name::{
    build_state_name, build_state_name_with, NameOverflow, NAME_LENGTH_ERROR_LABEL,
};
pub use resilient::{
    add_default_retry, ResilientFunctionTask, ResilientFunctionTaskProps, RetryProps,
    DEFAULT_RETRY_BACKOFF_RATE, DEFAULT_RETRY_INTERVAL_SECONDS, DEFAULT_RETRY_MAX_ATTEMPTS,
};
pub use retry_jitter::{retry_with_jitter, RetryWithJitterProps, JITTER_BACKOFF_BASE};
