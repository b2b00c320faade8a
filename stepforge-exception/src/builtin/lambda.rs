use crate::registry::{Category, ErrorClass};

// The platform's own transient invocation failures.
pub const SERVICE_EXCEPTION: &str = "Lambda.ServiceException";
pub const AWS_LAMBDA_EXCEPTION: &str = "Lambda.AWSLambdaException";
pub const SDK_CLIENT_EXCEPTION: &str = "Lambda.SdkClientException";
pub const CLIENT_EXECUTION_TIMEOUT: &str = "Lambda.ClientExecutionTimeoutException";
// Rate-limit rejections are equally retryable but sit outside the platform's
// default set.
pub const TOO_MANY_REQUESTS: &str = "Lambda.TooManyRequestsException";

pub(crate) fn classes() -> Vec<ErrorClass> {
    let lambda = |name, transient, description| ErrorClass {
        name,
        category: Category::Lambda,
        description,
        transient,
    };
    vec![
        lambda(SERVICE_EXCEPTION, true, "internal service error during invocation"),
        lambda(AWS_LAMBDA_EXCEPTION, true, "platform-side invocation failure"),
        lambda(SDK_CLIENT_EXCEPTION, true, "client-side failure reaching the platform"),
        lambda(
            CLIENT_EXECUTION_TIMEOUT,
            true,
            "invocation did not complete within the client timeout",
        ),
        lambda(TOO_MANY_REQUESTS, true, "invocation was throttled by the platform"),
    ]
}
