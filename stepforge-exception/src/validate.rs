use stepforge_dsl::{CatchPolicy, RetryPolicy};

use crate::builtin::states::STATES_ALL;
use crate::error::PolicyError;
use crate::registry::is_registered;

/// Whether `name` may appear in an `ErrorEquals` list: a registered class,
/// or a custom class that does not squat on the engine's reserved prefix.
pub fn is_valid_error_class(name: &str) -> bool {
    if is_registered(name) {
        return true;
    }
    !name.is_empty() && !name.starts_with("States.") && !name.contains(char::is_whitespace)
}

/// Validates every `ErrorEquals` list in a `Retry` array.
pub fn validate_retry_list(policies: &[RetryPolicy]) -> Result<(), PolicyError> {
    for policy in policies {
        check_error_equals(&policy.error_equals, "Retry")?;
    }
    Ok(())
}

/// Validates every `ErrorEquals` list in a `Catch` array.
pub fn validate_catch_list(policies: &[CatchPolicy]) -> Result<(), PolicyError> {
    for policy in policies {
        check_error_equals(&policy.error_equals, "Catch")?;
    }
    Ok(())
}

fn check_error_equals(errors: &[String], kind: &'static str) -> Result<(), PolicyError> {
    if errors.is_empty() {
        return Err(PolicyError::EmptyErrorEquals(kind));
    }
    if errors.iter().any(|error| error == STATES_ALL) && errors.len() > 1 {
        return Err(PolicyError::WildcardNotAlone(kind));
    }
    for error in errors {
        if !is_valid_error_class(error) {
            return Err(PolicyError::InvalidErrorClass(kind, error.clone()));
        }
    }
    Ok(())
}
