pub mod lambda;
pub mod states;

use crate::registry::ErrorClass;

pub(crate) fn builtin_error_classes() -> Vec<ErrorClass> {
    let mut classes = states::classes();
    classes.extend(lambda::classes());
    classes
}
