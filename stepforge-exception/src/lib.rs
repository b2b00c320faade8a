// Error-class registry
pub mod registry;
pub use registry::{
    get_error_class, register_error_class, transient_error_classes, Category, ErrorClass,
};

// Registration macro
#[macro_use]
pub mod macros;

// Built-in engine and platform classes
pub mod builtin;
pub use builtin::lambda::TOO_MANY_REQUESTS;
pub use builtin::states::STATES_ALL;

// Definition-time policy validation
pub mod validate;
pub use validate::{is_valid_error_class, validate_catch_list, validate_retry_list};

pub mod error;
pub use error::PolicyError;
