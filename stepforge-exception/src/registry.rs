use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

/// Where an error class originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Reserved classes raised by the orchestration engine itself.
    States,
    /// Classes raised by the function-invocation platform.
    Lambda,
    /// Caller-registered application classes.
    Custom,
}

/// Descriptor for an error class that may appear in `ErrorEquals`.
#[derive(Debug, Clone)]
pub struct ErrorClass {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Transient classes are retried by the resilient invocation wrapper's
    /// default policy.
    pub transient: bool,
}

static ERROR_REGISTRY: Lazy<Mutex<HashMap<&'static str, ErrorClass>>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    for class in crate::builtin::builtin_error_classes() {
        registry.insert(class.name, class);
    }
    Mutex::new(registry)
});

pub fn register_error_class(class: ErrorClass) {
    let mut registry = ERROR_REGISTRY.lock().unwrap();
    registry.insert(class.name, class);
}

pub fn get_error_class(name: &str) -> Option<ErrorClass> {
    ERROR_REGISTRY.lock().unwrap().get(name).cloned()
}

pub fn is_registered(name: &str) -> bool {
    ERROR_REGISTRY.lock().unwrap().contains_key(name)
}

/// All transient classes, in stable order. This is the error set the
/// resilient invocation wrapper retries by default.
pub fn transient_error_classes() -> Vec<&'static str> {
    let registry = ERROR_REGISTRY.lock().unwrap();
    let mut classes: Vec<&'static str> = registry
        .values()
        .filter(|class| class.transient)
        .map(|class| class.name)
        .collect();
    classes.sort_unstable();
    classes
}
