/// Registers a batch of error classes:
///
/// ```
/// use stepforge_exception::{register_error_classes, Category};
///
/// register_error_classes! {
///     "OrderService.Timeout" => Category::Custom, true, "order service did not answer in time",
///     "OrderService.Rejected" => Category::Custom, false, "order was rejected outright",
/// }
/// ```
#[macro_export]
macro_rules! register_error_classes {
    (
        $(
            $name:literal => $category:expr, $transient:expr, $description:literal
        ),* $(,)?
    ) => {
        $(
            $crate::registry::register_error_class($crate::registry::ErrorClass {
                name: $name,
                category: $category,
                description: $description,
                transient: $transient,
            });
        )*
    };
}
