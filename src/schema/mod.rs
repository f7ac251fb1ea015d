/// Type tag registry and shape validation.
pub mod registry;
/// Whole-history schema checks with located diagnostics.
pub mod validate;
