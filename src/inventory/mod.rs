/// Crop inventory domain: entities, value objects and row-level services
///
/// Nothing in this module performs I/O.
pub mod domain;
pub mod services;
