/// Data Transfer Objects for the application layer
///
/// DTOs carry user input into the use cases, keeping the domain types free
/// of CLI and menu concerns.
mod crop_input;
mod export_request;

pub use crop_input::CropInput;
pub use export_request::ExportRequest;
