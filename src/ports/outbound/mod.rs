/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (Sheets API, OAuth, file system, console).
pub mod access_token_provider;
pub mod crop_exporter;
pub mod progress_reporter;
pub mod spreadsheet_repository;

pub use access_token_provider::AccessTokenProvider;
pub use crop_exporter::{CropExporter, ExportSummary};
pub use progress_reporter::ProgressReporter;
pub use spreadsheet_repository::{SpreadsheetRepository, UpdateSummary};
