/// Mock implementations for testing
mod in_memory_spreadsheet;
mod mock_crop_exporter;
mod mock_progress_reporter;

pub use in_memory_spreadsheet::InMemorySpreadsheet;
pub use mock_crop_exporter::MockCropExporter;
pub use mock_progress_reporter::{Channel, MockProgressReporter};
