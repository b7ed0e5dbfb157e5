/// Console adapters for terminal output
mod crop_table;
mod progress_reporter;

pub use crop_table::CropTable;
pub use progress_reporter::StderrProgressReporter;
