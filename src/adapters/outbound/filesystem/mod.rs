/// Filesystem adapters for offline exports
mod xlsx_exporter;

pub use xlsx_exporter::{XlsxCropExporter, DEFAULT_EXPORT_FILE, EXPORT_WORKSHEET};
