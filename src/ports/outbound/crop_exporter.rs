use crate::inventory::domain::Crop;
use crate::shared::Result;
use std::path::PathBuf;

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Crop rows written, header excluded
    pub rows_written: usize,
}

/// CropExporter port for writing crops to an offline file
pub trait CropExporter {
    /// Writes `crops` in the given order
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn export(&self, crops: &[Crop]) -> Result<ExportSummary>;
}
