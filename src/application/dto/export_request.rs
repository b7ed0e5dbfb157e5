/// ExportRequest - Which sheets to copy into the export file
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Sheet titles in output order; empty means every sheet
    pub sheets: Vec<String>,
}

impl ExportRequest {
    pub fn new(sheets: Vec<String>) -> Self {
        Self { sheets }
    }
}
