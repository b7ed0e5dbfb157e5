use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use whatsaterminal::prelude::*;

/// Mock CropExporter that keeps the exported crops in memory
#[derive(Default, Clone)]
pub struct MockCropExporter {
    pub exported: Arc<Mutex<Vec<Crop>>>,
    pub should_fail: bool,
}

#[allow(dead_code)]
impl MockCropExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn exported(&self) -> Vec<Crop> {
        self.exported.lock().unwrap().clone()
    }
}

impl CropExporter for MockCropExporter {
    fn export(&self, crops: &[Crop]) -> Result<ExportSummary> {
        if self.should_fail {
            anyhow::bail!("Mock exporter failure");
        }
        self.exported.lock().unwrap().extend_from_slice(crops);
        Ok(ExportSummary {
            path: PathBuf::from("mock.xlsx"),
            rows_written: crops.len(),
        })
    }
}
