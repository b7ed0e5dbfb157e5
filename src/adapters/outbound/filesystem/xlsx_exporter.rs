use crate::inventory::domain::{Crop, CROP_HEADERS};
use crate::ports::outbound::{CropExporter, ExportSummary};
use crate::shared::error::SheetsError;
use crate::shared::security::reject_symlink;
use crate::shared::Result;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};

/// File name used when no output path is configured
pub const DEFAULT_EXPORT_FILE: &str = "DetailedCropsData.xlsx";

/// Name of the single worksheet in an export
pub const EXPORT_WORKSHEET: &str = "Detailed Crops Data";

/// XlsxCropExporter adapter writing crops to an Excel workbook
///
/// Every cell is written as text, including crop IDs and quantities, so the
/// workbook shows values exactly as they were read from the sheet.
pub struct XlsxCropExporter {
    output_path: PathBuf,
}

impl XlsxCropExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        SheetsError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn validate_output_path(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.exists() {
                return Err(self.write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        reject_symlink(&self.output_path).map_err(|e| self.write_error(e.to_string()))?;

        Ok(())
    }

    fn fill_worksheet(
        worksheet: &mut Worksheet,
        crops: &[Crop],
    ) -> std::result::Result<usize, XlsxError> {
        worksheet.set_name(EXPORT_WORKSHEET)?;

        let bold = Format::new().set_bold();
        for (col, header) in CROP_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        // A table read together with its header row carries it as the first crop
        let skip = usize::from(crops.first().is_some_and(Crop::is_header_like));

        let mut written = 0;
        for crop in &crops[skip..] {
            let row = (written + 1) as u32;
            let cells = [
                crop.farm().name().to_string(),
                crop.farm().location().to_string(),
                crop.crop_id().to_string(),
                crop.crop_name().to_string(),
                crop.quantity_available().to_string(),
                crop.harvest_date().to_string(),
                if crop.is_in_season() { "Yes" } else { "No" }.to_string(),
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet.write_string(row, col as u16, value)?;
            }
            written += 1;
        }

        worksheet.autofit();
        Ok(written)
    }
}

impl Default for XlsxCropExporter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_FILE)
    }
}

impl CropExporter for XlsxCropExporter {
    fn export(&self, crops: &[Crop]) -> Result<ExportSummary> {
        self.validate_output_path()?;

        let mut workbook = Workbook::new();
        let rows_written = Self::fill_worksheet(workbook.add_worksheet(), crops)
            .map_err(|e| self.write_error(e.to_string()))?;

        workbook
            .save(&self.output_path)
            .map_err(|e| self.write_error(e.to_string()))?;

        tracing::debug!(
            path = %self.output_path.display(),
            rows = rows_written,
            "wrote crop workbook"
        );

        Ok(ExportSummary {
            path: self.output_path.clone(),
            rows_written,
        })
    }
}
