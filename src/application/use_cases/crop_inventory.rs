use crate::inventory::domain::{
    validate_sheet_name, A1Range, Crop, SheetLayout, SheetRef, SpreadsheetId, MAX_ROW,
};
use crate::inventory::services::{RowEncoder, RowLocator, RowParser};
use crate::ports::inbound::{RowWriteOutcome, SheetsApplicationPort};
use crate::ports::outbound::{ProgressReporter, SpreadsheetRepository};
use crate::shared::error::SheetsError;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// CropInventoryUseCase - Crop operations against one spreadsheet
///
/// Every sheet of the spreadsheet is expected to hold a crop table laid out
/// as described by `SheetLayout`.
///
/// # Type Parameters
/// * `R` - SpreadsheetRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct CropInventoryUseCase<R, PR> {
    repository: R,
    progress_reporter: PR,
    spreadsheet_id: SpreadsheetId,
    layout: SheetLayout,
}

impl<R, PR> CropInventoryUseCase<R, PR>
where
    R: SpreadsheetRepository,
    PR: ProgressReporter,
{
    /// Creates a new CropInventoryUseCase with injected dependencies
    pub fn new(
        repository: R,
        progress_reporter: PR,
        spreadsheet_id: SpreadsheetId,
        layout: SheetLayout,
    ) -> Self {
        Self {
            repository,
            progress_reporter,
            spreadsheet_id,
            layout,
        }
    }

    pub fn spreadsheet_id(&self) -> &SpreadsheetId {
        &self.spreadsheet_id
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Reads the crop ID column of a sheet
    async fn read_id_column(&self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        let range = A1Range::id_column(sheet_name, &self.layout);
        self.repository
            .read_values(&self.spreadsheet_id, &range)
            .await
    }

    /// Finds the row holding `crop_id`, reporting when it is absent
    async fn locate_crop(&self, sheet_name: &str, crop_id: i32) -> Result<Option<u32>> {
        let id_cells = self.read_id_column(sheet_name).await?;
        let row = RowLocator::find_crop_row(&id_cells, crop_id, self.layout.data_start_row());
        if row.is_none() {
            self.progress_reporter
                .report(&format!("Crop with ID {} not found.", crop_id));
        }
        Ok(row)
    }

    async fn write_crop_row(&self, crop: &Crop, row: u32) -> Result<u32> {
        let range = A1Range::crop_row(crop.sheet_name(), &self.layout, row);
        let summary = self
            .repository
            .write_values(&self.spreadsheet_id, &range, vec![RowEncoder::encode(crop)])
            .await?;
        Ok(summary.updated_rows)
    }
}

#[async_trait]
impl<R, PR> SheetsApplicationPort for CropInventoryUseCase<R, PR>
where
    R: SpreadsheetRepository,
    PR: ProgressReporter,
{
    async fn test_connection(&self) -> Result<String> {
        match self
            .repository
            .spreadsheet_metadata(&self.spreadsheet_id)
            .await
        {
            Ok(metadata) => {
                self.progress_reporter.report(&format!(
                    "✅ Successfully connected to the spreadsheet: {}",
                    metadata.title
                ));
                Ok(metadata.title)
            }
            Err(e) => Err(SheetsError::ConnectionFailed {
                spreadsheet_id: self.spreadsheet_id.to_string(),
                details: format!("{:#}", e),
            }
            .into()),
        }
    }

    async fn available_sheets(&self) -> Result<Vec<String>> {
        let metadata = self
            .repository
            .spreadsheet_metadata(&self.spreadsheet_id)
            .await?;
        let mut sheets = metadata.sheets;
        sheets.sort_by_key(|s| s.index);
        Ok(sheets.into_iter().map(|s| s.title).collect())
    }

    async fn sheet_names_and_ids(&self) -> Result<BTreeMap<String, i64>> {
        let metadata = self
            .repository
            .spreadsheet_metadata(&self.spreadsheet_id)
            .await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| (s.title, s.sheet_id))
            .collect())
    }

    async fn sheet_id_by_name(&self, sheet_name: &str) -> Result<i64> {
        let sheets = self.sheet_names_and_ids().await?;
        sheets.get(sheet_name).copied().ok_or_else(|| {
            SheetsError::SheetNotFound {
                name: sheet_name.to_string(),
            }
            .into()
        })
    }

    async fn items_in_sheet(&self, sheet_name: &str) -> Result<Vec<Crop>> {
        validate_sheet_name(sheet_name)?;

        let sheet_id = self.sheet_names_and_ids().await?.get(sheet_name).copied();
        if sheet_id.is_none() {
            tracing::warn!(sheet = sheet_name, "sheet missing from spreadsheet metadata");
        }

        let range = A1Range::crop_table(sheet_name, &self.layout);
        let rows = self
            .repository
            .read_values(&self.spreadsheet_id, &range)
            .await?;

        if rows.is_empty() {
            self.progress_reporter.report("No data found.");
            return Ok(Vec::new());
        }

        let sheet = SheetRef {
            name: sheet_name.to_string(),
            id: sheet_id,
        };
        let parsed = RowParser::parse_rows(&rows, &sheet, self.layout.header_row());

        for warning in &parsed.warnings {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: row {}: {}",
                warning.row_number, warning.reason
            ));
        }
        for skipped in &parsed.skipped {
            self.progress_reporter.report_error(&format!(
                "⚠️  Error parsing row {}: {}",
                skipped.row_number, skipped.reason
            ));
        }

        Ok(parsed.crops)
    }

    async fn add_data_row(&self, crop: &Crop) -> Result<RowWriteOutcome> {
        validate_sheet_name(crop.sheet_name())?;

        let id_cells = self.read_id_column(crop.sheet_name()).await?;
        let data_start_row = self.layout.data_start_row();

        if RowLocator::find_crop_row(&id_cells, crop.crop_id(), data_start_row).is_some() {
            return Err(SheetsError::DuplicateCropId {
                sheet: crop.sheet_name().to_string(),
                crop_id: crop.crop_id(),
            }
            .into());
        }

        let row = RowLocator::first_empty_row(&id_cells, data_start_row);
        if row > MAX_ROW {
            return Err(SheetsError::validation(format!(
                "Sheet '{}' has no free row left for crop {}",
                crop.sheet_name(),
                crop.crop_id()
            ))
            .into());
        }
        let updated_rows = self.write_crop_row(crop, row).await?;

        self.progress_reporter.report(&format!(
            "✅ Added new crop data at row {}. Rows updated: {}",
            row, updated_rows
        ));
        Ok(RowWriteOutcome::Written { row, updated_rows })
    }

    async fn update_data_row(&self, crop: &Crop) -> Result<RowWriteOutcome> {
        validate_sheet_name(crop.sheet_name())?;

        let Some(row) = self.locate_crop(crop.sheet_name(), crop.crop_id()).await? else {
            return Ok(RowWriteOutcome::NotFound {
                crop_id: crop.crop_id(),
            });
        };

        let updated_rows = self.write_crop_row(crop, row).await?;
        self.progress_reporter.report(&format!(
            "✅ Updated crop with ID {}. Rows updated: {}",
            crop.crop_id(),
            updated_rows
        ));
        Ok(RowWriteOutcome::Written { row, updated_rows })
    }

    async fn delete_data_row(&self, sheet_name: &str, crop_id: i32) -> Result<RowWriteOutcome> {
        validate_sheet_name(sheet_name)?;

        let Some(row) = self.locate_crop(sheet_name, crop_id).await? else {
            return Ok(RowWriteOutcome::NotFound { crop_id });
        };

        let range = A1Range::crop_row(sheet_name, &self.layout, row);
        self.repository
            .clear_values(&self.spreadsheet_id, &range)
            .await?;

        self.progress_reporter.report(&format!(
            "✅ Crop with ID {} has been cleared from the sheet.",
            crop_id
        ));
        Ok(RowWriteOutcome::Written {
            row,
            updated_rows: 0,
        })
    }

    async fn check_and_display_crop(
        &self,
        sheet_name: &str,
        crop_id: i32,
    ) -> Result<Option<Crop>> {
        let crop = self
            .items_in_sheet(sheet_name)
            .await?
            .into_iter()
            .find(|c| c.crop_id() == crop_id);

        match &crop {
            Some(c) => self.progress_reporter.report(&format!(
                "Crop ID: {}, Name: {}",
                c.crop_id(),
                c.crop_name()
            )),
            None => self
                .progress_reporter
                .report(&format!("Crop with ID {} not found.", crop_id)),
        }
        Ok(crop)
    }
}
