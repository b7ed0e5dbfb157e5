use crate::inventory::domain::Crop;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Result of writing or clearing a single crop row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowWriteOutcome {
    /// The row was written (or cleared)
    Written {
        /// 1-based sheet row that was touched
        row: u32,
        /// Rows reported as updated by the API (0 for clears)
        updated_rows: u32,
    },
    /// No row holds the crop ID
    NotFound { crop_id: i32 },
}

impl RowWriteOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RowWriteOutcome::NotFound { .. })
    }
}

/// SheetsApplicationPort - Inbound port for crop inventory operations
///
/// This is what the CLI and the interactive menu drive. Every operation
/// targets the spreadsheet the implementation was built for.
#[async_trait]
pub trait SheetsApplicationPort: Send + Sync {
    /// Verifies the spreadsheet can be reached with the configured credentials
    ///
    /// # Errors
    /// Returns `SheetsError::ConnectionFailed` when the metadata request fails
    async fn test_connection(&self) -> Result<String>;

    /// Titles of every sheet, in tab order
    async fn available_sheets(&self) -> Result<Vec<String>>;

    /// Sheet title to numeric sheet ID
    async fn sheet_names_and_ids(&self) -> Result<BTreeMap<String, i64>>;

    /// Numeric ID of the named sheet
    ///
    /// # Errors
    /// Returns `SheetsError::SheetNotFound` if no sheet has that title
    async fn sheet_id_by_name(&self, sheet_name: &str) -> Result<i64>;

    /// Every crop stored in the named sheet
    async fn items_in_sheet(&self, sheet_name: &str) -> Result<Vec<Crop>>;

    /// Appends a crop at the first free row of its sheet
    ///
    /// # Errors
    /// Returns `SheetsError::DuplicateCropId` if the ID is already taken
    async fn add_data_row(&self, crop: &Crop) -> Result<RowWriteOutcome>;

    /// Overwrites the row holding the crop's ID
    async fn update_data_row(&self, crop: &Crop) -> Result<RowWriteOutcome>;

    /// Clears the row holding `crop_id`
    async fn delete_data_row(&self, sheet_name: &str, crop_id: i32) -> Result<RowWriteOutcome>;

    /// Looks a crop up by ID and reports it
    async fn check_and_display_crop(&self, sheet_name: &str, crop_id: i32)
        -> Result<Option<Crop>>;
}
