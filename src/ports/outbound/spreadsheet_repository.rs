use crate::inventory::domain::{A1Range, SpreadsheetId, SpreadsheetMetadata};
use crate::shared::Result;
use async_trait::async_trait;

/// What the API reported after a write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated_range: String,
    pub updated_rows: u32,
    pub updated_cells: u32,
}

/// SpreadsheetRepository port for cell-level spreadsheet access
///
/// This port abstracts the Google Sheets values API. Cell values cross the
/// port as display strings; implementations convert numbers and booleans.
///
/// # Async Support
/// Implementations must be `Send + Sync` so export can read several sheets
/// concurrently.
#[async_trait]
pub trait SpreadsheetRepository: Send + Sync {
    /// Fetches the spreadsheet title and sheet properties
    async fn spreadsheet_metadata(&self, spreadsheet_id: &SpreadsheetId)
        -> Result<SpreadsheetMetadata>;

    /// Reads the values in `range`, row-major
    ///
    /// Trailing empty cells and rows are omitted, as the API does.
    async fn read_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
    ) -> Result<Vec<Vec<String>>>;

    /// Writes `rows` into `range`, parsing them as if typed by a user
    async fn write_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
        rows: Vec<Vec<String>>,
    ) -> Result<UpdateSummary>;

    /// Clears the values in `range`, keeping formatting
    async fn clear_values(&self, spreadsheet_id: &SpreadsheetId, range: &A1Range) -> Result<()>;
}
