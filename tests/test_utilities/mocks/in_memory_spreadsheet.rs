use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use whatsaterminal::inventory::domain::{SheetProperties, SpreadsheetMetadata};
use whatsaterminal::prelude::*;
use whatsaterminal::shared::error::SheetsError;

type Cells = BTreeMap<(u32, u16), String>;

struct MemorySheet {
    properties: SheetProperties,
    cells: Cells,
}

/// In-memory SpreadsheetRepository that behaves like the Sheets values API
///
/// Reads drop trailing empty cells of each row and trailing empty rows, the
/// way the API does. Rows are 1-based, columns zero-based (`A` = 0).
#[allow(dead_code)]
pub struct InMemorySpreadsheet {
    title: String,
    sheets: Mutex<Vec<MemorySheet>>,
    pub metadata_calls: Arc<AtomicUsize>,
    pub reads: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<String>>,
    pub clears: Mutex<Vec<String>>,
    pub fail_metadata: bool,
}

#[allow(dead_code)]
impl InMemorySpreadsheet {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sheets: Mutex::new(Vec::new()),
            metadata_calls: Arc::new(AtomicUsize::new(0)),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            clears: Mutex::new(Vec::new()),
            fail_metadata: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_metadata: true,
            ..Self::new("")
        }
    }

    pub fn with_sheet(self, title: &str, sheet_id: i64) -> Self {
        {
            let mut sheets = self.sheets.lock().unwrap();
            let index = sheets.len() as u32;
            sheets.push(MemorySheet {
                properties: SheetProperties {
                    sheet_id,
                    title: title.to_string(),
                    index,
                },
                cells: Cells::new(),
            });
        }
        self
    }

    /// Writes a header row on row 3 and `rows` from row 4, starting in column B
    pub fn with_crop_table(self, title: &str, rows: &[&[&str]]) -> Self {
        let header: Vec<&str> = CROP_HEADERS.to_vec();
        self.with_rows(title, 3, &[header.as_slice()])
            .with_rows(title, 4, rows)
    }

    /// Writes `rows` starting at `first_row`, column B
    pub fn with_rows(self, title: &str, first_row: u32, rows: &[&[&str]]) -> Self {
        self.with_rows_at(title, first_row, 1, rows)
    }

    /// Writes `rows` with their top-left cell at (`first_row`, `first_column`)
    pub fn with_rows_at(
        self,
        title: &str,
        first_row: u32,
        first_column: u16,
        rows: &[&[&str]],
    ) -> Self {
        {
            let mut sheets = self.sheets.lock().unwrap();
            let sheet = sheets
                .iter_mut()
                .find(|s| s.properties.title == title)
                .expect("sheet must be added before its rows");
            for (i, row) in rows.iter().enumerate() {
                for (j, value) in row.iter().enumerate() {
                    if !value.is_empty() {
                        sheet
                            .cells
                            .insert((first_row + i as u32, first_column + j as u16), value.to_string());
                    }
                }
            }
        }
        self
    }

    /// Counter that stays readable after the spreadsheet is moved into a use case
    pub fn metadata_counter(&self) -> Arc<AtomicUsize> {
        self.metadata_calls.clone()
    }

    fn with_sheet_cells<T>(
        &self,
        range: &A1Range,
        f: impl FnOnce(&mut Cells) -> T,
    ) -> Result<T> {
        let mut sheets = self.sheets.lock().unwrap();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.properties.title == range.sheet_name())
            .ok_or_else(|| SheetsError::Api {
                status: 400,
                message: format!("Unable to parse range: {}", range),
            })?;
        Ok(f(&mut sheet.cells))
    }
}

fn last_row(cells: &Cells) -> u32 {
    cells.keys().map(|(row, _)| *row).max().unwrap_or(0)
}

#[async_trait]
impl SpreadsheetRepository for InMemorySpreadsheet {
    async fn spreadsheet_metadata(
        &self,
        _spreadsheet_id: &SpreadsheetId,
    ) -> Result<SpreadsheetMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata {
            return Err(SheetsError::Api {
                status: 404,
                message: "Requested entity was not found.".to_string(),
            }
            .into());
        }

        let sheets = self.sheets.lock().unwrap();
        Ok(SpreadsheetMetadata {
            title: self.title.clone(),
            sheets: sheets.iter().map(|s| s.properties.clone()).collect(),
        })
    }

    async fn read_values(
        &self,
        _spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
    ) -> Result<Vec<Vec<String>>> {
        self.reads.lock().unwrap().push(range.to_string());
        self.with_sheet_cells(range, |cells| {
            let end_row = range.end_row().unwrap_or_else(|| last_row(cells));
            let start_col = range.start_column().index();
            let end_col = range.end_column().index();

            let mut rows: Vec<Vec<String>> = (range.start_row()..=end_row)
                .map(|row| {
                    let mut values: Vec<String> = (start_col..=end_col)
                        .map(|col| cells.get(&(row, col)).cloned().unwrap_or_default())
                        .collect();
                    while values.last().is_some_and(|v| v.is_empty()) {
                        values.pop();
                    }
                    values
                })
                .collect();
            while rows.last().is_some_and(|r| r.is_empty()) {
                rows.pop();
            }
            rows
        })
    }

    async fn write_values(
        &self,
        _spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateSummary> {
        let summary = self.with_sheet_cells(range, |cells| {
            let start_col = range.start_column().index();
            let mut updated_cells = 0;
            for (i, row) in values.iter().enumerate() {
                for (j, value) in row.iter().enumerate() {
                    let key = (range.start_row() + i as u32, start_col + j as u16);
                    if value.is_empty() {
                        cells.remove(&key);
                    } else {
                        cells.insert(key, value.clone());
                    }
                    updated_cells += 1;
                }
            }
            UpdateSummary {
                updated_range: range.to_string(),
                updated_rows: values.len() as u32,
                updated_cells,
            }
        })?;
        self.writes.lock().unwrap().push(range.to_string());
        Ok(summary)
    }

    async fn clear_values(&self, _spreadsheet_id: &SpreadsheetId, range: &A1Range) -> Result<()> {
        self.with_sheet_cells(range, |cells| {
            let end_row = range.end_row().unwrap_or_else(|| last_row(cells));
            let columns = range.start_column().index()..=range.end_column().index();
            cells.retain(|(row, col), _| {
                !((range.start_row()..=end_row).contains(row) && columns.contains(col))
            });
        })?;
        self.clears.lock().unwrap().push(range.to_string());
        Ok(())
    }
}
