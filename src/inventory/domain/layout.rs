use super::crop::CROP_COLUMN_COUNT;
use crate::shared::error::SheetsError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// Largest column Google Sheets addresses (`ZZZ`)
const MAX_COLUMN_INDEX: u16 = 18_277;

/// Google Sheets caps a spreadsheet at ten million cells, so no row lies beyond this
pub const MAX_ROW: u32 = 10_000_000;

/// Zero-based spreadsheet column, rendered in A1 letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u16);

impl Column {
    pub fn new(index: u16) -> Result<Self> {
        if index > MAX_COLUMN_INDEX {
            return Err(SheetsError::validation(format!(
                "Column index {} is beyond the last column ZZZ",
                index
            ))
            .into());
        }
        Ok(Self(index))
    }

    pub fn index(self) -> u16 {
        self.0
    }

    /// Column `n` positions to the right
    pub fn offset(self, n: u16) -> Result<Self> {
        Self::new(self.0.saturating_add(n))
    }

    /// Bijective base-26 letters: 0 -> A, 25 -> Z, 26 -> AA
    pub fn letters(self) -> String {
        let mut n = self.0 as u32 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl FromStr for Column {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > 3 || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SheetsError::validation(format!(
                "Invalid column '{}'. Use one to three letters, e.g. B or AA",
                s
            ))
            .into());
        }

        let value = s
            .to_ascii_uppercase()
            .bytes()
            .fold(0u32, |acc, b| acc * 26 + (b - b'A' + 1) as u32);
        Column::new((value - 1) as u16)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

/// Where the crop table sits inside every sheet
///
/// The table is seven columns wide starting at `first_column`. The header
/// labels are on `header_row` and crop rows start at `data_start_row`. The
/// crop ID is always the third column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    first_column: Column,
    header_row: u32,
    data_start_row: u32,
}

impl SheetLayout {
    pub fn new(first_column: Column, header_row: u32, data_start_row: u32) -> Result<Self> {
        if header_row == 0 {
            return Err(SheetsError::validation("header_row must be at least 1").into());
        }
        if data_start_row > MAX_ROW {
            return Err(SheetsError::validation(format!(
                "data_start_row ({}) is beyond the last sheet row {}",
                data_start_row, MAX_ROW
            ))
            .into());
        }
        if data_start_row <= header_row {
            return Err(SheetsError::validation(format!(
                "data_start_row ({}) must come after header_row ({})",
                data_start_row, header_row
            ))
            .into());
        }
        first_column.offset(CROP_COLUMN_COUNT as u16 - 1)?;

        Ok(Self {
            first_column,
            header_row,
            data_start_row,
        })
    }

    pub fn first_column(&self) -> Column {
        self.first_column
    }

    pub fn last_column(&self) -> Column {
        Column(self.first_column.0 + CROP_COLUMN_COUNT as u16 - 1)
    }

    pub fn id_column(&self) -> Column {
        Column(self.first_column.0 + 2)
    }

    pub fn header_row(&self) -> u32 {
        self.header_row
    }

    pub fn data_start_row(&self) -> u32 {
        self.data_start_row
    }
}

impl Default for SheetLayout {
    /// Table in B:H, headers on row 3, crops from row 4
    fn default() -> Self {
        Self {
            first_column: Column(1),
            header_row: 3,
            data_start_row: 4,
        }
    }
}
