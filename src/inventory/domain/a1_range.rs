use super::layout::{Column, SheetLayout};
use std::fmt;

/// A rectangular range in A1 notation, e.g. `Crops!B3:H` or `'Farm 2'!B7:H7`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    sheet_name: String,
    start_column: Column,
    start_row: u32,
    end_column: Column,
    /// `None` means the range runs to the last row of the sheet
    end_row: Option<u32>,
}

impl A1Range {
    /// Range from `start_row` down to the bottom of the sheet
    pub fn open_ended(
        sheet_name: impl Into<String>,
        start_column: Column,
        start_row: u32,
        end_column: Column,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            start_column,
            start_row,
            end_column,
            end_row: None,
        }
    }

    /// Range covering a single row between two columns
    pub fn single_row(
        sheet_name: impl Into<String>,
        start_column: Column,
        end_column: Column,
        row: u32,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            start_column,
            start_row: row,
            end_column,
            end_row: Some(row),
        }
    }

    /// The whole crop table, header row included
    pub fn crop_table(sheet_name: &str, layout: &SheetLayout) -> Self {
        Self::open_ended(
            sheet_name,
            layout.first_column(),
            layout.header_row(),
            layout.last_column(),
        )
    }

    /// The crop ID column from the first data row down
    pub fn id_column(sheet_name: &str, layout: &SheetLayout) -> Self {
        Self::open_ended(
            sheet_name,
            layout.id_column(),
            layout.data_start_row(),
            layout.id_column(),
        )
    }

    /// One full crop row
    pub fn crop_row(sheet_name: &str, layout: &SheetLayout, row: u32) -> Self {
        Self::single_row(sheet_name, layout.first_column(), layout.last_column(), row)
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn start_column(&self) -> Column {
        self.start_column
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    pub fn end_column(&self) -> Column {
        self.end_column
    }

    pub fn end_row(&self) -> Option<u32> {
        self.end_row
    }
}

/// Quotes a sheet name unless it is plain alphanumerics and underscores
/// that cannot be read as a cell or column reference
fn quote_sheet_name(name: &str) -> String {
    let plain = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !looks_like_reference(name);
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// `B`, `AB12` or `R1C1`
fn looks_like_reference(name: &str) -> bool {
    let letters = name.chars().take_while(char::is_ascii_alphabetic).count();
    let rest = &name[letters..];
    let a1 = letters <= 3 && rest.chars().all(|c| c.is_ascii_digit());

    let upper = name.to_ascii_uppercase();
    let r1c1 = upper
        .strip_prefix('R')
        .and_then(|r| r.split_once('C'))
        .is_some_and(|(row, col)| {
            row.chars().all(|c| c.is_ascii_digit()) && col.chars().all(|c| c.is_ascii_digit())
        });

    a1 || r1c1
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}:{}",
            quote_sheet_name(&self.sheet_name),
            self.start_column,
            self.start_row,
            self.end_column
        )?;
        if let Some(end_row) = self.end_row {
            write!(f, "{}", end_row)?;
        }
        Ok(())
    }
}
