use crate::shared::error::SheetsError;
use crate::shared::Result;
use std::fmt;

/// Maximum length for spreadsheet IDs (security limit)
const MAX_SPREADSHEET_ID_LENGTH: usize = 128;

/// Maximum sheet title length accepted by Google Sheets
const MAX_SHEET_NAME_LENGTH: usize = 100;

/// NewType wrapper for a spreadsheet ID with validation
///
/// The ID ends up in request URLs, so only the characters Google uses in
/// spreadsheet IDs are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(SheetsError::validation("Spreadsheet ID cannot be empty").into());
        }

        if id.len() > MAX_SPREADSHEET_ID_LENGTH {
            return Err(SheetsError::validation(format!(
                "Spreadsheet ID is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_SPREADSHEET_ID_LENGTH
            ))
            .into());
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(SheetsError::validation(
                "Spreadsheet ID contains invalid characters. Only letters, digits, hyphens and underscores are allowed.",
            )
            .into());
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks a sheet title before it is used in a range
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SheetsError::validation("Sheet name cannot be empty").into());
    }
    if name.chars().count() > MAX_SHEET_NAME_LENGTH {
        return Err(SheetsError::validation(format!(
            "Sheet name is too long. Maximum allowed: {} characters",
            MAX_SHEET_NAME_LENGTH
        ))
        .into());
    }
    Ok(())
}

/// Properties of one sheet (tab) of a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    pub index: u32,
}

/// Spreadsheet title and its sheets, in tab order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetMetadata {
    pub title: String,
    pub sheets: Vec<SheetProperties>,
}

impl SpreadsheetMetadata {
    pub fn sheet(&self, title: &str) -> Option<&SheetProperties> {
        self.sheets.iter().find(|s| s.title == title)
    }
}
