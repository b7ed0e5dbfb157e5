use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts tell a missing crop apart from a real failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The requested crop ID was not present in the sheet
    CropNotFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::CropNotFound => write!(f, "Crop Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the crop inventory.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the user-facing hints next to each variant.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Credentials file not found: {path}\n\n💡 Hint: Pass --credentials or set GOOGLE_APPLICATION_CREDENTIALS to a service account key file")]
    CredentialsNotFound { path: PathBuf },

    #[error("Failed to parse credentials file: {path}\nDetails: {details}\n\n💡 Hint: Download a JSON key for the service account from the Google Cloud console")]
    CredentialsParseError { path: PathBuf, details: String },

    #[error("No credentials configured\n\n💡 Hint: Pass --credentials, --access-token, or set credentials_path in the config file")]
    MissingCredentials,

    #[error("No spreadsheet ID configured\n\n💡 Hint: Pass --spreadsheet-id, set WHATSATERMINAL_SPREADSHEET_ID, or set spreadsheet_id in the config file")]
    MissingSpreadsheetId,

    #[error("Failed to obtain an access token\nDetails: {details}\n\n💡 Hint: Check that the service account key is valid and not revoked")]
    TokenExchangeFailed { details: String },

    #[error("Failed to connect to the spreadsheet: {spreadsheet_id}\nDetails: {details}\n\n💡 Hint: Share the spreadsheet with the service account's client_email")]
    ConnectionFailed {
        spreadsheet_id: String,
        details: String,
    },

    #[error("Google Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Sheet name '{name}' does not exist.\n\n💡 Hint: Run the `sheets` command to see the available sheets")]
    SheetNotFound { name: String },

    #[error("Crop ID {crop_id} already exists in sheet '{sheet}'\n\n💡 Hint: Use the `update` command to change an existing crop")]
    DuplicateCropId { sheet: String, crop_id: i32 },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for domain values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl SheetsError {
    pub fn validation(message: impl Into<String>) -> Self {
        SheetsError::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::CropNotFound.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::CropNotFound), "Crop Not Found (1)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_sheet_not_found_display() {
        let error = SheetsError::SheetNotFound {
            name: "Animals".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Sheet name 'Animals' does not exist."));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_connection_failed_display() {
        let error = SheetsError::ConnectionFailed {
            spreadsheet_id: "abc123".to_string(),
            details: "403 Forbidden".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to connect to the spreadsheet: abc123"));
        assert!(display.contains("403 Forbidden"));
        assert!(display.contains("client_email"));
    }

    #[test]
    fn test_api_error_display() {
        let error = SheetsError::Api {
            status: 400,
            message: "Unable to parse range: Crops!B3:H".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Google Sheets API error (400): Unable to parse range: Crops!B3:H"
        );
    }

    #[test]
    fn test_duplicate_crop_id_display() {
        let error = SheetsError::DuplicateCropId {
            sheet: "Crops".to_string(),
            crop_id: 7,
        };
        let display = format!("{}", error);
        assert!(display.contains("Crop ID 7 already exists in sheet 'Crops'"));
    }

    #[test]
    fn test_validation_helper() {
        let error = SheetsError::validation("bad value");
        assert_eq!(format!("{}", error), "Validation error: bad value");
    }
}
