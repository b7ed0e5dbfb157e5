/// Network adapters for the Google Sheets API and OAuth token endpoint
mod caching_sheets_client;
mod service_account;
mod sheets_client;
mod static_token;

pub use caching_sheets_client::CachingSpreadsheetRepository;
pub use service_account::{
    AssertionClaims, ServiceAccountKey, ServiceAccountTokenProvider, SPREADSHEETS_SCOPE,
};
pub use sheets_client::GoogleSheetsClient;
pub use static_token::StaticTokenProvider;
