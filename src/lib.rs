//! whatsaterminal - Crop inventory in Google Sheets, from the terminal
//!
//! Reads, adds, updates and clears crop rows kept in the sheets of a Google
//! spreadsheet, exports them to an XLSX workbook, and offers an interactive
//! menu that stages edits until they are pushed. Follows hexagonal
//! architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`inventory`): crops, farms, sheet layout and the row
//!   parsing/encoding rules
//! - **Application Layer** (`application`): use cases and DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): Sheets API client, OAuth token providers,
//!   XLSX export, terminal output and the interactive menu
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use whatsaterminal::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let token_provider = StaticTokenProvider::new("ya29.token")?;
//! let client = GoogleSheetsClient::new(token_provider, "Farm Inventory")?;
//!
//! let inventory = CropInventoryUseCase::new(
//!     CachingSpreadsheetRepository::new(client),
//!     StderrProgressReporter::new(),
//!     SpreadsheetId::new("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms")?,
//!     SheetLayout::default(),
//! );
//!
//! for crop in inventory.items_in_sheet("Crops").await? {
//!     println!("{} {}", crop.crop_id(), crop.crop_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::ConsoleMenu;
    pub use crate::adapters::outbound::console::{CropTable, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::XlsxCropExporter;
    pub use crate::adapters::outbound::network::{
        CachingSpreadsheetRepository, GoogleSheetsClient, ServiceAccountKey,
        ServiceAccountTokenProvider, StaticTokenProvider,
    };
    pub use crate::application::dto::{CropInput, ExportRequest};
    pub use crate::application::use_cases::{CropInventoryUseCase, ExportCropsUseCase};
    pub use crate::inventory::domain::{
        A1Range, ChangeSet, Column, Crop, Farm, PendingChange, SheetLayout, SheetRef,
        SpreadsheetId, CROP_HEADERS,
    };
    pub use crate::inventory::services::{RowEncoder, RowLocator, RowParser};
    pub use crate::ports::inbound::{RowWriteOutcome, SheetsApplicationPort};
    pub use crate::ports::outbound::{
        AccessTokenProvider, CropExporter, ExportSummary, ProgressReporter,
        SpreadsheetRepository, UpdateSummary,
    };
    pub use crate::shared::Result;
}
