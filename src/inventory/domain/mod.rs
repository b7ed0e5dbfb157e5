pub mod a1_range;
pub mod crop;
pub mod farm;
pub mod layout;
pub mod pending_change;
pub mod spreadsheet;

pub use a1_range::A1Range;
pub use crop::{
    validate_harvest_date, Crop, SheetRef, CROP_COLUMN_COUNT, CROP_HEADERS, INVALID_NUMBER,
};
pub use farm::Farm;
pub use layout::{Column, SheetLayout, MAX_ROW};
pub use pending_change::{ChangeSet, PendingChange};
pub use spreadsheet::{validate_sheet_name, SheetProperties, SpreadsheetId, SpreadsheetMetadata};
