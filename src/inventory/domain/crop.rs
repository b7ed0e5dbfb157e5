use super::Farm;
use crate::shared::error::SheetsError;
use crate::shared::Result;
use chrono::NaiveDate;

/// Column labels of a crop table, in sheet column order
pub const CROP_HEADERS: [&str; 7] = [
    "Farm Name",
    "Farm Location",
    "Crop ID",
    "Crop Name",
    "Quantity Available",
    "Harvest Date (MM-DD-YYYY)",
    "In Season",
];

/// Number of cells a crop occupies in a row
pub const CROP_COLUMN_COUNT: usize = CROP_HEADERS.len();

/// Value stored for a numeric cell that could not be parsed
pub const INVALID_NUMBER: i32 = -1;

/// Expected shape of harvest dates entered by users
pub const HARVEST_DATE_FORMAT: &str = "%m-%d-%Y";

/// Identifies the sheet a crop was read from (or will be written to)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRef {
    pub name: String,
    /// Numeric sheet ID; `None` when the sheet was not found in the metadata
    pub id: Option<i64>,
}

impl SheetRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }
}

/// A single crop row of the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crop {
    farm: Farm,
    crop_id: i32,
    crop_name: String,
    quantity_available: i32,
    harvest_date: String,
    in_season: bool,
    sheet: SheetRef,
}

impl Crop {
    pub fn new(
        farm: Farm,
        crop_id: i32,
        crop_name: impl Into<String>,
        quantity_available: i32,
        harvest_date: impl Into<String>,
        in_season: bool,
    ) -> Self {
        Self {
            farm,
            crop_id,
            crop_name: crop_name.into(),
            quantity_available,
            harvest_date: harvest_date.into(),
            in_season,
            sheet: SheetRef::default(),
        }
    }

    pub fn with_sheet(mut self, sheet: SheetRef) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn farm(&self) -> &Farm {
        &self.farm
    }

    pub fn farm_mut(&mut self) -> &mut Farm {
        &mut self.farm
    }

    pub fn crop_id(&self) -> i32 {
        self.crop_id
    }

    pub fn crop_name(&self) -> &str {
        &self.crop_name
    }

    pub fn quantity_available(&self) -> i32 {
        self.quantity_available
    }

    pub fn harvest_date(&self) -> &str {
        &self.harvest_date
    }

    pub fn is_in_season(&self) -> bool {
        self.in_season
    }

    pub fn sheet(&self) -> &SheetRef {
        &self.sheet
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet.name
    }

    pub fn set_crop_name(&mut self, crop_name: impl Into<String>) {
        self.crop_name = crop_name.into();
    }

    pub fn set_quantity_available(&mut self, quantity_available: i32) {
        self.quantity_available = quantity_available;
    }

    pub fn set_harvest_date(&mut self, harvest_date: impl Into<String>) {
        self.harvest_date = harvest_date.into();
    }

    pub fn set_in_season(&mut self, in_season: bool) {
        self.in_season = in_season;
    }

    pub fn set_sheet(&mut self, sheet: SheetRef) {
        self.sheet = sheet;
    }

    /// True when the crop's text fields repeat the column labels, which
    /// happens when the header row of the sheet is read as data.
    pub fn is_header_like(&self) -> bool {
        self.farm.name() == CROP_HEADERS[0]
            && self.farm.location() == CROP_HEADERS[1]
            && self.crop_name == CROP_HEADERS[3]
    }
}

/// Checks a user-entered harvest date against MM-DD-YYYY
pub fn validate_harvest_date(value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value.trim(), HARVEST_DATE_FORMAT).map_err(|_| {
        SheetsError::validation(format!(
            "Harvest date '{}' is not a valid MM-DD-YYYY date",
            value
        ))
    })?;
    Ok(())
}
