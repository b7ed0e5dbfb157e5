use crate::inventory::domain::{
    validate_harvest_date, validate_sheet_name, Crop, Farm, SheetRef,
};
use crate::shared::error::SheetsError;
use crate::shared::Result;

/// CropInput - A crop as typed by the user, before validation
#[derive(Debug, Clone)]
pub struct CropInput {
    pub sheet: String,
    pub farm_name: Option<String>,
    pub farm_location: Option<String>,
    pub crop_id: i32,
    pub crop_name: String,
    pub quantity_available: i32,
    pub harvest_date: String,
    pub in_season: bool,
}

impl CropInput {
    /// Validates the input and builds the crop
    ///
    /// Farms entered without a name and location become the `unknown` farm.
    pub fn into_crop(self) -> Result<Crop> {
        validate_sheet_name(&self.sheet)?;
        validate_harvest_date(&self.harvest_date)?;

        if self.crop_id < 0 {
            return Err(SheetsError::validation("Crop ID must not be negative").into());
        }
        if self.quantity_available < 0 {
            return Err(
                SheetsError::validation("Quantity available must not be negative").into(),
            );
        }
        if self.crop_name.trim().is_empty() {
            return Err(SheetsError::validation("Crop name cannot be empty").into());
        }

        let farm = match (self.farm_name, self.farm_location) {
            (None, None) => Farm::unknown(),
            (name, location) => Farm::new(
                name.unwrap_or_else(|| "unknown".to_string()),
                location.unwrap_or_else(|| "unknown".to_string()),
            ),
        };

        Ok(Crop::new(
            farm,
            self.crop_id,
            self.crop_name.trim(),
            self.quantity_available,
            self.harvest_date.trim(),
            self.in_season,
        )
        .with_sheet(SheetRef::named(self.sheet)))
    }
}
