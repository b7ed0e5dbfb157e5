use crate::inventory::domain::Crop;

/// Converts a crop into the cells written to the sheet, in column order
pub struct RowEncoder;

impl RowEncoder {
    pub fn encode(crop: &Crop) -> Vec<String> {
        vec![
            crop.farm().name().to_string(),
            crop.farm().location().to_string(),
            crop.crop_id().to_string(),
            crop.crop_name().to_string(),
            crop.quantity_available().to_string(),
            crop.harvest_date().to_string(),
            if crop.is_in_season() { "TRUE" } else { "FALSE" }.to_string(),
        ]
    }
}
