use crate::inventory::domain::{Crop, Farm, SheetRef, INVALID_NUMBER};

/// A row that could not be turned into a crop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based row number in the sheet
    pub row_number: u32,
    pub reason: String,
}

/// Outcome of parsing a block of rows
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub crops: Vec<Crop>,
    /// Rows dropped entirely
    pub skipped: Vec<RowError>,
    /// Rows kept, but with a numeric cell replaced by `INVALID_NUMBER`
    pub warnings: Vec<RowError>,
}

/// RowParser turns raw cell values into crops
///
/// Cells are read in table column order: farm name, farm location, crop ID,
/// crop name, quantity, harvest date, in season.
pub struct RowParser;

impl RowParser {
    /// Parses `rows`, where `rows[0]` sits on sheet row `first_row`.
    ///
    /// A first row that repeats the column labels is dropped along with
    /// its numeric warnings.
    pub fn parse_rows(rows: &[Vec<String>], sheet: &SheetRef, first_row: u32) -> ParsedRows {
        let mut parsed = ParsedRows::default();

        for (i, row) in rows.iter().enumerate() {
            let row_number = first_row.saturating_add(u32::try_from(i).unwrap_or(u32::MAX));
            let mut warnings = Vec::new();
            match Self::parse_row(row, row_number, &mut warnings) {
                Ok(crop) => {
                    if i == 0 && crop.is_header_like() {
                        continue;
                    }
                    parsed.warnings.extend(warnings);
                    parsed.crops.push(crop.with_sheet(sheet.clone()));
                }
                Err(reason) => parsed.skipped.push(RowError { row_number, reason }),
            }
        }

        parsed
    }

    fn parse_row(
        row: &[String],
        row_number: u32,
        warnings: &mut Vec<RowError>,
    ) -> std::result::Result<Crop, String> {
        let farm = Farm::new(string_value(row, 0), string_value(row, 1));
        let crop_id = int_value(row, 2, "Crop ID", row_number, warnings)?;
        let crop_name = string_value(row, 3);
        let quantity = int_value(row, 4, "Quantity Available", row_number, warnings)?;
        let harvest_date = string_value(row, 5);
        let in_season = bool_value(row, 6);

        Ok(Crop::new(
            farm,
            crop_id,
            crop_name,
            quantity,
            harvest_date,
            in_season,
        ))
    }
}

fn string_value(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Missing or empty cells reject the row; unparsable text becomes `INVALID_NUMBER`
fn int_value(
    row: &[String],
    index: usize,
    label: &str,
    row_number: u32,
    warnings: &mut Vec<RowError>,
) -> std::result::Result<i32, String> {
    let raw = match row.get(index) {
        Some(value) if !value.trim().is_empty() => value.trim(),
        _ => return Err(format!("{} is missing", label)),
    };

    match raw.parse::<i32>() {
        Ok(value) => Ok(value),
        Err(_) => {
            warnings.push(RowError {
                row_number,
                reason: format!("Invalid numeric value for {}: {}", label, raw),
            });
            Ok(INVALID_NUMBER)
        }
    }
}

fn bool_value(row: &[String], index: usize) -> bool {
    row.get(index)
        .map(|v| v.trim().eq_ignore_ascii_case("TRUE"))
        .unwrap_or(false)
}
