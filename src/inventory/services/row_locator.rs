/// Finds rows by inspecting the crop ID column
///
/// `id_cells` is the value block returned for the ID column starting at
/// `data_start_row`. The API drops trailing empty cells, so an empty row
/// arrives as an empty vector.
pub struct RowLocator;

impl RowLocator {
    /// First row whose ID cell is blank, or the row after the last value
    pub fn first_empty_row(id_cells: &[Vec<String>], data_start_row: u32) -> u32 {
        let filled = id_cells
            .iter()
            .take_while(|row| !is_blank(row.first()))
            .count();
        data_start_row.saturating_add(u32::try_from(filled).unwrap_or(u32::MAX))
    }

    /// Row holding `crop_id`, if any
    pub fn find_crop_row(id_cells: &[Vec<String>], crop_id: i32, data_start_row: u32) -> Option<u32> {
        let wanted = crop_id.to_string();
        id_cells
            .iter()
            .position(|row| row.first().map(|c| c.trim() == wanted).unwrap_or(false))
            .and_then(|i| data_start_row.checked_add(u32::try_from(i).ok()?))
    }
}

fn is_blank(cell: Option<&String>) -> bool {
    cell.map(|c| c.trim().is_empty()).unwrap_or(true)
}
