use crate::inventory::domain::{Crop, CROP_HEADERS};
use owo_colors::OwoColorize;
use std::fmt::Write as _;

/// Renders crops as an aligned text table for the terminal
///
/// With `colored` set, headers are bold and the in-season column is green or
/// red. Column widths are computed on the plain text so color codes never
/// skew the alignment.
pub struct CropTable {
    colored: bool,
}

impl CropTable {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render(&self, crops: &[Crop]) -> String {
        let rows: Vec<[String; 7]> = crops.iter().map(cells).collect();

        let mut widths = CROP_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = CROP_HEADERS
            .iter()
            .zip(widths)
            .map(|(label, width)| {
                let padded = format!("{:<width$}", label);
                if self.colored {
                    padded.bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        let _ = writeln!(out, "{}", header.join("  ").trim_end());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("  "));

        for (crop, row) in crops.iter().zip(&rows) {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(col, (cell, width))| {
                    let padded = format!("{:<width$}", cell);
                    match (self.colored, col) {
                        (true, 6) if crop.is_in_season() => padded.green().to_string(),
                        (true, 6) => padded.red().to_string(),
                        _ => padded,
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", line.join("  ").trim_end());
        }

        out
    }

    /// One-line description used by `show` and the menu
    pub fn render_one(&self, crop: &Crop) -> String {
        let id = format!("Crop ID: {}", crop.crop_id());
        let line = format!(
            "{}, Name: {}, Farm: {} ({}), Quantity: {}, Harvest: {}, In season: {}",
            id,
            crop.crop_name(),
            crop.farm().name(),
            crop.farm().location(),
            crop.quantity_available(),
            crop.harvest_date(),
            yes_no(crop.is_in_season()),
        );
        if self.colored {
            line.replacen(&id, &id.bold().to_string(), 1)
        } else {
            line
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn cells(crop: &Crop) -> [String; 7] {
    [
        crop.farm().name().to_string(),
        crop.farm().location().to_string(),
        crop.crop_id().to_string(),
        crop.crop_name().to_string(),
        crop.quantity_available().to_string(),
        crop.harvest_date().to_string(),
        yes_no(crop.is_in_season()).to_string(),
    ]
}
