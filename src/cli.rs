use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::CropInput;
use crate::inventory::domain::validate_harvest_date;

/// Keep a farm's crop inventory in Google Sheets from the terminal
#[derive(Parser, Debug)]
#[command(name = "whatsaterminal")]
#[command(version)]
#[command(about = "Keep a farm's crop inventory in Google Sheets from the terminal", long_about = None)]
pub struct Args {
    /// ID of the spreadsheet (the long token in its URL)
    #[arg(long, global = true, env = "WHATSATERMINAL_SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Service account JSON key file
    #[arg(long, global = true, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Pre-issued OAuth access token, used instead of a key file
    #[arg(
        long,
        global = true,
        env = "WHATSATERMINAL_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub access_token: Option<String>,

    /// Config file (defaults to ./whatsaterminal.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of the Sheets API (for testing against a local server)
    #[arg(long, global = true, env = "WHATSATERMINAL_API_BASE_URL", hide = true)]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the spreadsheet can be reached
    Check,

    /// List the sheets of the spreadsheet with their IDs
    Sheets,

    /// List every crop of a sheet
    List {
        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Show a single crop
    Show {
        #[command(flatten)]
        sheet: SheetArg,

        #[arg(long)]
        crop_id: i32,
    },

    /// Add a crop to the first empty row of a sheet
    Add(CropArgs),

    /// Replace the row of an existing crop
    Update(CropArgs),

    /// Clear the row of a crop
    Delete {
        #[command(flatten)]
        sheet: SheetArg,

        #[arg(long)]
        crop_id: i32,
    },

    /// Export crops to an XLSX workbook
    Export {
        /// Sheets to export; all sheets when omitted.
        /// Can be specified multiple times: --sheet Crops --sheet Orchard
        #[arg(long = "sheet", value_name = "SHEET")]
        sheets: Vec<String>,

        /// Output file (defaults to DetailedCropsData.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive menu for staging and pushing changes to a sheet
    Menu {
        #[command(flatten)]
        sheet: SheetArg,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SheetArg {
    /// Sheet (tab) name; falls back to default_sheet from the config file
    #[arg(long)]
    pub sheet: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CropArgs {
    #[command(flatten)]
    pub sheet: SheetArg,

    #[arg(long)]
    pub farm_name: Option<String>,

    #[arg(long)]
    pub farm_location: Option<String>,

    #[arg(long)]
    pub crop_id: i32,

    #[arg(long)]
    pub crop_name: String,

    #[arg(long = "quantity")]
    pub quantity_available: i32,

    /// Harvest date as MM-DD-YYYY
    #[arg(long, value_parser = parse_harvest_date)]
    pub harvest_date: String,

    /// Mark the crop as in season
    #[arg(long)]
    pub in_season: bool,
}

impl CropArgs {
    /// Converts the arguments into a crop input for the given sheet
    pub fn into_input(self, sheet: String) -> CropInput {
        CropInput {
            sheet,
            farm_name: self.farm_name,
            farm_location: self.farm_location,
            crop_id: self.crop_id,
            crop_name: self.crop_name,
            quantity_available: self.quantity_available,
            harvest_date: self.harvest_date,
            in_season: self.in_season,
        }
    }
}

fn parse_harvest_date(value: &str) -> Result<String, String> {
    validate_harvest_date(value)
        .map(|()| value.trim().to_string())
        .map_err(|e| e.to_string())
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
