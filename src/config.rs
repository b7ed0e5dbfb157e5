//! Configuration file support for whatsaterminal.
//!
//! Provides YAML-based configuration through `whatsaterminal.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::inventory::domain::{validate_sheet_name, Column, SheetLayout, SpreadsheetId};
use crate::shared::error::SheetsError;
use crate::shared::security::read_small_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "whatsaterminal.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub spreadsheet_id: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub application_name: Option<String>,
    pub default_sheet: Option<String>,
    pub export_path: Option<PathBuf>,
    pub layout: Option<LayoutConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Where the crop table sits inside each sheet.
///
/// Omitted fields fall back to the default layout (headers in `B3:H3`).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LayoutConfig {
    pub first_column: Option<String>,
    pub header_row: Option<u32>,
    pub data_start_row: Option<u32>,
}

impl LayoutConfig {
    pub fn to_layout(&self) -> Result<SheetLayout> {
        let defaults = SheetLayout::default();

        let first_column = match self.first_column.as_deref() {
            Some(letters) => letters.parse::<Column>()?,
            None => defaults.first_column(),
        };
        let header_row = self.header_row.unwrap_or(defaults.header_row());
        let data_start_row = match self.data_start_row {
            Some(row) => row,
            None => header_row.checked_add(1).ok_or_else(|| {
                SheetsError::validation(format!("header_row ({}) is out of range", header_row))
            })?,
        };

        SheetLayout::new(first_column, header_row, data_start_row)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_small_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref id) = config.spreadsheet_id {
        SpreadsheetId::new(id.as_str()).context("Invalid config: spreadsheet_id")?;
    }

    if let Some(ref sheet) = config.default_sheet {
        validate_sheet_name(sheet).context("Invalid config: default_sheet")?;
    }

    if let Some(ref name) = config.application_name {
        if name.trim().is_empty() {
            bail!(
                "Invalid config: application_name must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default name."
            );
        }
    }

    if let Some(ref layout) = config.layout {
        layout.to_layout().context(
            "Invalid config: layout\n\n💡 Hint: first_column takes letters (e.g. B) and data_start_row must come after header_row.",
        )?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
