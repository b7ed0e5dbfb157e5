use crate::adapters::outbound::console::CropTable;
use crate::application::dto::CropInput;
use crate::inventory::domain::{validate_harvest_date, ChangeSet, PendingChange};
use crate::ports::inbound::{RowWriteOutcome, SheetsApplicationPort};
use crate::shared::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\nMain Menu:
1: See all crops
2: Add new crop
3: Edit crop
4: Delete crop
5: PUSH ALL CHANGES
0: QUIT PROGRAM";

/// What a single menu choice asks the loop to do next
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive menu over one sheet of the inventory
///
/// Adds, edits and deletes are staged in a [`ChangeSet`] and only reach the
/// spreadsheet when the user pushes them (option 5). End of input is treated
/// like option 0.
pub struct ConsoleMenu<'a, P, R, W> {
    inventory: &'a P,
    sheet: String,
    input: R,
    output: W,
    table: CropTable,
    staged: ChangeSet,
}

impl<'a, P, R, W> ConsoleMenu<'a, P, R, W>
where
    P: SheetsApplicationPort,
    R: BufRead,
    W: Write,
{
    pub fn new(inventory: &'a P, sheet: impl Into<String>, input: R, output: W) -> Self {
        Self {
            inventory,
            sheet: sheet.into(),
            input,
            output,
            table: CropTable::new(false),
            staged: ChangeSet::new(),
        }
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.table = CropTable::new(colored);
        self
    }

    pub fn staged(&self) -> &ChangeSet {
        &self.staged
    }

    /// Runs until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("\nEnter option: ")? else {
                self.quit()?;
                return Ok(());
            };

            let flow = match choice.as_str() {
                "0" => {
                    self.quit()?;
                    Flow::Quit
                }
                "1" => self.show_all().await?,
                "2" => self.stage_add()?,
                "3" => self.stage_edit().await?,
                "4" => self.stage_delete()?,
                "5" => self.push_changes().await?,
                _ => {
                    writeln!(self.output, "Invalid option! Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Reads one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until the answer parses, or input ends
    fn prompt_parsed<T: FromStr>(&mut self, label: &str, hint: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{}", hint)?,
            }
        }
    }

    fn prompt_number(&mut self, label: &str) -> Result<Option<i32>> {
        self.prompt_parsed(label, "Please enter a whole number.")
    }

    fn prompt_date(&mut self, label: &str, current: Option<&str>) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                if let Some(current) = current {
                    return Ok(Some(current.to_string()));
                }
            }
            match validate_harvest_date(&answer) {
                Ok(()) => return Ok(Some(answer)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn prompt_bool(&mut self, label: &str, current: Option<bool>) -> Result<Option<bool>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" | "true" => return Ok(Some(true)),
                "n" | "no" | "false" => return Ok(Some(false)),
                "" if current.is_some() => return Ok(current),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    fn quit(&mut self) -> Result<()> {
        if !self.staged.is_empty() {
            writeln!(
                self.output,
                "Discarding {} staged change(s) that were not pushed.",
                self.staged.len()
            )?;
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    async fn show_all(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nShowing you all crops...")?;
        let crops = match self.inventory.items_in_sheet(&self.sheet).await {
            Ok(crops) => crops,
            Err(e) => {
                tracing::warn!(error = %e, sheet = %self.sheet, "failed to read crops");
                writeln!(self.output, "Could not read crops: {:#}", e)?;
                Vec::new()
            }
        };
        if !crops.is_empty() {
            write!(self.output, "{}", self.table.render(&crops))?;
        }
        if !self.staged.is_empty() {
            writeln!(self.output, "\n{} staged change(s):", self.staged.len())?;
            for change in self.staged.iter() {
                writeln!(self.output, "  - {}", change)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn stage_add(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nAdding new crop...")?;

        let Some(farm_name) = self.prompt("Farm name: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(farm_location) = self.prompt("Farm location: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(crop_id) = self.prompt_number("Crop ID: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(crop_name) = self.prompt("Crop name: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(quantity_available) = self.prompt_number("Quantity available: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(harvest_date) = self.prompt_date("Harvest date (MM-DD-YYYY): ", None)? else {
            return Ok(Flow::Continue);
        };
        let Some(in_season) = self.prompt_bool("In season? (y/n): ", None)? else {
            return Ok(Flow::Continue);
        };

        let input = CropInput {
            sheet: self.sheet.clone(),
            farm_name: Some(farm_name).filter(|s| !s.is_empty()),
            farm_location: Some(farm_location).filter(|s| !s.is_empty()),
            crop_id,
            crop_name,
            quantity_available,
            harvest_date,
            in_season,
        };

        self.stage(input.into_crop().map(PendingChange::Add))?;
        Ok(Flow::Continue)
    }

    async fn stage_edit(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nEditing crop...")?;

        let Some(crop_id) = self.prompt_number("Crop ID to edit: ")? else {
            return Ok(Flow::Continue);
        };
        let found = match self
            .inventory
            .check_and_display_crop(&self.sheet, crop_id)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, crop_id, "failed to look up crop");
                writeln!(self.output, "Could not look up crop {}: {:#}", crop_id, e)?;
                return Ok(Flow::Continue);
            }
        };
        let Some(mut crop) = found else {
            return Ok(Flow::Continue);
        };
        writeln!(self.output, "{}", self.table.render_one(&crop))?;
        writeln!(self.output, "Press Enter to keep the current value.")?;

        let Some(name) = self.prompt(&format!("Crop name [{}]: ", crop.crop_name()))? else {
            return Ok(Flow::Continue);
        };
        if !name.is_empty() {
            crop.set_crop_name(name);
        }

        let label = format!("Quantity available [{}]: ", crop.quantity_available());
        loop {
            let Some(answer) = self.prompt(&label)? else {
                return Ok(Flow::Continue);
            };
            if answer.is_empty() {
                break;
            }
            match answer.parse::<i32>() {
                Ok(quantity) if quantity >= 0 => {
                    crop.set_quantity_available(quantity);
                    break;
                }
                _ => writeln!(self.output, "Please enter a whole number of at least 0.")?,
            }
        }

        let current_date = crop.harvest_date().to_string();
        let label = format!("Harvest date (MM-DD-YYYY) [{}]: ", current_date);
        let Some(date) = self.prompt_date(&label, Some(&current_date))? else {
            return Ok(Flow::Continue);
        };
        crop.set_harvest_date(date);

        let current = crop.is_in_season();
        let label = format!("In season? (y/n) [{}]: ", if current { "y" } else { "n" });
        let Some(in_season) = self.prompt_bool(&label, Some(current))? else {
            return Ok(Flow::Continue);
        };
        crop.set_in_season(in_season);

        self.stage(Ok(PendingChange::Update(crop)))?;
        Ok(Flow::Continue)
    }

    fn stage_delete(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nDeleting crop...")?;

        let Some(crop_id) = self.prompt_number("Crop ID to delete: ")? else {
            return Ok(Flow::Continue);
        };
        self.stage(Ok(PendingChange::Delete {
            sheet: self.sheet.clone(),
            crop_id,
        }))?;
        Ok(Flow::Continue)
    }

    fn stage(&mut self, change: Result<PendingChange>) -> Result<()> {
        match change {
            Ok(change) => {
                writeln!(self.output, "Staged: {}", change)?;
                self.staged.stage(change);
            }
            Err(e) => writeln!(self.output, "Not staged: {}", e)?,
        }
        Ok(())
    }

    async fn push_changes(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nPUSHING CHANGES...")?;

        let changes = self.staged.take();
        if changes.is_empty() {
            writeln!(self.output, "Nothing to push.")?;
            return Ok(Flow::Continue);
        }

        let mut applied = 0;
        for change in &changes {
            let outcome = match change {
                PendingChange::Add(crop) => self.inventory.add_data_row(crop).await,
                PendingChange::Update(crop) => self.inventory.update_data_row(crop).await,
                PendingChange::Delete { sheet, crop_id } => {
                    self.inventory.delete_data_row(sheet, *crop_id).await
                }
            };

            match outcome {
                Ok(RowWriteOutcome::Written { row, .. }) => {
                    applied += 1;
                    writeln!(self.output, "  ✔ {} (row {})", change, row)?;
                }
                Ok(RowWriteOutcome::NotFound { crop_id }) => {
                    writeln!(self.output, "  ✘ {}: crop {} not found", change, crop_id)?;
                }
                Err(e) => {
                    tracing::warn!(error = %e, change = %change, "failed to apply staged change");
                    writeln!(self.output, "  ✘ {}: {}", change, e)?;
                }
            }
        }

        writeln!(
            self.output,
            "Pushed {} of {} change(s).",
            applied,
            changes.len()
        )?;
        Ok(Flow::Continue)
    }
}
