use super::Crop;
use std::fmt;

/// An edit staged locally until the user pushes it to the spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Add(Crop),
    Update(Crop),
    Delete { sheet: String, crop_id: i32 },
}

impl PendingChange {
    pub fn crop_id(&self) -> i32 {
        match self {
            PendingChange::Add(crop) | PendingChange::Update(crop) => crop.crop_id(),
            PendingChange::Delete { crop_id, .. } => *crop_id,
        }
    }
}

impl fmt::Display for PendingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingChange::Add(crop) => write!(
                f,
                "add crop {} ({}) to '{}'",
                crop.crop_id(),
                crop.crop_name(),
                crop.sheet_name()
            ),
            PendingChange::Update(crop) => write!(
                f,
                "update crop {} ({}) in '{}'",
                crop.crop_id(),
                crop.crop_name(),
                crop.sheet_name()
            ),
            PendingChange::Delete { sheet, crop_id } => {
                write!(f, "delete crop {} from '{}'", crop_id, sheet)
            }
        }
    }
}

/// Ordered list of staged changes; applied first-in, first-out
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    changes: Vec<PendingChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, change: PendingChange) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingChange> {
        self.changes.iter()
    }

    /// Removes and returns every staged change in staging order
    pub fn take(&mut self) -> Vec<PendingChange> {
        std::mem::take(&mut self.changes)
    }
}
