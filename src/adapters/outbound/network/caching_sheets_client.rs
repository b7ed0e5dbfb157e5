use crate::inventory::domain::{A1Range, SpreadsheetId, SpreadsheetMetadata};
use crate::ports::outbound::{SpreadsheetRepository, UpdateSummary};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingSpreadsheetRepository wraps a SpreadsheetRepository and caches
/// spreadsheet metadata in memory.
///
/// Sheet titles and ids are looked up before most operations (validating a
/// sheet name, the `sheets` listing, export of all sheets), and they do not
/// change while the process runs. Cell values are never cached; reads, writes
/// and clears always go to the inner repository.
pub struct CachingSpreadsheetRepository<R: SpreadsheetRepository> {
    inner: R,
    metadata: Arc<DashMap<SpreadsheetId, SpreadsheetMetadata>>,
}

impl<R: SpreadsheetRepository> CachingSpreadsheetRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            metadata: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.metadata.len()
    }
}

#[async_trait]
impl<R: SpreadsheetRepository> SpreadsheetRepository for CachingSpreadsheetRepository<R> {
    async fn spreadsheet_metadata(
        &self,
        spreadsheet_id: &SpreadsheetId,
    ) -> Result<SpreadsheetMetadata> {
        if let Some(cached) = self.metadata.get(spreadsheet_id) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.spreadsheet_metadata(spreadsheet_id).await?;
        self.metadata.insert(spreadsheet_id.clone(), metadata.clone());
        Ok(metadata)
    }

    async fn read_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
    ) -> Result<Vec<Vec<String>>> {
        self.inner.read_values(spreadsheet_id, range).await
    }

    async fn write_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateSummary> {
        self.inner.write_values(spreadsheet_id, range, values).await
    }

    async fn clear_values(&self, spreadsheet_id: &SpreadsheetId, range: &A1Range) -> Result<()> {
        self.inner.clear_values(spreadsheet_id, range).await
    }
}
