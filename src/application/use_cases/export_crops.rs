use crate::application::dto::ExportRequest;
use crate::ports::inbound::SheetsApplicationPort;
use crate::ports::outbound::{CropExporter, ExportSummary, ProgressReporter};
use crate::shared::Result;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicUsize, Ordering};

/// ExportCropsUseCase - Copies crops from one or more sheets into a file
///
/// Sheets are read concurrently; the exported rows keep the order in which
/// sheets were requested (or tab order when none were named).
pub struct ExportCropsUseCase<'a, P, E, PR> {
    inventory: &'a P,
    exporter: E,
    progress_reporter: &'a PR,
}

impl<'a, P, E, PR> ExportCropsUseCase<'a, P, E, PR>
where
    P: SheetsApplicationPort,
    E: CropExporter,
    PR: ProgressReporter,
{
    pub fn new(inventory: &'a P, exporter: E, progress_reporter: &'a PR) -> Self {
        Self {
            inventory,
            exporter,
            progress_reporter,
        }
    }

    pub async fn execute(&self, request: ExportRequest) -> Result<ExportSummary> {
        let sheets = if request.sheets.is_empty() {
            self.inventory.available_sheets().await?
        } else {
            request.sheets
        };

        if sheets.is_empty() {
            anyhow::bail!("The spreadsheet has no sheets to export");
        }

        let total = sheets.len();
        self.progress_reporter
            .report(&format!("📖 Reading {} sheet(s)...", total));

        let completed = &AtomicUsize::new(0);
        let reads = sheets.iter().map(|sheet| async move {
            let crops = self.inventory.items_in_sheet(sheet).await?;
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            self.progress_reporter
                .report_progress(done, total, Some(sheet.as_str()));
            Ok::<_, anyhow::Error>(crops)
        });
        let crops: Vec<_> = try_join_all(reads).await?.into_iter().flatten().collect();

        let summary = self.exporter.export(&crops)?;
        self.progress_reporter.report_completion(&format!(
            "✅ XLSX file has been created successfully: {} ({} crop(s))",
            summary.path.display(),
            summary.rows_written
        ));
        Ok(summary)
    }
}
