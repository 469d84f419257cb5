use tracing::{info, warn};

pub struct ImportSummary {
    pub kind: &'static str,
    pub total_files: usize,
    pub total_imported: usize,
    pub localities_added: usize,
    pub next_table_num: Option<i64>,
    pub failed_files: Vec<String>,
    pub total_runtime_secs: f64,
}

pub fn log_summary(summary: ImportSummary) {
    info!("=== Import Summary ===");
    info!("Files processed: {}", summary.total_files);
    info!("Records imported ({}): {}", summary.kind, summary.total_imported);
    info!("Locality values recorded: {}", summary.localities_added);
    if let Some(next) = summary.next_table_num {
        info!("Next table number: {}", next);
    }
    info!("Total runtime: {:.2}s", summary.total_runtime_secs);
    if !summary.failed_files.is_empty() {
        warn!("Files that could not be imported: {}", summary.failed_files.len());
        for failure in &summary.failed_files {
            warn!("  {}", failure);
        }
    }
}
