use crate::domain::export::{create_judge_csv, create_project_csv};
use crate::domain::importer::ImportSession;
use crate::inbound::file::Reader;
use crate::outbound::delivery::{CsvSink, add_csv_data};
use crate::outbound::store::OptionsStore;
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Judges,
    Projects,
    Devpost,
}

impl ImportKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Judges => "judges",
            Self::Projects => "projects",
            Self::Devpost => "devpost",
        }
    }
}

impl FromStr for ImportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "judges" | "judge" => Ok(Self::Judges),
            "projects" | "project" => Ok(Self::Projects),
            "devpost" => Ok(Self::Devpost),
            other => anyhow::bail!(
                "unknown import kind '{}' (expected judges, projects or devpost)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStats {
    pub imported: usize,
    pub localities_added: usize,
    pub duration_secs: f64,
}

/// Imports one spreadsheet and delivers the imported records as a CSV export
/// named after the file.
pub fn process_file<S, K>(
    file_path: &Path,
    file_name: &str,
    kind: ImportKind,
    has_header: bool,
    session: &mut ImportSession<S>,
    sink: &mut K,
) -> anyhow::Result<ProcessingStats>
where
    S: OptionsStore,
    K: CsvSink + ?Sized,
{
    let start = Instant::now();
    info!("Processing {} file '{}'", kind.label(), file_name);
    let content = Reader::read_as_csv_text(file_path)?;

    let (imported, localities_added, export) = match kind {
        ImportKind::Judges => {
            let judges = session
                .import_judges(&content, has_header)
                .with_context(|| format!("failed to import judges from '{}'", file_name))?;
            (judges.len(), 0, create_judge_csv(&judges))
        }
        ImportKind::Projects => {
            let import = session
                .import_projects(&content, has_header)
                .with_context(|| format!("failed to import projects from '{}'", file_name))?;
            (
                import.projects.len(),
                import.localities_added,
                create_project_csv(&import.projects),
            )
        }
        ImportKind::Devpost => {
            let import = session
                .import_devpost(&content)
                .with_context(|| format!("failed to import Devpost export '{}'", file_name))?;
            (
                import.projects.len(),
                import.localities_added,
                create_project_csv(&import.projects),
            )
        }
    };

    let stem = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("import");
    add_csv_data(&format!("{}_{}", stem, kind.label()), &export, sink)?;

    let duration_secs = start.elapsed().as_secs_f64();
    info!(
        "Completed '{}': {} {} imported in {:.2}s",
        file_name,
        imported,
        kind.label(),
        duration_secs
    );
    Ok(ProcessingStats {
        imported,
        localities_added,
        duration_secs,
    })
}
