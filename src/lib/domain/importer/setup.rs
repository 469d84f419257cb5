use crate::config::Config;
use crate::domain::importer::ImportSession;
use crate::inbound::file::Reader;
use crate::outbound::delivery::DirectorySink;
use crate::outbound::store::JsonFileOptionsStore;
use anyhow::Context;
use chrono::Utc;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_DIR: &str = "log";

pub struct SetupResult {
    pub session: ImportSession<JsonFileOptionsStore>,
    pub sink: DirectorySink,
    pub files_to_process: Vec<(PathBuf, String)>,
}

pub fn setup_logging(log_level: tracing::Level) -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR)
        .with_context(|| format!("Failed to create log directory: {}", LOG_DIR))?;
    let timestamp_str = Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let log_file_path = format!("{}/importer_{}.log", LOG_DIR, timestamp_str);
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_file_path)
        .with_context(|| format!("Failed to open log file: {}", log_file_path))?;
    Registry::default()
        .with(LevelFilter::from_level(log_level))
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::Layer::default().with_writer(std::io::stdout))
        .init();
    info!("Starting jury CSV importer");
    info!("Configuration loaded successfully");
    Ok(())
}

/// Importable spreadsheets at `input_path`: the file itself, or every csv /
/// excel file directly inside it, sorted by name.
pub fn discover_files(input_path: &Path) -> anyhow::Result<Vec<(PathBuf, String)>> {
    if !input_path.exists() {
        anyhow::bail!("Input path {:?} does not exist", input_path);
    }
    let candidates = if input_path.is_file() {
        vec![input_path.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(input_path)
            .with_context(|| format!("Failed to read input directory: {:?}", input_path))?
        {
            let entry = entry.with_context(|| {
                format!("Failed to read entry in input directory: {:?}", input_path)
            })?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        paths
    };

    let mut files_to_process = Vec::new();
    for file_path in candidates {
        if Reader::format_of(&file_path).is_none() {
            continue;
        }
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        files_to_process.push((file_path, file_name));
    }
    Ok(files_to_process)
}

pub fn setup(config: &Config, input_path: &Path) -> anyhow::Result<SetupResult> {
    let store = JsonFileOptionsStore::new(&config.options_path);
    info!("Using options store at {:?}", store.path());
    let session = ImportSession::new(store, config.locality_scope);
    let sink = DirectorySink::new(&config.output_dir);
    let files_to_process = discover_files(input_path)?;
    Ok(SetupResult {
        session,
        sink,
        files_to_process,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discovers_spreadsheets_in_directory() {
        let dir = tempdir().unwrap();
        for name in ["b.csv", "a.xlsx", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        let files = discover_files(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|(_, name)| name.as_str()).collect();
        assert_eq!(names, vec!["a.xlsx", "b.csv"]);
    }

    #[test]
    fn single_file_is_its_own_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("judges.csv");
        std::fs::write(&path, "").unwrap();
        let files = discover_files(&path).unwrap();
        assert_eq!(files, vec![(path, "judges.csv".to_string())]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(discover_files(&dir.path().join("missing")).is_err());
    }
}
