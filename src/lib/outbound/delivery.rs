use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Destination for exported bytes, e.g. an HTTP response or a directory.
pub trait CsvSink {
    fn deliver(&mut self, file_name: &str, content_type: &str, content: &[u8])
    -> anyhow::Result<()>;
}

/// Hands `content` to `sink` as the download `<name>.csv`.
pub fn add_csv_data<S: CsvSink + ?Sized>(
    name: &str,
    content: &[u8],
    sink: &mut S,
) -> anyhow::Result<()> {
    let file_name = format!("{}.csv", name);
    sink.deliver(&file_name, CSV_CONTENT_TYPE, content)
}

#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CsvSink for DirectorySink {
    fn deliver(
        &mut self,
        file_name: &str,
        _content_type: &str,
        content: &[u8],
    ) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory: {:?}", self.dir))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write export file: {:?}", path))?;
        info!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }
}
