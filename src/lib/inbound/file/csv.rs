use crate::inbound::file::Reader;
use anyhow::Context;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

pub trait Csv {
    fn read_csv_text(path: &Path) -> anyhow::Result<String>;
}

impl Csv for Reader {
    fn read_csv_text(path: &Path) -> anyhow::Result<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown file");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read csv file: {}", file_name))?;
        // Spreadsheet tools like to prefix CSV exports with a byte order mark.
        match content.strip_prefix(UTF8_BOM) {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(content),
        }
    }
}
