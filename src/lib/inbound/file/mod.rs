pub mod csv;
pub mod excel;

pub use self::csv::Csv;
pub use excel::Excel;
use std::ffi::OsStr;
use std::path::Path;

pub struct Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl Reader {
    pub fn format_of(path: &Path) -> Option<FileFormat> {
        let ext = path.extension().and_then(OsStr::to_str)?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" | "xls" => Some(FileFormat::Excel),
            _ => None,
        }
    }

    /// Loads a spreadsheet as delimited text, whatever format it came in.
    pub fn read_as_csv_text(path: &Path) -> anyhow::Result<String> {
        match Self::format_of(path) {
            Some(FileFormat::Csv) => <Self as Csv>::read_csv_text(path),
            Some(FileFormat::Excel) => <Self as Excel>::excel_to_csv_text(path),
            None => anyhow::bail!("unsupported file type: {:?}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Reader::format_of(Path::new("judges.CSV")), Some(FileFormat::Csv));
        assert_eq!(Reader::format_of(Path::new("devpost.xlsx")), Some(FileFormat::Excel));
        assert_eq!(Reader::format_of(Path::new("old.xls")), Some(FileFormat::Excel));
        assert_eq!(Reader::format_of(Path::new("notes.txt")), None);
        assert_eq!(Reader::format_of(Path::new("no_extension")), None);
    }

    #[test]
    fn unsupported_files_are_rejected() {
        assert!(Reader::read_as_csv_text(Path::new("notes.txt")).is_err());
    }
}
