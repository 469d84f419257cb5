use crate::domain::errors::{ImportError, ImportResult};
use crate::domain::importer::records::parse_records;
use crate::domain::models::Judge;
use tracing::{debug, info};

/// Reads `name,email,notes` rows into judges.
pub fn parse_judge_csv(content: &str, has_header: bool) -> ImportResult<Vec<Judge>> {
    let records = parse_records(content, has_header)?;
    let mut judges = Vec::with_capacity(records.len());
    for record in records {
        let [name, email, notes]: [String; 3] = record
            .try_into()
            .map_err(|record: Vec<String>| ImportError::malformed("exactly 3 fields", &record))?;
        debug!("Parsed judge '{}' <{}>", name, email);
        judges.push(Judge::new(name, email, notes));
    }
    if !judges.is_empty() {
        info!("Parsed {} judge(s) from CSV", judges.len());
    }
    Ok(judges)
}
