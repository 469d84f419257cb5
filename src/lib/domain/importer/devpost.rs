use crate::domain::errors::{ImportError, ImportResult};
use crate::domain::importer::locality::{BatchLocalities, LocalityRegistry, StickyLocality};
use crate::domain::importer::projects::{ProjectImport, assign_tables, field, split_challenges};
use crate::domain::importer::records::parse_records;
use crate::domain::models::Project;
use crate::outbound::store::OptionsStore;
use tracing::{debug, info};

// Columns of a Devpost submissions export. Everything else (judging status,
// highest step, created at, built with, notes, colleges, team size, custom
// questions) is ignored.
const TITLE: usize = 0;
const SUBMISSION_URL: usize = 1;
const STATUS: usize = 2;
const ABOUT: usize = 6;
const TRY_IT_OUT: usize = 7;
const VIDEO_DEMO: usize = 8;
const LOCALITY: usize = 9;
const OPT_IN_PRIZES: usize = 10;
const MIN_FIELDS: usize = 13;

const DRAFT_STATUS: &str = "Draft";

/// Reads a Devpost submissions export into projects. The first row is always
/// the header; draft submissions are dropped without using a table number.
pub fn parse_devpost_csv<S: OptionsStore + ?Sized>(
    content: &str,
    store: &S,
    localities: &mut LocalityRegistry,
) -> ImportResult<Vec<Project>> {
    import_devpost_csv(content, store, localities).map(|import| import.projects)
}

pub(crate) fn import_devpost_csv<S: OptionsStore + ?Sized>(
    content: &str,
    store: &S,
    localities: &mut LocalityRegistry,
) -> ImportResult<ProjectImport> {
    if content.is_empty() {
        return Ok(ProjectImport::default());
    }
    let records = parse_records(content, true)?;
    let mut sticky = StickyLocality::new();
    let mut batch = BatchLocalities::deduplicating();
    let mut drafts = 0;

    let projects = assign_tables(&records, store, |record, counter| {
        if record.len() < MIN_FIELDS {
            return Err(ImportError::malformed(
                format!("at least {} fields of a Devpost export", MIN_FIELDS),
                record,
            ));
        }
        if record[STATUS] == DRAFT_STATUS {
            debug!("Skipping draft submission '{}'", record[TITLE]);
            drafts += 1;
            return Ok(None);
        }
        let challenge_list = split_challenges(&record[OPT_IN_PRIZES]);
        if let Some(locality) = sticky.observe(field(record, LOCALITY))? {
            batch.record(locality);
        }
        let locality = sticky.current();
        Ok(Some(Project::new(
            &record[TITLE],
            counter.assign(locality)?,
            &record[ABOUT],
            &record[SUBMISSION_URL],
            &record[TRY_IT_OUT],
            &record[VIDEO_DEMO],
            locality,
            challenge_list,
        )))
    })?;

    let added = batch.commit(localities);
    info!(
        "Imported {} project(s) from Devpost export, skipped {} draft(s), {} new locality value(s)",
        projects.len(),
        drafts,
        added
    );
    Ok(ProjectImport {
        projects,
        localities_added: added,
    })
}
