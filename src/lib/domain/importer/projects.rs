use crate::domain::errors::{ImportError, ImportResult};
use crate::domain::importer::locality::{BatchLocalities, LocalityRegistry, StickyLocality};
use crate::domain::importer::records::parse_records;
use crate::domain::importer::table::TableCounter;
use crate::domain::models::Project;
use crate::outbound::store::OptionsStore;
use tracing::{debug, info};

const NAME: usize = 0;
const DESCRIPTION: usize = 1;
const URL: usize = 2;
const TRY_LINK: usize = 3;
const VIDEO_LINK: usize = 4;
const LOCALITY: usize = 5;
const CHALLENGES: usize = 6;
const MIN_FIELDS: usize = 4;

/// Projects from one committed import and the number of locality values it
/// appended to the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectImport {
    pub projects: Vec<Project>,
    pub localities_added: usize,
}

/// Reads `name,description,url[,try link,video link,locality,challenges]`
/// rows into projects, assigning table numbers from the stored counter.
pub fn parse_project_csv<S: OptionsStore + ?Sized>(
    content: &str,
    has_header: bool,
    store: &S,
    localities: &mut LocalityRegistry,
) -> ImportResult<Vec<Project>> {
    import_project_csv(content, has_header, store, localities).map(|import| import.projects)
}

pub(crate) fn import_project_csv<S: OptionsStore + ?Sized>(
    content: &str,
    has_header: bool,
    store: &S,
    localities: &mut LocalityRegistry,
) -> ImportResult<ProjectImport> {
    if content.is_empty() {
        return Ok(ProjectImport::default());
    }
    let records = parse_records(content, has_header)?;
    let mut sticky = StickyLocality::new();
    let mut batch = BatchLocalities::appending();

    let projects = assign_tables(&records, store, |record, counter| {
        if record.len() < MIN_FIELDS {
            return Err(ImportError::malformed(
                format!("at least {} fields", MIN_FIELDS),
                record,
            ));
        }
        if let Some(locality) = sticky.observe(field(record, LOCALITY))? {
            batch.record(locality);
        }
        let locality = sticky.current();
        let project = Project::new(
            &record[NAME],
            counter.assign(locality)?,
            &record[DESCRIPTION],
            &record[URL],
            field(record, TRY_LINK).unwrap_or_default(),
            field(record, VIDEO_LINK).unwrap_or_default(),
            locality,
            split_challenges(field(record, CHALLENGES).unwrap_or_default()),
        );
        Ok(Some(project))
    })?;

    let added = batch.commit(localities);
    info!(
        "Imported {} project(s) from CSV, {} locality value(s) recorded",
        projects.len(),
        added
    );
    Ok(ProjectImport {
        projects,
        localities_added: added,
    })
}

/// Runs `map_row` over every record with a counter seeded from the store and
/// commits the final counter once. Nothing is written if any row fails.
pub(crate) fn assign_tables<S, F>(
    records: &[Vec<String>],
    store: &S,
    mut map_row: F,
) -> ImportResult<Vec<Project>>
where
    S: OptionsStore + ?Sized,
    F: FnMut(&[String], &mut TableCounter) -> ImportResult<Option<Project>>,
{
    let options = store.get_options()?;
    let mut counter = TableCounter::new(options.next_table_num);
    let mut projects = Vec::with_capacity(records.len());
    for record in records {
        if let Some(project) = map_row(record, &mut counter)? {
            debug!(
                "Assigned table {} to project '{}' (locality {})",
                project.location, project.name, project.locality
            );
            projects.push(project);
        }
    }
    let committed = store.update_next_table_num(options.version, counter.next())?;
    debug!(
        "Next table number moved from {} to {}",
        options.next_table_num, committed.next_table_num
    );
    Ok(projects)
}

/// Field at `index` if the row has it and it is non-empty.
pub(crate) fn field(record: &[String], index: usize) -> Option<&str> {
    record
        .get(index)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

pub(crate) fn split_challenges(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(|c| c.trim().to_string()).collect()
}
