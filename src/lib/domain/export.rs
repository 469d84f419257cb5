use crate::domain::models::{Judge, Project};
use csv::Writer;
use tracing::error;

pub const JUDGE_CSV_HEADERS: [&str; 10] = [
    "Name",
    "Email",
    "Notes",
    "Code",
    "Active",
    "ReadWelcome",
    "Notes",
    "Alpha",
    "Beta",
    "LastActivity",
];

pub const PROJECT_CSV_HEADERS: [&str; 11] = [
    "Name",
    "Table",
    "Description",
    "URL",
    "TryLink",
    "VideoLink",
    "ChallengeList",
    "Mu",
    "SigmaSq",
    "Active",
    "LastActivity",
];

/// Column layout accepted by the generic project importer.
pub const PROJECT_IMPORT_CSV_HEADERS: [&str; 7] = [
    "Name",
    "Description",
    "URL",
    "TryLink",
    "VideoLink",
    "Locality",
    "ChallengeList",
];

pub fn create_judge_csv(judges: &[Judge]) -> Vec<u8> {
    let rows = judges.iter().map(|judge| {
        vec![
            judge.name.clone(),
            judge.email.clone(),
            judge.notes.clone(),
            judge.code.clone(),
            judge.active.to_string(),
            judge.read_welcome.to_string(),
            judge.notes.clone(),
            format_float(judge.alpha),
            format_float(judge.beta),
            judge.last_activity.to_string(),
        ]
    });
    write_csv(&JUDGE_CSV_HEADERS, rows)
}

pub fn create_project_csv(projects: &[Project]) -> Vec<u8> {
    let rows = projects.iter().map(|project| {
        vec![
            project.name.clone(),
            format!("Table {}", project.location),
            project.description.clone(),
            project.url.clone(),
            project.try_link.clone(),
            project.video_link.clone(),
            project.challenge_list.join(","),
            format_float(project.mu),
            format_float(project.sigma_sq),
            project.active.to_string(),
            project.last_activity.to_string(),
        ]
    });
    write_csv(&PROJECT_CSV_HEADERS, rows)
}

/// Writes projects in the generic import layout so they can be imported
/// again, e.g. into another event.
pub fn create_project_import_csv(projects: &[Project]) -> Vec<u8> {
    let rows = projects.iter().map(|project| {
        vec![
            project.name.clone(),
            project.description.clone(),
            project.url.clone(),
            project.try_link.clone(),
            project.video_link.clone(),
            project.locality.to_string(),
            project.challenge_list.join(","),
        ]
    });
    write_csv(&PROJECT_IMPORT_CSV_HEADERS, rows)
}

fn format_float(value: f64) -> String {
    format!("{:.6}", value)
}

fn write_csv<I>(headers: &[&str], rows: I) -> Vec<u8>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut wtr = Writer::from_writer(Vec::new());
    if let Err(e) = wtr.write_record(headers) {
        error!("Failed to write CSV header: {}", e);
    }
    for row in rows {
        if let Err(e) = wtr.write_record(&row) {
            error!("Failed to write CSV row: {}", e);
        }
    }
    match wtr.into_inner() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to flush CSV export: {}", e);
            Vec::new()
        }
    }
}
