use anyhow::Context;
use jury_csv::{
    config::Config,
    domain::importer::{
        ImportKind, ImportSummary, SetupResult, log_summary, process_file, setup,
        setup::setup_logging,
    },
    outbound::store::OptionsStore,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

const USAGE: &str = "usage: jury_csv <judges|projects|devpost> <file-or-directory> [--header]";

struct Args {
    kind: ImportKind,
    input_path: PathBuf,
    has_header: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut has_header = false;
    let mut positional = Vec::new();
    for arg in args {
        if arg == "--header" || arg == "-H" {
            has_header = true;
        } else if arg.starts_with('-') {
            anyhow::bail!("unknown option '{}'\n{}", arg, USAGE);
        } else {
            positional.push(arg);
        }
    }
    match positional.as_slice() {
        [kind, input] => Ok(Args {
            kind: kind.parse()?,
            input_path: PathBuf::from(input),
            has_header,
        }),
        _ => anyhow::bail!(USAGE),
    }
}

fn main() -> anyhow::Result<()> {
    let Args {
        kind,
        input_path,
        has_header,
    } = parse_args(std::env::args().skip(1))?;
    let config =
        Config::from_env().context("Failed to load configuration from environment variables")?;

    setup_logging(config.log_level)?;

    let SetupResult {
        mut session,
        mut sink,
        files_to_process,
    } = setup(&config, &input_path)?;

    if kind == ImportKind::Devpost && has_header {
        info!("Devpost exports always start with a header row; --header is implied");
    }
    info!(
        "Starting {} import of {} file(s)",
        kind.label(),
        files_to_process.len()
    );

    let mut total_imported = 0;
    let mut localities_added = 0;
    let mut failed_files: Vec<String> = Vec::new();
    let start_time = Instant::now();

    for (file_path, file_name) in &files_to_process {
        match process_file(file_path, file_name, kind, has_header, &mut session, &mut sink) {
            Ok(stats) => {
                total_imported += stats.imported;
                localities_added += stats.localities_added;
            }
            Err(e) => {
                error!("Failed to import {:?}: {:#}", file_name, e);
                failed_files.push(format!("{}: {:#}", file_name, e));
            }
        }
    }

    let next_table_num = match kind {
        ImportKind::Judges => None,
        ImportKind::Projects | ImportKind::Devpost => session
            .store()
            .get_options()
            .map(|options| options.next_table_num)
            .ok(),
    };

    log_summary(ImportSummary {
        kind: kind.label(),
        total_files: files_to_process.len(),
        total_imported,
        localities_added,
        next_table_num,
        failed_files,
        total_runtime_secs: start_time.elapsed().as_secs_f64(),
    });

    Ok(())
}
