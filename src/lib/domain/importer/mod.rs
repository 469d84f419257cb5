pub mod devpost;
pub mod judges;
pub mod locality;
pub mod processor;
pub mod projects;
pub mod records;
pub mod session;
pub mod setup;
pub mod summary;
pub mod table;

pub use devpost::parse_devpost_csv;
pub use judges::parse_judge_csv;
pub use locality::{BatchLocalities, LocalityRegistry, LocalityScope, StickyLocality};
pub use processor::{ImportKind, ProcessingStats, process_file};
pub use projects::{ProjectImport, parse_project_csv};
pub use records::parse_records;
pub use session::ImportSession;
pub use setup::{SetupResult, setup};
pub use summary::{ImportSummary, log_summary};
pub use table::TableCounter;
