pub mod errors;
pub mod export;
pub mod importer;
pub mod models;
