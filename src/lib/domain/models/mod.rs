pub mod judge;
pub mod options;
pub mod project;

pub use judge::Judge;
pub use options::Options;
pub use project::Project;
