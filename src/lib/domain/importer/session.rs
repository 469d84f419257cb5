use crate::domain::errors::ImportResult;
use crate::domain::importer::devpost::import_devpost_csv;
use crate::domain::importer::projects::import_project_csv;
use crate::domain::importer::{LocalityRegistry, LocalityScope, ProjectImport, parse_judge_csv};
use crate::domain::models::Judge;
use crate::outbound::store::OptionsStore;
use tracing::debug;

/// Owns the options store and the locality registry shared by imports.
///
/// Imports take `&mut self`, so within one process a session runs a single
/// import at a time. Imports racing from other processes against the same
/// store are caught by its compare-and-swap and fail with a conflict.
#[derive(Debug)]
pub struct ImportSession<S> {
    store: S,
    localities: LocalityRegistry,
    scope: LocalityScope,
}

impl<S: OptionsStore> ImportSession<S> {
    pub fn new(store: S, scope: LocalityScope) -> Self {
        Self {
            store,
            localities: LocalityRegistry::new(),
            scope,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn localities(&self) -> &LocalityRegistry {
        &self.localities
    }

    pub fn reset_localities(&mut self) {
        debug!("Clearing {} recorded locality value(s)", self.localities.len());
        self.localities.clear();
    }

    pub fn import_judges(&mut self, content: &str, has_header: bool) -> ImportResult<Vec<Judge>> {
        parse_judge_csv(content, has_header)
    }

    pub fn import_projects(&mut self, content: &str, has_header: bool) -> ImportResult<ProjectImport> {
        self.run_project_import(|store, localities| {
            import_project_csv(content, has_header, store, localities)
        })
    }

    pub fn import_devpost(&mut self, content: &str) -> ImportResult<ProjectImport> {
        self.run_project_import(|store, localities| import_devpost_csv(content, store, localities))
    }

    // Under `LocalityScope::Import` the registry is swapped for the import's
    // own only once it committed; a failed import leaves it as it was.
    fn run_project_import<F>(&mut self, import: F) -> ImportResult<ProjectImport>
    where
        F: FnOnce(&S, &mut LocalityRegistry) -> ImportResult<ProjectImport>,
    {
        match self.scope {
            LocalityScope::Process => import(&self.store, &mut self.localities),
            LocalityScope::Import => {
                let mut fresh = LocalityRegistry::new();
                let committed = import(&self.store, &mut fresh)?;
                debug!(
                    "Replacing {} recorded locality value(s) with {} from this import",
                    self.localities.len(),
                    fresh.len()
                );
                self.localities = fresh;
                Ok(committed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ImportError;
    use crate::outbound::store::MemoryOptionsStore;

    #[test]
    fn process_scope_accumulates_across_imports() {
        let mut session = ImportSession::new(MemoryOptionsStore::new(0), LocalityScope::Process);
        session.import_projects("a,d,u,,,2\n", false).unwrap();
        let import = session.import_projects("b,d,u,,,1\n", false).unwrap();
        assert_eq!(session.localities().values(), &[2, 1]);
        assert_eq!(import.projects[0].location, 3);
        assert_eq!(import.localities_added, 1);
        assert_eq!(session.store().get_options().unwrap().next_table_num, 4);
    }

    #[test]
    fn import_scope_keeps_only_the_latest_import() {
        let mut session = ImportSession::new(MemoryOptionsStore::new(0), LocalityScope::Import);
        session.import_projects("a,d,u,,,2\n", false).unwrap();
        let import = session.import_projects("b,d,u,,,1\nc,d,u,,,8\n", false).unwrap();
        assert_eq!(import.localities_added, 2);
        assert_eq!(session.localities().values(), &[1, 8]);
        session.reset_localities();
        assert!(session.localities().is_empty());
    }

    #[test]
    fn import_scope_failure_keeps_previous_registry() {
        let mut session = ImportSession::new(MemoryOptionsStore::new(0), LocalityScope::Import);
        session.import_projects("a,d,u,,,2\n", false).unwrap();
        let err = session.import_projects("b,d,u,,,x\n", false).unwrap_err();
        assert!(matches!(err, ImportError::Format { .. }));
        assert_eq!(session.localities().values(), &[2]);

        let devpost = "Title,Url,Status,J,H,C,About,Try,Video,Locality,Prizes,Built,Notes\n\
                       a,u,Submitted,,,,about,,,oops,,,\n";
        assert!(session.import_devpost(devpost).is_err());
        assert_eq!(session.localities().values(), &[2]);
    }

    #[test]
    fn judges_never_touch_the_store() {
        let mut session = ImportSession::new(MemoryOptionsStore::new(5), LocalityScope::Process);
        let judges = session
            .import_judges("Name,Email,Notes\nAda,ada@example.com,\n", true)
            .unwrap();
        assert_eq!(judges.len(), 1);
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn failed_import_keeps_committed_state() {
        let mut session = ImportSession::new(MemoryOptionsStore::new(0), LocalityScope::Process);
        session.import_projects("a,d,u,,,4\n", false).unwrap();
        let err = session
            .import_projects("b,d,u,,,6\nc,d,u,,,six\n", false)
            .unwrap_err();
        assert!(matches!(err, ImportError::Format { .. }));
        assert_eq!(session.localities().values(), &[4]);
        assert_eq!(session.store().get_options().unwrap().next_table_num, 5);
    }
}
