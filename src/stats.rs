use serde::{Deserialize, Serialize};

/// Counters of one project run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub replacements_made: usize,
    pub errors: usize,
    /// Local paths referenced by the mappings but absent from the static root.
    pub missing_files: Vec<String>,
    /// Local paths that received a placeholder during this run.
    pub copied_files: Vec<String>,
}

impl RunStats {
    pub fn record_modified(&mut self, replacements: usize) {
        self.files_modified += 1;
        self.replacements_made += replacements;
    }
}
