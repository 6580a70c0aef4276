/// Snapshot of the working tree, replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub is_repository: bool,
    pub branch: String,
    pub staged_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub untracked_files: Vec<String>,
    pub ahead: usize,
    pub behind: usize,
}

impl RepositoryStatus {
    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.modified_files.is_empty()
            && self.untracked_files.is_empty()
    }
}

/// Author identity applied to commits made by gitty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}
