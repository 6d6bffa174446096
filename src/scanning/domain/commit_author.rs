/// Version-control attribution for a single line of a file.
///
/// Every field is empty when the history is unavailable (untracked file,
/// uncommitted line, attribution disabled).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitAuthor {
    pub author: String,
    pub email: String,
    pub commit_hash: String,
    pub date: String,
    pub message: String,
}

impl CommitAuthor {
    pub fn is_empty(&self) -> bool {
        self.author.is_empty()
            && self.email.is_empty()
            && self.commit_hash.is_empty()
            && self.date.is_empty()
            && self.message.is_empty()
    }
}
