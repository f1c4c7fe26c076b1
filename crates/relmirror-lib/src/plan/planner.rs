use super::types::PlanEntry;
use crate::manifest::ObjectKey;
use std::path::{Path, PathBuf};

/// Decides, line by line, which manifest objects are missing under a local root.
#[derive(Debug, Clone)]
pub struct SyncPlanner {
    local_root: String,
    remote_base_url: String,
}

impl SyncPlanner {
    pub fn new(local_root: impl Into<String>, remote_base_url: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            remote_base_url: remote_base_url.into(),
        }
    }

    /// Plans against the local filesystem.
    pub fn plan<I>(&self, lines: I) -> impl Iterator<Item = PlanEntry>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.plan_with(lines, |path| path.exists())
    }

    /// Plans using `exists` to decide whether a local path is already present.
    ///
    /// Entries are produced lazily and in manifest order. Directory markers
    /// produce no entry. `exists` is only consulted for object keys.
    pub fn plan_with<I, P>(&self, lines: I, mut exists: P) -> impl Iterator<Item = PlanEntry>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        P: FnMut(&Path) -> bool,
    {
        lines
            .into_iter()
            .filter_map(move |line| self.plan_line(line.as_ref(), &mut exists))
    }

    fn plan_line<P>(&self, line: &str, exists: &mut P) -> Option<PlanEntry>
    where
        P: FnMut(&Path) -> bool,
    {
        let Some(key) = ObjectKey::find_in(line) else {
            return Some(PlanEntry::Ignored {
                raw_line: line.to_string(),
            });
        };

        if key.is_directory() {
            tracing::trace!(key = %key, "Skipping directory marker");
            return None;
        }

        let local_path = self.local_path_for(key);
        if exists(&local_path) {
            Some(PlanEntry::AlreadyPresent { local_path })
        } else {
            Some(PlanEntry::Fetch {
                remote_url: self.remote_url_for(key),
                local_path,
            })
        }
    }

    /// Local root and key are concatenated verbatim, without separator normalization.
    pub fn local_path_for(&self, key: ObjectKey<'_>) -> PathBuf {
        PathBuf::from(format!("{}{}", self.local_root, key.relative_path()))
    }

    pub fn remote_url_for(&self, key: ObjectKey<'_>) -> String {
        format!("{}{}", self.remote_base_url, key)
    }
}
