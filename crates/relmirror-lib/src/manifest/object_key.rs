use std::fmt;

/// Remote storage key of one repository object, e.g. `repo/org/foo/1.0/foo-1.0.jar`.
///
/// Always starts with [`ObjectKey::PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey<'a>(&'a str);

impl<'a> ObjectKey<'a> {
    pub const PREFIX: &'static str = "repo/";

    /// Extracts the key from a listing line.
    ///
    /// The key starts at the first `repo/` in the line and runs to the end of
    /// the line, so leading listing metadata (date, time, size) is dropped.
    pub fn find_in(line: &'a str) -> Option<Self> {
        line.find(Self::PREFIX).map(|start| Self(&line[start..]))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Directory markers end with a separator and have no content to download.
    pub fn is_directory(&self) -> bool {
        self.0.ends_with('/')
    }

    /// The key without its leading `repo` segment, starting at the separator.
    pub fn relative_path(&self) -> &'a str {
        // The prefix is ASCII, so this is always a char boundary.
        &self.0[Self::PREFIX.len() - 1..]
    }
}

impl fmt::Display for ObjectKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
