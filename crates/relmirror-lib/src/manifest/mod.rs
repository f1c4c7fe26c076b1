mod object_key;

pub use object_key::ObjectKey;

use crate::error::RelMirrorError;
use std::path::Path;

/// A remote object listing, typically the output of
/// `aws s3 ls s3://<bucket> --recursive`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    content: String,
}

impl Manifest {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Reads a listing from disk.
    ///
    /// Only I/O failures are fatal. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD so the remaining lines can still be mirrored.
    pub fn load_from_file(path: &Path) -> Result<Self, RelMirrorError> {
        let bytes = std::fs::read(path).map_err(|e| RelMirrorError::ManifestLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    "Manifest is not valid UTF-8 after byte {}, undecodable bytes are replaced",
                    err.utf8_error().valid_up_to()
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        Ok(Self { content })
    }

    /// Listing lines in order, with `\n` / `\r\n` terminators removed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_strip_terminators() {
        let manifest = Manifest::from_text("a repo/x.jar\r\nb repo/y.jar\nPRE z/\n");

        assert_eq!(
            manifest.lines().collect::<Vec<_>>(),
            vec!["a repo/x.jar", "b repo/y.jar", "PRE z/"]
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("filelist.txt");
        std::fs::write(&path, "2023-01-01 12:00:00 1 repo/a.jar\n").unwrap();

        let manifest = Manifest::load_from_file(&path).unwrap();

        assert_eq!(
            manifest.lines().collect::<Vec<_>>(),
            vec!["2023-01-01 12:00:00 1 repo/a.jar"]
        );
    }

    #[test]
    fn test_invalid_utf8_only_affects_its_line() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("filelist.txt");
        std::fs::write(
            &path,
            b"2023 1 repo/a.jar\n2023 1 repo/caf\xe9.jar\n2023 1 repo/b.jar\n",
        )
        .unwrap();

        let manifest = Manifest::load_from_file(&path).unwrap();

        assert_eq!(
            manifest.lines().collect::<Vec<_>>(),
            vec![
                "2023 1 repo/a.jar",
                "2023 1 repo/caf\u{FFFD}.jar",
                "2023 1 repo/b.jar",
            ]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let result = Manifest::load_from_file(&path);

        assert!(
            matches!(result, Err(RelMirrorError::ManifestLoad { path: ref p, .. }) if *p == path),
            "Expected ManifestLoad error, got {:?}",
            result
        );
    }
}
