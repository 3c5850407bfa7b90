//! Extension keys for flat grouping.

use std::path::Path;

use compact_str::CompactString;

/// Longest extension (in characters) that still gets its own entry.
pub const MAX_EXTENSION_LEN: usize = 9;

/// Why a file was classified as "Other".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherReason {
    /// The file name contains no `.`.
    NoDot,
    /// The name ends with `.`.
    Empty,
    /// The extension is longer than [`MAX_EXTENSION_LEN`].
    TooLong,
}

/// Extension classification of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    Known(CompactString),
    Other(OtherReason),
}

impl Extension {
    /// Classify the file name of `path`.
    ///
    /// The name is split on `.` and the last piece is the extension, so
    /// `archive.tar.gz` yields `gz` and `.bashrc` yields `bashrc`.
    pub fn of(path: &Path) -> Self {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return Self::Other(OtherReason::NoDot),
        };

        match name.rsplit_once('.') {
            None => Self::Other(OtherReason::NoDot),
            Some((_, "")) => Self::Other(OtherReason::Empty),
            Some((_, ext)) if ext.chars().count() > MAX_EXTENSION_LEN => {
                Self::Other(OtherReason::TooLong)
            }
            Some((_, ext)) => Self::Known(CompactString::from(ext)),
        }
    }

    pub fn known(self) -> Option<CompactString> {
        match self {
            Self::Known(ext) => Some(ext),
            Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(path: &str) -> Extension {
        Extension::of(Path::new(path))
    }

    #[test]
    fn test_simple_extensions() {
        assert_eq!(ext("src/main.rs"), Extension::Known("rs".into()));
        assert_eq!(ext("/a/b/archive.tar.gz"), Extension::Known("gz".into()));
        assert_eq!(ext(".bashrc"), Extension::Known("bashrc".into()));
    }

    #[test]
    fn test_directory_dots_are_ignored() {
        assert_eq!(ext("./project.d/Makefile"), Extension::Other(OtherReason::NoDot));
        assert_eq!(ext("/etc/conf.d/README"), Extension::Other(OtherReason::NoDot));
    }

    #[test]
    fn test_other_classifications() {
        assert_eq!(ext("Makefile"), Extension::Other(OtherReason::NoDot));
        assert_eq!(ext("notes."), Extension::Other(OtherReason::Empty));
        assert_eq!(
            ext("archive.tar.gz.backuplongext"),
            Extension::Other(OtherReason::TooLong)
        );
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        assert_eq!(ext("f.ninechars"), Extension::Known("ninechars".into()));
        assert_eq!(ext("f.tencharsxx"), Extension::Other(OtherReason::TooLong));
        assert_eq!(ext("f.ééééééééé"), Extension::Known("ééééééééé".into()));
    }

    #[test]
    fn test_known() {
        assert_eq!(ext("a.go").known().as_deref(), Some("go"));
        assert_eq!(ext("Makefile").known(), None);
    }
}
