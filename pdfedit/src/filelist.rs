//! Ordered, duplicate-free list of merge inputs.

use std::path::{Path, PathBuf};

/// Input files for a merge, in the order they were added.
///
/// Adding a path that is already present is a no-op; [`FileList::add`]
/// reports it so the caller can warn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    files: Vec<PathBuf>,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path. Returns `false` if it was already listed.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.files.push(path);
        true
    }

    /// Append several paths, returning the ones rejected as duplicates.
    pub fn extend<I>(&mut self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let mut rejected = Vec::new();
        for path in paths {
            let path = path.into();
            if !self.add(path.clone()) {
                rejected.push(path);
            }
        }
        rejected
    }

    /// Remove every path.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Whether `path` is listed.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p == path)
    }

    /// Number of listed paths.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The listed paths, in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// File names without directories, for compact display.
    pub fn display_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| {
                p.file_name()
                    .unwrap_or(p.as_os_str())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl AsRef<[PathBuf]> for FileList {
    fn as_ref(&self) -> &[PathBuf] {
        self.paths()
    }
}
