pub mod scan;


use std::path::{Path, PathBuf};

use crate::error::CovmapError;

pub const JAVA_EXTENSION: &str = ".java";

/// Conventional Maven/Gradle source roots, relative to the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRoot {
    Test,
    Main,
}

impl SourceRoot {
    pub fn relative_dir(self) -> &'static str {
        match self {
            SourceRoot::Test => "src/test/java",
            SourceRoot::Main => "src/main/java",
        }
    }

    pub fn dir(self, repo_root: &Path) -> PathBuf {
        repo_root.join(self.relative_dir())
    }
}

/// Every `.java` file under `source_dir`, in traversal order. Files are visited
/// depth-first with siblings sorted by name so repeated scans agree.
///
/// A missing `source_dir` is not an error: the result is simply empty.
pub fn list_java_files(source_dir: &Path) -> Result<Vec<PathBuf>, CovmapError> {
    if !source_dir.is_dir() {
        return Ok(vec![]);
    }
    let mut out: Vec<PathBuf> = vec![];
    for entry in ignore::WalkBuilder::new(source_dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = entry.map_err(|err| CovmapError::Walk {
            root: source_dir.to_path_buf(),
            message: err.to_string(),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if entry.path().to_string_lossy().ends_with(JAVA_EXTENSION) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Simple class name of a source file: its file name without `.java`.
pub fn simple_class_name(java_file: &Path) -> String {
    let file_name = java_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    file_name
        .strip_suffix(JAVA_EXTENSION)
        .map(str::to_string)
        .unwrap_or(file_name)
}
