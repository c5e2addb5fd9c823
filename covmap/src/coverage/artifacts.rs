use std::path::{Path, PathBuf};

pub const DEFAULT_CLASSES_DIRS: [&str; 4] = [
    "target/classes",
    "target/test-classes",
    "build/classes/java/main",
    "build/classes/java/test",
];

/// Maps class identifiers to compiled artifacts under the checkout.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    classes_dirs: Vec<PathBuf>,
}

impl ArtifactLocator {
    pub fn new(repo_root: &Path, classes_dirs: &[String]) -> Self {
        let classes_dirs = if classes_dirs.is_empty() {
            DEFAULT_CLASSES_DIRS.iter().map(|d| repo_root.join(d)).collect()
        } else {
            classes_dirs.iter().map(|d| repo_root.join(d)).collect()
        };
        Self { classes_dirs }
    }

    /// First existing `<dir>/a/b/C.class` for `a.b.C`, else the first
    /// candidate so analysis can report it as missing.
    pub fn locate(&self, class_id: &str) -> PathBuf {
        let relative = format!("{}.class", class_id.replace('.', "/"));
        let candidates = self
            .classes_dirs
            .iter()
            .map(|dir| dir.join(&relative))
            .collect::<Vec<_>>();
        candidates
            .iter()
            .find(|p| p.is_file())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(relative))
    }
}
