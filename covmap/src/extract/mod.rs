pub mod lines;


use std::path::Path;

pub use lines::{MethodRule, TEST_MARKER, scan_methods};

use crate::error::CovmapError;
use crate::project::{SourceRoot, list_java_files, simple_class_name};

/// Test methods declared under `src/test/java`.
pub fn list_test_methods(repo_root: &Path) -> Result<Vec<String>, CovmapError> {
    extract_methods(repo_root, SourceRoot::Test, MethodRule::TestMarked)
}

/// Every method-looking signature under `src/main/java`.
pub fn list_main_methods(repo_root: &Path) -> Result<Vec<String>, CovmapError> {
    extract_methods(repo_root, SourceRoot::Main, MethodRule::Signature)
}

pub fn extract_methods(
    repo_root: &Path,
    root: SourceRoot,
    rule: MethodRule,
) -> Result<Vec<String>, CovmapError> {
    let mut out: Vec<String> = vec![];
    for file in list_java_files(&root.dir(repo_root))? {
        let source = std::fs::read_to_string(&file).map_err(|e| CovmapError::io(&file, e))?;
        let found = scan_methods(&source, &simple_class_name(&file), rule);
        tracing::debug!(file = %file.display(), methods = found.len(), "scanned");
        out.extend(found);
    }
    Ok(out)
}
