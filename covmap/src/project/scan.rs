use std::path::Path;

use path_slash::PathExt;

use super::{JAVA_EXTENSION, SourceRoot, list_java_files};
use crate::error::CovmapError;

/// Class identifiers for every source file under the test root, then the main
/// root. Duplicates across the two roots are kept.
pub fn list_class_identifiers(repo_root: &Path) -> Result<Vec<String>, CovmapError> {
    let mut out = class_identifiers_under(repo_root, SourceRoot::Test)?;
    out.extend(class_identifiers_under(repo_root, SourceRoot::Main)?);
    Ok(out)
}

pub fn class_identifiers_under(
    repo_root: &Path,
    root: SourceRoot,
) -> Result<Vec<String>, CovmapError> {
    let source_dir = root.dir(repo_root);
    Ok(list_java_files(&source_dir)?
        .iter()
        .filter_map(|file| class_identifier(&source_dir, file))
        .collect())
}

/// `src/main/java/a/b/C.java` relative to `src/main/java` becomes `a.b.C`.
pub fn class_identifier(source_dir: &Path, java_file: &Path) -> Option<String> {
    let rel = java_file.strip_prefix(source_dir).ok()?.to_slash_lossy();
    let no_ext = rel.strip_suffix(JAVA_EXTENSION).unwrap_or(&rel);
    Some(no_ext.replace('/', "."))
}
