use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::coverage::CoverageEntry;
use crate::error::CovmapError;

/// Scanner and extractor output for one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInventory {
    pub classes: Vec<String>,
    pub test_methods: Vec<String>,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub num_java_files: usize,
    pub num_classes: usize,
    pub num_methods: usize,
    pub num_test_methods: usize,
}

impl RepositoryStats {
    pub fn from_inventory(inventory: &SourceInventory) -> Self {
        Self {
            num_java_files: inventory.classes.len(),
            num_classes: inventory.classes.len(),
            num_methods: inventory.methods.len(),
            num_test_methods: inventory.test_methods.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub location: String,
    pub stat_of_repository: RepositoryStats,
    pub test_coverage_against_methods: IndexMap<String, Vec<String>>,
}

/// Later entries for the same test replace earlier ones.
pub fn aggregate(
    location: &str,
    inventory: &SourceInventory,
    entries: impl IntoIterator<Item = CoverageEntry>,
) -> CoverageReport {
    let mut mapping: IndexMap<String, Vec<String>> = IndexMap::new();
    for entry in entries {
        mapping.insert(entry.test, entry.locations);
    }
    CoverageReport {
        location: location.to_string(),
        stat_of_repository: RepositoryStats::from_inventory(inventory),
        test_coverage_against_methods: mapping,
    }
}

pub fn to_json(report: &CoverageReport) -> Result<String, CovmapError> {
    Ok(serde_json::to_string(report)?)
}

/// Writes through a sibling temp file so a failed write never leaves a
/// truncated report at `path`.
pub fn write_report(path: &Path, json: &str) -> Result<(), CovmapError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| CovmapError::io(&dir, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| CovmapError::io(&dir, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| CovmapError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| CovmapError::io(path, e.error))?;
    Ok(())
}
