use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use super::{ArtifactLocator, CoverageBuilder, CoverageEntry, CoverageToolkit, location};
use crate::error::CovmapError;
use crate::git::WorkingTree;
use crate::jacoco::ExecutionRecord;
use crate::jacoco::exec::append_exec_file;

pub const EXEC_EXTENSION: &str = "exec";

/// Produces one coverage entry per test, strictly one test at a time: the
/// working tree is shared and reset before every test.
pub struct CoverageRecorder<'a, T: CoverageToolkit, W: WorkingTree> {
    toolkit: &'a mut T,
    tree: &'a W,
    locator: ArtifactLocator,
    exec_data_dir: PathBuf,
}

impl<'a, T: CoverageToolkit, W: WorkingTree> CoverageRecorder<'a, T, W> {
    pub fn new(
        toolkit: &'a mut T,
        tree: &'a W,
        locator: ArtifactLocator,
        exec_data_dir: &Path,
    ) -> Self {
        Self {
            toolkit,
            tree,
            locator,
            exec_data_dir: exec_data_dir.to_path_buf(),
        }
    }

    pub fn exec_file_path(&self, test_id: &str) -> PathBuf {
        self.exec_data_dir.join(format!("{test_id}.{EXEC_EXTENSION}"))
    }

    pub fn record_all(
        &mut self,
        class_ids: &[String],
        test_ids: &[String],
    ) -> Result<Vec<CoverageEntry>, CovmapError> {
        std::fs::create_dir_all(&self.exec_data_dir)
            .map_err(|e| CovmapError::io(&self.exec_data_dir, e))?;
        let total = test_ids.len();
        let mut entries: Vec<CoverageEntry> = Vec::with_capacity(total);
        for (index, test_id) in test_ids.iter().enumerate() {
            tracing::info!(test = %test_id, "[{}/{total}] recording coverage", index + 1);
            entries.push(self.record_test(class_ids, test_id)?);
        }
        Ok(entries)
    }

    pub fn record_test(
        &mut self,
        class_ids: &[String],
        test_id: &str,
    ) -> Result<CoverageEntry, CovmapError> {
        self.tree.reset_to_baseline()?;
        let record = self.toolkit.record_execution(test_id)?;

        let mut builder = CoverageBuilder::default();
        let mut covered: IndexSet<String> = IndexSet::new();
        for class_id in class_ids {
            let artifact = self.locator.locate(class_id);
            match self.toolkit.analyze(&artifact) {
                Ok(infos) => infos.into_iter().for_each(|info| builder.add(info)),
                Err(err) if err.is_recoverable_per_class() => {
                    tracing::warn!(class = %class_id, "{err}");
                }
                Err(err) => return Err(err),
            }
            collect_covered_lines(&builder, &record, class_id, &mut covered);
        }

        let entry = CoverageEntry {
            test: test_id.to_string(),
            locations: covered.into_iter().collect(),
        };
        append_exec_file(&self.exec_file_path(test_id), &record)?;
        Ok(entry)
    }
}

fn collect_covered_lines(
    builder: &CoverageBuilder,
    record: &ExecutionRecord,
    class_id: &str,
    covered: &mut IndexSet<String>,
) {
    builder
        .classes()
        .filter(|class| class.name == class_id)
        .filter(|class| record.has_recorded_execution(class.id))
        .filter_map(|class| class.line_range().map(|range| (class, range)))
        .for_each(|(class, range)| {
            covered.extend(range.map(|line| location(&class.name, line)));
        });
}
