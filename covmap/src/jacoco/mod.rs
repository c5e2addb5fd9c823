//! JaCoCo-compatible analysis and execution data.

pub mod class_file;
pub mod crc64;
mod cursor;
pub mod exec;
pub mod runner;

#[cfg(test)]
mod exec_test;
#[cfg(test)]
mod runner_test;
#[cfg(test)]
pub(crate) mod test_helpers;

use std::path::{Path, PathBuf};

pub use exec::{ExecutionData, ExecutionDataStore, ExecutionRecord, SessionInfo};
pub use runner::TestCommand;

use crate::coverage::{ClassCoverageInfo, CoverageToolkit};
use crate::error::CovmapError;

/// Whether a test is executed before its coverage is collected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Nothing is executed; the accumulator for each test starts and stays
    /// empty, so every class reads as not executed.
    #[default]
    Inspect,
    /// Run the test through a shell command that leaves a JaCoCo dump behind.
    RunTests(TestCommand),
}

#[derive(Debug)]
pub struct JacocoToolkit {
    repo_root: PathBuf,
    mode: ExecutionMode,
}

impl JacocoToolkit {
    pub fn new(repo_root: &Path, mode: ExecutionMode) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            mode,
        }
    }
}

impl CoverageToolkit for JacocoToolkit {
    fn record_execution(&mut self, test_id: &str) -> Result<ExecutionRecord, CovmapError> {
        match &self.mode {
            ExecutionMode::Inspect => Ok(ExecutionRecord::default()),
            ExecutionMode::RunTests(command) => command.run(&self.repo_root, test_id),
        }
    }

    fn analyze(&self, artifact: &Path) -> Result<Vec<ClassCoverageInfo>, CovmapError> {
        analyze_class_file(artifact)
    }
}

/// Analyze one artifact. Files that are not class files contribute nothing.
pub fn analyze_class_file(path: &Path) -> Result<Vec<ClassCoverageInfo>, CovmapError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CovmapError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(CovmapError::io(path, err)),
    };
    if !class_file::is_class_file(&bytes) {
        return Ok(vec![]);
    }
    let parsed = class_file::parse_class(&bytes).map_err(|message| CovmapError::ClassFormat {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(vec![ClassCoverageInfo {
        name: parsed.internal_name.replace('/', "."),
        id: crc64::class_id(&bytes),
        first_line: parsed.first_line,
        last_line: parsed.last_line,
    }])
}
