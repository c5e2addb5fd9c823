pub mod artifacts;
pub mod model;
pub mod recorder;


use std::path::Path;

pub use artifacts::ArtifactLocator;
pub use model::{ClassCoverageInfo, CoverageBuilder, CoverageEntry, location};
pub use recorder::CoverageRecorder;

use crate::error::CovmapError;
use crate::jacoco::ExecutionRecord;

/// The instrumentation facility the recorder drives.
pub trait CoverageToolkit {
    /// A fresh accumulator holding whatever execution `test_id` produced.
    fn record_execution(&mut self, test_id: &str) -> Result<ExecutionRecord, CovmapError>;

    /// Structural coverage info for every class found in `artifact`.
    /// A missing artifact must be reported as
    /// [`CovmapError::ArtifactNotFound`].
    fn analyze(&self, artifact: &Path) -> Result<Vec<ClassCoverageInfo>, CovmapError>;
}
