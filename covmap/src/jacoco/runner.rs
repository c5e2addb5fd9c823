use std::path::Path;

use duct::cmd as duct_cmd;

use super::exec::{ExecutionRecord, read_exec_file};
use crate::error::CovmapError;

const EXEC_FILE_NAME: &str = "jacoco.exec";

/// Shell command template run once per test.
///
/// Placeholders: `{test}` (qualified test id), `{class}`, `{method}`,
/// `{exec}` (where the JaCoCo agent must dump), `{root}` (checkout root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    template: String,
}

impl TestCommand {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn expand(&self, test_id: &str, exec_path: &Path, repo_root: &Path) -> String {
        let (class, method) = split_test_id(test_id);
        self.template
            .replace("{test}", test_id)
            .replace("{class}", class)
            .replace("{method}", method)
            .replace("{exec}", &exec_path.to_string_lossy())
            .replace("{root}", &repo_root.to_string_lossy())
    }

    /// Runs the expanded command in `repo_root` and loads whatever dump it left.
    /// A failing test is not an error; a command that cannot start is.
    pub fn run(&self, repo_root: &Path, test_id: &str) -> Result<ExecutionRecord, CovmapError> {
        let dump_dir = tempfile::Builder::new()
            .prefix("covmap-exec-")
            .tempdir()
            .map_err(|e| CovmapError::io(std::env::temp_dir(), e))?;
        let exec_path = dump_dir.path().join(EXEC_FILE_NAME);
        let command = self.expand(test_id, &exec_path, repo_root);

        tracing::debug!(%command, "running test");
        let output = shell(&command)
            .dir(repo_root)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| CovmapError::TestCommand {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            tracing::warn!(
                test = test_id,
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "test command exited unsuccessfully"
            );
        }

        if !exec_path.exists() {
            tracing::warn!(test = test_id, exec = %exec_path.display(), "test command left no execution data");
            return Ok(ExecutionRecord::default());
        }
        read_exec_file(&exec_path)
    }
}

fn shell(raw: &str) -> duct::Expression {
    if cfg!(windows) {
        duct_cmd("cmd.exe", ["/d", "/s", "/c", raw])
    } else {
        duct_cmd("bash", ["-lc", raw])
    }
}

/// `com.x.FooTest.adds` splits into `com.x.FooTest` and `adds`.
pub fn split_test_id(test_id: &str) -> (&str, &str) {
    test_id.rsplit_once('.').unwrap_or(("", test_id))
}
