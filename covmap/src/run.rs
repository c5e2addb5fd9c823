use std::time::{Duration, Instant};

use crate::args::AnalysisOptions;
use crate::coverage::{ArtifactLocator, CoverageRecorder, CoverageToolkit};
use crate::error::CovmapError;
use crate::extract::{list_main_methods, list_test_methods};
use crate::git::{GitCheckout, WorkingTree, acquire_checkout};
use crate::jacoco::JacocoToolkit;
use crate::project::scan::list_class_identifiers;
use crate::report::{CoverageReport, SourceInventory, aggregate, to_json, write_report};

pub const STEP_LABELS: [&str; 6] = [
    "Get class names",
    "Get test method names",
    "Count main method names",
    "Analyze test coverage",
    "Create JSON result",
    "save the JSON result to a file",
];

/// Label of 1-based `step`; empty outside the six known steps.
pub fn step_label(step: usize) -> &'static str {
    step.checked_sub(1)
        .and_then(|index| STEP_LABELS.get(index))
        .copied()
        .unwrap_or("")
}

pub fn step_line(step: usize, elapsed: Duration) -> String {
    format!(
        "Step {step} ({}) Execution Time: {} ms",
        step_label(step),
        elapsed.as_millis()
    )
}

/// Runs `f` and prints its wall time as a [`step_line`].
pub fn timed_step<T>(step: usize, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let out = f();
    println!("{}", step_line(step, started.elapsed()));
    out
}

/// Steps 1 to 3: the source inventory of a checkout.
pub fn inventory_checkout(root: &std::path::Path) -> Result<SourceInventory, CovmapError> {
    let classes = timed_step(1, || list_class_identifiers(root))?;
    let test_methods = timed_step(2, || list_test_methods(root))?;
    let methods = timed_step(3, || list_main_methods(root))?;
    Ok(SourceInventory {
        classes,
        test_methods,
        methods,
    })
}

/// Steps 1 to 4 over an already acquired working tree.
pub fn analyze_working_tree<T: CoverageToolkit, W: WorkingTree>(
    tree: &W,
    toolkit: &mut T,
    opts: &AnalysisOptions,
) -> Result<CoverageReport, CovmapError> {
    let root = tree.root().to_path_buf();
    let inventory = inventory_checkout(&root)?;
    tracing::info!(
        classes = inventory.classes.len(),
        tests = inventory.test_methods.len(),
        methods = inventory.methods.len(),
        "inventoried sources"
    );

    let locator = ArtifactLocator::new(&root, &opts.classes_dirs);
    let entries = timed_step(4, || {
        CoverageRecorder::new(toolkit, tree, locator, &opts.exec_data_dir)
            .record_all(&inventory.classes, &inventory.test_methods)
    })?;

    let location = dunce::canonicalize(&root)
        .map_err(|e| CovmapError::io(&root, e))?
        .to_string_lossy()
        .to_string();
    Ok(aggregate(&location, &inventory, entries))
}

/// The whole run: acquire, analyze, then print and save the report.
pub fn run_analysis(opts: &AnalysisOptions) -> Result<CoverageReport, CovmapError> {
    let acquired = acquire_checkout(&opts.source, &opts.workspace_dir)?;
    if acquired.cloned {
        let abs = dunce::canonicalize(&acquired.dir).unwrap_or_else(|_| acquired.dir.clone());
        println!("Repository cloned from {} to {}", opts.source, abs.display());
    }

    let tree = GitCheckout::open(&acquired.dir, opts.baseline_ref.as_deref())?;
    tracing::debug!(root = %tree.root().display(), baseline = tree.baseline(), "opened checkout");
    let mut toolkit = JacocoToolkit::new(tree.root(), opts.execution.clone());
    let report = analyze_working_tree(&tree, &mut toolkit, opts)?;

    let json = timed_step(5, || -> Result<String, CovmapError> {
        let json = to_json(&report)?;
        println!("{json}");
        Ok(json)
    })?;
    timed_step(6, || write_report(&opts.report_path, &json))?;
    Ok(report)
}
