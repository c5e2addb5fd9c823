use std::time::Duration;

use crate::run::{step_label, step_line};

#[test]
fn six_steps_are_labelled_in_order() {
    let labels = (1..=6).map(step_label).collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec![
            "Get class names",
            "Get test method names",
            "Count main method names",
            "Analyze test coverage",
            "Create JSON result",
            "save the JSON result to a file",
        ]
    );
    assert_eq!(step_label(0), "");
    assert_eq!(step_label(7), "");
}

#[test]
fn step_line_reports_whole_milliseconds() {
    assert_eq!(
        step_line(1, Duration::from_micros(12_900)),
        "Step 1 (Get class names) Execution Time: 12 ms"
    );
    assert_eq!(
        step_line(6, Duration::ZERO),
        "Step 6 (save the JSON result to a file) Execution Time: 0 ms"
    );
}
