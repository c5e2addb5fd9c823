use std::path::Path;

use super::runner::{TestCommand, split_test_id};

#[test]
fn split_test_id_takes_the_last_segment_as_method() {
    assert_eq!(split_test_id("com.x.FooTest.adds"), ("com.x.FooTest", "adds"));
    assert_eq!(split_test_id("FooTest.adds"), ("FooTest", "adds"));
    assert_eq!(split_test_id("adds"), ("", "adds"));
}

#[test]
fn expand_fills_every_placeholder() {
    let command = TestCommand::new("cd {root} && mvn -Dtest={class}#{method} -Dexec={exec} # {test}");
    let expanded = command.expand(
        "a.CalcTest.adds",
        Path::new("/tmp/d/jacoco.exec"),
        Path::new("/repo"),
    );
    assert_eq!(
        expanded,
        "cd /repo && mvn -Dtest=a.CalcTest#adds -Dexec=/tmp/d/jacoco.exec # a.CalcTest.adds"
    );
}

#[cfg(unix)]
#[test]
fn run_without_a_dump_yields_an_empty_record() {
    let root = tempfile::tempdir().unwrap();
    let record = TestCommand::new("exit 3").run(root.path(), "a.T.m").unwrap();
    assert!(record.store.is_empty());
    assert!(record.sessions.is_empty());
}
