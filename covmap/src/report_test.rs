use crate::coverage::CoverageEntry;
use crate::report::{CoverageReport, SourceInventory, aggregate, to_json, write_report};

fn entry(test: &str, locations: &[&str]) -> CoverageEntry {
    CoverageEntry {
        test: test.to_string(),
        locations: locations.iter().map(|s| s.to_string()).collect(),
    }
}

fn inventory() -> SourceInventory {
    SourceInventory {
        classes: vec!["a.B".into(), "a.BTest".into(), "a.C".into()],
        test_methods: vec!["a.BTest.one".into(), "a.BTest.two".into()],
        methods: vec!["a.B.run".into()],
    }
}

#[test]
fn stats_equal_inventory_lengths() {
    let report = aggregate("/repo", &inventory(), vec![]);
    let stats = report.stat_of_repository;
    assert_eq!(stats.num_java_files, 3);
    assert_eq!(stats.num_classes, 3);
    assert_eq!(stats.num_methods, 1);
    assert_eq!(stats.num_test_methods, 2);
    assert!(report.test_coverage_against_methods.is_empty());
}

#[test]
fn later_entry_for_same_test_wins() {
    let report = aggregate(
        "/repo",
        &inventory(),
        vec![
            entry("a.BTest.one", &["a.B#1", "a.B#2", "a.B#3"]),
            entry("a.BTest.two", &[]),
            entry("a.BTest.one", &["a.B#7"]),
        ],
    );
    let mapping = &report.test_coverage_against_methods;
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["a.BTest.one"], vec!["a.B#7".to_string()]);
    assert_eq!(mapping.get_index(0).map(|(k, _)| k.as_str()), Some("a.BTest.one"));
}

#[test]
fn json_uses_stable_field_names_in_order() {
    let report = aggregate("/repo", &inventory(), vec![entry("a.BTest.one", &["a.B#4"])]);
    let json = to_json(&report).unwrap();
    similar_asserts::assert_eq!(
        json,
        r#"{"location":"/repo","stat_of_repository":{"num_java_files":3,"num_classes":3,"num_methods":1,"num_test_methods":2},"test_coverage_against_methods":{"a.BTest.one":["a.B#4"]}}"#
    );
}

#[test]
fn write_report_replaces_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("test_coverage.json");
    write_report(&path, "{\"old\":true}").unwrap();

    let report = aggregate("/repo", &SourceInventory::default(), vec![]);
    write_report(&path, &to_json(&report).unwrap()).unwrap();

    let read: CoverageReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read, report);
}
