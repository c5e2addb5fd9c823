use crate::error::CovmapError;
use crate::jacoco::exec::{
    ExecutionData, ExecutionRecord, SessionInfo, append_exec_file, decode, encode,
    read_exec_file,
};

fn data(id: u64, name: &str, probes: &[bool]) -> ExecutionData {
    ExecutionData {
        id,
        name: name.to_string(),
        probes: probes.to_vec(),
    }
}

fn sample_record() -> ExecutionRecord {
    let mut record = ExecutionRecord::default();
    record.sessions.push(SessionInfo {
        id: "host-1234".to_string(),
        start: 1_700_000_000_000,
        dump: 1_700_000_000_500,
    });
    record
        .store
        .put(data(0x1234_5678_9abc_def0, "a/B", &[true, false, false, true, false, false, false, false, true]))
        .unwrap();
    record
}

#[test]
fn header_only_encoding_for_empty_record() {
    assert_eq!(encode(&ExecutionRecord::default()), vec![0x01, 0xC0, 0xC0, 0x10, 0x07]);
}

#[test]
fn probes_pack_lsb_first_with_varint_length() {
    let mut record = ExecutionRecord::default();
    record.store.put(data(1, "x", &[true, false, true])).unwrap();
    let bytes = encode(&record);
    // header(5) + block(1) + id(8) + utf(2+1) + varint(1) + packed(1)
    assert_eq!(bytes.len(), 19);
    assert_eq!(&bytes[bytes.len() - 2..], &[3, 0b101]);
}

#[test]
fn appended_dumps_read_back_as_one_merged_record() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out").join("a.BTest.adds.exec");

    append_exec_file(&path, &sample_record()).unwrap();
    let mut second = ExecutionRecord::default();
    second
        .store
        .put(data(0x1234_5678_9abc_def0, "a/B", &[false, true, false, false, false, false, false, false, false]))
        .unwrap();
    append_exec_file(&path, &second).unwrap();

    let read = read_exec_file(&path).unwrap();
    assert_eq!(read.sessions.len(), 1);
    assert_eq!(read.store.len(), 1);
    let merged = read.store.get(0x1234_5678_9abc_def0).unwrap();
    assert_eq!(
        merged.probes,
        vec![true, true, false, true, false, false, false, false, true]
    );
}

#[test]
fn decode_rejects_foreign_magic() {
    let err = decode(&[0x01, 0xBE, 0xEF, 0x10, 0x07]).unwrap_err();
    assert!(err.contains("magic"), "{err}");
}

#[test]
fn merging_mismatched_probe_counts_fails() {
    let mut record = ExecutionRecord::default();
    record.store.put(data(7, "a/B", &[true])).unwrap();
    let err = record.store.put(data(7, "a/B", &[true, false])).unwrap_err();
    assert!(matches!(err, CovmapError::IncompatibleExecData { id: 7, .. }));
}

#[test]
fn recorded_execution_requires_entry_with_positive_id() {
    let mut record = ExecutionRecord::default();
    assert!(!record.has_recorded_execution(5));
    record.store.put(data(5, "a/B", &[false])).unwrap();
    assert!(record.has_recorded_execution(5));
    record.store.put(data(0, "a/Zero", &[true])).unwrap();
    assert!(!record.has_recorded_execution(0));
}

#[test]
fn ids_with_the_top_bit_set_count_as_executed() {
    let id = 0x8000_0000_0000_0001u64;
    let mut record = ExecutionRecord::default();
    record.store.put(data(id, "a/High", &[false])).unwrap();
    assert!(record.has_recorded_execution(id));
}
