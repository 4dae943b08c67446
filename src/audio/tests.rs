use super::output::decode;
use super::{DurationProbe, LoftyProbe};
use crate::error::EngineError;

#[test]
fn decode_reports_missing_file_as_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.mp3");
    assert!(matches!(decode(&missing), Err(EngineError::Open { .. })));
}

#[test]
fn decode_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.mp3");
    std::fs::write(&junk, b"definitely not audio").unwrap();
    assert!(matches!(decode(&junk), Err(EngineError::Decode { .. })));
}

#[test]
fn probe_returns_none_for_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.mp3");
    std::fs::write(&junk, b"definitely not audio").unwrap();

    assert_eq!(LoftyProbe.duration(&junk), None);
    assert_eq!(LoftyProbe.duration(&dir.path().join("missing.mp3")), None);
}
