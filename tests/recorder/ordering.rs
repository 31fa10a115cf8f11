//! Persisted ordering: insertion order survives buffering, flush batching,
//! and no-op filtering.

use crate::common::*;
use biotape::RecordKind;

#[test]
fn test_records_persist_in_append_order() {
    let session = TestSession::new();
    let writer = session.writer();

    writer
        .add_data_packet(DeviceId::new(1), Some(eeg_packet(1.0)))
        .unwrap();
    writer
        .add_artifact_packet(DeviceId::new(2), blink_artifact())
        .unwrap();
    writer
        .add_annotation_string(DeviceId::new(1), "mid-run marker")
        .unwrap();
    writer
        .add_data_packet(DeviceId::new(2), Some(eeg_packet(2.0)))
        .unwrap();
    writer.flush().unwrap();

    let kinds: Vec<RecordKind> = session.records().iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::Annotation,
            RecordKind::Data,
            RecordKind::Artifact,
            RecordKind::AnnotationText,
            RecordKind::Data,
        ]
    );
}

#[test]
fn test_startup_annotation_is_always_first() {
    let session = TestSession::new();
    let writer = session.writer();

    writer
        .add_data_packet(DeviceId::new(1), Some(eeg_packet(5.0)))
        .unwrap();
    writer.flush().unwrap();

    assert_startup_annotation(&session.records()[0]);
}

#[test]
fn test_multiple_flushes_concatenate_in_order() {
    let session = TestSession::new();
    let writer = session.writer();

    writer.add_annotation_string(DeviceId::new(1), "a").unwrap();
    writer.add_annotation_string(DeviceId::new(1), "b").unwrap();
    writer.flush().unwrap();

    writer.add_annotation_string(DeviceId::new(1), "c").unwrap();
    writer.flush().unwrap();

    writer.add_annotation_string(DeviceId::new(1), "d").unwrap();
    writer.add_annotation_string(DeviceId::new(1), "e").unwrap();
    writer.flush().unwrap();

    assert_eq!(
        annotation_texts(&session.records()),
        vec!["a", "b", "c", "d", "e"]
    );
}

#[test]
fn test_empty_annotations_are_skipped_without_breaking_order() {
    let session = TestSession::new();
    let writer = session.writer();
    let before = writer.buffered_message_count();

    writer.add_annotation_string(DeviceId::new(1), "").unwrap();
    assert_eq!(writer.buffered_message_count(), before);

    writer
        .add_annotation_string(DeviceId::new(1), "real")
        .unwrap();
    writer.add_annotation_string(DeviceId::new(1), "").unwrap();
    writer
        .add_annotation(DeviceId::new(1), AnnotationData::plain(""))
        .unwrap();
    writer
        .add_annotation_string(DeviceId::new(1), "also real")
        .unwrap();
    writer.flush().unwrap();

    assert_eq!(
        annotation_texts(&session.records()),
        vec!["real", "also real"]
    );
}

#[test]
fn test_device_ids_round_trip_unmodified() {
    let session = TestSession::new();
    let writer = session.writer();

    // Device ids are caller-assigned and uninterpreted, negatives included
    for id in [i32::MIN, -1, 0, 1, 42, i32::MAX] {
        writer
            .add_data_packet(DeviceId::new(id), Some(eeg_packet(id as f64)))
            .unwrap();
    }
    writer.flush().unwrap();

    let devices: Vec<i32> = data_samples(&session.records())
        .iter()
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(devices, vec![i32::MIN, -1, 0, 1, 42, i32::MAX]);
}
