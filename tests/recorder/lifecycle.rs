//! Writer lifecycle: construction, flush, discard, close, drop, reopen.

use crate::common::*;
use biotape::{ComputingDeviceConfiguration, DeviceConfiguration, DspData, VersionInfo};

#[test]
fn test_end_to_end_single_packet() {
    let session = TestSession::new();
    let writer = session.writer();

    // Construction buffers the startup annotation
    assert_eq!(writer.buffered_message_count(), 1);

    writer
        .add_data_packet(DeviceId::new(0), Some(eeg_packet(1.0)))
        .unwrap();
    assert_eq!(writer.buffered_message_count(), 2);

    writer.flush().unwrap();
    assert_eq!(writer.buffered_message_count(), 0);
    assert_eq!(writer.buffered_message_size(), 0);

    let records = session.records();
    assert_eq!(records.len(), 2);
    assert_startup_annotation(&records[0]);
    match &records[1].payload {
        Payload::Data(packet) => assert_eq!(packet.values[0], 1.0),
        other => panic!("Expected data packet, got {:?}", other),
    }
}

#[test]
fn test_every_record_kind_flushes_clean() {
    let session = TestSession::new();
    let writer = session.writer();
    let device = DeviceId::new(3);

    writer.add_artifact_packet(device, blink_artifact()).unwrap();
    writer.add_data_packet(device, Some(eeg_packet(2.0))).unwrap();
    writer.add_annotation_string(device, "eyes open").unwrap();
    writer
        .add_annotation(device, AnnotationData::plain("stimulus"))
        .unwrap();
    writer
        .add_configuration(
            device,
            Some(DeviceConfiguration {
                headband_name: "muse-02a1".to_string(),
                serial_number: "2031-XKCD-402".to_string(),
                preset: "p21".to_string(),
                eeg_channel_count: 4,
                sample_rate_hz: 256.0,
                notch_filter_hz: Some(60),
            }),
        )
        .unwrap();
    writer
        .add_version(
            device,
            Some(VersionInfo {
                firmware_version: "1.2.13".to_string(),
                hardware_version: "2.1".to_string(),
                bootloader_version: "1.0.3".to_string(),
                protocol_version: 2,
            }),
        )
        .unwrap();
    writer
        .add_computing_device_configuration(
            device,
            ComputingDeviceConfiguration {
                platform: "linux".to_string(),
                os_version: "6.8.0".to_string(),
                hardware_model: "ThinkPad X1".to_string(),
            },
        )
        .unwrap();
    writer
        .add_dsp(device, DspData::new("alpha_power", vec![0.42, 0.37, 0.51, 0.48]))
        .unwrap();

    assert_eq!(writer.buffered_message_count(), 9);
    assert!(writer.buffered_message_size() > 0);

    writer.flush().unwrap();
    assert_eq!(writer.buffered_message_count(), 0);
    assert_eq!(writer.buffered_message_size(), 0);
    assert_eq!(session.records().len(), 9);
}

#[test]
fn test_discarded_records_never_reach_disk() {
    let session = TestSession::new();
    let writer = session.writer();

    writer
        .add_annotation_string(DeviceId::new(1), "doomed")
        .unwrap();
    writer
        .add_data_packet(DeviceId::new(1), Some(eeg_packet(9.0)))
        .unwrap();
    writer.discard_buffered_packets();

    assert_eq!(writer.buffered_message_count(), 0);
    assert_eq!(writer.buffered_message_size(), 0);

    writer
        .add_annotation_string(DeviceId::new(1), "survivor")
        .unwrap();
    writer.flush().unwrap();

    let records = session.records();
    assert_eq!(annotation_texts(&records), vec!["survivor"]);
    assert!(data_samples(&records).is_empty());
}

#[test]
fn test_failed_flush_keeps_records_then_retry_persists() {
    let session = TestSession::new();
    let writer = session.writer();
    writer.close().unwrap();

    writer
        .add_annotation_string(DeviceId::new(1), "first")
        .unwrap();
    writer
        .add_annotation_string(DeviceId::new(1), "second")
        .unwrap();
    let count = writer.buffered_message_count();
    let size = writer.buffered_message_size();

    assert!(writer.flush().is_err());
    assert_eq!(writer.buffered_message_count(), count);
    assert_eq!(writer.buffered_message_size(), size);

    writer.open().unwrap();
    writer.flush().unwrap();

    assert_eq!(writer.buffered_message_count(), 0);
    assert_eq!(
        annotation_texts(&session.records()),
        vec!["first", "second"]
    );
}

#[test]
fn test_reopen_appends_and_preserves_session_uuid() {
    let session = TestSession::new();

    let first_session_id = {
        let writer = session.writer();
        writer
            .add_annotation_string(DeviceId::new(1), "session one")
            .unwrap();
        writer.flush().unwrap();
        writer.session_id().unwrap()
    };

    {
        let writer = session.writer();
        assert_eq!(writer.session_id(), Some(first_session_id));
        writer
            .add_annotation_string(DeviceId::new(1), "session two")
            .unwrap();
        writer.flush().unwrap();
    }

    let reader = session.reader();
    assert_eq!(reader.session_id(), first_session_id);

    // Both recording sessions are in the file, in order, each headed by
    // its own startup annotation
    let records = reader.read_records().unwrap();
    assert_eq!(records.len(), 4);
    assert_startup_annotation(&records[0]);
    assert_startup_annotation(&records[2]);
    assert_eq!(
        annotation_texts(&records),
        vec!["session one", "session two"]
    );
}

#[test]
fn test_drop_closes_without_flushing() {
    let session = TestSession::new();

    {
        let writer = session.writer();
        writer
            .add_annotation_string(DeviceId::new(1), "flushed")
            .unwrap();
        writer.flush().unwrap();
        writer
            .add_annotation_string(DeviceId::new(1), "left behind")
            .unwrap();
    }

    // Only the flushed records are on disk, and the file is reusable
    assert_eq!(annotation_texts(&session.records()), vec!["flushed"]);

    let writer = session.writer();
    writer
        .add_annotation_string(DeviceId::new(1), "afterwards")
        .unwrap();
    writer.flush().unwrap();
    assert_eq!(
        annotation_texts(&session.records()),
        vec!["flushed", "afterwards"]
    );
}

#[test]
fn test_close_is_idempotent_and_open_recovers() {
    let session = TestSession::new();
    let writer = session.writer();

    writer.close().unwrap();
    writer.close().unwrap();
    writer.open().unwrap();
    writer.open().unwrap();
    writer.flush().unwrap();

    assert_eq!(session.records().len(), 1);
}
