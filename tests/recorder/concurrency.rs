//! Concurrent intake: many producer threads against one writer.

use crate::common::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const RECORDS_PER_THREAD: usize = 50;

/// Sample value encoding thread and iteration, so every record is
/// distinguishable after readback.
fn sample(thread_id: usize, iteration: usize) -> f64 {
    (thread_id * 1_000 + iteration) as f64
}

#[test]
fn test_concurrent_adds_then_one_flush_persists_all() {
    let session = TestSession::new();
    let writer = Arc::new(session.writer());

    concurrent::run_with_shared(THREADS, Arc::clone(&writer), |thread_id, writer| {
        for i in 0..RECORDS_PER_THREAD {
            writer
                .add_data_packet(
                    DeviceId::new(thread_id as i32),
                    Some(eeg_packet(sample(thread_id, i))),
                )
                .unwrap();
        }
    });

    assert_eq!(
        writer.buffered_message_count(),
        THREADS * RECORDS_PER_THREAD + 1
    );
    writer.flush().unwrap();
    assert_eq!(writer.buffered_message_count(), 0);

    let records = session.records();
    assert_eq!(records.len(), THREADS * RECORDS_PER_THREAD + 1);
    assert_startup_annotation(&records[0]);

    // No torn or duplicated frames: every (thread, iteration) pair appears
    // exactly once
    let samples = data_samples(&records);
    let unique: HashSet<(i32, u64)> = samples
        .iter()
        .map(|(id, value)| (*id, value.to_bits()))
        .collect();
    assert_eq!(unique.len(), THREADS * RECORDS_PER_THREAD);

    // Each thread's records appear in its own submission order
    for thread_id in 0..THREADS {
        let values: Vec<f64> = samples
            .iter()
            .filter(|(id, _)| *id == thread_id as i32)
            .map(|(_, value)| *value)
            .collect();
        let expected: Vec<f64> = (0..RECORDS_PER_THREAD)
            .map(|i| sample(thread_id, i))
            .collect();
        assert_eq!(values, expected, "thread {} order broken", thread_id);
    }
}

#[test]
fn test_adds_racing_flushes_lose_nothing() {
    let session = TestSession::new();
    let writer = Arc::new(session.writer());
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let producers: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let writer = Arc::clone(&writer);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..RECORDS_PER_THREAD {
                    writer
                        .add_data_packet(
                            DeviceId::new(thread_id as i32),
                            Some(eeg_packet(sample(thread_id, i))),
                        )
                        .unwrap();
                }
            })
        })
        .collect();

    // Flush repeatedly while producers are running
    barrier.wait();
    for _ in 0..20 {
        writer.flush().unwrap();
        thread::yield_now();
    }

    for handle in producers {
        handle.join().unwrap();
    }
    writer.flush().unwrap();

    let records = session.records();
    assert_eq!(records.len(), THREADS * RECORDS_PER_THREAD + 1);

    let unique: HashSet<(i32, u64)> = data_samples(&records)
        .iter()
        .map(|(id, value)| (*id, value.to_bits()))
        .collect();
    assert_eq!(unique.len(), THREADS * RECORDS_PER_THREAD);
}

#[test]
fn test_concurrent_annotations_and_discard_keep_counters_consistent() {
    let session = TestSession::new();
    let writer = Arc::new(session.writer());

    concurrent::run_with_shared(THREADS, Arc::clone(&writer), |thread_id, writer| {
        for i in 0..RECORDS_PER_THREAD {
            writer
                .add_annotation_string(
                    DeviceId::new(thread_id as i32),
                    &format!("note {} from {}", i, thread_id),
                )
                .unwrap();
        }
    });

    assert_eq!(
        writer.buffered_message_count(),
        THREADS * RECORDS_PER_THREAD + 1
    );
    assert!(writer.buffered_message_size() > 0);

    writer.discard_buffered_packets();
    assert_eq!(writer.buffered_message_count(), 0);
    assert_eq!(writer.buffered_message_size(), 0);

    writer.flush().unwrap();
    assert!(session.records().is_empty());
}

#[test]
fn test_counters_stay_coherent_while_producers_add() {
    let session = TestSession::new();
    let writer = Arc::new(session.writer());
    let barrier = Arc::new(Barrier::new(2));

    let producer = {
        let writer = Arc::clone(&writer);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..500 {
                writer
                    .add_data_packet(DeviceId::new(1), Some(eeg_packet(i as f64)))
                    .unwrap();
            }
        })
    };

    // Nothing drains the buffer in this test, so a byte size sampled
    // after the count must cover at least every frame already counted.
    barrier.wait();
    for _ in 0..500 {
        let count = writer.buffered_message_count();
        let size = writer.buffered_message_size();
        assert!(
            size >= count * (4 + biotape::MIN_FRAME_LENGTH),
            "byte size {} cannot hold {} frames",
            size,
            count
        );
    }

    producer.join().unwrap();
    assert_eq!(writer.buffered_message_count(), 501);
}
