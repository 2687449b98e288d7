//! Tests for the append-only result sequence and its context windows.

use framewise_core::{AnalysisResult, FrameSample, ResultSequence, Timestamp};
use framewise_error::AnalysisErrorKind;

fn result(index: usize) -> AnalysisResult {
    AnalysisResult::new(
        index,
        format!("frames/frame_00m_{:02}s.jpg", index * 2),
        Timestamp::new(0, (index * 2) as u32),
        format!("narration {}", index),
    )
}

fn sequence_of(n: usize) -> ResultSequence {
    let mut sequence = ResultSequence::new();
    for i in 0..n {
        sequence.append(result(i)).unwrap();
    }
    sequence
}

#[test]
fn test_append_enforces_index_order() {
    let mut sequence = sequence_of(2);

    let err = sequence.append(result(1)).unwrap_err();
    assert_eq!(
        err.kind(),
        &AnalysisErrorKind::OutOfOrder {
            expected: 2,
            found: 1
        }
    );

    sequence.append(result(2)).unwrap();
    for (i, r) in sequence.iter().enumerate() {
        assert_eq!(*r.index(), i);
    }
}

#[test]
fn test_window_is_empty_for_first_frame() {
    let sequence = ResultSequence::new();
    assert!(sequence.window(5).is_empty());
}

#[test]
fn test_window_holds_most_recent_entries() {
    let sequence = sequence_of(8);

    let window = sequence.window(5);
    assert_eq!(window.indices(), vec![3, 4, 5, 6, 7]);

    let window = sequence.window(1);
    assert_eq!(window.indices(), vec![7]);
}

#[test]
fn test_window_never_exceeds_available_results() {
    for i in 0..7 {
        let sequence = sequence_of(i);
        let window = sequence.window(5);
        assert_eq!(window.len(), i.min(5));
        let expected: Vec<usize> = (i.saturating_sub(5)..i).collect();
        assert_eq!(window.indices(), expected);
    }
}

#[test]
fn test_result_for_frame_copies_identity() {
    let frame = FrameSample::from_path(4, "frames/frame_01m_30s.jpg");
    let result = AnalysisResult::for_frame(&frame, "a door opens");

    assert_eq!(*result.index(), 4);
    assert_eq!(result.path(), frame.path());
    assert_eq!(result.timestamp().to_string(), "01:30");
    assert_eq!(result.text(), "a door opens");
}

#[test]
fn test_sequence_serializes_as_record_list() {
    let sequence = sequence_of(1);
    let json = serde_json::to_value(&sequence).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{
            "index": 0,
            "path": "frames/frame_00m_00s.jpg",
            "timestamp": "00:00",
            "text": "narration 0"
        }])
    );
}
