//! Integration tests for precondition and collaborator failures.

use pagesmith::Session;
use pagesmith::SourceFile;
use pagesmith::compose::Operation;
use pagesmith::error::PageSmithError;
use pagesmith::io::MemorySink;

use crate::common::{Call, RecordingCodec, source};

#[tokio::test]
async fn test_missing_input_never_decodes() {
    let session = Session::new(RecordingCodec::new());
    let mut sink = MemorySink::new();

    let merge = session.merge(&mut sink).await.unwrap_err();
    let split = session.split(&mut sink).await.unwrap_err();
    let compress = session.compress(&mut sink).await.unwrap_err();

    assert!(matches!(
        merge,
        PageSmithError::NoInputFile {
            operation: Operation::Merge
        }
    ));
    assert!(matches!(
        split,
        PageSmithError::NoInputFile {
            operation: Operation::Split
        }
    ));
    assert!(matches!(
        compress,
        PageSmithError::NoInputFile {
            operation: Operation::Compress
        }
    ));
    assert!(session.codec().calls().is_empty());
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_delete_without_review() {
    let mut session = Session::new(RecordingCodec::new());
    let mut sink = MemorySink::new();

    let err = session.commit_delete(&mut sink).await.unwrap_err();

    assert!(matches!(
        err,
        PageSmithError::NoInputFile {
            operation: Operation::Delete
        }
    ));
    assert!(err.is_precondition());
    assert!(session.codec().calls().is_empty());
}

#[tokio::test]
async fn test_nothing_kept_never_saves() {
    let mut session = Session::new(RecordingCodec::new());
    session
        .load_review(source("doc.pdf", &[1, 2]))
        .await
        .unwrap();
    session.toggle_page(0).unwrap();
    session.toggle_page(1).unwrap();
    let mut sink = MemorySink::new();

    let err = session.commit_delete(&mut sink).await.unwrap_err();

    assert!(matches!(err, PageSmithError::NothingKept));
    assert!(err.is_precondition());
    assert_eq!(session.codec().calls(), vec![Call::Load("doc.pdf".into())]);
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_merge_stops_at_bad_file() {
    let mut session = Session::new(RecordingCodec::new());
    session.select_merge_files([
        source("a.pdf", &[1]),
        SourceFile::new("broken.pdf", b"not a pdf".to_vec()),
        source("c.pdf", &[3]),
    ]);
    let mut sink = MemorySink::new();

    let err = session.merge(&mut sink).await.unwrap_err();

    assert!(!err.is_precondition());
    assert!(matches!(err, PageSmithError::FailedToLoadPdf { .. }));
    let codec = session.codec();
    assert_eq!(codec.count(|c| matches!(c, Call::Load(_))), 2);
    assert_eq!(codec.count(|c| matches!(c, Call::Save(_))), 0);
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_merge_save_failure_delivers_nothing() {
    let mut session = Session::new(RecordingCodec::new().failing_save_at(0));
    session.select_merge_files([source("a.pdf", &[1]), source("b.pdf", &[2])]);
    let mut sink = MemorySink::new();

    let err = session.merge(&mut sink).await.unwrap_err();

    assert!(matches!(err, PageSmithError::FailedToSave { .. }));
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_split_failure_keeps_earlier_pages() {
    let mut session = Session::new(RecordingCodec::new().failing_save_at(2));
    session.select_split_file(source("doc.pdf", &[1, 2, 3, 4]));
    let mut sink = MemorySink::new();

    let err = session.split(&mut sink).await.unwrap_err();

    assert!(matches!(err, PageSmithError::FailedToSave { .. }));
    assert_eq!(sink.filenames(), vec!["page_1.pdf", "page_2.pdf"]);
    assert_eq!(session.codec().count(|c| matches!(c, Call::Save(_))), 3);
}

#[tokio::test]
async fn test_split_copies_pages_one_at_a_time() {
    let mut session = Session::new(RecordingCodec::new());
    session.select_split_file(source("doc.pdf", &[1, 2, 3]));
    let mut sink = MemorySink::new();

    session.split(&mut sink).await.unwrap();

    let copies: Vec<Call> = session
        .codec()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Copy(_)))
        .collect();
    assert_eq!(
        copies,
        vec![Call::Copy(vec![0]), Call::Copy(vec![1]), Call::Copy(vec![2])]
    );
}

#[tokio::test]
async fn test_toggle_out_of_range() {
    let mut session = Session::new(RecordingCodec::new());
    session
        .load_review(source("doc.pdf", &[1, 2]))
        .await
        .unwrap();

    let err = session.toggle_page(2).unwrap_err();
    assert!(matches!(
        err,
        PageSmithError::PageOutOfRange {
            index: 2,
            page_count: 2
        }
    ));
    assert_eq!(session.kept_pages(), vec![0, 1]);
}
