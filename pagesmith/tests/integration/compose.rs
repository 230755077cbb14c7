//! Integration tests for the four operations driven through a session.

use pagesmith::Session;
use pagesmith::codec::{LopdfCodec, SaveOptions};
use pagesmith::config::{CompressionLevel, Config};
use pagesmith::io::MemorySink;
use pagesmith::session::{DragEvent, DragOutcome, PageMark};
use rstest::rstest;

use crate::common::{RecordingCodec, page_widths, source};

#[tokio::test]
async fn test_merge_in_registry_order() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_merge_files([
        source("a.pdf", &[101, 102]),
        source("b.pdf", &[201]),
        source("c.pdf", &[301, 302, 303]),
    ]);
    let mut sink = MemorySink::new();

    let report = session.merge(&mut sink).await.unwrap();

    assert_eq!(sink.filenames(), vec!["merged.pdf"]);
    assert_eq!(
        page_widths(&sink.delivered()[0].bytes),
        vec![101, 102, 201, 301, 302, 303]
    );
    assert_eq!(report.total_pages(), 6);
}

#[tokio::test]
async fn test_drag_swap_changes_merge_order() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_merge_files([
        source("a.pdf", &[101]),
        source("b.pdf", &[201]),
        source("c.pdf", &[301]),
    ]);

    session.drag(DragEvent::Start { index: 0 }).unwrap();
    session.drag(DragEvent::Over { index: 1 }).unwrap();
    let outcome = session.drag(DragEvent::Drop { index: 2 }).unwrap();
    assert_eq!(outcome, DragOutcome::Reordered { from: 0, to: 2 });
    assert_eq!(session.merge_files().names(), vec!["c.pdf", "b.pdf", "a.pdf"]);

    let mut sink = MemorySink::new();
    session.merge(&mut sink).await.unwrap();
    assert_eq!(page_widths(&sink.delivered()[0].bytes), vec![301, 201, 101]);
}

#[tokio::test]
async fn test_same_file_twice_merges_twice() {
    let file = source("a.pdf", &[101, 102]);
    let mut session = Session::new(LopdfCodec::new());
    session.select_merge_files([file.clone(), file]);
    let mut sink = MemorySink::new();

    session.merge(&mut sink).await.unwrap();

    assert_eq!(
        page_widths(&sink.delivered()[0].bytes),
        vec![101, 102, 101, 102]
    );
}

#[tokio::test]
async fn test_split_delivers_one_file_per_page() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_split_file(source("doc.pdf", &[11, 12, 13]));
    let mut sink = MemorySink::new();

    let report = session.split(&mut sink).await.unwrap();

    assert_eq!(
        sink.filenames(),
        vec!["page_1.pdf", "page_2.pdf", "page_3.pdf"]
    );
    for (delivered, width) in sink.delivered().iter().zip([11, 12, 13]) {
        assert_eq!(page_widths(&delivered.bytes), vec![width]);
    }
    assert_eq!(report.outputs.len(), 3);
}

#[tokio::test]
async fn test_compress_keeps_every_page() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_compress_file(source("doc.pdf", &[1, 2, 3, 4]));
    let mut sink = MemorySink::new();

    let report = session.compress(&mut sink).await.unwrap();

    assert_eq!(sink.filenames(), vec!["compressed.pdf"]);
    assert_eq!(page_widths(&sink.delivered()[0].bytes), vec![1, 2, 3, 4]);
    assert_eq!(report.outputs[0].page_count, 4);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_compress_always_saves_compact(#[case] compression: CompressionLevel) {
    let config = Config {
        compression,
        ..Config::default()
    };
    let mut session = Session::with_config(RecordingCodec::new(), &config);
    session.select_compress_file(source("doc.pdf", &[1, 2]));
    let mut sink = MemorySink::new();

    session.compress(&mut sink).await.unwrap();

    assert_eq!(session.codec().save_options(), vec![SaveOptions::compact()]);
}

#[tokio::test]
async fn test_merge_saves_with_configured_level() {
    let config = Config {
        compression: CompressionLevel::None,
        ..Config::default()
    };
    let mut session = Session::with_config(RecordingCodec::new(), &config);
    session.select_merge_files([source("a.pdf", &[1]), source("b.pdf", &[2])]);
    let mut sink = MemorySink::new();

    session.merge(&mut sink).await.unwrap();

    assert_eq!(session.codec().save_options(), vec![SaveOptions::plain()]);
}

#[tokio::test]
async fn test_delete_writes_kept_pages_in_order() {
    let mut session = Session::new(LopdfCodec::new());
    session
        .load_review(source("doc.pdf", &[1, 2, 3, 4, 5]))
        .await
        .unwrap();

    assert_eq!(session.toggle_page(2).unwrap(), PageMark::Discarded);
    let mut sink = MemorySink::new();
    session.commit_delete(&mut sink).await.unwrap();

    assert_eq!(sink.filenames(), vec!["pages_deleted.pdf"]);
    assert_eq!(page_widths(&sink.delivered()[0].bytes), vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn test_delete_with_everything_kept_copies_all() {
    let mut session = Session::new(LopdfCodec::new());
    session
        .load_review(source("doc.pdf", &[7, 8, 9]))
        .await
        .unwrap();
    let mut sink = MemorySink::new();

    session.commit_delete(&mut sink).await.unwrap();

    assert_eq!(page_widths(&sink.delivered()[0].bytes), vec![7, 8, 9]);
}

#[tokio::test]
async fn test_swipe_and_tap_combine() {
    let mut session = Session::new(LopdfCodec::new());
    session
        .load_review(source("doc.pdf", &[1, 2, 3]))
        .await
        .unwrap();

    // Swipe page 1 left, then tap it back to kept.
    session.touch_start(0, 400.0);
    assert_eq!(
        session.touch_end(0, 340.0).unwrap(),
        Some(PageMark::Discarded)
    );
    assert_eq!(session.toggle_page(0).unwrap(), PageMark::Kept);

    // Exactly the threshold is not a swipe.
    session.touch_start(1, 400.0);
    assert_eq!(session.touch_end(1, 350.0).unwrap(), None);

    session.touch_start(2, 400.0);
    session.touch_end(2, 200.0).unwrap();

    let mut sink = MemorySink::new();
    session.commit_delete(&mut sink).await.unwrap();
    assert_eq!(page_widths(&sink.delivered()[0].bytes), vec![1, 2]);
}
