//! Integration tests for planning operations without writing.

use pagesmith::Session;
use pagesmith::codec::LopdfCodec;
use pagesmith::compose::{Operation, PageSource};
use pagesmith::io::MemorySink;

use crate::common::{Call, RecordingCodec, source};

fn pages(source: &str, numbers: &[usize]) -> Vec<PageSource> {
    numbers
        .iter()
        .map(|&page| PageSource {
            source: source.to_string(),
            page,
        })
        .collect()
}

#[tokio::test]
async fn test_plan_merge_follows_registry_order() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_merge_files([source("a.pdf", &[1, 2]), source("b.pdf", &[3])]);

    let plan = session.plan(Operation::Merge).await.unwrap();

    assert_eq!(plan.outputs.len(), 1);
    assert_eq!(plan.outputs[0].filename, "merged.pdf");
    let mut expected = pages("a.pdf", &[1, 2]);
    expected.extend(pages("b.pdf", &[1]));
    assert_eq!(plan.outputs[0].pages, expected);
}

#[tokio::test]
async fn test_plan_split_names_every_page() {
    let mut session = Session::new(LopdfCodec::new());
    session.select_split_file(source("doc.pdf", &[1, 2, 3]));

    let plan = session.plan(Operation::Split).await.unwrap();

    let names: Vec<&str> = plan.outputs.iter().map(|o| o.filename.as_str()).collect();
    assert_eq!(names, vec!["page_1.pdf", "page_2.pdf", "page_3.pdf"]);
    assert_eq!(plan.total_pages(), 3);
}

#[tokio::test]
async fn test_plan_delete_lists_kept_pages() {
    let mut session = Session::new(LopdfCodec::new());
    session
        .load_review(source("doc.pdf", &[1, 2, 3, 4]))
        .await
        .unwrap();
    session.toggle_page(0).unwrap();
    session.toggle_page(3).unwrap();

    let plan = session.plan(Operation::Delete).await.unwrap();

    assert_eq!(plan.outputs[0].filename, "pages_deleted.pdf");
    assert_eq!(plan.outputs[0].pages, pages("doc.pdf", &[2, 3]));
    assert!(session.review().is_some());
}

#[tokio::test]
async fn test_plan_never_saves() {
    let mut session = Session::new(RecordingCodec::new());
    session.select_compress_file(source("doc.pdf", &[1, 2]));

    let plan = session.plan(Operation::Compress).await.unwrap();

    assert_eq!(plan.outputs[0].filename, "compressed.pdf");
    assert_eq!(plan.total_pages(), 2);
    assert_eq!(session.codec().count(|c| matches!(c, Call::Save(_))), 0);

    // The real run afterwards still works from the same state.
    let mut sink = MemorySink::new();
    session.compress(&mut sink).await.unwrap();
    assert_eq!(sink.filenames(), vec!["compressed.pdf"]);
}
