#![no_main]

use libfuzzer_sys::fuzz_target;
use pagesmith::codec::LopdfCodec;
use pagesmith::compose::Operation;
use pagesmith::io::MemorySink;
use pagesmith::{Session, SourceFile};
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Builder::new_current_thread().enable_all().build().unwrap())
}

// The first byte picks pages to toggle, the rest is decoded as a document.
fuzz_target!(|data: &[u8]| {
    let Some((&toggles, bytes)) = data.split_first() else {
        return;
    };

    runtime().block_on(async {
        let mut session = Session::new(LopdfCodec::new());
        if session
            .load_review(SourceFile::new("fuzz.pdf", bytes.to_vec()))
            .await
            .is_err()
        {
            assert!(session.review().is_none());
            return;
        }

        let page_count = session.review().map_or(0, |r| r.selection().len());
        for bit in 0..8 {
            if toggles & (1 << bit) != 0 {
                let _ = session.toggle_page(bit);
            }
        }

        let kept = session.kept_pages();
        assert!(kept.iter().all(|&index| index < page_count));

        match session.plan(Operation::Delete).await {
            Ok(plan) => assert_eq!(plan.total_pages(), kept.len()),
            Err(err) => assert!(kept.is_empty() && err.is_precondition()),
        }

        let mut sink = MemorySink::new();
        if session.commit_delete(&mut sink).await.is_err() {
            assert!(sink.delivered().is_empty());
        }
    });
});
