//! Shared helpers for the integration tests.
//!
//! PDFs are built in memory with `lopdf`; each page carries its MediaBox width
//! as a marker so tests can tell which source page ended up where.

#![allow(dead_code)]

use std::sync::Mutex;

use lopdf::{Document, dictionary};
use pagesmith::SourceFile;
use pagesmith::codec::{DocumentCodec, LopdfCodec, SaveOptions};
use pagesmith::error::{PageSmithError, Result};

/// Build a PDF whose pages have the given MediaBox widths.
pub fn pdf_with_widths(widths: &[i64]) -> Vec<u8> {
    let codec = LopdfCodec::new();
    let mut doc = codec.create().unwrap();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    for &width in widths {
        let content = format!("BT /F1 12 Tf 10 50 Td (Page {width}) Tj ET");
        let content_id = doc.add_object(lopdf::Stream::new(
            lopdf::Dictionary::new(),
            content.into_bytes(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 100.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        codec.add_page(&mut doc, page_id).unwrap();
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Source file with pages of the given widths.
pub fn source(name: &str, widths: &[i64]) -> SourceFile {
    SourceFile::new(name, pdf_with_widths(widths))
}

/// MediaBox widths of every page of `bytes`, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// One codec call observed by [`RecordingCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Load(String),
    Copy(Vec<usize>),
    Save(SaveOptions),
}

/// Codec that records every call and can be told to fail.
pub struct RecordingCodec {
    inner: LopdfCodec,
    calls: Mutex<Vec<Call>>,
    fail_save_at: Option<usize>,
}

impl RecordingCodec {
    pub fn new() -> Self {
        Self {
            inner: LopdfCodec::new(),
            calls: Mutex::new(Vec::new()),
            fail_save_at: None,
        }
    }

    /// Make the `n`-th save (zero-based) fail.
    pub fn failing_save_at(mut self, n: usize) -> Self {
        self.fail_save_at = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    /// Options of every save, in call order.
    pub fn save_options(&self) -> Vec<SaveOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::Save(options) => Some(*options),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DocumentCodec for RecordingCodec {
    type Document = Document;
    type Page = lopdf::ObjectId;

    fn create(&self) -> Result<Document> {
        self.record(Call::Create);
        self.inner.create()
    }

    async fn load(&self, source: &SourceFile) -> Result<Document> {
        self.record(Call::Load(source.name().to_string()));
        self.inner.load(source).await
    }

    fn page_count(&self, document: &Document) -> usize {
        self.inner.page_count(document)
    }

    fn copy_pages(
        &self,
        target: &mut Document,
        source: &Document,
        indices: &[usize],
    ) -> Result<Vec<lopdf::ObjectId>> {
        self.record(Call::Copy(indices.to_vec()));
        self.inner.copy_pages(target, source, indices)
    }

    fn add_page(&self, target: &mut Document, page: lopdf::ObjectId) -> Result<()> {
        self.inner.add_page(target, page)
    }

    async fn save(&self, document: Document, options: SaveOptions) -> Result<Vec<u8>> {
        let saves = self.count(|c| matches!(c, Call::Save(_)));
        self.record(Call::Save(options));
        if self.fail_save_at == Some(saves) {
            return Err(PageSmithError::failed_to_save("disk full"));
        }
        self.inner.save(document, options).await
    }
}
