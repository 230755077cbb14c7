//! Integration tests for reading from and delivering to the filesystem.

use pagesmith::Session;
use pagesmith::codec::LopdfCodec;
use pagesmith::config::{CompressionLevel, Config, OverwriteMode};
use pagesmith::error::PageSmithError;
use pagesmith::io::{DirectorySink, SourceReader};
use tempfile::TempDir;

use crate::common::{page_widths, pdf_with_widths};

#[tokio::test]
async fn test_split_to_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.pdf");
    std::fs::write(&input, pdf_with_widths(&[10, 20])).unwrap();
    let out = dir.path().join("pages");

    let mut session = Session::new(LopdfCodec::new());
    session.select_split_file(SourceReader::new().read(&input).await.unwrap());
    let mut sink = DirectorySink::new(&out, OverwriteMode::NoClobber);

    let report = session.split(&mut sink).await.unwrap();

    assert_eq!(sink.written(), &[out.join("page_1.pdf"), out.join("page_2.pdf")]);
    assert_eq!(
        page_widths(&std::fs::read(out.join("page_2.pdf")).unwrap()),
        vec![20]
    );
    assert_eq!(report.input_size, std::fs::metadata(&input).unwrap().len());
}

#[tokio::test]
async fn test_no_clobber_stops_split_midway() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("page_2.pdf"), b"keep me").unwrap();

    let mut session = Session::new(LopdfCodec::new());
    session.select_split_file(pagesmith::SourceFile::new(
        "doc.pdf",
        pdf_with_widths(&[1, 2, 3]),
    ));
    let mut sink = DirectorySink::new(dir.path(), OverwriteMode::NoClobber);

    let err = session.split(&mut sink).await.unwrap_err();

    assert!(matches!(err, PageSmithError::OutputExists { .. }));
    assert!(dir.path().join("page_1.pdf").exists());
    assert_eq!(
        std::fs::read(dir.path().join("page_2.pdf")).unwrap(),
        b"keep me"
    );
    assert!(!dir.path().join("page_3.pdf").exists());
}

#[tokio::test]
async fn test_merge_files_read_from_disk() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<_> = [("one.pdf", vec![1, 2]), ("two.pdf", vec![3])]
        .into_iter()
        .map(|(name, widths)| {
            let path = dir.path().join(name);
            std::fs::write(&path, pdf_with_widths(&widths)).unwrap();
            path
        })
        .collect();

    let config = Config {
        output_dir: dir.path().join("out"),
        compression: CompressionLevel::Maximum,
        overwrite_mode: OverwriteMode::Force,
        ..Config::default()
    };
    let mut session = Session::with_config(LopdfCodec::new(), &config);
    session.select_merge_files(SourceReader::new().read_all(&paths).await.unwrap());
    let mut sink = DirectorySink::new(&config.output_dir, config.overwrite_mode);

    session.merge(&mut sink).await.unwrap();

    let merged = std::fs::read(config.output_dir.join("merged.pdf")).unwrap();
    assert_eq!(page_widths(&merged), vec![1, 2, 3]);
}
