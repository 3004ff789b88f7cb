//! Byte-range probe against a static file served by the mock notebook server

mod support;

use nbprobe_core::domain::{ByteRange, RangeProbe};
use nbprobe_core::AuthScheme;
use support::{mock_server, runner, TOKEN};

/// `bytes=0-1` over "hello world" returns "he"
#[tokio::test]
async fn test_first_two_bytes() {
    let server = mock_server().file("hello.txt", "hello world").spawn().await;
    let out = tempfile::tempdir().unwrap();
    let runner = runner(&server.base_url, TOKEN, AuthScheme::Query, out.path());

    let sample = runner.range_probe(&RangeProbe::default()).await.unwrap();

    assert_eq!(sample.body, "he");
    assert!(sample.is_partial());
    assert_eq!(sample.content_range.as_deref(), Some("bytes 0-1/11"));
}

/// The range probe is diagnostic only: nothing lands in the output dir
#[tokio::test]
async fn test_range_probe_writes_nothing() {
    let server = mock_server().file("hello.txt", "hello world").spawn().await;
    let out = tempfile::tempdir().unwrap();
    let runner = runner(&server.base_url, TOKEN, AuthScheme::Query, out.path());

    let probe = RangeProbe::new("files/hello.txt", ByteRange::new(6, 10).unwrap());
    let sample = runner.range_probe(&probe).await.unwrap();

    assert_eq!(sample.body, "world");
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

/// A missing file is surfaced as a status, not an error
#[tokio::test]
async fn test_missing_file_reports_status() {
    let server = mock_server().spawn().await;
    let out = tempfile::tempdir().unwrap();
    let runner = runner(&server.base_url, TOKEN, AuthScheme::Query, out.path());

    let sample = runner.range_probe(&RangeProbe::default()).await.unwrap();

    assert_eq!(sample.status, 404);
    assert!(!sample.is_partial());
}
