use std::fs;
use std::time::Duration;

use docsync_engine::{
    fetch_image, FailureKind, FetchError, FetchOutcome, FetchSettings, ImageFetcher,
    ReqwestImageFetcher,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(settings: FetchSettings) -> ReqwestImageFetcher {
    ReqwestImageFetcher::new(settings).expect("client")
}

#[tokio::test]
async fn downloads_bytes_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pic.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"\x89PNG".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let bytes = fetcher(FetchSettings::default())
        .download(&format!("{}/pic.png", server.uri()))
        .await
        .expect("download ok");
    assert_eq!(bytes, b"\x89PNG");
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher(FetchSettings::default())
        .download(&format!("{}/missing.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let err = fetcher(settings)
        .download(&format!("{}/slow.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let err = fetcher(settings)
        .download(&format!("{}/large.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn invalid_url_is_rejected_without_request() {
    let err = fetcher(FetchSettings::default())
        .download("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

struct FailingFetcher;

#[async_trait::async_trait]
impl ImageFetcher for FailingFetcher {
    async fn download(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::new(FailureKind::Network, "connection refused"))
    }
}

#[tokio::test]
async fn fetch_image_writes_file_and_skips_existing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/once.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"img".to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let target = temp.path().join("guides").join("intro").join("img_1.png");
    let fetcher = fetcher(FetchSettings::default());
    let url = format!("{}/once.png", server.uri());

    assert_eq!(fetch_image(&fetcher, &url, &target).await, FetchOutcome::Downloaded);
    assert_eq!(fs::read(&target).unwrap(), b"img");

    assert_eq!(
        fetch_image(&fetcher, &url, &target).await,
        FetchOutcome::AlreadyPresent
    );
}

#[tokio::test]
async fn failed_download_leaves_no_file() {
    sync_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("ns").join("img_2.png");

    let outcome = fetch_image(&FailingFetcher, "https://unreachable.example/x.png", &target).await;
    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(!outcome.is_available());
    assert!(!target.exists());
    assert!(target.parent().unwrap().is_dir());
}
