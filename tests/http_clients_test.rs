use exam_report_export::clients::{HttpAssetFetcher, HttpReportSource};
use exam_report_export::error::ApiError;
use exam_report_export::{AppError, AssetFetcher, Config, Credentials, ReportSource};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        base_api_url: server.uri(),
        web_origin: "https://utest.ulearning.cn".to_string(),
        ..Config::default()
    }
}

fn credentials() -> Credentials {
    Credentials::new("token-abc", "trace-1")
}

#[tokio::test]
async fn test_fetch_report_sends_credentials() {
    let _ = tracing_subscriber::fmt::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exams/user/study/getExamReport"))
        .and(query_param("examId", "42"))
        .and(query_param("traceId", "trace-1"))
        .and(header("authorization", "token-abc"))
        .and(header("accept-language", "zh"))
        .and(header("origin", "https://utest.ulearning.cn"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": { "examTitle": "期末", "part": [] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpReportSource::new(&config_for(&server), credentials()).unwrap();
    let report = source.fetch_report("42").await.unwrap();

    assert_eq!(report["result"]["examTitle"], "期末");
}

#[tokio::test]
async fn test_fetch_report_401_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exams/user/study/getExamReport"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let source = HttpReportSource::new(&config_for(&server), credentials()).unwrap();
    let err = source.fetch_report("42").await.unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_fetch_report_server_error_keeps_body_preview() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exams/user/study/getExamReport"))
        .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(800)))
        .mount(&server)
        .await;

    let source = HttpReportSource::new(&config_for(&server), credentials()).unwrap();
    match source.fetch_report("42").await.unwrap_err() {
        AppError::Api(ApiError::HttpStatus { status, body, .. }) => {
            assert_eq!(status, 502);
            assert_eq!(body, format!("{}...", "x".repeat(500)));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_fetch_report_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exams/user/study/getExamReport"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let source = HttpReportSource::new(&config_for(&server), credentials()).unwrap();
    let err = source.fetch_report("42").await.unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed { .. })));
}

#[tokio::test]
async fn test_fetch_report_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exams/user/study/getExamReport"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        report_timeout_secs: 1,
        ..config_for(&server)
    };
    let source = HttpReportSource::new(&config, credentials()).unwrap();
    let err = source.fetch_report("42").await.unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::Timeout { .. })));
}

#[tokio::test]
async fn test_refresh_session_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/login/refresh10Session"))
        .and(query_param("uaToken", "token-abc"))
        .and(query_param("traceId", "trace-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpReportSource::new(&config_for(&server), credentials()).unwrap();
    source.refresh_session().await.unwrap();
}

#[tokio::test]
async fn test_asset_fetcher_writes_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/img/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .mount(&server)
        .await;

    let fetcher = HttpAssetFetcher::new(&Config::default()).unwrap();
    let dest = dir.path().join("title_img_1.png");
    let written = fetcher
        .fetch(&format!("{}/img/a.png", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(written, 4);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_asset_fetcher_404_leaves_no_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpAssetFetcher::new(&Config::default()).unwrap();
    let dest = dir.path().join("option_A_img_1.png");
    let err = fetcher
        .fetch(&format!("{}/missing.png", server.uri()), &dest)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Api(ApiError::HttpStatus { status: 404, .. })
    ));
    assert!(!dest.exists());
}
