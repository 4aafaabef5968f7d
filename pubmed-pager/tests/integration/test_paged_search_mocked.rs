//! End-to-end paged search against a mocked E-utilities server
//!
//! These tests drive `Search` through the real `HttpFetcher` and verify the
//! exact requests issued: one count query, then one ESearch request per page
//! at increasing offsets.

#[path = "common/mod.rs"]
mod common;

use pubmed_pager::{PubMedError, Search, SearchOptions, SearchState, Stage, TransportError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{create_test_fetcher, esearch_count_json, esearch_page_json};

async fn mount_count(mock_server: &MockServer, total: usize) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("rettype", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_count_json(total)))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mount_page(mock_server: &MockServer, total: usize, start: usize, len: usize) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retstart", start.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_page_json(total, start, len)),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_query_all_three_pages() {
    let mock_server = MockServer::start().await;
    mount_count(&mock_server, 2091).await;
    mount_page(&mock_server, 2091, 0, 1000).await;
    mount_page(&mock_server, 2091, 1000, 1000).await;
    mount_page(&mock_server, 2091, 2000, 91).await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();

    search.query_all().await.expect("paged search should succeed");

    assert_eq!(search.total(), Some(2091));
    assert_eq!(search.state(), SearchState::FullyPaged);

    let starts: Vec<usize> = search.pages().iter().map(|p| p.start).collect();
    assert_eq!(starts, vec![0, 1000, 2000]);

    let ids = search.into_identifiers();
    assert_eq!(ids.len(), 2091);
    assert_eq!(ids[0], "30000001");
    assert_eq!(ids[2090], "30002091");
}

#[tokio::test]
#[traced_test]
async fn test_requests_carry_window_size_and_term() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "json"))
        .and(query_param("reldate", "100"))
        .and(query_param("datetype", "pdat"))
        .and(query_param("term", "\"Circulation\"[jour]"))
        .and(query_param("rettype", "count"))
        .and(query_param("tool", "test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_count_json(120)))
        .expect(1)
        .mount(&mock_server)
        .await;

    for start in [0usize, 50, 100] {
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .and(query_param("reldate", "100"))
            .and(query_param("term", "\"Circulation\"[jour]"))
            .and(query_param("retstart", start.to_string()))
            .and(query_param("retmax", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_string(esearch_page_json(
                120,
                start,
                (120 - start).min(50),
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let fetcher = create_test_fetcher(&mock_server);
    let options = SearchOptions::new()
        .with_back_days(100)
        .with_page_size(50);
    // Pre-encoded term is passed through untouched
    let mut search = Search::new(&fetcher, "%22Circulation%22%5Bjour%5D", options).unwrap();

    search.query_all().await.unwrap();

    let lens: Vec<usize> = search.pages().iter().map(|p| p.len()).collect();
    assert_eq!(lens, vec![50, 50, 20]);
}

#[tokio::test]
#[traced_test]
async fn test_zero_total_makes_no_page_requests() {
    let mock_server = MockServer::start().await;
    mount_count(&mock_server, 0).await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retstart", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_page_json(0, 0, 0)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "nothing matches this", SearchOptions::new()).unwrap();

    search.query_all().await.unwrap();

    assert_eq!(search.total(), Some(0));
    assert_eq!(search.page_count().unwrap(), 0);
    assert!(search.pages().is_empty());
    assert_eq!(search.identifiers().count(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_page_failure_stops_the_run() {
    let mock_server = MockServer::start().await;
    mount_count(&mock_server, 2091).await;
    mount_page(&mock_server, 2091, 0, 1000).await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retstart", "1000"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retstart", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_page_json(2091, 2000, 91)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();

    let err = search.query_all().await.unwrap_err();

    match err {
        PubMedError::Transport {
            stage: Stage::Page { index, start },
            source: TransportError::ApiError { status, .. },
        } => {
            assert_eq!(index, 1);
            assert_eq!(start, 1000);
            assert_eq!(status, 503);
        }
        other => panic!("expected a transport error on page 1, got {}", other),
    }

    assert_eq!(search.pages().len(), 1);
    assert_eq!(search.pages()[0].len(), 1000);
    assert_eq!(search.state(), SearchState::CountKnown);
}

#[tokio::test]
#[traced_test]
async fn test_count_failure_is_tagged_count_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();

    let err = search.query_all().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.stage(), Some(Stage::Count));
    assert_eq!(search.total(), None);
    assert!(search.pages().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_html_error_page_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Service temporarily unavailable</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();

    let err = search.query_total().await.unwrap_err();

    assert!(err.is_decode());
    assert_eq!(err.stage(), Some(Stage::Count));
}

#[tokio::test]
#[traced_test]
async fn test_service_error_field_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"header": {"type": "esearch", "version": "0.3"},
                "esearchresult": {"ERROR": "Invalid query: empty term and query_key"}}"#,
        ))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();

    let err = search.query_total().await.unwrap_err();

    assert!(err.is_decode());
    assert!(err.to_string().contains("Invalid query: empty term"));
}
