//! Record fetch by identifier batch using mocked EFetch responses

#[path = "common/mod.rs"]
mod common;

use pubmed_pager::pubmed::{fetch_records, fetch_records_in_batches};
use pubmed_pager::{PubMedError, Search, SearchOptions, Stage};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{create_test_fetcher, esearch_count_json, esearch_page_json};

const EFETCH_RESPONSE: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">31978945</PMID>
            <Article>
                <ArticleTitle>A pneumonia outbreak associated with a new coronavirus</ArticleTitle>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

#[tokio::test]
#[traced_test]
async fn test_fetch_records_sends_comma_separated_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "xml"))
        .and(query_param("rettype", "abstract"))
        .and(query_param("id", "31978945,33515491,25760099"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(EFETCH_RESPONSE)
                .insert_header("content-type", "application/xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let batches = fetch_records(&fetcher, &["31978945", " 33515491 ", "25760099"])
        .await
        .expect("record fetch should succeed");

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].ids.len(), 3);
    assert_eq!(batches[0].payload, EFETCH_RESPONSE.as_bytes());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_records_batches_and_failure_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<PubmedArticleSet/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "3,4"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<PubmedArticleSet/>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let err = fetch_records_in_batches(&fetcher, &["1", "2", "3", "4", "5"], 2)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.stage(), Some(Stage::Records { batch: 1 }));
}

#[tokio::test]
#[traced_test]
async fn test_invalid_pmid_rejected_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let result = fetch_records(&fetcher, &["31978945", "PMC7906746"]).await;

    assert!(matches!(result, Err(PubMedError::InvalidPmid { .. })));
}

#[tokio::test]
#[traced_test]
async fn test_search_then_fetch_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("rettype", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_count_json(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retstart", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_page_json(3, 0, 3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "30000001,30000002,30000003"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_RESPONSE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher(&mock_server);
    let mut search = Search::new(&fetcher, "asthma", SearchOptions::new()).unwrap();
    search.query_all().await.unwrap();

    let ids = search.into_identifiers();
    let batches = fetch_records(&fetcher, &ids).await.unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].index, 0);
}
