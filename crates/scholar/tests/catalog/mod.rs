use std::time::Duration;

use scholar::{
  config::CatalogConfig,
  query::{SearchQuery, SortCriterion},
  record::PaperRecord,
};

use super::*;

fn client(server: &MockServer, page_size: usize) -> ArxivClient {
  let config = mock_config(server).with_page_size(page_size);
  ArxivClient::new(&config.catalog).unwrap()
}

#[traced_test]
#[tokio::test]
async fn test_results_send_arxiv_parameters() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "cat:cs.CR AND submittedDate:[202610190000 TO 202610192359]"))
    .and(query_param("sortBy", "submittedDate"))
    .and(query_param("sortOrder", "descending"))
    .and(query_param("start", "0"))
    .and(query_param("max_results", "100"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_string(feed(&[entry("2610.00002", "2026-10-19T10:00:00Z")])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let query = SearchQuery::new("cat:cs.CR AND submittedDate:[202610190000 TO 202610192359]")
    .with_max_results(100)
    .sorted_by(SortCriterion::SubmittedDate);
  let records = client(&server, 100).results(&query).await?;

  assert_eq!(records.len(), 1);
  let record = &records[0];
  assert_eq!(record.title, "A study of 2610.00002");
  assert_eq!(record.entry_id, "http://arxiv.org/abs/2610.00002v1");
  assert_eq!(record.short_id(), "2610.00002v1");
  assert_eq!(record.authors, vec!["Ada Lovelace", "Charles Babbage"]);
  assert_eq!(record.categories, vec!["cs.CR", "math.NT"]);
  Ok(())
}

#[tokio::test]
async fn test_results_page_until_max_results() -> TestResult<()> {
  let server = MockServer::start().await;
  let pages = [("0", "2", 0..2), ("2", "2", 2..4), ("4", "1", 4..5)];
  for (start, max, ids) in pages {
    let entries: Vec<_> =
      ids.map(|i| entry(&format!("2610.{i:05}"), "2026-10-18T10:00:00Z")).collect();
    Mock::given(method("GET"))
      .and(path("/api/query"))
      .and(query_param("start", start))
      .and(query_param("max_results", max))
      .respond_with(ResponseTemplate::new(200).set_body_string(feed(&entries)))
      .expect(1)
      .mount(&server)
      .await;
  }

  let query = SearchQuery::new("all:lattice").with_max_results(5);
  let records = client(&server, 2).results(&query).await?;

  let ids: Vec<_> = records.iter().map(PaperRecord::short_id).collect();
  assert_eq!(ids, [
    "2610.00000v1",
    "2610.00001v1",
    "2610.00002v1",
    "2610.00003v1",
    "2610.00004v1"
  ]);
  Ok(())
}

#[tokio::test]
async fn test_results_stop_on_short_page() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("start", "0"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_string(feed(&[entry("2610.00001", "2026-10-18T10:00:00Z")])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let query = SearchQuery::new("all:lattice").with_max_results(50);
  let records = client(&server, 10).results(&query).await?;

  assert_eq!(records.len(), 1);
  Ok(())
}

#[tokio::test]
async fn test_results_by_id_list() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("id_list", "2301.07041"))
    .and(query_param("max_results", "1"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_string(feed(&[entry("2301.07041", "2023-01-17T18:22:58Z")])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let records = client(&server, 100).results(&SearchQuery::by_id("2301.07041")).await?;

  assert_eq!(records.len(), 1);
  assert_eq!(records[0].short_id(), "2301.07041v1");
  Ok(())
}

#[tokio::test]
async fn test_error_entry_surfaces_as_api_error() {
  let server = MockServer::start().await;
  let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#max_results_must_be_non-negative</id>
    <title>Error</title>
    <summary>max_results must be non-negative</summary>
  </entry>
</feed>"#;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(200).set_body_string(body))
    .mount(&server)
    .await;

  let result = client(&server, 100).results(&SearchQuery::new("all:x")).await;

  assert!(matches!(result, Err(ScholarError::Api(msg)) if msg.contains("non-negative")));
}

#[tokio::test]
async fn test_server_error_is_network_fault() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&server)
    .await;

  let result = client(&server, 100).results(&SearchQuery::new("all:x")).await;

  assert!(matches!(result, Err(ScholarError::Network(_))));
}

#[tokio::test]
async fn test_garbage_body_is_feed_fault() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<feed><entry>"))
    .mount(&server)
    .await;

  let result = client(&server, 100).results(&SearchQuery::new("all:x")).await;

  assert!(matches!(result, Err(ScholarError::Feed(_))));
}

#[tokio::test]
async fn test_requests_are_spaced_by_delay() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[])))
    .expect(2)
    .mount(&server)
    .await;

  let config = CatalogConfig {
    base_url: format!("{}/api/query", server.uri()),
    delay_seconds: 1,
    ..CatalogConfig::default()
  };
  let client = ArxivClient::new(&config)?;

  let started = std::time::Instant::now();
  client.results(&SearchQuery::new("all:a")).await?;
  client.results(&SearchQuery::new("all:b")).await?;

  assert!(started.elapsed() >= Duration::from_secs(1));
  Ok(())
}

#[tokio::test]
async fn test_download_source_writes_bundle() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_string(feed(&[entry("2301.07041", "2023-01-17T18:22:58Z")])),
    )
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/src/2301.07041v1"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bundle bytes".to_vec()))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server, 100);
  let record = client.results(&SearchQuery::by_id("2301.07041")).await?.remove(0);
  let dir = tempfile::tempdir()?;
  let dest = dir.path().join("source.tar.gz");
  client.download_source(&record, &dest).await?;

  assert_eq!(std::fs::read(&dest)?, b"bundle bytes");
  Ok(())
}
