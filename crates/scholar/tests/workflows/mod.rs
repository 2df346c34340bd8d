use chrono::NaiveDate;
use scholar::query::DateWindow;
use wiremock::matchers::query_param_is_missing;

use super::*;

fn tools(config: Config) -> Tools {
  Tools::new(ArxivClient::new(&config.catalog).unwrap(), config)
}

async fn mount_lookup(server: &MockServer, id: &str, body: String) {
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("id_list", id))
    .respond_with(ResponseTemplate::new(200).set_body_string(body))
    .expect(1)
    .mount(server)
    .await;
}

#[traced_test]
#[tokio::test]
async fn test_download_paper_end_to_end() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_lookup(&server, "2301.07041", feed(&[entry("2301.07041", "2023-01-17T18:22:58Z")])).await;
  let bundle = tarball(&[
    ("main.tex", b"\\documentclass{article}\n\\input{intro}".as_slice()),
    ("figures/plot.png", b"\x89PNG\r\n".as_slice()),
    ("intro.tex", b"\\section{Introduction}".as_slice()),
    ("references.bib", b"@book{knuth, title={TAOCP}}".as_slice()),
    ("README", b"build with latexmk".as_slice()),
  ]);
  Mock::given(method("GET"))
    .and(path("/src/2301.07041v1"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(bundle))
    .expect(1)
    .mount(&server)
    .await;

  let root = tempfile::tempdir()?;
  let tools = tools(mock_config(&server).with_temp_root(root.path()));
  let source = tools.download_arxiv_paper("2301.07041").await?;

  assert_eq!(
    source,
    "\\documentclass{article}\n\\input{intro}\n\\section{Introduction}\n@book{knuth, \
     title={TAOCP}}\n"
  );
  assert!(!source.contains("PNG"));
  assert!(!source.contains("latexmk"));
  assert_eq!(std::fs::read_dir(root.path())?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_download_unknown_paper_is_not_found() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_lookup(&server, "9999.99999", feed(&[])).await;

  let root = tempfile::tempdir()?;
  let tools = tools(mock_config(&server).with_temp_root(root.path()));
  let result = tools.download_arxiv_paper("9999.99999").await;

  assert!(matches!(result, Err(ScholarError::NotFound(_))));
  assert_eq!(std::fs::read_dir(root.path())?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_download_placeholder_lookup_is_not_found_in_one_request() -> TestResult<()> {
  let server = MockServer::start().await;
  let placeholder = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: id_list=9999.99999</title>
  <id>http://arxiv.org/api/placeholder</id>
  <entry>
    <id>http://arxiv.org/abs/9999.99999</id>
    <title></title>
    <summary></summary>
  </entry>
</feed>
"#;
  // Answers every page the same way, whatever `start` is.
  mount_lookup(&server, "9999.99999", placeholder.to_string()).await;

  let root = tempfile::tempdir()?;
  let tools = tools(mock_config(&server).with_temp_root(root.path()));
  let result = tools.download_arxiv_paper("9999.99999").await;

  assert!(matches!(result, Err(ScholarError::NotFound(id)) if id == "9999.99999"));
  let requests = server.received_requests().await.unwrap_or_default();
  assert_eq!(requests.len(), 1);
  assert_eq!(std::fs::read_dir(root.path())?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_download_without_source_bundle_is_archive_fault() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_lookup(&server, "2301.07041", feed(&[entry("2301.07041", "2023-01-17T18:22:58Z")])).await;
  Mock::given(method("GET"))
    .and(path("/src/2301.07041v1"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7\n%\xe2\xe3".to_vec()))
    .mount(&server)
    .await;

  let root = tempfile::tempdir()?;
  let tools = tools(mock_config(&server).with_temp_root(root.path()));
  let result = tools.download_arxiv_paper("2301.07041").await;

  assert!(matches!(result, Err(ScholarError::Archive(_))));
  assert_eq!(std::fs::read_dir(root.path())?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_download_http_failure_cleans_up() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_lookup(&server, "2301.07041", feed(&[entry("2301.07041", "2023-01-17T18:22:58Z")])).await;
  Mock::given(method("GET"))
    .and(path("/src/2301.07041v1"))
    .respond_with(ResponseTemplate::new(404))
    .mount(&server)
    .await;

  let root = tempfile::tempdir()?;
  let tools = tools(mock_config(&server).with_temp_root(root.path()));
  let result = tools.download_arxiv_paper("2301.07041").await;

  assert!(matches!(result, Err(ScholarError::Network(_))));
  assert_eq!(std::fs::read_dir(root.path())?.count(), 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_today_falls_back_to_latest_day() -> TestResult<()> {
  let server = MockServer::start().await;
  for day in ["20261019", "20261018"] {
    Mock::given(method("GET"))
      .and(path("/api/query"))
      .and(query_param(
        "search_query",
        format!("cat:cs.CR AND submittedDate:[{day}0000 TO {day}2359]"),
      ))
      .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[])))
      .expect(1)
      .mount(&server)
      .await;
  }
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "cat:cs.CR AND submittedDate:[202610170000 TO 202610172359]"))
    .and(query_param("max_results", "100"))
    .and(query_param("sortBy", "submittedDate"))
    .and(query_param_is_missing("id_list"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[
      entry("2610.00002", "2026-10-17T16:00:00Z"),
      entry("2610.00001", "2026-10-17T09:30:00Z"),
    ])))
    .expect(1)
    .mount(&server)
    .await;

  let tools = tools(mock_config(&server));
  let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
  let results = tools.today_arxiv_on("cs.CR", today).await?;

  assert_eq!(results.len(), 2);
  assert_eq!(results[0].id, "http://arxiv.org/abs/2610.00002v1");
  assert!(results.iter().all(|r| r.published.date_naive() == today - chrono::Days::new(2)));
  Ok(())
}

#[tokio::test]
async fn test_weekly_and_search_results_are_normalized() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "cat:math.NT AND submittedDate:[202610130000 TO 202610192359]"))
    .and(query_param("max_results", "200"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[
      entry("2610.00009", "2026-10-19T08:00:00Z"),
      entry("2610.00004", "2026-10-13T08:00:00Z"),
    ])))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "abs:\"elliptic curves\""))
    .and(query_param("sortBy", "relevance"))
    .and(query_param("max_results", "50"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_string(feed(&[entry("1801.00001", "2018-01-01T00:00:00Z")])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let tools = tools(mock_config(&server).with_page_size(200));
  let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
  let week = tools.weekly_arxiv_on("math.NT", today).await?;
  let hits = tools.search_arxiv("abs:\"elliptic curves\"").await?;

  assert_eq!(week.len(), 2);
  let window = DateWindow::ending(today, 7);
  assert!(week.iter().all(|paper| window.contains(&paper.published)));
  assert!(!window.contains(&hits[0].published));
  assert_eq!(hits.len(), 1);
  let value = serde_json::to_value(&hits[0])?;
  assert_eq!(value["title"], "A study of 1801.00001");
  assert_eq!(value["authors"], serde_json::json!(["Ada Lovelace", "Charles Babbage"]));
  assert_eq!(value["categories"], serde_json::json!(["cs.CR", "math.NT"]));
  assert_eq!(value.as_object().unwrap().len(), 6);
  Ok(())
}
