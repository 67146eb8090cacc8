//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to serve a fake repository page plus its files
//! and run discovery, retrieval, analysis and script output end-to-end.

use std::time::Duration;
use sumi_harvest::config::{AnalysisConfig, Config, FetcherConfig, OutputConfig, SourceConfig};
use sumi_harvest::crawler::{build_http_client, ContentCollector, Coordinator, Crawler};
use sumi_harvest::url::RepositoryLocation;
use sumi_harvest::{FetchError, FrequencyAnalyzer, HarvestError};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, script_path: &str) -> Config {
    Config {
        source: SourceConfig {
            root_url: format!("{}/username/repository", base_url),
            base_origin: base_url.to_string(),
            suffix: ".py".to_string(),
        },
        fetcher: FetcherConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            timeout_secs: Some(5),
            ..FetcherConfig::default()
        },
        analysis: AnalysisConfig::default(),
        output: OutputConfig {
            script_path: script_path.to_string(),
        },
    }
}

async fn mount_page(server: &MockServer, p: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, p: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

fn repository_listing(files: &[&str]) -> String {
    let mut html = String::from("<html><head><title>username/repository</title></head><body>");
    for file in files {
        html.push_str(&format!(r#"<a href="{}">{}</a>"#, file, file));
    }
    html.push_str("</body></html>");
    html
}

#[tokio::test]
async fn test_full_harvest_writes_script() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/username/repository",
        repository_listing(&[
            "/username/repository/blob/main/foo.py",
            "/username/repository/blob/main/README.md",
            "/username/repository/blob/main/bar.py",
        ]),
    )
    .await;
    mount_file(&server, "/username/repository/blob/main/foo.py", "def foo(): pass").await;
    mount_file(&server, "/username/repository/blob/main/bar.py", "def bar(): pass").await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Harvest failed");

    assert_eq!(report.files_discovered, 2);
    assert_eq!(report.files_retrieved, 2);
    assert_eq!(report.files_skipped(), 0);
    assert_eq!(report.total_tokens, 6);
    assert_eq!(report.distinct_tokens, 4);
    assert_eq!(report.features.tokens(), vec!["def", "pass", "bar", "foo"]);

    let script = std::fs::read_to_string(&script_path).expect("Script not written");
    assert_eq!(
        script,
        "# Auto-generated script based on analyzed features\n\
         \n\
         def main():\n\
         \x20   print('Feature: def')\n\
         \x20   print('Feature: pass')\n\
         \x20   print('Feature: bar')\n\
         \x20   print('Feature: foo')\n\
         \n\
         if __name__ == '__main__':\n\
         \x20   main()\n"
    );
}

#[tokio::test]
async fn test_missing_file_is_skipped() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/username/repository",
        repository_listing(&["/repo/kept.py", "/repo/gone.py", "/repo/also_kept.py"]),
    )
    .await;
    mount_file(&server, "/repo/kept.py", "import os\nos.getcwd()").await;
    Mock::given(method("GET"))
        .and(path("/repo/gone.py"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_file(&server, "/repo/also_kept.py", "import sys").await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("out.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.files_discovered, 3);
    assert_eq!(report.files_retrieved, 2);
    assert_eq!(report.files_skipped(), 1);
    // import:2, os:2, getcwd:1, sys:1
    assert_eq!(
        report.features.tokens(),
        vec!["import", "os", "getcwd", "sys"]
    );
    assert!(script_path.exists());
}

#[tokio::test]
async fn test_no_matching_files_gives_minimal_script() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/username/repository",
        repository_listing(&["/repo/README.md", "/repo/Cargo.toml"]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.files_discovered, 0);
    assert!(report.features.is_empty());

    let script = std::fs::read_to_string(&script_path).unwrap();
    assert!(script.starts_with("# Auto-generated script based on analyzed features\n"));
    assert!(script.contains("def main():\n    pass\n"));
    assert!(script.ends_with("if __name__ == '__main__':\n    main()\n"));
}

#[tokio::test]
async fn test_empty_root_gives_minimal_script() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/username/repository"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.files_discovered, 0);
    assert!(report.features.is_empty());
    let script = std::fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("def main():\n    pass\n"));
}

#[tokio::test]
async fn test_plain_text_root_is_harvested() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/username/repository"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/repo/only.py">only.py</a>"#,
            "text/plain",
        ))
        .mount(&server)
        .await;
    mount_file(&server, "/repo/only.py", "yield yield x").await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let harvest = Coordinator::new(config).unwrap().harvest().await.unwrap();

    assert_eq!(harvest.report.files_retrieved, 1);
    assert_eq!(harvest.report.features.tokens(), vec!["yield", "x"]);
}

#[tokio::test]
async fn test_root_failure_is_fatal_and_writes_nothing() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(HarvestError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert!(!script_path.exists());
}

#[tokio::test]
async fn test_non_html_root_is_parse_error() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/username/repository"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"tree": [{"path": "a.py"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &base_url,
        dir.path().join("script.py").to_str().unwrap(),
    );

    let result = Coordinator::new(config).unwrap().harvest().await;
    assert!(matches!(result, Err(HarvestError::Parse { .. })));
}

#[tokio::test]
async fn test_unwritable_output_is_io_error() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/username/repository",
        repository_listing(&["/repo/a.py"]),
    )
    .await;
    mount_file(&server, "/repo/a.py", "x = 1").await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("missing-dir").join("script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let result = Coordinator::new(config).unwrap().run().await;
    assert!(matches!(result, Err(HarvestError::Io { .. })));
}

#[tokio::test]
async fn test_harvest_does_not_write() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/username/repository",
        repository_listing(&["/repo/a.py"]),
    )
    .await;
    mount_file(&server, "/repo/a.py", "Value value VALUE other").await;

    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("generated_script.py");
    let config = create_test_config(&base_url, script_path.to_str().unwrap());

    let harvest = Coordinator::new(config).unwrap().harvest().await.unwrap();

    assert!(harvest.script.contains("print('Feature: value')"));
    assert!(harvest.report.output_path.is_none());
    assert!(!script_path.exists());
}

#[tokio::test]
async fn test_concurrent_collection_matches_sequential() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let files: Vec<String> = (0..6).map(|i| format!("/repo/m{}.py", i)).collect();
    let file_refs: Vec<&str> = files.iter().map(|f| f.as_str()).collect();
    mount_page(&server, "/username/repository", repository_listing(&file_refs)).await;

    for (i, file) in files.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(file.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("token{} shared", i))
                    .set_delay(Duration::from_millis(5 * (6 - i as u64))),
            )
            .mount(&server)
            .await;
    }

    let client = build_http_client(&FetcherConfig::default()).unwrap();
    let crawler = Crawler::new(client.clone(), Url::parse(&base_url).unwrap());
    let root = RepositoryLocation::parse(&format!("{}/username/repository", base_url)).unwrap();

    let refs = crawler.discover(&root, ".py").await.unwrap();
    assert_eq!(refs.len(), 6);
    assert!(refs.iter().all(|r| r.path().ends_with(".py")));

    let sequential = ContentCollector::new(client.clone())
        .collect(refs.clone())
        .await;
    let concurrent = ContentCollector::new(client)
        .with_max_concurrent(3)
        .collect(refs)
        .await;

    assert_eq!(sequential, concurrent);

    let analyzer = FrequencyAnalyzer::new();
    let seq_bodies: Vec<String> = sequential.into_iter().map(|c| c.body).collect();
    let mut rev_bodies = seq_bodies.clone();
    rev_bodies.reverse();
    assert_eq!(analyzer.analyze(&seq_bodies), analyzer.analyze(&rev_bodies));
    assert_eq!(analyzer.analyze(&seq_bodies).tokens()[0], "shared");
}
