#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! End-to-end command tests against a JSON record file.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use casebook_cli::commands::{self, cmd_detail, cmd_extract, cmd_list, cmd_show};
use casebook_cli::{Cli, Error};
use casebook_client::{CaseStudySource, MemorySource};
use casebook_content::CaseStudyFilter;
use casebook_viewer::TextRenderer;

const COMPANY: &str = "Northwind Consulting";

const RECORDS: &str = r###"[
  {
    "id": 1,
    "cstitle": "Zero Trust Rollout",
    "content": "## Challenge\nLegacy VPN.\n## Solution\nIdentity-aware proxy.\n## Results\nNo breaches.\n\n## Key Metrics\n- 40% reduction in incidents\n\n> \"Best decision we made\"",
    "cscategory": "Security",
    "csAuthor": "dana ruiz",
    "csauthor_desc": "CISO",
    "created_at": "2024-03-10T12:00:00Z"
  },
  {
    "id": 2,
    "cstitle": "Edge Caching",
    "content": "Just some plain prose about caching.",
    "cscategory": "Cloud",
    "slug": "edge",
    "created_at": "2024-05-01T12:00:00Z"
  },
  {
    "id": 3,
    "cstitle": "SIEM Consolidation",
    "content": "## Challenge\nToo many tools.",
    "cscategory": "Security",
    "created_at": "2023-11-20T12:00:00Z"
  }
]"###;

fn source() -> Arc<dyn CaseStudySource> {
    Arc::new(MemorySource::from_json_str(RECORDS).unwrap())
}

fn renderer() -> TextRenderer {
    TextRenderer::new(COMPANY)
}

// ----------------------------------------------------------------------------
// show
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_show_renders_ready_view() {
    let out = cmd_show(source(), &renderer(), "1", Duration::from_secs(5))
        .await
        .unwrap();
    assert!(out.starts_with("Zero Trust Rollout\n"));
    assert!(out.contains("The Challenge"));
    assert!(out.contains("\"Best decision we made\""));
    assert!(out.contains("[D] dana ruiz, CISO"));
    assert!(out.contains("trust Northwind Consulting"));
}

#[tokio::test]
async fn test_show_unknown_id_is_unavailable() {
    let err = cmd_show(source(), &renderer(), "999", Duration::from_secs(5))
        .await
        .unwrap_err();
    match err {
        Error::Unavailable { message } => assert_eq!(message, "Case study not found"),
        other => panic!("unexpected error {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// detail / list / extract
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_detail_by_generated_slug() {
    let src = source();
    let out = cmd_detail(&*src, &renderer(), COMPANY, "zero-trust-rollout", false)
        .await
        .unwrap();
    assert!(out.contains("Key Metrics"));
    assert!(out.contains("40%"));
    assert!(out.contains("Related Case Studies"));
    assert!(out.contains("SIEM Consolidation"));
}

#[tokio::test]
async fn test_detail_json() {
    let src = source();
    let out = cmd_detail(&*src, &renderer(), COMPANY, "edge", true).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["view"]["title"], "Edge Caching");
    assert!(value["related"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_filters_and_orders() {
    let src = source();
    let filter = CaseStudyFilter {
        category: Some("Security".to_string()),
        ..Default::default()
    };
    let out = cmd_list(&*src, &renderer(), COMPANY, &filter, false)
        .await
        .unwrap();

    assert!(out.starts_with("Categories: All, Cloud, Security"));
    let zero = out.find("Zero Trust Rollout").unwrap();
    let siem = out.find("SIEM Consolidation").unwrap();
    assert!(zero < siem);
    assert!(!out.contains("Edge Caching"));
}

#[tokio::test]
async fn test_list_no_match() {
    let src = source();
    let filter = CaseStudyFilter {
        search: Some("quantum".to_string()),
        ..Default::default()
    };
    let out = cmd_list(&*src, &renderer(), COMPANY, &filter, false)
        .await
        .unwrap();
    assert!(out.contains("No case studies match."));
}

#[tokio::test]
async fn test_extract_file_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.json");
    std::fs::write(
        &path,
        r#"{"id": "x", "cstitle": "Plain", "content": "just some plain prose"}"#,
    )
    .unwrap();

    let out = cmd_extract(&renderer(), path.to_str().unwrap(), true)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["full_body"], "just some plain prose");
    assert_eq!(value["tags"][0], "Case Study");
    assert_eq!(value["author_name"], "Anonymous");
}

#[tokio::test]
async fn test_extract_missing_file() {
    let err = cmd_extract(&renderer(), "/nonexistent/record.json", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/record.json"));
}

// ----------------------------------------------------------------------------
// run
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_run_with_source_file_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records.json");
    std::fs::write(&records, RECORDS).unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[site]\ncompany_name = \"Acme Advisory\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "casebook",
        "--config",
        config.to_str().unwrap(),
        "--source-file",
        records.to_str().unwrap(),
        "show",
        "2",
    ])
    .unwrap();

    let out = commands::run(cli).await.unwrap();
    assert!(out.contains("Just some plain prose about caching."));
    assert!(out.contains("trust Acme Advisory"));
}

#[tokio::test]
async fn test_run_store_without_url_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let cli = Cli::try_parse_from([
        "casebook",
        "--config",
        config.to_str().unwrap(),
        "--store-url",
        "",
        "list",
    ])
    .unwrap();

    let err = commands::run(cli).await.unwrap_err();
    assert!(err.to_string().contains("store.url"));
}

#[tokio::test]
async fn test_run_config_path_ignores_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[store\n").unwrap();

    let cli =
        Cli::try_parse_from(["casebook", "--config", config.to_str().unwrap(), "config", "path"])
            .unwrap();
    let out = commands::run(cli).await.unwrap();
    assert_eq!(out, config.to_str().unwrap());
}
