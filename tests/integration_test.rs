//! Integration tests for stargazer
//!
//! These tests verify end-to-end functionality against a stored document.
//! The Gemini test requires an API key to run.

use stargazer::adapter::config::Config;
use stargazer::adapter::gemini::GeminiSuggester;
use stargazer::adapter::repositories::json_state_repository::JsonStateRepository;
use stargazer::adapter::storage::{ExtensionStore, LocalStore};
use stargazer::application::dto::repo_card::RepoCard;
use stargazer::application::use_cases::browse_repos::BrowseReposUseCase;
use stargazer::domain::repositories::category_suggester::CategorySuggester;
use stargazer::domain::repositories::state_repository::StateRepository;
use stargazer::domain::services::repo_filter::CategoryFilter;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Get the path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy the fixture document into a fresh local store
fn load_fixture(temp_dir: &TempDir) -> JsonStateRepository {
    fs::copy(
        fixtures_path().join("stargazer_data.json"),
        temp_dir.path().join("stargazer_data.json"),
    )
    .unwrap();
    JsonStateRepository::new(Arc::new(LocalStore::new(temp_dir.path())))
}

#[test]
fn test_fixture_file_valid_document() {
    let content = fs::read_to_string(fixtures_path().join("stargazer_data.json"))
        .expect("Failed to read stargazer_data.json");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["categories"].as_array().unwrap().len(), 2);
    for repo in json["repos"].as_array().unwrap() {
        assert!(
            repo.get("categoryId").is_some(),
            "Each repo should have categoryId"
        );
        assert!(
            repo.get("starredAt").is_some(),
            "Each repo should have starredAt"
        );
    }
}

#[tokio::test]
async fn test_browse_stored_document() {
    let temp_dir = TempDir::new().unwrap();
    let repository = load_fixture(&temp_dir);
    let state = repository.load().await.unwrap();

    let mut browse = BrowseReposUseCase::with_criteria("RUST", CategoryFilter::All);
    let ids: Vec<&str> = browse
        .visible(&state, 0)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["tokio-rs/tokio"]);

    browse.set_query("");
    browse.set_filter(CategoryFilter::parse("cat_tools"));
    let ids: Vec<&str> = browse
        .visible(&state, 0)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["BurntSushi/ripgrep"]);
}

#[tokio::test]
async fn test_dangling_category_is_uncategorized() {
    let temp_dir = TempDir::new().unwrap();
    let repository = load_fixture(&temp_dir);
    let state = repository.load().await.unwrap();

    let orphan = state.repo("acme/orphan").unwrap();
    let card = RepoCard::resolve(orphan, &state);

    assert_eq!(card.badge.label(), "Uncategorized");
    // 一覧のカテゴリ件数には含まれない
    let summaries = BrowseReposUseCase::category_summaries(&state);
    assert_eq!(summaries.iter().map(|s| s.repo_count).sum::<usize>(), 2);
}

#[tokio::test]
async fn test_migrate_between_backends() {
    let temp_dir = TempDir::new().unwrap();
    let local = load_fixture(&temp_dir);
    let state = local.load().await.unwrap();

    let extension_path = temp_dir.path().join("profile").join("storage.json");
    fs::create_dir_all(extension_path.parent().unwrap()).unwrap();
    fs::write(&extension_path, r#"{"theme": "dark"}"#).unwrap();
    let extension = JsonStateRepository::new(Arc::new(ExtensionStore::new(&extension_path)));

    extension.save(&state).await.unwrap();

    assert_eq!(extension.load().await.unwrap(), state);
    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&extension_path).unwrap()).unwrap();
    assert_eq!(document["theme"], "dark");
    assert_eq!(
        document["stargazer_data"]["repos"][0]["id"],
        "tokio-rs/tokio"
    );
}

/// Integration test that requires a Gemini API key
/// Run with: GEMINI_API_KEY=... cargo test --test integration_test -- --ignored
#[tokio::test]
#[ignore]
async fn test_gemini_suggestion_e2e() {
    let suggester = GeminiSuggester::from_config(&Config::default());
    assert!(suggester.is_enabled(), "GEMINI_API_KEY must be set");

    let suggestion = suggester
        .suggest(
            "tokio",
            "A runtime for writing reliable asynchronous applications with Rust.",
        )
        .await
        .expect("Gemini should return a suggestion");

    assert!(!suggestion.category_name.is_empty());
    assert!(suggestion.color_hex.starts_with('#'));
}
