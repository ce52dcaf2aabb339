use crate::inspect::{build_table, load_ideas, render_json_lines};
use ideaflow_ideas::{triage, FieldUpdate, IdeaCreateInput, IdeaStatus, IdeaStorage};
use pretty_assertions::assert_eq;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

async fn seed(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await.unwrap();
    let storage = IdeaStorage::new(pool.clone());
    storage.initialize().await.unwrap();

    for (id, users) in [("IDEA-1", 300.0), ("IDEA-2", 12.0)] {
        let input = IdeaCreateInput {
            id: id.to_string(),
            title: Some(format!("Idea {}", id)),
            description: None,
            impacted_users: Some(users),
        };
        storage.insert(&input, triage(input.impacted_users)).await.unwrap();
    }
    storage
        .update_fields(
            "IDEA-1",
            &[
                FieldUpdate::Budget(Some(9000.0)),
                FieldUpdate::LeadershipApproval(true),
                FieldUpdate::Status(IdeaStatus::Budgeted),
            ],
        )
        .await
        .unwrap();

    pool.close().await;
}

#[tokio::test]
async fn test_load_ideas_reads_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideas.db");
    seed(&path).await;

    let ideas = load_ideas(&path).await.unwrap();

    let ids: Vec<&str> = ideas.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["IDEA-2", "IDEA-1"]);
    assert_eq!(ideas[1].status, IdeaStatus::Budgeted);
}

#[tokio::test]
async fn test_load_ideas_missing_database_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");

    let err = load_ideas(&path).await.unwrap_err();

    assert!(err.to_string().starts_with("Database not found"));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_render_table_and_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideas.db");
    seed(&path).await;
    let ideas = load_ideas(&path).await.unwrap();

    let table = build_table(&ideas).to_string();
    assert!(table.contains("IDEA-1"));
    assert!(table.contains("Budgeted"));
    assert!(table.contains("9000.00 (approved)"));
    assert!(table.contains("Archived"));

    let lines = render_json_lines(&ideas).unwrap();
    let parsed: Vec<Value> = lines
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["id"], "IDEA-2");
    assert_eq!(parsed[1]["budget"], 9000.0);
    assert_eq!(parsed[1]["leadership_approval"], 1);
    assert_eq!(parsed[1]["impacted_users"], 300);
}
