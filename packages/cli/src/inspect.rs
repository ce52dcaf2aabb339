// ABOUTME: Read-only dump of the ideas database
// ABOUTME: Renders every stored idea as a terminal table or as JSON lines

use anyhow::{bail, Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tracing::debug;

use ideaflow_core::truncate;
use ideaflow_ideas::{Idea, IdeaStorage};

/// Open the database without write access and load every idea, newest first
pub async fn load_ideas(database_path: &Path) -> Result<Vec<Idea>> {
    if !database_path.exists() {
        bail!("Database not found at {}", database_path.display());
    }

    debug!("Opening {} read-only", database_path.display());

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open {}", database_path.display()))?;

    let ideas = IdeaStorage::new(pool.clone()).list_all().await?;
    pool.close().await;

    Ok(ideas)
}

/// Build the idea table. Columns are not wrapped unless the caller opts into
/// a dynamic content arrangement.
pub fn build_table(ideas: &[Idea]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.set_header(vec![
        "ID", "Title", "Users", "Status", "Budget", "Estimate", "Schedule", "Created",
    ]);

    for idea in ideas {
        let budget = match idea.budget {
            Some(amount) if idea.leadership_approval => format!("{:.2} (approved)", amount),
            Some(amount) => format!("{:.2}", amount),
            None => "—".to_string(),
        };

        let schedule = match (&idea.start_date, &idea.end_date) {
            (None, None) => "—".to_string(),
            (start, end) => format!(
                "{} → {}",
                start.as_deref().unwrap_or("?"),
                end.as_deref().unwrap_or("?")
            ),
        };

        table.add_row(vec![
            idea.id.clone(),
            truncate(&idea.title, 30),
            idea.impacted_users.to_string(),
            idea.status.to_string(),
            budget,
            idea.dev_effort_estimate
                .as_deref()
                .map(|s| truncate(s, 20))
                .unwrap_or_else(|| "—".to_string()),
            schedule,
            idea.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    table
}

/// Table sized to the current terminal
pub fn render_table(ideas: &[Idea]) -> String {
    let mut table = build_table(ideas);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.to_string()
}

/// One JSON object per idea, one per line
pub fn render_json_lines(ideas: &[Idea]) -> Result<String> {
    let lines = ideas
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
