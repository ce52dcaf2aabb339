// ABOUTME: Idea storage layer using SQLite
// ABOUTME: Table bootstrap plus insert, lookup, listing, field updates and deletion

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{Idea, IdeaCreateInput, IdeaStatus};

/// Storage errors. Database failures keep SQLite's own message.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{message}")]
    DuplicateId { id: String, message: String },
    #[error("{0}")]
    Database(String),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => StorageError::Database(db.message().to_string()),
            other => StorageError::Sqlx(other),
        }
    }

    fn from_insert(id: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() || db.message().starts_with("UNIQUE constraint failed") {
                return StorageError::DuplicateId {
                    id: id.to_string(),
                    message: db.message().to_string(),
                };
            }
        }
        Self::from_sqlx(err)
    }
}

pub const CREATE_IDEAS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ideas (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        impacted_users INTEGER NOT NULL,
        status TEXT DEFAULT 'Created',
        evaluator_comments TEXT,
        budget REAL,
        leadership_approval INTEGER DEFAULT 0,
        dev_effort_estimate TEXT,
        start_date TEXT,
        end_date TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// A single column assignment in an UPDATE
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    EvaluatorComments(Option<String>),
    Budget(Option<f64>),
    LeadershipApproval(bool),
    DevEffortEstimate(Option<String>),
    StartDate(Option<String>),
    EndDate(Option<String>),
    Status(IdeaStatus),
}

impl FieldUpdate {
    pub fn column(&self) -> &'static str {
        match self {
            FieldUpdate::EvaluatorComments(_) => "evaluator_comments",
            FieldUpdate::Budget(_) => "budget",
            FieldUpdate::LeadershipApproval(_) => "leadership_approval",
            FieldUpdate::DevEffortEstimate(_) => "dev_effort_estimate",
            FieldUpdate::StartDate(_) => "start_date",
            FieldUpdate::EndDate(_) => "end_date",
            FieldUpdate::Status(_) => "status",
        }
    }
}

#[derive(Clone)]
pub struct IdeaStorage {
    pool: SqlitePool,
}

impl IdeaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the ideas table if it does not exist yet
    pub async fn initialize(&self) -> StorageResult<()> {
        sqlx::query(CREATE_IDEAS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        info!("Ideas table ready");
        Ok(())
    }

    /// Insert a new idea with an already derived status
    pub async fn insert(&self, input: &IdeaCreateInput, status: IdeaStatus) -> StorageResult<()> {
        debug!("Inserting idea: {} (status: {})", input.id, status);

        sqlx::query(
            r#"
            INSERT INTO ideas (id, title, description, impacted_users, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.impacted_users)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::from_insert(&input.id, e))?;

        Ok(())
    }

    /// Get a single idea by ID
    pub async fn get(&self, id: &str) -> StorageResult<Option<Idea>> {
        debug!("Fetching idea: {}", id);

        let row = sqlx::query("SELECT * FROM ideas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        row.as_ref().map(row_to_idea).transpose()
    }

    /// List every idea, newest first
    pub async fn list_all(&self) -> StorageResult<Vec<Idea>> {
        debug!("Listing ideas");

        let rows = sqlx::query("SELECT * FROM ideas ORDER BY created_at DESC, rowid DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        rows.iter().map(row_to_idea).collect()
    }

    /// Apply the given column assignments and return the number of rows changed.
    ///
    /// An unknown id changes nothing and is not an error.
    pub async fn update_fields(&self, id: &str, updates: &[FieldUpdate]) -> StorageResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }

        let assignments = updates
            .iter()
            .map(|u| format!("{} = ?", u.column()))
            .collect::<Vec<_>>()
            .join(", ");
        let query_str = format!("UPDATE ideas SET {} WHERE id = ?", assignments);

        debug!("Updating idea {}: {}", id, assignments);

        let mut query = sqlx::query(&query_str);
        for update in updates {
            query = match update {
                FieldUpdate::EvaluatorComments(v)
                | FieldUpdate::DevEffortEstimate(v)
                | FieldUpdate::StartDate(v)
                | FieldUpdate::EndDate(v) => query.bind(v.clone()),
                FieldUpdate::Budget(v) => query.bind(*v),
                FieldUpdate::LeadershipApproval(v) => query.bind(*v),
                FieldUpdate::Status(v) => query.bind(*v),
            };
        }

        let result = query
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        Ok(result.rows_affected())
    }

    /// Delete an idea and return the number of rows removed
    pub async fn delete(&self, id: &str) -> StorageResult<u64> {
        debug!("Deleting idea: {}", id);

        let result = sqlx::query("DELETE FROM ideas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        Ok(result.rows_affected())
    }
}

fn row_to_idea(row: &SqliteRow) -> StorageResult<Idea> {
    Ok(Idea {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        // INTEGER affinity keeps whole counts as integers and fractions as REAL
        impacted_users: row.try_get_unchecked("impacted_users")?,
        status: row.try_get("status")?,
        evaluator_comments: row.try_get("evaluator_comments")?,
        budget: row.try_get("budget")?,
        leadership_approval: row
            .try_get::<Option<bool>, _>("leadership_approval")?
            .unwrap_or(false),
        dev_effort_estimate: row.try_get("dev_effort_estimate")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        created_at: row.try_get("created_at")?,
    })
}
