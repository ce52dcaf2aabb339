// ABOUTME: HTTP request handlers for idea operations
// ABOUTME: Creation with triage, reads, workflow transitions and deletion

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::db::DbState;
use super::response::{ApiError, ChangesResponse, DataResponse, JsonBody};
use ideaflow_ideas::{
    loose_number, loose_text, text_from_value, triage, CreatedIdea, Idea, IdeaCreateInput,
    Transition, Truthy,
};

/// Request body for creating an idea.
///
/// Fields take any JSON scalar: numbers and numeric strings are both counts,
/// and non-string values are stored as text the way SQLite would keep them.
#[derive(Debug, Default, Deserialize)]
pub struct CreateIdeaRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub impacted_users: Option<f64>,
}

/// The id as stored, or `None` when it is missing or falsy
fn idea_id(id: &Value) -> Option<String> {
    match id {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => text_from_value(other).filter(|id| !id.is_empty()),
    }
}

/// Create a new idea and triage it by the number of impacted users
pub async fn create_idea(
    State(db): State<DbState>,
    JsonBody(request): JsonBody<CreateIdeaRequest>,
) -> Result<Json<DataResponse<CreatedIdea>>, ApiError> {
    let id = idea_id(&request.id)
        .ok_or_else(|| ApiError::Validation("ID is required".to_string()))?;

    let input = IdeaCreateInput {
        id,
        title: request.title,
        description: request.description,
        impacted_users: request.impacted_users,
    };
    let status = triage(input.impacted_users);

    info!("Creating idea: {} (triaged as {})", input.id, status);

    db.idea_storage.insert(&input, status).await?;

    Ok(Json(DataResponse::new(
        "Idea created",
        CreatedIdea::new(input, status),
    )))
}

/// List all ideas, newest first
pub async fn list_ideas(
    State(db): State<DbState>,
) -> Result<Json<DataResponse<Vec<Idea>>>, ApiError> {
    info!("Listing ideas");

    let ideas = db.idea_storage.list_all().await?;
    Ok(Json(DataResponse::success(ideas)))
}

/// Get a single idea; an unknown id yields `data: null`
pub async fn get_idea(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Option<Idea>>>, ApiError> {
    info!("Getting idea: {}", id);

    let idea = db.idea_storage.get(&id).await?;
    Ok(Json(DataResponse::success(idea)))
}

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub evaluator_comments: Option<String>,
    #[serde(default)]
    pub approved: Truthy,
}

pub async fn evaluate_idea(
    State(db): State<DbState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<EvaluateRequest>,
) -> Result<Json<ChangesResponse>, ApiError> {
    let transition = Transition::Evaluate {
        evaluator_comments: request.evaluator_comments,
        approved: request.approved.get(),
    };
    apply_transition(&db, &id, transition).await
}

#[derive(Debug, Default, Deserialize)]
pub struct BudgetRequest {
    #[serde(default, deserialize_with = "loose_number")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub leadership_approval: Truthy,
}

pub async fn allocate_budget(
    State(db): State<DbState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<BudgetRequest>,
) -> Result<Json<ChangesResponse>, ApiError> {
    let transition = Transition::AllocateBudget {
        budget: request.budget,
        leadership_approval: request.leadership_approval.get(),
    };
    apply_transition(&db, &id, transition).await
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimationRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub dev_effort_estimate: Option<String>,
}

pub async fn add_estimation(
    State(db): State<DbState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<EstimationRequest>,
) -> Result<Json<ChangesResponse>, ApiError> {
    let transition = Transition::Estimate {
        dev_effort_estimate: request.dev_effort_estimate,
    };
    apply_transition(&db, &id, transition).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub end_date: Option<String>,
}

pub async fn schedule_idea(
    State(db): State<DbState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<ScheduleRequest>,
) -> Result<Json<ChangesResponse>, ApiError> {
    let transition = Transition::Schedule {
        start_date: request.start_date,
        end_date: request.end_date,
    };
    apply_transition(&db, &id, transition).await
}

/// Mark an idea as live. Any request body is ignored.
pub async fn go_live(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> Result<Json<ChangesResponse>, ApiError> {
    apply_transition(&db, &id, Transition::GoLive).await
}

/// Delete an idea
pub async fn delete_idea(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> Result<Json<ChangesResponse>, ApiError> {
    info!("Deleting idea: {}", id);

    let changes = db.idea_storage.delete(&id).await?;
    Ok(Json(ChangesResponse::new("deleted", changes)))
}

async fn apply_transition(
    db: &DbState,
    id: &str,
    transition: Transition,
) -> Result<Json<ChangesResponse>, ApiError> {
    let message = transition.message();
    info!("{}: {} -> {}", message, id, transition.status());

    let changes = db
        .idea_storage
        .update_fields(id, &transition.into_updates())
        .await?;

    Ok(Json(ChangesResponse::new(message, changes)))
}
