// src/web/index.rs
// =============================================================================
// The index page: the latest questions rendered through the page template.
// =============================================================================

use super::render::{render, Context, INDEX_TEMPLATE};
use super::{ApiError, AppState};
use axum::extract::State;
use axum::response::Html;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let latest = state.questions.latest(state.latest_limit);
    tracing::debug!(count = latest.len(), "rendering index");

    let mut context = Context::new();
    context.insert("latest_question_list".to_string(), serde_json::to_value(&latest)?);

    Ok(Html(render(INDEX_TEMPLATE, &context)?))
}
