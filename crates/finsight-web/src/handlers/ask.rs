use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use finsight_core::{AskError, AskRequest, MISSING_FIELDS_MESSAGE, answer_question};

use crate::error::ApiError;
use crate::models::{AskBody, AskResponse};
use crate::state::AppState;

pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskBody>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let request = AskRequest::new(
        body.context.unwrap_or_default(),
        body.question.unwrap_or_default(),
    );

    let answer = answer_question(
        state.generator.as_ref(),
        &state.generation_params,
        &request,
    )
    .await
    .map_err(|e| match e {
        AskError::MissingFields => ApiError::Validation(MISSING_FIELDS_MESSAGE.to_string()),
        AskError::Generation(err) => {
            tracing::warn!(error = %err, "generation failed");
            ApiError::Generation(err.to_string())
        }
    })?;

    Ok(Json(AskResponse {
        answer: answer.into_inner(),
    }))
}
