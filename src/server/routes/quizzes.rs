use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_remaining_questions, Question},
    server::{app::AppState, deserializers::deserialize_optional_text, error::ApiError},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiJson, ApiResponse};

/// Category type the client sends when the quiz spans every category.
pub const ALL_CATEGORIES: &str = "click";

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizRequest>,
) -> ApiResponse<QuizQuestion> {
    let category = if body.quiz_category.kind == ALL_CATEGORIES {
        None
    } else {
        let id = body.quiz_category.id.ok_or_else(|| {
            ApiError::Unprocessable(format!(
                "quiz category {} has no id",
                body.quiz_category.kind
            ))
        })?;
        Some(id)
    };
    let remaining = get_remaining_questions(&pool, category.as_deref(), &body.previous_questions)
        .await
        .map_err(ApiError::unprocessable_store)?;

    let question = remaining.choose(&mut rand::thread_rng()).cloned();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[category.as_deref().unwrap_or("all")])
                .inc();
            tracing::debug!(id = q.id, remaining = remaining.len(), "Picked quiz question");
        }
        None => tracing::debug!("Quiz pool exhausted"),
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
