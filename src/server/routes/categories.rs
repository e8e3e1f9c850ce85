use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::{category_map, ApiPath, ApiResponse, CategoryMap};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories stored".to_owned()));
    }
    Ok(Json(CategoriesBody {
        success: true,
        categories: category_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<CategoryQuestionsBody> {
    let questions = get_questions_for_category(&pool, &id.to_string())
        .await
        .map_err(ApiError::not_found_store)?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
