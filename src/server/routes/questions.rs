use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::{
            deserialize_number_from_string, deserialize_optional_text,
            deserialize_string_from_number,
        },
        error::ApiError,
        pagination::{paginate, PageQuery},
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{category_map, ApiJson, ApiPath, ApiQuery, ApiResponse, CategoryMap};

#[derive(Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    category: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(
        rename = "searchTerm",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len();
    let current = paginate(all, page);
    let categories = get_all_categories(&pool).await?;

    if current.is_empty() {
        return Err(ApiError::NotFound(format!("no questions on page {page}")));
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Deleted> {
    let deleted = questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable_store)?;
    if deleted == 0 {
        return Err(ApiError::Unprocessable(format!("question {id} does not exist")));
    }
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "Deleted question");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
        total_questions: questions::count_questions(&pool)
            .await
            .map_err(ApiError::unprocessable_store)?,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<CreateQuestion>,
) -> ApiResponse<Created> {
    let new_question = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::unprocessable_store)?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, category = %new_question.category, "Created question");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let term = match body.search_term {
        Some(term) if !term.is_empty() => term,
        _ => return Err(ApiError::NotFound("empty search term".to_owned())),
    };
    let found = questions::search_questions(&pool, &term).await?;
    Ok(Json(SearchResults {
        success: true,
        total_questions: found.len(),
        questions: found,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
