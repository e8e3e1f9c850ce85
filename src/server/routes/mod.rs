mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::extract::{FromRequest, FromRequestParts};
use axum::Json;

use crate::db::Category;

use super::error::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// JSON body whose rejection is reported through the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Category id to display label, serialized as a JSON object keyed by id.
pub type CategoryMap = BTreeMap<i64, String>;

fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
