use serde::Deserialize;

use super::deserializers::deserialize_page;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

/// Slice of `items` shown on `page`, counting from 1. Pages outside the range are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    let Some(skip) = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    else {
        return Vec::new();
    };
    items.into_iter().skip(skip).take(QUESTIONS_PER_PAGE).collect()
}
