use serde::{Deserialize, Deserializer};

pub use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_string_from_number,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum PageValue {
    Number(i64),
    Text(String),
}

// query strings carry the page as text; anything that is not an integer means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<PageValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(PageValue::Number(page)) => page,
        Some(PageValue::Text(text)) => text.trim().parse().unwrap_or(1),
        None => 1,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

// optional text that clients sometimes send as a bare number; null reads as absent
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Term {
        #[serde(default, deserialize_with = "deserialize_optional_text")]
        term: Option<String>,
    }

    #[test]
    fn optional_text_from_any_scalar() {
        let t: Term = serde_json::from_str(r#"{"term": "moon"}"#).unwrap();
        assert_eq!(t.term.as_deref(), Some("moon"));
        let t: Term = serde_json::from_str(r#"{"term": 1969}"#).unwrap();
        assert_eq!(t.term.as_deref(), Some("1969"));
        let t: Term = serde_json::from_str(r#"{"term": null}"#).unwrap();
        assert_eq!(t.term, None);
        let t: Term = serde_json::from_str("{}").unwrap();
        assert_eq!(t.term, None);
    }

    #[test]
    fn optional_text_rejects_structures() {
        assert!(serde_json::from_str::<Term>(r#"{"term": [1]}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Page {
        #[serde(deserialize_with = "deserialize_page")]
        page: i64,
    }

    #[derive(Deserialize)]
    struct Scalars {
        #[serde(deserialize_with = "deserialize_string_from_number")]
        category: String,
        #[serde(deserialize_with = "deserialize_number_from_string")]
        difficulty: i64,
    }

    #[test]
    fn page_from_text_or_number() {
        let page: Page = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(page.page, 3);
        let page: Page = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(page.page, 2);
        let page: Page = serde_json::from_str(r#"{"page": "-1"}"#).unwrap();
        assert_eq!(page.page, -1);
    }

    #[test]
    fn garbage_page_is_first_page() {
        let page: Page = serde_json::from_str(r#"{"page": "two"}"#).unwrap();
        assert_eq!(page.page, 1);
        let page: Page = serde_json::from_str(r#"{"page": null}"#).unwrap();
        assert_eq!(page.page, 1);
    }

    #[test]
    fn scalars_accept_either_representation() {
        let s: Scalars = serde_json::from_str(r#"{"category": 4, "difficulty": "2"}"#).unwrap();
        assert_eq!(s.category, "4");
        assert_eq!(s.difficulty, 2);
        let s: Scalars = serde_json::from_str(r#"{"category": "4", "difficulty": 5}"#).unwrap();
        assert_eq!(s.category, "4");
        assert_eq!(s.difficulty, 5);
    }

    #[test]
    fn non_numeric_difficulty_is_rejected() {
        assert!(
            serde_json::from_str::<Scalars>(r#"{"category": "1", "difficulty": "hard"}"#).is_err()
        );
    }
}
