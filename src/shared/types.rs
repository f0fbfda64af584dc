use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

/// Accepts a form value sent either as a JSON string or a JSON number and
/// keeps it as text; `null` becomes an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawValue>::deserialize(deserializer)? {
        Some(RawValue::Text(text)) => text,
        Some(RawValue::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Field {
        #[serde(default, deserialize_with = "string_or_number")]
        value: String,
    }

    #[test]
    fn test_string_or_number_keeps_text_form() {
        let parse = |v: serde_json::Value| serde_json::from_value::<Field>(v).unwrap().value;

        assert_eq!(parse(json!({ "value": "-6.2088" })), "-6.2088");
        assert_eq!(parse(json!({ "value": 7 })), "7");
        assert_eq!(parse(json!({ "value": 106.8456 })), "106.8456");
        assert_eq!(parse(json!({ "value": null })), "");
        assert_eq!(parse(json!({})), "");
    }
}
