use std::collections::HashMap;

use crate::error::ApiError;

pub fn parse_positive_usize(
    raw: Option<&String>,
    fallback: usize,
    field: &str,
) -> Result<usize, ApiError> {
    match raw {
        Some(value) => {
            let parsed = value.parse::<usize>().map_err(|_| {
                ApiError::bad_request(format!("{field} must be a positive integer"))
            })?;
            if parsed == 0 {
                return Err(ApiError::bad_request(format!("{field} must be at least 1")));
            }
            Ok(parsed)
        }
        None => Ok(fallback),
    }
}

/// Read an integer id out of the path parameters.
pub fn parse_id_param(path: &HashMap<String, String>, key: &str) -> Result<i64, ApiError> {
    let raw = path
        .get(key)
        .ok_or_else(|| ApiError::bad_request(format!("missing {key} path parameter")))?;
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("{key} must be an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_usize_falls_back_when_absent() {
        assert_eq!(parse_positive_usize(None, 20, "perPage").unwrap(), 20);
    }

    #[test]
    fn positive_usize_rejects_zero_and_garbage() {
        let zero = "0".to_string();
        let junk = "abc".to_string();
        assert!(parse_positive_usize(Some(&zero), 1, "page").is_err());
        assert!(parse_positive_usize(Some(&junk), 1, "page").is_err());
    }

    #[test]
    fn id_param_must_be_integer() {
        let mut path = HashMap::new();
        path.insert("postId".to_string(), "12".to_string());
        assert_eq!(parse_id_param(&path, "postId").unwrap(), 12);

        path.insert("postId".to_string(), "twelve".to_string());
        assert!(matches!(
            parse_id_param(&path, "postId"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
