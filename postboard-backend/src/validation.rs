//! Field-level validation issues reported as 422 responses.

use std::collections::BTreeMap;

use serde::Serialize;

/// One problem with one request field. `code` is machine readable
/// (`blank`, `too_long`, ...); `message` is shown to people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// A required field that was missing or only whitespace.
    pub fn blank(field: &str) -> Self {
        Self::new(field, "blank", format!("{field} can't be blank"))
    }
}

#[derive(Serialize)]
struct FieldProblem<'a> {
    code: &'a str,
    message: &'a str,
}

/// Issues keyed by field name. Only the first issue for a field is kept.
pub fn to_payload(issues: &[ValidationIssue]) -> serde_json::Value {
    let mut by_field: BTreeMap<&str, FieldProblem<'_>> = BTreeMap::new();
    for issue in issues {
        by_field.entry(issue.field.as_str()).or_insert(FieldProblem {
            code: &issue.code,
            message: &issue.message,
        });
    }
    serde_json::to_value(by_field).unwrap_or_default()
}

pub fn summary(issues: &[ValidationIssue]) -> String {
    let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_issue_per_field_wins() {
        let issues = vec![
            ValidationIssue::blank("title"),
            ValidationIssue::new("title", "too_long", "title must be <= 200 chars"),
            ValidationIssue::blank("author"),
        ];
        assert_eq!(
            to_payload(&issues),
            json!({
                "author": { "code": "blank", "message": "author can't be blank" },
                "title": { "code": "blank", "message": "title can't be blank" },
            })
        );
        assert_eq!(
            summary(&issues),
            "title can't be blank, title must be <= 200 chars, author can't be blank"
        );
    }
}
