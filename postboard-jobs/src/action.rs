//! What a post-processing job does to a post.

use std::fmt;
use std::str::FromStr;

use postboard_db::PostStatus;
use serde::{Deserialize, Serialize};

use crate::error::JobError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostAction {
    #[default]
    Process,
    Publish,
    Archive,
}

impl PostAction {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Publish => "publish",
            Self::Archive => "archive",
        }
    }

    /// Status a post ends up in once the action has been applied.
    #[inline]
    pub const fn target_status(self) -> PostStatus {
        match self {
            Self::Process => PostStatus::Processed,
            Self::Publish => PostStatus::Published,
            Self::Archive => PostStatus::Archived,
        }
    }
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostAction {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Self::Process),
            "publish" => Ok(Self::Publish),
            "archive" => Ok(Self::Archive),
            other => Err(JobError::InvalidPayload(format!("unknown action '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_lowercase_names() {
        let action: PostAction = serde_json::from_value(json!("publish")).unwrap();
        assert_eq!(action, PostAction::Publish);
        assert_eq!(action.target_status(), PostStatus::Published);
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(serde_json::from_value::<PostAction>(json!("delete")).is_err());
        assert!("delete".parse::<PostAction>().is_err());
    }

    #[test]
    fn from_str_matches_wire_names() {
        for action in [PostAction::Process, PostAction::Publish, PostAction::Archive] {
            assert_eq!(action.as_str().parse::<PostAction>().unwrap(), action);
        }
    }
}
