//! Page size policy.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 2;

/// Hard ceiling on the page size regardless of what the caller asks for.
pub const MAX_LIMIT: u32 = 50;

/// Page size policy handed to [`paginate`](crate::paginate) by the caller.
///
/// `max_limit` can lower the ceiling but never raise it past [`MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    #[inline]
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PaginationConfig {
    #[inline]
    pub const fn new(default_limit: u32, max_limit: u32) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Resolve the page size for a request.
    ///
    /// Absent and non-positive requests fall back to the default; anything
    /// above the ceiling is clamped to it. The result is never zero.
    pub fn effective_limit(&self, requested: Option<i64>) -> u32 {
        let ceiling = self.max_limit.clamp(1, MAX_LIMIT);
        let requested = match requested {
            Some(limit) if limit > 0 => u32::try_from(limit).unwrap_or(u32::MAX),
            _ => self.default_limit,
        };
        requested.clamp(1, ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_limit_uses_default() {
        let config = PaginationConfig::default();
        assert_eq!(config.effective_limit(None), 2);
    }

    #[test]
    fn non_positive_limit_uses_default() {
        let config = PaginationConfig::default();
        assert_eq!(config.effective_limit(Some(0)), 2);
        assert_eq!(config.effective_limit(Some(-7)), 2);
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let config = PaginationConfig::default();
        assert_eq!(config.effective_limit(Some(1000)), 50);
        assert_eq!(config.effective_limit(Some(i64::MAX)), 50);
    }

    #[test]
    fn default_above_ceiling_is_clamped() {
        let config = PaginationConfig::new(80, 25);
        assert_eq!(config.effective_limit(None), 25);
    }

    #[test]
    fn configured_ceiling_cannot_exceed_hard_limit() {
        let config = PaginationConfig::new(2, 1000);
        assert_eq!(config.effective_limit(Some(1000)), MAX_LIMIT);
        assert_eq!(PaginationConfig::new(100, 1000).effective_limit(None), MAX_LIMIT);
    }

    #[test]
    fn zero_config_still_yields_one() {
        let config = PaginationConfig::new(0, 0);
        assert_eq!(config.effective_limit(None), 1);
        assert_eq!(config.effective_limit(Some(10)), 1);
    }
}
