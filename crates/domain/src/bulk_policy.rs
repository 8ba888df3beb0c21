use serde::{Deserialize, Serialize};

/// Safety threshold for applying a template to many resources.
///
/// When the candidate total exceeds the limit, the surrounding flow asks for
/// a separate confirmation before applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPolicy {
    limit: u64,
}

impl BulkPolicy {
    /// Limit used when none is configured.
    pub const DEFAULT_LIMIT: u64 = 1;

    /// Creates a policy with the given limit.
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Returns the configured limit.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns whether the candidate total exceeds the limit.
    #[must_use]
    pub fn exceeds_limit(&self, total_candidate_count: u64) -> bool {
        total_candidate_count > self.limit
    }
}

impl Default for BulkPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::BulkPolicy;

    #[test]
    fn limit_is_inclusive() {
        let policy = BulkPolicy::new(1);
        assert!(!policy.exceeds_limit(0));
        assert!(!policy.exceeds_limit(1));
        assert!(policy.exceeds_limit(2));
    }

    #[test]
    fn default_limit_is_one() {
        assert_eq!(BulkPolicy::default().limit(), 1);
    }

    proptest! {
        #[test]
        fn exceeds_limit_matches_strict_comparison(limit in 0_u64..10_000, total in 0_u64..10_000) {
            prop_assert_eq!(BulkPolicy::new(limit).exceeds_limit(total), total > limit);
        }
    }
}
