//! Payment method eligibility policy.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which payment methods make an advertisement eligible.
///
/// `Allow` keeps advertisements exposing at least one listed method;
/// `Deny` keeps advertisements exposing at least one method not listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PaymentPolicy {
    Allow(HashSet<CompactString>),
    Deny(HashSet<CompactString>),
}

impl PaymentPolicy {
    pub fn allow<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        PaymentPolicy::Allow(methods.into_iter().map(Into::into).collect())
    }

    pub fn deny<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        PaymentPolicy::Deny(methods.into_iter().map(Into::into).collect())
    }

    /// Whether a single method is acceptable under this policy.
    pub fn permits(&self, method: &str) -> bool {
        match self {
            PaymentPolicy::Allow(set) => set.contains(method),
            PaymentPolicy::Deny(set) => !set.contains(method),
        }
    }

    /// Whether any of the methods is acceptable.
    pub fn permits_any(&self, methods: &[CompactString]) -> bool {
        methods.iter().any(|m| self.permits(m))
    }

    /// Keep only the acceptable methods, preserving order.
    pub fn filter(&self, methods: &[CompactString]) -> Vec<CompactString> {
        methods
            .iter()
            .filter(|m| self.permits(m))
            .cloned()
            .collect()
    }
}

impl Default for PaymentPolicy {
    /// The bank-transfer family the settlement account can receive from.
    fn default() -> Self {
        PaymentPolicy::allow(["Bank Transfer", "Faster Payment", "Instant Transfer"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn methods(names: &[&str]) -> Vec<CompactString> {
        names.iter().map(|n| CompactString::new(n)).collect()
    }

    #[test]
    fn test_allow_list() {
        let policy = PaymentPolicy::default();
        assert!(policy.permits("Bank Transfer"));
        assert!(!policy.permits("Cash in Person"));
        assert!(policy.permits_any(&methods(&["Cash in Person", "Faster Payment"])));
        assert!(!policy.permits_any(&methods(&["Cash in Person", "Wise"])));
    }

    #[test]
    fn test_deny_list() {
        let policy = PaymentPolicy::deny(["Cash in Person"]);
        assert!(policy.permits("Bank Transfer"));
        assert!(!policy.permits("Cash in Person"));
        assert!(policy.permits_any(&methods(&["Cash in Person", "Wise"])));
        assert!(!policy.permits_any(&methods(&["Cash in Person"])));
    }

    #[test]
    fn test_filter_preserves_order() {
        let policy = PaymentPolicy::default();
        let filtered = policy.filter(&methods(&[
            "Instant Transfer",
            "Cash in Person",
            "Bank Transfer",
        ]));
        assert_eq!(filtered, methods(&["Instant Transfer", "Bank Transfer"]));
    }
}
