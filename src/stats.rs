//! User plan/usage snapshot types.

use serde::{Deserialize, Serialize};

/// Credit balance at or above this value means "unlimited".
pub const UNLIMITED_CREDITS: u32 = 99_999;

/// Credits granted to a brand-new (or unreachable-backend) user.
pub const DEFAULT_CREDITS: u32 = 3;

/// Academic level used when none has been chosen yet.
pub const DEFAULT_ACADEMIC_LEVEL: &str = "N/A";

/// Subscription plan for a user.
///
/// Backends may report provider-specific plan strings beyond the two
/// well-known ones; those round-trip through [`Plan::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    Free,
    Unlimited,
    Other(String),
}

impl Plan {
    pub fn as_str(&self) -> &str {
        match self {
            Plan::Free => "free",
            Plan::Unlimited => "unlimited",
            Plan::Other(plan) => plan,
        }
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        match value.as_str() {
            "free" => Plan::Free,
            "unlimited" => Plan::Unlimited,
            _ => Plan::Other(value),
        }
    }
}

impl From<&str> for Plan {
    fn from(value: &str) -> Self {
        Plan::from(value.to_owned())
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        plan.as_str().to_owned()
    }
}

/// Where a published [`UserStats`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Fresh backend data.
    Network,
    /// A cached snapshot, fresh or stale.
    Cache,
    /// The hard-coded defaults.
    Default,
}

/// A snapshot of a user's plan/usage state.
///
/// Created or refreshed by a successful backend fetch; reconstructed
/// from the snapshot cache or from hard-coded defaults when the
/// backend is unreachable.
///
/// Serializes with camelCase keys, matching the `userData` persistence
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub current_plan: Plan,
    pub credits: u32,
    pub questions_marked: u32,
    pub academic_level: String,
}

impl UserStats {
    /// The hard-coded fallback published when no backend data and no
    /// cached snapshot are available.
    pub fn fallback() -> Self {
        Self {
            current_plan: Plan::Free,
            credits: DEFAULT_CREDITS,
            questions_marked: 0,
            academic_level: DEFAULT_ACADEMIC_LEVEL.to_owned(),
        }
    }

    /// True when the credit balance carries the unlimited sentinel.
    pub fn is_unlimited(&self) -> bool {
        self.credits >= UNLIMITED_CREDITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_round_trip() {
        assert_eq!(Plan::from("free"), Plan::Free);
        assert_eq!(Plan::from("unlimited"), Plan::Unlimited);
        assert_eq!(Plan::from("launch_monthly"), Plan::Other("launch_monthly".to_owned()));
        assert_eq!(String::from(Plan::Other("launch_monthly".to_owned())), "launch_monthly");
    }

    #[test]
    fn test_fallback_stats() {
        let stats = UserStats::fallback();
        assert_eq!(stats.current_plan, Plan::Free);
        assert_eq!(stats.credits, 3);
        assert_eq!(stats.questions_marked, 0);
        assert_eq!(stats.academic_level, "N/A");
        assert!(!stats.is_unlimited());
    }

    #[test]
    fn test_unlimited_sentinel() {
        let mut stats = UserStats::fallback();
        stats.credits = UNLIMITED_CREDITS;
        assert!(stats.is_unlimited());
        stats.credits = UNLIMITED_CREDITS + 500;
        assert!(stats.is_unlimited());
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = UserStats {
            current_plan: Plan::Unlimited,
            credits: 99_999,
            questions_marked: 42,
            academic_level: "N/A".to_owned(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["currentPlan"], "unlimited");
        assert_eq!(json["credits"], 99_999);
        assert_eq!(json["questionsMarked"], 42);
        assert_eq!(json["academicLevel"], "N/A");

        let back: UserStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
