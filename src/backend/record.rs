//! Wire-shape user records with dual-cased field names.
//!
//! The backend reports the same logical fields under snake_case or
//! camelCase names depending on the endpoint and deploy vintage. Both
//! spellings are accepted; when a record carries both, the camelCase
//! (normalized) one wins.

use serde::{Deserialize, Serialize};

use crate::stats::{DEFAULT_ACADEMIC_LEVEL, DEFAULT_CREDITS, Plan, UserStats};

/// A raw profile/stats record as returned by the backend.
///
/// All fields are optional; a record usually carries only a subset.
/// Use the accessor methods rather than the fields directly so the
/// camelCase-wins rule is applied consistently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<String>,
    #[serde(rename = "currentPlan", default, skip_serializing_if = "Option::is_none")]
    pub current_plan_camel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_marked: Option<u32>,
    #[serde(rename = "questionsMarked", default, skip_serializing_if = "Option::is_none")]
    pub questions_marked_camel: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_level: Option<String>,
    #[serde(rename = "academicLevel", default, skip_serializing_if = "Option::is_none")]
    pub academic_level_camel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluations_used: Option<u32>,
    #[serde(rename = "evaluationsUsed", default, skip_serializing_if = "Option::is_none")]
    pub evaluations_used_camel: Option<u32>,
}

impl UserRecord {
    /// Plan string, camelCase field winning when both are present.
    pub fn plan(&self) -> Option<&str> {
        self.current_plan_camel
            .as_deref()
            .or(self.current_plan.as_deref())
    }

    pub fn credits(&self) -> Option<u32> {
        self.credits
    }

    pub fn questions_marked(&self) -> Option<u32> {
        self.questions_marked_camel.or(self.questions_marked)
    }

    pub fn academic_level(&self) -> Option<&str> {
        self.academic_level_camel
            .as_deref()
            .or(self.academic_level.as_deref())
    }

    pub fn evaluations_used(&self) -> Option<u32> {
        self.evaluations_used_camel.or(self.evaluations_used)
    }

    /// Merges this record with `overlay`, producing a normalized record.
    ///
    /// Field-wise: the overlay's value wins wherever it has one. The
    /// result carries only normalized (camelCase) fields.
    pub fn merged_with(&self, overlay: &UserRecord) -> UserRecord {
        UserRecord {
            current_plan_camel: overlay
                .plan()
                .or_else(|| self.plan())
                .map(str::to_owned),
            credits: overlay.credits().or_else(|| self.credits()),
            questions_marked_camel: overlay
                .questions_marked()
                .or_else(|| self.questions_marked()),
            academic_level_camel: overlay
                .academic_level()
                .or_else(|| self.academic_level())
                .map(str::to_owned),
            evaluations_used_camel: overlay
                .evaluations_used()
                .or_else(|| self.evaluations_used()),
            ..UserRecord::default()
        }
    }

    /// Converts the record into published stats, filling missing
    /// fields with the hard-coded defaults.
    pub fn into_stats(self) -> UserStats {
        UserStats {
            current_plan: self.plan().map(Plan::from).unwrap_or(Plan::Free),
            credits: self.credits().unwrap_or(DEFAULT_CREDITS),
            questions_marked: self.questions_marked().unwrap_or(0),
            academic_level: self
                .academic_level()
                .unwrap_or(DEFAULT_ACADEMIC_LEVEL)
                .to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wins() {
        let record: UserRecord = serde_json::from_str(
            r#"{"current_plan": "free", "currentPlan": "unlimited", "questions_marked": 7}"#,
        )
        .unwrap();

        assert_eq!(record.plan(), Some("unlimited"));
        assert_eq!(record.questions_marked(), Some(7));
    }

    #[test]
    fn test_merge_overlay_wins() {
        let profile: UserRecord = serde_json::from_str(
            r#"{"current_plan": "unlimited", "credits": 99999, "academic_level": "gcse"}"#,
        )
        .unwrap();
        let stats: UserRecord =
            serde_json::from_str(r#"{"questions_marked": 42, "academic_level": "alevel"}"#)
                .unwrap();

        let merged = profile.merged_with(&stats);
        assert_eq!(merged.plan(), Some("unlimited"));
        assert_eq!(merged.credits(), Some(99_999));
        assert_eq!(merged.questions_marked(), Some(42));
        // overlay had a value, so it wins
        assert_eq!(merged.academic_level(), Some("alevel"));
    }

    #[test]
    fn test_into_stats_fills_defaults() {
        let record: UserRecord =
            serde_json::from_str(r#"{"currentPlan": "unlimited", "credits": 99999}"#).unwrap();
        let stats = record.into_stats();

        assert_eq!(stats.current_plan, Plan::Unlimited);
        assert_eq!(stats.credits, 99_999);
        assert_eq!(stats.questions_marked, 0);
        assert_eq!(stats.academic_level, "N/A");
    }

    #[test]
    fn test_empty_record_yields_fallback_shape() {
        let stats = UserRecord::default().into_stats();
        assert_eq!(stats, UserStats::fallback());
    }
}
