//! Launch period benefit.
//!
//! During the launch window, usage counters arrived under two
//! different field names depending on backend vintage
//! (`questions_marked` vs `evaluations_used`). The benefit unifies
//! whichever variant is present into both normalized fields so display
//! code sees a single consistent number. After the cutoff the function
//! is a pass-through.
//!
//! Applied after every successful or fallback stats resolution.
//! Idempotent: applying it twice equals applying it once.

use chrono::{DateTime, TimeZone, Utc};

use crate::backend::UserRecord;

/// Default launch-period cutoff: 2025-09-01T00:00:00Z.
pub fn default_launch_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Applies the launch benefit to a merged record, in place.
///
/// No-op once `now` has passed `cutoff`.
pub fn apply_launch_benefit(record: &mut UserRecord, now: DateTime<Utc>, cutoff: DateTime<Utc>) {
    if now >= cutoff {
        return;
    }

    let unified = record.questions_marked().or(record.evaluations_used());
    record.questions_marked_camel = unified;
    record.questions_marked = None;
    record.evaluations_used_camel = unified;
    record.evaluations_used = None;
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record_with_evaluations(evaluations: u32) -> UserRecord {
        UserRecord {
            evaluations_used: Some(evaluations),
            ..UserRecord::default()
        }
    }

    #[test]
    fn test_unifies_variant_fields_before_cutoff() {
        let cutoff = Utc::now();
        let before = cutoff - Duration::days(1);

        let mut record = record_with_evaluations(12);
        apply_launch_benefit(&mut record, before, cutoff);

        assert_eq!(record.questions_marked(), Some(12));
        assert_eq!(record.evaluations_used(), Some(12));
    }

    #[test]
    fn test_noop_after_cutoff() {
        let cutoff = Utc::now();
        let after = cutoff + Duration::seconds(1);

        let mut record = record_with_evaluations(12);
        let original = record.clone();
        apply_launch_benefit(&mut record, after, cutoff);

        assert_eq!(record, original);
        assert_eq!(record.questions_marked(), None);
    }

    #[test]
    fn test_idempotent() {
        let cutoff = Utc::now();
        let before = cutoff - Duration::days(1);

        let mut once = UserRecord {
            questions_marked: Some(5),
            evaluations_used: Some(9),
            ..UserRecord::default()
        };
        apply_launch_benefit(&mut once, before, cutoff);

        let mut twice = once.clone();
        apply_launch_benefit(&mut twice, before, cutoff);

        assert_eq!(once, twice);
        // present questions_marked wins over evaluations_used
        assert_eq!(once.questions_marked(), Some(5));
        assert_eq!(once.evaluations_used(), Some(5));
    }

    #[test]
    fn test_exact_cutoff_instant_is_noop() {
        let cutoff = Utc::now();
        let mut record = record_with_evaluations(3);
        apply_launch_benefit(&mut record, cutoff, cutoff);
        assert_eq!(record.questions_marked(), None);
    }
}
