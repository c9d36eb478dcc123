//! Submission record rollups.
//!
//! Pure folds over the append-only record list. Everything here is
//! recomputed from the full list on demand; nothing is cached or stored.

use crate::models::{AggregatedStats, GenderCount, PromptSummary, SubmissionRecord};
use std::collections::{BTreeMap, HashSet};

/// Fold every demographics row of every record into display totals.
///
/// Total function: an empty input yields zero totals and empty
/// breakdowns, not an error. Iteration order does not affect the result.
pub fn aggregate(records: &[SubmissionRecord]) -> AggregatedStats {
    let mut stats = AggregatedStats::default();

    for record in records {
        *stats
            .office_breakdown
            .entry(record.office_name.clone())
            .or_default() += record.population();

        for row in &record.data {
            stats.total_male += row.male;
            stats.total_female += row.female;

            let entry = stats.age_breakdown.entry(row.age_group).or_default();
            entry.male += row.male;
            entry.female += row.female;
        }
    }

    stats
}

/// Condense the records into the compact summary the analysis prompt embeds.
///
/// Office distinctness is computed on the denormalized display name, so
/// two offices that happen to share a name count as one contributor.
pub fn summarize_for_report(records: &[SubmissionRecord]) -> PromptSummary {
    let mut by_age_group: BTreeMap<_, GenderCount> = BTreeMap::new();

    for record in records {
        for row in &record.data {
            let entry = by_age_group.entry(row.age_group).or_default();
            entry.male += row.male;
            entry.female += row.female;
        }
    }

    let offices: HashSet<&str> = records.iter().map(|r| r.office_name.as_str()).collect();

    PromptSummary {
        total_submissions: records.len(),
        contributing_offices: offices.len(),
        by_age_group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeGroup, Demographics};

    fn record(office_name: &str, rows: &[(AgeGroup, u64, u64)]) -> SubmissionRecord {
        let data = AgeGroup::ALL
            .iter()
            .map(|group| {
                let found = rows.iter().find(|(g, _, _)| g == group);
                Demographics {
                    age_group: *group,
                    male: found.map(|(_, m, _)| *m).unwrap_or(0),
                    female: found.map(|(_, _, f)| *f).unwrap_or(0),
                }
            })
            .collect();

        SubmissionRecord {
            id: format!("rec_test_{}", office_name),
            office_id: "off_test".to_string(),
            office_name: office_name.to_string(),
            timestamp: 0,
            data,
            notes: None,
        }
    }

    #[test]
    fn test_aggregate_empty_input() {
        let stats = aggregate(&[]);

        assert_eq!(stats.total_male, 0);
        assert_eq!(stats.total_female, 0);
        assert!(stats.age_breakdown.is_empty());
        assert!(stats.office_breakdown.is_empty());
        assert_eq!(stats.female_share(), 0.0);
    }

    #[test]
    fn test_aggregate_two_office_scenario() {
        let records = vec![
            record("Office A", &[(AgeGroup::Youth, 120, 135)]),
            record("Office B", &[(AgeGroup::Youth, 80, 90)]),
        ];

        let stats = aggregate(&records);

        assert_eq!(stats.total_male, 200);
        assert_eq!(stats.total_female, 225);
        assert_eq!(
            stats.age_breakdown[&AgeGroup::Youth],
            GenderCount {
                male: 200,
                female: 225
            }
        );
        assert_eq!(stats.office_breakdown["Office A"], 255);
        assert_eq!(stats.office_breakdown["Office B"], 170);
    }

    #[test]
    fn test_aggregate_totals_reconcile_with_rows() {
        let records = vec![
            record(
                "Office A",
                &[
                    (AgeGroup::Child, 45, 50),
                    (AgeGroup::Youth, 120, 135),
                    (AgeGroup::Adult, 300, 280),
                    (AgeGroup::Senior, 60, 75),
                ],
            ),
            record(
                "Office B",
                &[(AgeGroup::Child, 30, 25), (AgeGroup::Adult, 150, 160)],
            ),
        ];

        let stats = aggregate(&records);

        let row_sum: u64 = records
            .iter()
            .flat_map(|r| &r.data)
            .map(|d| d.male + d.female)
            .sum();
        assert_eq!(stats.total_male + stats.total_female, row_sum);

        let breakdown_male: u64 = stats.age_breakdown.values().map(|c| c.male).sum();
        let breakdown_female: u64 = stats.age_breakdown.values().map(|c| c.female).sum();
        assert_eq!(breakdown_male, stats.total_male);
        assert_eq!(breakdown_female, stats.total_female);

        let office_sum: u64 = stats.office_breakdown.values().sum();
        assert_eq!(office_sum, stats.total_population());
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let a = record("Office A", &[(AgeGroup::Youth, 120, 135)]);
        let b = record("Office B", &[(AgeGroup::Senior, 40, 45)]);

        assert_eq!(
            aggregate(&[a.clone(), b.clone()]),
            aggregate(&[b.clone(), a.clone()])
        );
    }

    #[test]
    fn test_summarize_counts_submissions_and_offices() {
        let records = vec![
            record("Office A", &[(AgeGroup::Child, 10, 20)]),
            record("Office B", &[(AgeGroup::Child, 5, 5)]),
            record("Office A", &[(AgeGroup::Senior, 1, 2)]),
        ];

        let summary = summarize_for_report(&records);

        assert_eq!(summary.total_submissions, 3);
        assert_eq!(summary.contributing_offices, 2);
        assert_eq!(
            summary.by_age_group[&AgeGroup::Child],
            GenderCount {
                male: 15,
                female: 25
            }
        );
    }

    #[test]
    fn test_summarize_distinctness_uses_display_name() {
        // Two records from different office ids with the same display
        // name count as a single contributor.
        let mut first = record("Regional Office", &[(AgeGroup::Adult, 10, 10)]);
        let mut second = record("Regional Office", &[(AgeGroup::Adult, 20, 20)]);
        first.office_id = "off_07".to_string();
        second.office_id = "off_08".to_string();

        let summary = summarize_for_report(&[first, second]);
        assert_eq!(summary.contributing_offices, 1);
    }

    #[test]
    fn test_summarize_empty_input() {
        let summary = summarize_for_report(&[]);

        assert_eq!(summary.total_submissions, 0);
        assert_eq!(summary.contributing_offices, 0);
        assert!(summary.by_age_group.is_empty());
    }
}
