//! Data models for the demographics tracker.
//!
//! This module contains all the core data structures used throughout
//! the application for representing offices, demographic rows, and
//! submission records.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four fixed population age buckets.
///
/// The set is closed: data entry and reporting both iterate `ALL`, and
/// every consumption site matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Children, 0-14 years old
    #[serde(rename = "0-14")]
    Child,
    /// Youth, 15-24 years old
    #[serde(rename = "15-24")]
    Youth,
    /// Working-age adults, 25-59 years old
    #[serde(rename = "25-59")]
    Adult,
    /// Seniors, 60 years and older
    #[serde(rename = "60+")]
    Senior,
}

impl AgeGroup {
    /// All buckets in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Child,
        AgeGroup::Youth,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    /// Returns the bucket label used for display and serialization.
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Child => "0-14",
            AgeGroup::Youth => "15-24",
            AgeGroup::Adult => "25-59",
            AgeGroup::Senior => "60+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Parse a headcount entered by the user, clamping invalid input to zero.
///
/// Negative numbers and anything that does not parse as an integer become
/// 0. Out-of-range input is a policy, not an error: submission must never
/// be blocked by a malformed count.
pub fn parse_count(input: &str) -> u64 {
    input
        .trim()
        .parse::<i64>()
        .map(|n| n.max(0) as u64)
        .unwrap_or(0)
}

/// Male/female counts for one slice of the population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub male: u64,
    pub female: u64,
}

impl GenderCount {
    /// Combined male and female count.
    pub fn total(&self) -> u64 {
        self.male + self.female
    }

    /// Parse a `male,female` pair from user input.
    ///
    /// A missing female component counts as 0; each component is clamped
    /// with [`parse_count`].
    pub fn from_input(input: &str) -> Self {
        let mut parts = input.splitn(2, ',');
        let male = parse_count(parts.next().unwrap_or(""));
        let female = parse_count(parts.next().unwrap_or("0"));
        Self { male, female }
    }
}

/// One age-group row of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(rename = "ageGroup")]
    pub age_group: AgeGroup,
    pub male: u64,
    pub female: u64,
}

/// A contributing office from the static reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: String,
    pub name: String,
    pub region: String,
}

/// One office's demographic headcount entry at a point in time.
///
/// Records are append-only: once created they are never edited or
/// deleted. The JSON field names match the original browser database so
/// previously persisted payloads remain readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Unique id, generated at creation.
    pub id: String,
    #[serde(rename = "officeId")]
    pub office_id: String,
    /// Copied from the office at submission time so historical records
    /// stay readable if an office is later renamed.
    #[serde(rename = "officeName")]
    pub office_name: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Exactly one row per age group, in bucket order.
    pub data: Vec<Demographics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SubmissionRecord {
    /// Create a record for an office from one gender count per age group.
    pub fn new(office: &Office, counts: [GenderCount; 4], notes: Option<String>) -> Self {
        let now = Utc::now().timestamp_millis();
        let data = AgeGroup::ALL
            .iter()
            .zip(counts)
            .map(|(group, count)| Demographics {
                age_group: *group,
                male: count.male,
                female: count.female,
            })
            .collect();

        Self {
            id: format!("rec_{}", now),
            office_id: office.id.clone(),
            office_name: office.name.clone(),
            timestamp: now,
            data,
            notes,
        }
    }

    /// Total population reported in this record.
    pub fn population(&self) -> u64 {
        self.data.iter().map(|d| d.male + d.female).sum()
    }
}

/// Rollup of the full record list, recomputed on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedStats {
    pub total_male: u64,
    pub total_female: u64,
    /// Per-age-group male/female totals.
    pub age_breakdown: BTreeMap<AgeGroup, GenderCount>,
    /// Total population keyed by office display name.
    pub office_breakdown: BTreeMap<String, u64>,
}

impl AggregatedStats {
    /// Combined population across all records.
    pub fn total_population(&self) -> u64 {
        self.total_male + self.total_female
    }

    /// Female share of the total population as a percentage.
    ///
    /// Defined as 0 when there is no population at all, never NaN.
    pub fn female_share(&self) -> f64 {
        let total = self.total_population();
        if total == 0 {
            0.0
        } else {
            (self.total_female as f64 / total as f64) * 100.0
        }
    }
}

/// Compact rollup embedded in the analysis prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptSummary {
    pub total_submissions: usize,
    /// Count of distinct office display names. Two offices that share a
    /// display name count as one contributor.
    pub contributing_offices: usize,
    pub by_age_group: BTreeMap<AgeGroup, GenderCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_office() -> Office {
        Office {
            id: "off_01".to_string(),
            name: "Headquarters - Manila".to_string(),
            region: "NCR".to_string(),
        }
    }

    #[test]
    fn test_age_group_ordering() {
        assert!(AgeGroup::Child < AgeGroup::Youth);
        assert!(AgeGroup::Youth < AgeGroup::Adult);
        assert!(AgeGroup::Adult < AgeGroup::Senior);
    }

    #[test]
    fn test_age_group_labels() {
        assert_eq!(AgeGroup::Child.label(), "0-14");
        assert_eq!(AgeGroup::Youth.label(), "15-24");
        assert_eq!(AgeGroup::Adult.label(), "25-59");
        assert_eq!(AgeGroup::Senior.label(), "60+");
    }

    #[test]
    fn test_age_group_serde_labels() {
        let json = serde_json::to_string(&AgeGroup::Senior).unwrap();
        assert_eq!(json, "\"60+\"");

        let parsed: AgeGroup = serde_json::from_str("\"15-24\"").unwrap();
        assert_eq!(parsed, AgeGroup::Youth);
    }

    #[test]
    fn test_parse_count_clamps_invalid_input() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn test_gender_count_from_input() {
        assert_eq!(
            GenderCount::from_input("120,135"),
            GenderCount {
                male: 120,
                female: 135
            }
        );
        assert_eq!(
            GenderCount::from_input("7"),
            GenderCount { male: 7, female: 0 }
        );
        assert_eq!(
            GenderCount::from_input("abc,-5"),
            GenderCount { male: 0, female: 0 }
        );
    }

    #[test]
    fn test_record_has_one_row_per_age_group() {
        let counts = [
            GenderCount { male: 1, female: 2 },
            GenderCount { male: 3, female: 4 },
            GenderCount { male: 5, female: 6 },
            GenderCount { male: 7, female: 8 },
        ];
        let record = SubmissionRecord::new(&test_office(), counts, None);

        assert_eq!(record.data.len(), 4);
        for (row, group) in record.data.iter().zip(AgeGroup::ALL) {
            assert_eq!(row.age_group, group);
        }
        assert_eq!(record.population(), 36);
        assert_eq!(record.office_name, "Headquarters - Manila");
        assert!(record.id.starts_with("rec_"));
    }

    #[test]
    fn test_record_serializes_with_original_field_names() {
        let record = SubmissionRecord::new(&test_office(), [GenderCount::default(); 4], None);
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"officeId\""));
        assert!(json.contains("\"officeName\""));
        assert!(json.contains("\"ageGroup\""));
        // Absent notes are omitted entirely, as the original payload did.
        assert!(!json.contains("\"notes\""));
    }

    #[test]
    fn test_female_share_is_zero_for_empty_population() {
        let stats = AggregatedStats::default();
        assert_eq!(stats.female_share(), 0.0);
    }

    #[test]
    fn test_female_share() {
        let stats = AggregatedStats {
            total_male: 200,
            total_female: 225,
            ..Default::default()
        };
        assert!((stats.female_share() - 52.94117647058824).abs() < 1e-9);
        assert_eq!(stats.total_population(), 425);
    }
}
