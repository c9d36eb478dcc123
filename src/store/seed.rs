//! Static reference data.
//!
//! The office list and the bootstrap records used when the durable store
//! is empty or unreadable.

use crate::models::{AgeGroup, Demographics, Office, SubmissionRecord};
use chrono::{Duration, Utc};

/// The static office reference list. Offices are never mutated at runtime.
pub fn offices() -> Vec<Office> {
    vec![
        office("off_01", "Headquarters - Manila", "NCR"),
        office("off_02", "Regional Office - Cebu", "Visayas"),
        office("off_03", "Regional Office - Davao", "Mindanao"),
        office("off_04", "Satellite Office - Baguio", "Luzon"),
    ]
}

/// Look up an office by id.
pub fn find_office(id: &str) -> Option<Office> {
    offices().into_iter().find(|o| o.id == id)
}

/// Two demonstration records used to bootstrap an empty store.
pub fn seed_records() -> Vec<SubmissionRecord> {
    let now = Utc::now();

    vec![
        SubmissionRecord {
            id: "rec_init_1".to_string(),
            office_id: "off_01".to_string(),
            office_name: "Headquarters - Manila".to_string(),
            timestamp: (now - Duration::days(1)).timestamp_millis(),
            data: vec![
                row(AgeGroup::Child, 45, 50),
                row(AgeGroup::Youth, 120, 135),
                row(AgeGroup::Adult, 300, 280),
                row(AgeGroup::Senior, 60, 75),
            ],
            notes: None,
        },
        SubmissionRecord {
            id: "rec_init_2".to_string(),
            office_id: "off_02".to_string(),
            office_name: "Regional Office - Cebu".to_string(),
            timestamp: (now - Duration::days(2)).timestamp_millis(),
            data: vec![
                row(AgeGroup::Child, 30, 25),
                row(AgeGroup::Youth, 80, 90),
                row(AgeGroup::Adult, 150, 160),
                row(AgeGroup::Senior, 40, 45),
            ],
            notes: None,
        },
    ]
}

fn office(id: &str, name: &str, region: &str) -> Office {
    Office {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
    }
}

fn row(age_group: AgeGroup, male: u64, female: u64) -> Demographics {
    Demographics {
        age_group,
        male,
        female,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_ids_are_unique() {
        let offices = offices();
        for office in &offices {
            assert_eq!(offices.iter().filter(|o| o.id == office.id).count(), 1);
        }
    }

    #[test]
    fn test_find_office() {
        let office = find_office("off_02").unwrap();
        assert_eq!(office.name, "Regional Office - Cebu");
        assert_eq!(office.region, "Visayas");

        assert!(find_office("off_99").is_none());
    }

    #[test]
    fn test_seed_records_are_complete_submissions() {
        let records = seed_records();
        assert_eq!(records.len(), 2);

        for record in &records {
            assert_eq!(record.data.len(), 4);
            for (row, group) in record.data.iter().zip(AgeGroup::ALL) {
                assert_eq!(row.age_group, group);
            }
            assert!(find_office(&record.office_id).is_some());
        }

        assert_eq!(records[0].population(), 1265);
        assert_eq!(records[1].population(), 620);
    }
}
