//! Property tests for the aggregation invariants.

use duo_aggregate::{AggregateOptions, filter_by_values, share_of_total, weighted_rate};
use duo_model::{ColumnMapping, SemanticLabel};
use polars::prelude::*;
use proptest::prelude::*;

const SECTORS: [&str; 4] = ["ict", "onderwijs", "techniek", "zorg"];

fn mapping() -> ColumnMapping {
    ColumnMapping::new()
        .with(SemanticLabel::Sector, "sector")
        .with(SemanticLabel::AantalStudenten, "n")
        .with(SemanticLabel::DoorstroomIndicator, "door")
}

fn rows() -> impl Strategy<Value = Vec<(usize, i64, bool)>> {
    prop::collection::vec((0..SECTORS.len(), 0i64..500, any::<bool>()), 1..40)
}

fn frame(rows: &[(usize, i64, bool)]) -> DataFrame {
    let sectors: Vec<&str> = rows.iter().map(|(s, _, _)| SECTORS[*s]).collect();
    let counts: Vec<i64> = rows.iter().map(|(_, n, _)| *n).collect();
    let flags: Vec<i64> = rows.iter().map(|(_, _, d)| i64::from(*d)).collect();
    df!("sector" => sectors, "n" => counts, "door" => flags).unwrap()
}

proptest! {
    #[test]
    fn overall_rate_is_a_percentage(rows in rows()) {
        let df = frame(&rows);
        let total: i64 = rows.iter().map(|(_, n, _)| n).sum();
        let result = weighted_rate(&df, &mapping(), &[], &AggregateOptions::default()).unwrap();
        if total == 0 {
            prop_assert!(result.is_none());
        } else {
            let pct = result.unwrap().rows[0].percentage.unwrap();
            prop_assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn groups_partition_the_weight(rows in rows()) {
        let df = frame(&rows);
        let total: i64 = rows.iter().map(|(_, n, _)| n).sum();
        let table = weighted_rate(
            &df,
            &mapping(),
            &[SemanticLabel::Sector],
            &AggregateOptions::default(),
        )
        .unwrap()
        .unwrap();
        prop_assert_eq!(table.total_weight(), total as f64);
        let mut keys: Vec<_> = table.rows.iter().map(|row| row.key.clone()).collect();
        let sorted = {
            let mut k = keys.clone();
            k.sort();
            k
        };
        prop_assert_eq!(&keys, &sorted);
        keys.dedup();
        prop_assert_eq!(keys.len(), table.rows.len());
    }

    #[test]
    fn shares_sum_to_one_hundred(rows in rows()) {
        let df = frame(&rows);
        if let Some(table) = share_of_total(&df, &mapping(), SemanticLabel::Sector).unwrap() {
            let sum: f64 = table.rows.iter().map(|row| row.percentage).sum();
            prop_assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn filtering_is_idempotent(rows in rows(), pick in prop::sample::subsequence(SECTORS.to_vec(), 0..=SECTORS.len())) {
        let df = frame(&rows);
        let once = filter_by_values(&df, "sector", &pick).unwrap();
        let twice = filter_by_values(&once, "sector", &pick).unwrap();
        prop_assert!(once.equals(&twice));
    }
}
