// Shared test helpers

#![allow(dead_code)]

use serde_json::{Value, json};
use voldash::series::{PromRangeResult, PromSeries, Sample};

/// `{ field: capacity }` records, one per capacity string.
pub fn records(field: &str, capacities: &[&str]) -> Vec<Value> {
    capacities.iter().map(|c| json!({ field: c })).collect()
}

/// Samples `[ts, ts]` for every timestamp given.
pub fn identity_samples(timestamps: impl IntoIterator<Item = i64>) -> Vec<Sample> {
    timestamps
        .into_iter()
        .map(|ts| Sample(ts, Some(ts as f64)))
        .collect()
}

/// A `matrix` result with one series per entry of `series`.
pub fn prom_result(series: &[&[(i64, &str)]]) -> PromRangeResult {
    PromRangeResult {
        result_type: "matrix".into(),
        result: series
            .iter()
            .map(|values| PromSeries {
                metric: Default::default(),
                values: values
                    .iter()
                    .map(|(ts, v)| (*ts as f64, v.to_string()))
                    .collect(),
            })
            .collect(),
    }
}
