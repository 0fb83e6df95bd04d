// Metric sample series: Prometheus range results -> ordered samples -> dense fixed-step grid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Upper bound on the up-front reservation made by `densify`; longer grids grow as they fill.
const MAX_PREALLOCATED_TICKS: u64 = 1 << 16;

/// One `[timestampSeconds, value]` point. `None` marks a gap and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample(pub i64, pub Option<f64>);

impl Sample {
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> Option<f64> {
        self.1
    }
}

/// Prometheus `/api/v1/query_range` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromRangeResponse {
    pub status: String,
    pub data: PromRangeResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromRangeResult {
    #[serde(default)]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<PromSeries>,
}

/// One series of a `matrix` result. Values are `[unixSeconds, "stringValue"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromSeries {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    #[serde(default)]
    pub values: Vec<(f64, String)>,
}

/// Prometheus sends values as strings; NaN, infinities and junk become gaps.
fn parse_prom_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Flattens all series of a range result into one ascending series.
/// Points sharing a timestamp are summed; a gap only survives if every point there is a gap.
pub fn join_series(result: &PromRangeResult) -> Vec<Sample> {
    let mut by_ts: BTreeMap<i64, Option<f64>> = BTreeMap::new();
    for series in &result.result {
        for (ts, raw) in series.values.iter().filter(|(ts, _)| ts.is_finite()) {
            let slot = by_ts.entry(*ts as i64).or_insert(None);
            *slot = match (*slot, parse_prom_value(raw)) {
                (Some(acc), Some(v)) => Some(acc + v),
                (None, v) => v,
                (acc, None) => acc,
            };
        }
    }
    by_ts.into_iter().map(|(ts, v)| Sample(ts, v)).collect()
}

/// Number of ticks `densify` emits for this window: `ceil(duration / frequency)`, with the
/// window end clamped at `i64::MAX`. Zero for a non-positive duration or frequency.
pub fn tick_count(starting_timestamp: i64, sample_duration: i64, sample_frequency: i64) -> u64 {
    if sample_duration <= 0 || sample_frequency <= 0 {
        return 0;
    }
    let end = starting_timestamp.saturating_add(sample_duration);
    let span = i128::from(end) - i128::from(starting_timestamp);
    let frequency = i128::from(sample_frequency);
    let ticks = (span + frequency - 1) / frequency;
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Expands `samples` onto the grid `start, start + frequency, ...` below `start + duration`.
///
/// Each tick takes the value of the sample at exactly that timestamp, or `None` when there
/// is none, so charts break the line instead of bridging an outage. Returns an empty vector
/// when `samples` is empty, `starting_timestamp` is unknown, `sample_duration <= 0`, or
/// `sample_frequency` is unknown or `<= 0`.
///
/// `samples` must be ascending by timestamp. The grid and the samples are walked once
/// with two cursors; samples off the grid or outside the window are dropped.
pub fn densify(
    samples: &[Sample],
    starting_timestamp: Option<i64>,
    sample_duration: i64,
    sample_frequency: Option<i64>,
) -> Vec<Sample> {
    let (Some(start), Some(frequency)) = (starting_timestamp, sample_frequency) else {
        return Vec::new();
    };
    if samples.is_empty() || sample_duration <= 0 || frequency <= 0 {
        return Vec::new();
    }

    let end = start.saturating_add(sample_duration);
    let reserved = tick_count(start, sample_duration, frequency).min(MAX_PREALLOCATED_TICKS);
    let mut out = Vec::with_capacity(usize::try_from(reserved).unwrap_or(0));
    let mut cursor = samples.iter().peekable();
    let mut tick = start;

    while tick < end {
        while cursor.next_if(|s| s.0 < tick).is_some() {}
        let value = cursor.next_if(|s| s.0 == tick).and_then(|s| s.1);
        out.push(Sample(tick, value));
        tick = match tick.checked_add(frequency) {
            Some(next) => next,
            None => break,
        };
    }
    out
}
