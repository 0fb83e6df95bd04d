// Volume metric graphs: time spans, unit conversion and chart points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::series::{PromRangeResult, Sample, densify, join_series};

/// Window shown by the volume metrics graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MetricsTimeSpan {
    #[serde(rename = "Last 7 days")]
    LastSevenDays,
    #[default]
    #[serde(rename = "Last 24 hours")]
    LastTwentyFourHours,
    #[serde(rename = "Last 1 hour")]
    LastOneHour,
}

impl MetricsTimeSpan {
    pub const ALL: [MetricsTimeSpan; 3] = [
        MetricsTimeSpan::LastSevenDays,
        MetricsTimeSpan::LastTwentyFourHours,
        MetricsTimeSpan::LastOneHour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricsTimeSpan::LastSevenDays => "Last 7 days",
            MetricsTimeSpan::LastTwentyFourHours => "Last 24 hours",
            MetricsTimeSpan::LastOneHour => "Last 1 hour",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|span| span.label() == label)
    }

    /// Length of the queried window, in seconds.
    pub fn sample_duration(self) -> i64 {
        match self {
            MetricsTimeSpan::LastSevenDays => 7 * 24 * 3600,
            MetricsTimeSpan::LastTwentyFourHours => 24 * 3600,
            MetricsTimeSpan::LastOneHour => 3600,
        }
    }

    /// Query step, in seconds.
    pub fn sample_frequency(self) -> i64 {
        match self {
            MetricsTimeSpan::LastSevenDays => 3600,
            MetricsTimeSpan::LastTwentyFourHours => 60,
            MetricsTimeSpan::LastOneHour => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeMetric {
    Usage,
    Latency,
    ThroughputRead,
    ThroughputWrite,
    IopsRead,
    IopsWrite,
}

impl VolumeMetric {
    pub fn from_name(name: &str) -> Option<Self> {
        let metric = match name {
            "usage" => VolumeMetric::Usage,
            "latency" => VolumeMetric::Latency,
            "throughputRead" => VolumeMetric::ThroughputRead,
            "throughputWrite" => VolumeMetric::ThroughputWrite,
            "iopsRead" => VolumeMetric::IopsRead,
            "iopsWrite" => VolumeMetric::IopsWrite,
            _ => return None,
        };
        Some(metric)
    }

    /// Legend key of the line this metric is drawn as.
    pub fn kind(self) -> &'static str {
        match self {
            VolumeMetric::Usage | VolumeMetric::Latency => "y",
            VolumeMetric::ThroughputRead | VolumeMetric::IopsRead => "read",
            VolumeMetric::ThroughputWrite | VolumeMetric::IopsWrite => "write",
        }
    }

    /// Converts a raw Prometheus value into the unit the graph displays.
    /// Usage needs the volume capacity in bytes and has no value without it.
    pub fn convert(self, raw: f64, volume_capacity_bytes: Option<f64>) -> Option<f64> {
        match self {
            VolumeMetric::Usage => volume_capacity_bytes
                .filter(|capacity| *capacity > 0.0)
                .map(|capacity| (raw / capacity * 100.0).round()),
            // seconds -> microseconds
            VolumeMetric::Latency => Some((raw * 1_000_000.0).round()),
            // bytes/s -> MB/s
            VolumeMetric::ThroughputRead | VolumeMetric::ThroughputWrite => Some(raw / 1_000_000.0),
            VolumeMetric::IopsRead | VolumeMetric::IopsWrite => Some(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub value: Option<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// One chart point per sample; gaps stay gaps. Samples whose timestamp is not a valid date are skipped.
pub fn chart_points(
    metric: VolumeMetric,
    samples: &[Sample],
    volume_capacity_bytes: Option<f64>,
) -> Vec<ChartPoint> {
    samples
        .iter()
        .filter_map(|sample| {
            let date = DateTime::<Utc>::from_timestamp(sample.timestamp(), 0)?;
            Some(ChartPoint {
                date,
                value: sample
                    .value()
                    .and_then(|raw| metric.convert(raw, volume_capacity_bytes)),
                kind: metric.kind(),
            })
        })
        .collect()
}

/// Raw range result -> joined series -> dense grid for `span` -> chart points.
pub fn volume_chart(
    metric: VolumeMetric,
    raw: &PromRangeResult,
    span: MetricsTimeSpan,
    query_starting_time: Option<i64>,
    volume_capacity_bytes: Option<f64>,
) -> Vec<ChartPoint> {
    let dense = densify(
        &join_series(raw),
        query_starting_time,
        span.sample_duration(),
        Some(span.sample_frequency()),
    );
    chart_points(metric, &dense, volume_capacity_bytes)
}
