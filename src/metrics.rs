//! Response-time statistics.
//!
//! Latencies are recorded into an HDR histogram at microsecond resolution,
//! which keeps percentile queries accurate to three significant figures from
//! sub-millisecond health probes up to multi-minute solver runs.

use crate::results::IterationRecord;
use anyhow::Result;
use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Percentiles reported for every scenario.
pub const DEFAULT_PERCENTILES: [f64; 3] = [50.0, 95.0, 99.0];

/// Percentile value pair, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value_ms: f64,
}

/// Distribution of a set of response times, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyMetrics {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub percentiles: Vec<PercentileValue>,
    pub total_samples: usize,
}

impl LatencyMetrics {
    /// Look up a reported percentile.
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| (p.percentile - percentile).abs() < 0.1)
            .map(|p| p.value_ms)
    }
}

/// Latency collector using HDR histogram for accurate measurement
pub struct LatencyCollector {
    histogram: Histogram<u64>,
    sample_count: usize,
}

impl LatencyCollector {
    /// Create a new latency collector
    pub fn new() -> Result<Self> {
        // 3 significant figures, auto-resizing so long solver runs still fit
        let histogram = Histogram::<u64>::new(3)?;

        Ok(Self {
            histogram,
            sample_count: 0,
        })
    }

    /// Record a latency measurement
    pub fn record(&mut self, latency: Duration) -> Result<()> {
        let latency_us = latency.as_micros() as u64;
        self.histogram.record(latency_us)?;
        self.sample_count += 1;
        Ok(())
    }

    /// Record a latency given in seconds, as stored in iteration records
    pub fn record_seconds(&mut self, seconds: f64) -> Result<()> {
        self.record(Duration::from_secs_f64(seconds.max(0.0)))
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Summarize the recorded samples; `None` when nothing was recorded.
    pub fn get_metrics(&self, percentiles: &[f64]) -> Option<LatencyMetrics> {
        if self.sample_count == 0 {
            return None;
        }

        let to_ms = |us: f64| us / 1_000.0;
        let percentiles = percentiles
            .iter()
            .map(|&p| PercentileValue {
                percentile: p,
                value_ms: to_ms(self.histogram.value_at_percentile(p) as f64),
            })
            .collect();

        Some(LatencyMetrics {
            min_ms: to_ms(self.histogram.min() as f64),
            max_ms: to_ms(self.histogram.max() as f64),
            mean_ms: to_ms(self.histogram.mean()),
            std_dev_ms: to_ms(self.histogram.stdev()),
            percentiles,
            total_samples: self.sample_count,
        })
    }

    /// Reset the collector
    pub fn reset(&mut self) {
        self.histogram.reset();
        self.sample_count = 0;
    }
}

/// Per-scenario aggregates consumed by the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub vehicles: usize,
    pub locations: usize,
    pub iterations: usize,
    pub successes: usize,
    pub success_rate: f64,
    /// Statistics over every iteration, failed ones included.
    pub latency: Option<LatencyMetrics>,
    pub avg_response_ms: Option<f64>,
    pub p95_response_ms: Option<f64>,
}

impl ScenarioSummary {
    /// Aggregate a scenario's iteration records.
    pub fn from_records(
        vehicles: usize,
        locations: usize,
        records: &[IterationRecord],
    ) -> Result<Self> {
        let mut collector = LatencyCollector::new()?;
        for record in records {
            collector.record_seconds(record.response_time)?;
        }

        let successes = records.iter().filter(|r| r.success).count();
        let success_rate = if records.is_empty() {
            0.0
        } else {
            successes as f64 / records.len() as f64
        };
        let latency = collector.get_metrics(&DEFAULT_PERCENTILES);

        Ok(Self {
            vehicles,
            locations,
            iterations: records.len(),
            successes,
            success_rate,
            avg_response_ms: latency.as_ref().map(|l| l.mean_ms),
            p95_response_ms: latency.as_ref().and_then(|l| l.percentile(95.0)),
            latency,
        })
    }
}
