//! Device telemetry as served by the monitoring API, and the chart inputs
//! derived from it.
//!
//! Batches are ordered latest-first: index 0 is the newest sample.

use crate::error::Result;
use crate::series::Series;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    pub temperature_c: Option<f32>,
    pub pct: Option<f32>,
    pub freq_mhz: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    pub total_mb: Option<f32>,
    pub used_mb: Option<f32>,
    pub pct: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disk {
    pub mount: Option<String>,
    pub total_mb: Option<f32>,
    pub used_mb: Option<f32>,
    pub free_mb: Option<f32>,
    pub used_pct: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sensors {
    pub fan_rpm: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub bytes_sent: Option<f64>,
    pub bytes_recv: Option<f64>,
    pub down_mbps: Option<f32>,
    pub up_mbps: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryRecord {
    pub id: u64,
    pub ts: String,
    pub device_id: u64,
    pub cpu: Cpu,
    pub memory: Memory,
    pub disk: Disk,
    pub sensors: Sensors,
    pub network: Network,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Envelope { data: Vec<TelemetryRecord> },
    Bare(Vec<TelemetryRecord>),
}

/// Decodes either `{"data": [...]}` or a bare array of records.
pub fn decode_batch(json: &str) -> Result<Vec<TelemetryRecord>> {
    let records = match serde_json::from_str(json)? {
        Payload::Envelope { data } => data,
        Payload::Bare(records) => records,
    };

    log::debug!("decoded {} telemetry records", records.len());
    Ok(records)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    CpuPct,
    CpuTemperature,
    MemoryPct,
    DiskPct,
    NetworkUp,
    NetworkDown,
    FanRpm,
}

impl Metric {
    pub fn sample(&self, record: &TelemetryRecord) -> Option<f32> {
        match self {
            Metric::CpuPct => record.cpu.pct,
            Metric::CpuTemperature => record.cpu.temperature_c,
            Metric::MemoryPct => record.memory.pct,
            Metric::DiskPct => record.disk.used_pct,
            Metric::NetworkUp => record.network.up_mbps,
            Metric::NetworkDown => record.network.down_mbps,
            Metric::FanRpm => record.sensors.fan_rpm,
        }
    }
}

/// One metric across `records`, in record order. Missing samples count as 0.
pub fn series(records: &[TelemetryRecord], metric: Metric) -> Series {
    let samples: Vec<Option<f32>> = records.iter().map(|r| metric.sample(r)).collect();

    let missing = samples.iter().filter(|s| s.is_none()).count();
    if missing > 0 {
        log::warn!("{metric:?}: {missing} of {} samples missing, drawn as 0", samples.len());
    }

    samples.into_iter().collect()
}

/// `[up, down]` throughput of one record, for the ring chart.
pub fn network_split(record: &TelemetryRecord) -> [f32; 2] {
    [
        record.network.up_mbps.unwrap_or(0.0),
        record.network.down_mbps.unwrap_or(0.0),
    ]
}

fn gigabytes(megabytes: Option<f32>) -> f32 {
    megabytes.unwrap_or(0.0) / 1024.0
}

/// Headline numbers of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub cpu_pct: f32,
    pub cpu_temperature: Option<f32>,
    /// Rounded mean over the samples that report a temperature.
    pub cpu_temperature_mean: Option<f32>,
    pub memory_used_gb: f32,
    pub memory_total_gb: f32,
    pub memory_pct: f32,
    pub disk_pct: f32,
    pub disk_free_gb: f32,
    pub disk_total_gb: f32,
    pub network_up: f32,
    pub network_down: f32,
}

impl Summary {
    pub fn from_records(records: &[TelemetryRecord]) -> Option<Self> {
        let latest = records.first()?;

        let temperatures: Vec<f32> = records.iter().filter_map(|r| r.cpu.temperature_c).collect();
        let cpu_temperature_mean = (!temperatures.is_empty())
            .then(|| (temperatures.iter().sum::<f32>() / temperatures.len() as f32).round());

        let [network_up, network_down] = network_split(latest);

        Some(Self {
            cpu_pct: latest.cpu.pct.unwrap_or(0.0),
            cpu_temperature: latest.cpu.temperature_c,
            cpu_temperature_mean,
            memory_used_gb: gigabytes(latest.memory.used_mb),
            memory_total_gb: gigabytes(latest.memory.total_mb),
            memory_pct: latest.memory.pct.unwrap_or(0.0),
            disk_pct: latest.disk.used_pct.unwrap_or(0.0),
            disk_free_gb: gigabytes(latest.disk.free_mb),
            disk_total_gb: gigabytes(latest.disk.total_mb),
            network_up,
            network_down,
        })
    }
}
