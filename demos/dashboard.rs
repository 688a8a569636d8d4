use iced::time::{self, Duration};
use iced::widget::{Container, column, row, text};
use iced::{Element, Length, Subscription, Theme};
use ipc_monitor_charts::diagram::{ArchitectureLayout, Diagram, DiagramConfig};
use ipc_monitor_charts::telemetry::{self, Cpu, Disk, Memory, Metric, Network, Sensors, Summary, TelemetryRecord};
use ipc_monitor_charts::{CombinedLineChart, LineChart, RingChart, Series};

pub fn main() {
    setup_logger();

    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .subscription(Dashboard::subscription)
        .theme(Theme::GruvboxDark)
        .run()
        .unwrap()
}

/// `IPC_MONITOR_LOG` picks the level, `info` otherwise.
fn setup_logger() {
    let level = std::env::var("IPC_MONITOR_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .level_for("wgpu_core", log::LevelFilter::Warn)
        .level_for("naga", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply();

    if let Err(err) = result {
        eprintln!("logger already installed: {err}");
    }
}

#[derive(Debug, Clone)]
enum Message {
    Poll,
}

/// Simple LCG so the demo needs no rng crate.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Pseudo-random f32 in [-1.0, 1.0].
    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let bits = (self.state >> 33) as f32 / (1u64 << 31) as f32;
        bits * 2.0 - 1.0
    }
}

const HISTORY: usize = 24;
const TOTAL_MB: f32 = 16384.0;
const DISK_MB: f32 = 512_000.0;

fn card<'a>(title: &'a str, chart: Element<'a, Message>, height: f32) -> Container<'a, Message> {
    Container::new(column![text(title), chart].spacing(6))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .padding(10)
}

struct Dashboard {
    records: Vec<TelemetryRecord>,
    cpu: Series,
    ram: Series,
    disk: Series,
    next_id: u64,
    rng: SimpleRng,
}

impl Dashboard {
    fn new() -> Self {
        let mut dashboard = Self {
            records: Vec::new(),
            cpu: Series::default(),
            ram: Series::default(),
            disk: Series::default(),
            next_id: 1,
            rng: SimpleRng::new(7),
        };

        for _ in 0..HISTORY {
            dashboard.update(Message::Poll);
        }

        dashboard
    }

    fn subscription(&self) -> Subscription<Message> {
        // same cadence as the agent's polling
        time::every(Duration::from_secs(5)).map(|_| Message::Poll)
    }

    fn sample(&mut self) -> TelemetryRecord {
        let previous = self.records.first().cloned().unwrap_or_default();
        let mut walk = |value: Option<f32>, center: f32, spread: f32| {
            let value = value.unwrap_or(center);
            (value + (center - value) * 0.1 + self.rng.next_f32() * spread).clamp(0.0, 100.0)
        };

        let cpu = walk(previous.cpu.pct, 35.0, 8.0);
        let ram = walk(previous.memory.pct, 60.0, 2.0);
        let disk = walk(previous.disk.used_pct, 48.0, 0.2);
        let up = walk(previous.network.up_mbps, 4.0, 1.5);
        let down = walk(previous.network.down_mbps, 12.0, 3.0);
        // the sensor drops out now and then
        let temperature = (self.rng.next_f32() > -0.8).then(|| 45.0 + cpu * 0.3);

        let id = self.next_id;
        self.next_id += 1;

        TelemetryRecord {
            id,
            ts: format!("t+{}s", id * 5),
            device_id: 1,
            cpu: Cpu {
                temperature_c: temperature,
                pct: Some(cpu),
                freq_mhz: Some(2400.0),
            },
            memory: Memory {
                total_mb: Some(TOTAL_MB),
                used_mb: Some(TOTAL_MB * ram / 100.0),
                pct: Some(ram),
            },
            disk: Disk {
                mount: Some("/".to_string()),
                total_mb: Some(DISK_MB),
                used_mb: Some(DISK_MB * disk / 100.0),
                free_mb: Some(DISK_MB * (100.0 - disk) / 100.0),
                used_pct: Some(disk),
            },
            sensors: Sensors { fan_rpm: None },
            network: Network {
                bytes_sent: None,
                bytes_recv: None,
                down_mbps: Some(down),
                up_mbps: Some(up),
            },
        }
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Poll => {
                let record = self.sample();
                self.records.insert(0, record);
                self.records.truncate(HISTORY);

                self.cpu = telemetry::series(&self.records, Metric::CpuPct);
                self.ram = telemetry::series(&self.records, Metric::MemoryPct);
                self.disk = telemetry::series(&self.records, Metric::DiskPct);
            }
        }
    }

    fn kpis(&self) -> Element<'_, Message> {
        let Some(summary) = Summary::from_records(&self.records) else {
            return text("No telemetry yet").into();
        };

        let temperature = match (summary.cpu_temperature, summary.cpu_temperature_mean) {
            (Some(now), Some(mean)) => format!("{now:.0} °C (avg {mean:.0} °C)"),
            (None, Some(mean)) => format!("n/a (avg {mean:.0} °C)"),
            _ => "n/a".to_string(),
        };

        column![
            text(format!("CPU: {:.1}%", summary.cpu_pct)),
            text(format!("Temperature: {temperature}")),
            text(format!(
                "Memory: {:.1} / {:.1} GB ({:.1}%)",
                summary.memory_used_gb, summary.memory_total_gb, summary.memory_pct
            )),
            text(format!(
                "Disk: {:.1}%, {:.0} GB free of {:.0} GB",
                summary.disk_pct, summary.disk_free_gb, summary.disk_total_gb
            )),
            text(format!(
                "Network: {:.1} up / {:.1} down Mbps",
                summary.network_up, summary.network_down
            )),
        ]
        .spacing(4)
        .into()
    }

    fn view(&self) -> Element<'_, Message> {
        let split = self
            .records
            .first()
            .map(telemetry::network_split)
            .unwrap_or_default();

        let sparklines = row![
            card("CPU", LineChart::new(self.cpu.values()).view(), 110.0),
            card("RAM", LineChart::new(self.ram.values()).view(), 110.0),
            card("Disk", LineChart::new(self.disk.values()).view(), 110.0),
        ]
        .spacing(10);

        let details = row![
            card(
                "CPU / RAM",
                CombinedLineChart::new(self.cpu.values(), self.ram.values()).view(),
                240.0
            ),
            card("Network up / down", RingChart::new(split).view(), 240.0),
            Container::new(self.kpis()).width(Length::Fill).padding(10),
        ]
        .spacing(10);

        let diagram = Diagram::new(DiagramConfig::default())
            .with_layout(ArchitectureLayout::builder().devices(3).build())
            .view();

        column![sparklines, details, card("Architecture", diagram, 320.0)]
            .spacing(10)
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
