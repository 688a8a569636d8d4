use iced::time::{Duration, Instant};
use iced::{Point, Rectangle, Size};
use ipc_monitor_charts::diagram::{ArchitectureLayout, ConnectorEngine, DiagramConfig};
use ipc_monitor_charts::ring::{RingOptions, RingSplit, Segment, hit_test};
use ipc_monitor_charts::telemetry::{self, Metric, Summary, network_split};
use ipc_monitor_charts::{CombinedLineChart, HoverState, LineChart};

const PAYLOAD: &str = r#"{ "data": [
    { "id": 5, "device_id": 2, "cpu": { "pct": 40, "temperature_c": 55 }, "memory": { "pct": 70, "used_mb": 3584, "total_mb": 8192 },
      "network": { "up_mbps": 3, "down_mbps": 7 } },
    { "id": 4, "device_id": 2, "cpu": { "pct": 30, "temperature_c": 54 }, "memory": { "pct": 65 } },
    { "id": 3, "device_id": 2, "cpu": { "pct": 20, "temperature_c": null }, "memory": { "pct": 60 } },
    { "id": 2, "device_id": 2, "cpu": { "pct": 10, "temperature_c": 52 }, "memory": { "pct": 55 } },
    { "id": 1, "device_id": 2, "cpu": { "pct": 0, "temperature_c": 51 }, "memory": { "pct": 50 } }
] }"#;

#[test]
fn test_payload_to_combined_hover() {
    let records = telemetry::decode_batch(PAYLOAD).unwrap();
    let cpu = telemetry::series(&records, Metric::CpuPct);
    let ram = telemetry::series(&records, Metric::MemoryPct);

    let chart = CombinedLineChart::new(cpu.values(), ram.values());
    assert_eq!(chart.len(), 5);

    let options = ipc_monitor_charts::CombinedChartOptions::default();
    let mut hover = HoverState::default();
    assert!(hover.track(Point::new(190.0, 80.0), chart.len(), &options.geometry, options.direction));
    assert_eq!(hover.active_index, Some(2));

    let overlay = chart.overlay(&hover).unwrap();
    assert_eq!(overlay.first.x, overlay.second.x);
    assert_eq!(overlay.lines, ["CPU: 20.0%".to_string(), "RAM: 60.0%".to_string()]);
}

#[test]
fn test_line_chart_puts_newest_sample_on_the_right() {
    let records = telemetry::decode_batch(PAYLOAD).unwrap();
    let cpu = telemetry::series(&records, Metric::CpuPct);
    let chart = LineChart::new(cpu.values());

    let points = chart.points();
    assert_eq!(points[0].x, 200.0);
    assert_eq!(points[4].x, 0.0);

    let options = ipc_monitor_charts::LineChartOptions::default();
    let mut hover = HoverState::default();
    hover.track(Point::new(190.0, 10.0), cpu.len(), &options.geometry, options.direction);

    let overlay = chart.overlay(&hover).unwrap();
    assert_eq!(overlay.marker.value, 40.0);
    assert_eq!(overlay.label, "40.0%");
}

#[test]
fn test_kpis_and_network_ring() {
    let records = telemetry::decode_batch(PAYLOAD).unwrap();

    let summary = Summary::from_records(&records).unwrap();
    assert_eq!(summary.cpu_pct, 40.0);
    // mean of 55, 54, 52, 51
    assert_eq!(summary.cpu_temperature_mean, Some(53.0));
    assert_eq!(summary.memory_used_gb, 3.5);

    let split = RingSplit::new(network_split(&records[0]));
    assert!((split.sweep_degrees - 108.0).abs() < 1e-3);
    assert_eq!(split.label(Segment::First), "30.0%");

    let bounds = Rectangle::with_size(Size::new(200.0, 200.0));
    let options = RingOptions::default();

    assert_eq!(hit_test(&split, bounds, Point::new(175.0, 100.0), &options), Some(Segment::First));
    assert_eq!(hit_test(&split, bounds, Point::new(100.0, 175.0), &options), Some(Segment::Second));
    assert_eq!(hit_test(&split, bounds, Point::new(100.0, 100.0), &options), None);
}

#[test]
fn test_diagram_relayout_never_leaks_animations() {
    let layout = ArchitectureLayout::default();
    let nodes = layout.arrange(Size::new(960.0, 420.0));
    let registry = layout.registry(&nodes);

    let mut engine = ConnectorEngine::new(DiagramConfig::default());
    for _ in 0..5 {
        assert_eq!(engine.recompute(&registry), 4);
    }

    let stats = engine.stats();
    assert_eq!(stats.started, 20);
    assert_eq!(stats.live(), 4);

    let t0 = Instant::now();
    engine.tick(t0);
    let before: Vec<Point> = engine.edges().iter().map(|e| e.marker).collect();
    engine.tick(t0 + Duration::from_millis(100));
    let after: Vec<Point> = engine.edges().iter().map(|e| e.marker).collect();

    // 100 ms at 140 px/s is 14 px along every connector
    for (a, b) in before.iter().zip(&after) {
        let moved = a.distance(*b);
        assert!(moved > 13.0 && moved <= 14.01, "moved {moved}");
    }
}

#[test]
fn test_diagram_reduced_motion() {
    let layout = ArchitectureLayout::default();
    let nodes = layout.arrange(Size::new(960.0, 420.0));

    let config = DiagramConfig::builder().reduced_motion(true).build();
    let mut engine = ConnectorEngine::new(config);
    engine.recompute(&layout.registry(&nodes));

    assert!(!engine.is_animating());
    for edge in engine.edges() {
        assert_eq!(edge.marker, edge.path.midpoint());
    }
}
