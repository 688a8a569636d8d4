//! Charts for the IPC Monitor dashboard, drawn on the iced canvas.
//!
//! - [`LineChart`]: one 0..100 series with hover tooltip.
//! - [`CombinedLineChart`]: two series sharing one hover index.
//! - [`RingChart`]: a two-part ring with hoverable segments.
//! - [`Diagram`]: boxes wired to a hub with markers running along the wires.
//!
//! [`telemetry`] turns API payloads into chart inputs.

pub mod combined;
pub mod diagram;
pub mod error;
pub mod line_chart;
pub mod pointer;
pub mod ring;
pub mod series;
pub mod style;
pub mod telemetry;
pub mod ticks;
pub mod tooltip;

mod renderer;

pub use combined::{CombinedChartOptions, CombinedLineChart, DualOverlay};
pub use diagram::{ArchitectureLayout, ConnectorEngine, Diagram, DiagramConfig};
pub use error::{Error, Result};
pub use line_chart::{HoverOverlay, LineChart, LineChartOptions};
pub use pointer::{HoverState, ScreenTransform, resolve_index};
pub use ring::{RingChart, RingOptions, RingSplit, Segment};
pub use series::{ChartGeometry, ChartPoint, Direction, Series, map_pair, map_series};
pub use style::ChartStyle;
pub use telemetry::{Metric, Summary, TelemetryRecord, decode_batch};
