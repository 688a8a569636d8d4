//! The architecture diagram widget: device boxes and a client box wired to a
//! central hub, a marker running along every wire.

use super::engine::{ConnectorEngine, DiagramConfig, Peer, PeerId, PeerRegistry, SizeObserver};
use crate::style::ChartStyle;

use iced::widget::canvas::{self, Canvas, Frame, Path, Stroke};
use iced::{Alignment, Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, mouse, window};
use serde::{Deserialize, Serialize};

// ================================================================================
// Layout
// ================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Device(usize),
    Hub,
    Client,
}

impl NodeKind {
    pub fn label(&self) -> String {
        match self {
            NodeKind::Device(i) => format!("IPC {}", i + 1),
            NodeKind::Hub => "Server".to_string(),
            NodeKind::Client => "Client".to_string(),
        }
    }
}

/// A laid-out box. Hidden boxes keep an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub bounds: Rectangle,
    pub visible: bool,
}

impl Peer for Node {
    fn center(&self) -> Option<Point> {
        Peer::center(&self.bounds)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Devices stacked on the left, the hub in the middle, the client on the
/// right. Narrow containers only keep the first few devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct ArchitectureLayout {
    #[builder(default = 3)]
    pub devices: usize,
    /// Below this width the layout switches to its compact form.
    #[builder(default = 560.0)]
    pub compact_width: f32,
    #[builder(default = 2)]
    pub compact_devices: usize,
    #[builder(default = 112.0)]
    pub box_width: f32,
    #[builder(default = 44.0)]
    pub box_height: f32,
    #[builder(default = 24.0)]
    pub padding: f32,
}

impl Default for ArchitectureLayout {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ArchitectureLayout {
    /// Boxes for a container of `size`. A container without area gets
    /// hidden, empty boxes.
    pub fn arrange(&self, size: Size) -> Vec<Node> {
        if size.width <= 0.0 || size.height <= 0.0 {
            return (0..self.devices)
                .map(NodeKind::Device)
                .chain([NodeKind::Hub, NodeKind::Client])
                .map(|kind| Node {
                    kind,
                    bounds: Rectangle::with_size(Size::ZERO),
                    visible: false,
                })
                .collect();
        }

        let shown = if size.width < self.compact_width {
            self.devices.min(self.compact_devices)
        } else {
            self.devices
        };

        let box_size = Size::new(self.box_width, self.box_height);
        let middle = size.height / 2.0 - self.box_height / 2.0;
        let slot = size.height / (shown + 1) as f32;

        let mut nodes: Vec<Node> = (0..self.devices)
            .map(|i| {
                let visible = i < shown;
                let bounds = if visible {
                    let y = slot * (i + 1) as f32 - self.box_height / 2.0;
                    Rectangle::new(Point::new(self.padding, y), box_size)
                } else {
                    Rectangle::with_size(Size::ZERO)
                };

                Node {
                    kind: NodeKind::Device(i),
                    bounds,
                    visible,
                }
            })
            .collect();

        nodes.push(Node {
            kind: NodeKind::Hub,
            bounds: Rectangle::new(
                Point::new(size.width / 2.0 - self.box_width / 2.0, middle),
                box_size,
            ),
            visible: true,
        });

        nodes.push(Node {
            kind: NodeKind::Client,
            bounds: Rectangle::new(
                Point::new(size.width - self.padding - self.box_width, middle),
                box_size,
            ),
            visible: true,
        });

        nodes
    }

    /// Registry over `nodes`: devices keep their index as id, the client
    /// comes after them.
    pub fn registry(&self, nodes: &[Node]) -> PeerRegistry<Node> {
        let mut registry = PeerRegistry::new();

        for node in nodes {
            let id = match node.kind {
                NodeKind::Hub => {
                    registry.set_hub(*node);
                    continue;
                }
                NodeKind::Device(i) => PeerId(i as u32),
                NodeKind::Client => PeerId(self.devices as u32),
            };

            if let Err(err) = registry.register(id, *node) {
                log::warn!("skipping diagram node {:?}: {err}", node.kind);
            }
        }

        registry
    }
}

// ================================================================================
// Widget
// ================================================================================

#[derive(Debug, Default)]
pub struct DiagramState {
    engine: Option<ConnectorEngine>,
    observer: SizeObserver,
    nodes: Vec<Node>,
    /// The window was resized; lay out again on the next frame.
    dirty: bool,
}

impl DiagramState {
    pub fn engine(&self) -> Option<&ConnectorEngine> {
        self.engine.as_ref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn relayout(&mut self, layout: &ArchitectureLayout, config: DiagramConfig, size: Size) {
        let engine = self.engine.get_or_insert_with(|| ConnectorEngine::new(config));

        self.nodes = layout.arrange(size);
        self.dirty = false;
        engine.recompute(&layout.registry(&self.nodes));
    }

    /// Feeds one event through the diagram. Returns whether it needs another
    /// frame.
    ///
    /// A container without area has nothing to draw yet. The first frame
    /// with a real size mounts the engine.
    pub fn handle(
        &mut self,
        layout: &ArchitectureLayout,
        config: DiagramConfig,
        event: &Event,
        size: Size,
    ) -> bool {
        if let Event::Window(window::Event::Resized(_)) = event {
            // canvas bounds still hold the old size here
            self.dirty = true;
            return self.engine.is_some();
        }

        if size.width <= 0.0 || size.height <= 0.0 {
            return false;
        }

        let resized = self.observer.observe(size);
        let stale = resized || self.dirty || self.engine.is_none();

        match event {
            Event::Window(window::Event::RedrawRequested(now)) => {
                if stale {
                    self.relayout(layout, config, size);
                }

                let animating = self
                    .engine
                    .as_mut()
                    .is_some_and(|engine| engine.tick(*now));

                animating || stale
            }
            _ if stale => {
                self.relayout(layout, config, size);
                true
            }
            _ => false,
        }
    }

    fn unmount(&mut self) {
        self.observer.detach();
        if let Some(engine) = self.engine.as_mut() {
            engine.teardown();
        }
    }
}

impl Drop for DiagramState {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub struct Diagram {
    layout: ArchitectureLayout,
    config: DiagramConfig,
    style: Option<ChartStyle>,
}

impl Diagram {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            layout: ArchitectureLayout::default(),
            config,
            style: None,
        }
    }

    pub fn with_layout(mut self, layout: ArchitectureLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self).width(Length::Fill).height(Length::Fill).into()
    }
}

fn draw_node(frame: &mut Frame, node: &Node, style: &ChartStyle, text: iced::Color) {
    let accent = match node.kind {
        NodeKind::Hub => style.series_a,
        NodeKind::Client => style.series_b,
        NodeKind::Device(_) => style.cursor,
    };

    frame.fill_rectangle(node.bounds.position(), node.bounds.size(), style.neutral);
    frame.stroke(
        &Path::rectangle(node.bounds.position(), node.bounds.size()),
        Stroke::default().with_color(accent).with_width(1.5),
    );
    frame.fill_text(canvas::Text {
        content: node.kind.label(),
        position: Rectangle::center(&node.bounds),
        color: text,
        size: style.text_size.into(),
        align_x: Alignment::Center.into(),
        align_y: Alignment::Center.into(),
        ..canvas::Text::default()
    });
}

impl<Message> canvas::Program<Message> for Diagram {
    type State = DiagramState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        state
            .handle(&self.layout, self.config, event, bounds.size())
            .then(canvas::Action::request_redraw)
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let style = self.style.unwrap_or_else(|| ChartStyle::for_theme(theme));

        if let Some(engine) = state.engine() {
            for edge in engine.edges() {
                let curve = edge.path.curve();
                let wire = Path::new(|builder| {
                    builder.move_to(curve.from);
                    builder.bezier_curve_to(curve.control_a, curve.control_b, curve.to);
                });

                frame.stroke(&wire, Stroke::default().with_color(style.grid).with_width(2.0));
                frame.fill(
                    &Path::circle(edge.marker, engine.config().marker_radius),
                    style.series_a,
                );
            }
        }

        let text = theme.palette().text;
        for node in state.nodes().iter().filter(|node| node.visible) {
            draw_node(&mut frame, node, &style, text);
        }

        vec![frame.into_geometry()]
    }
}
