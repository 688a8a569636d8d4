//! Animated connector diagram.

pub mod bezier;
pub mod engine;
pub mod scheduler;
pub mod view;

pub use bezier::{ArcLengthPath, CubicBezier};
pub use engine::{
    ConnectionEdge, ConnectorEngine, DiagramConfig, Peer, PeerId, PeerRegistry, SizeObserver,
};
pub use scheduler::{FrameScheduler, FrameStep, SchedulerStats, TaskId};
pub use view::{ArchitectureLayout, Diagram, DiagramState, Node, NodeKind};
