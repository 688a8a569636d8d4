//! Connectors between diagram boxes and the hub, with a marker travelling
//! along each connector.
//!
//! The engine is rebuilt wholesale by [`ConnectorEngine::recompute`] whenever
//! the layout changes: every running animation is cancelled, every edge is
//! dropped, and a fresh edge is built for each visible peer. Between
//! relayouts, [`ConnectorEngine::tick`] moves the markers once per frame.

use std::fmt;

use super::bezier::{ArcLengthPath, CubicBezier, DEFAULT_SUBDIVISIONS, HANDLE_FRACTION};
use super::scheduler::{FrameScheduler, SchedulerStats, TaskId};
use crate::error::{Error, Result};

use iced::time::Instant;
use iced::{Point, Rectangle, Size};
use serde::{Deserialize, Serialize};

// ================================================================================
// Peers
// ================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub u32);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer#{}", self.0)
    }
}

/// Something on screen a connector can be attached to.
pub trait Peer {
    /// Current center, `None` while the peer has no layout yet.
    fn center(&self) -> Option<Point>;

    /// Hidden peers get no connector.
    fn is_visible(&self) -> bool {
        true
    }
}

impl Peer for Rectangle {
    fn center(&self) -> Option<Point> {
        (self.width > 0.0 && self.height > 0.0).then(|| Rectangle::center(self))
    }
}

/// The hub plus an ordered list of peers to connect to it.
#[derive(Debug, Clone)]
pub struct PeerRegistry<P> {
    hub: Option<P>,
    peers: Vec<(PeerId, P)>,
}

impl<P> Default for PeerRegistry<P> {
    fn default() -> Self {
        Self {
            hub: None,
            peers: Vec::new(),
        }
    }
}

impl<P: Peer> PeerRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hub(&mut self, hub: P) {
        self.hub = Some(hub);
    }

    pub fn register(&mut self, id: PeerId, peer: P) -> Result<()> {
        if self.peers.iter().any(|(existing, _)| *existing == id) {
            return Err(Error::DuplicatePeer(id));
        }

        self.peers.push((id, peer));
        Ok(())
    }

    pub fn hub(&self) -> Option<&P> {
        self.hub.as_ref()
    }

    pub fn peers(&self) -> impl Iterator<Item = (PeerId, &P)> {
        self.peers.iter().map(|(id, peer)| (*id, peer))
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

// ================================================================================
// Configuration
// ================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct DiagramConfig {
    /// Marker speed along a connector.
    #[builder(default = 140.0)]
    pub speed_px_per_second: f32,
    #[builder(default = HANDLE_FRACTION)]
    pub handle_fraction: f32,
    /// Polyline resolution used to measure connectors.
    #[builder(default = DEFAULT_SUBDIVISIONS)]
    pub subdivisions: usize,
    #[builder(default = 4.0)]
    pub marker_radius: f32,
    /// Park every marker at the middle of its connector instead of animating.
    #[builder(default)]
    pub reduced_motion: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ================================================================================
// Engine
// ================================================================================

#[derive(Debug, Clone)]
pub struct ConnectionEdge {
    pub peer: PeerId,
    pub path: ArcLengthPath,
    pub marker: Point,
    task: Option<TaskId>,
}

impl ConnectionEdge {
    /// The frame task moving this edge's marker, if it is animated.
    pub fn task(&self) -> Option<TaskId> {
        self.task
    }
}

#[derive(Debug)]
pub struct ConnectorEngine {
    config: DiagramConfig,
    edges: Vec<ConnectionEdge>,
    scheduler: FrameScheduler<PeerId>,
    layouts: u64,
}

impl ConnectorEngine {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            edges: Vec::new(),
            scheduler: FrameScheduler::new(),
            layouts: 0,
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn edges(&self) -> &[ConnectionEdge] {
        &self.edges
    }

    /// How many layouts have been computed so far.
    pub fn layouts(&self) -> u64 {
        self.layouts
    }

    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    pub fn live_animations(&self) -> usize {
        self.scheduler.live_count()
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.live_count() > 0
    }

    /// Rebuilds every edge from the current layout of `registry` and returns
    /// the number of edges drawn.
    ///
    /// A registry without a laid-out hub draws nothing; the next layout
    /// change tries again.
    pub fn recompute<P: Peer>(&mut self, registry: &PeerRegistry<P>) -> usize {
        let cancelled = self.scheduler.cancel_all();
        self.edges.clear();
        self.layouts += 1;

        let Some(hub) = registry.hub().and_then(|hub| hub.center()) else {
            log::debug!("diagram layout #{}: hub not laid out yet", self.layouts);
            return 0;
        };

        for (id, peer) in registry.peers() {
            if !peer.is_visible() {
                continue;
            }
            let Some(center) = peer.center() else {
                continue;
            };

            let curve = CubicBezier::connector(center, hub, self.config.handle_fraction);
            let path = ArcLengthPath::new(curve, self.config.subdivisions);
            let edge = self.attach(id, path);

            self.edges.push(edge);
        }

        log::debug!(
            "diagram layout #{}: {} edges, {} animations replaced",
            self.layouts,
            self.edges.len(),
            cancelled
        );

        self.edges.len()
    }

    fn attach(&mut self, peer: PeerId, path: ArcLengthPath) -> ConnectionEdge {
        let (marker, task) = if path.is_degenerate() {
            (path.curve().from, None)
        } else if self.config.reduced_motion {
            (path.midpoint(), None)
        } else {
            (path.curve().from, Some(self.scheduler.start(peer)))
        };

        ConnectionEdge {
            peer,
            path,
            marker,
            task,
        }
    }

    /// Moves every animated marker to where it is at `now`. Returns whether
    /// any marker is animated.
    pub fn tick(&mut self, now: Instant) -> bool {
        let steps = self.scheduler.frame(now);
        let speed = self.config.speed_px_per_second;

        for step in &steps {
            let Some(edge) = self.edges.iter_mut().find(|e| e.task == Some(step.id)) else {
                continue;
            };

            let total = edge.path.total_length();
            let distance = (step.elapsed.as_secs_f32() * speed) % total;
            edge.marker = edge.path.point_at_length(distance);
        }

        log::trace!("diagram frame: {} markers moved", steps.len());
        !steps.is_empty()
    }

    /// Cancels all animations and drops all edges.
    pub fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.edges.clear();

        if cancelled > 0 {
            log::debug!("diagram teardown: {cancelled} animations cancelled");
        }
    }
}

impl Default for ConnectorEngine {
    fn default() -> Self {
        Self::new(DiagramConfig::default())
    }
}

impl Drop for ConnectorEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ================================================================================
// Size Observer
// ================================================================================

/// Reports size changes of an observed container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeObserver {
    last: Option<Size>,
    detached: bool,
}

impl SizeObserver {
    /// Records `size`, returning whether it differs from the last one seen.
    /// Zero-sized containers are not laid out yet and never report.
    pub fn observe(&mut self, size: Size) -> bool {
        if self.detached || size.width <= 0.0 || size.height <= 0.0 {
            return false;
        }

        if self.last == Some(size) {
            return false;
        }

        self.last = Some(size);
        true
    }

    /// Stops reporting for good.
    pub fn detach(&mut self) {
        self.detached = true;
        self.last = None;
    }
}
