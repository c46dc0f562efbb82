//! Network-graph strategy: the full-relayout path.
//!
//! Every frame the layout is rebuilt from scratch: population and
//! memberships may change shape between frames, so nothing of the previous
//! layout is reused.  Use the scatter strategy when only colors and
//! positions change.

use epi_core::{ColorMapping, EntityId, NamedColor, Position};
use epi_sim::{Simulation, Topology};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, warn};

use crate::{EnvironmentView, LayoutMode, RenderError, RenderResult, SpatialRenderer, SpatialUpdate};

#[cfg(not(feature = "fx-hash"))]
type IdIndex = std::collections::HashMap<EntityId, NodeIndex>;
#[cfg(feature = "fx-hash")]
type IdIndex = rustc_hash::FxHashMap<EntityId, NodeIndex>;

// ── Nodes ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Facility,
    Household,
    Business,
    Person,
}

impl EntityKind {
    /// Display radius (marker area, in points²).
    pub fn radius(self) -> f64 {
        match self {
            EntityKind::Person => 10.0,
            _ => 30.0,
        }
    }

    /// Fixed color of building nodes; people are colored by status.
    pub fn building_color(self) -> Option<NamedColor> {
        match self {
            EntityKind::Facility  => Some(NamedColor::Pink),
            EntityKind::Household => Some(NamedColor::DarkBlue),
            EntityKind::Business  => Some(NamedColor::DarkRed),
            EntityKind::Person    => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id:       EntityId,
    pub kind:     EntityKind,
    pub position: Position,
    pub color:    NamedColor,
    pub radius:   f64,
}

// ── GraphLayout ───────────────────────────────────────────────────────────────

/// Nodes keyed by entity id plus undirected membership edges.
#[derive(Clone, Debug, Default)]
pub struct GraphLayout {
    graph: UnGraph<GraphNode, ()>,
    index: IdIndex,
}

impl GraphLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node`, or overwrite the attributes of the node with its id.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&ix) = self.index.get(&node.id) {
            warn!(id = %node.id, "duplicate entity id in graph layout; attributes replaced");
            self.graph[ix] = node;
            return ix;
        }
        let id = node.id;
        let ix = self.graph.add_node(node);
        self.index.insert(id, ix);
        ix
    }

    /// Connect two existing nodes.  Returns `false` (and adds nothing) if
    /// either id is unknown.
    pub fn add_edge(&mut self, a: EntityId, b: EntityId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&ia), Some(&ib)) => {
                self.graph.update_edge(ia, ib, ());
                true
            }
            _ => false,
        }
    }

    pub fn node(&self, id: EntityId) -> Option<&GraphNode> {
        self.index.get(&id).map(|&ix| &self.graph[ix])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Edge endpoints in environment coordinates.
    pub fn edge_segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].position, self.graph[e.target()].position))
    }

    pub fn has_edge(&self, a: EntityId, b: EntityId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&ia), Some(&ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
    }

    /// Build the layout of one frame.
    pub fn build(
        topology:      Topology<'_>,
        sim:           &dyn Simulation,
        colors:        &ColorMapping,
        edges_enabled: bool,
    ) -> Self {
        let people = sim.population();
        let mut layout = GraphLayout {
            graph: UnGraph::with_capacity(
                1 + topology.houses.len() + topology.business.len() + people.len(),
                0,
            ),
            index: IdIndex::default(),
        };

        let facility = topology.healthcare;
        layout.add_building(facility.id, EntityKind::Facility, facility.position);
        for house in topology.houses {
            layout.add_building(house.id, EntityKind::Household, house.position);
        }
        for bus in topology.business {
            layout.add_building(bus.id, EntityKind::Business, bus.position);
        }
        for person in people {
            layout.add_node(GraphNode {
                id:       person.id,
                kind:     EntityKind::Person,
                position: person.position,
                color:    colors.agent_color(person.status, person.severity),
                radius:   EntityKind::Person.radius(),
            });
        }

        if edges_enabled {
            let memberships = topology
                .houses
                .iter()
                .flat_map(|h| h.homemates.iter().map(move |&p| (h.id, p)))
                .chain(
                    topology
                        .business
                        .iter()
                        .flat_map(|b| b.employees.iter().map(move |&p| (b.id, p))),
                );
            let mut skipped = 0usize;
            for (owner, member) in memberships {
                if !layout.add_edge(owner, member) {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                debug!(skipped, "membership edges to unknown people skipped");
            }
        }

        layout
    }

    fn add_building(&mut self, id: EntityId, kind: EntityKind, position: Position) {
        let color = kind.building_color().unwrap_or(NamedColor::Black);
        self.add_node(GraphNode { id, kind, position, color, radius: kind.radius() });
    }
}

// ── GraphStrategy ─────────────────────────────────────────────────────────────

/// [`SpatialRenderer`] that rebuilds a node/edge layout every frame.
#[derive(Debug, Default)]
pub struct GraphStrategy {
    edges_enabled: bool,
    layout:        GraphLayout,
}

impl GraphStrategy {
    pub fn new(edges_enabled: bool) -> Self {
        Self { edges_enabled, layout: GraphLayout::new() }
    }

    pub fn layout_graph(&self) -> &GraphLayout {
        &self.layout
    }

    pub fn edges_enabled(&self) -> bool {
        self.edges_enabled
    }

    fn rebuild(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<()> {
        let topology = sim.topology().ok_or(RenderError::TopologyUnavailable)?;
        self.layout = GraphLayout::build(topology, sim, colors, self.edges_enabled);
        Ok(())
    }
}

impl SpatialRenderer for GraphStrategy {
    fn layout(&self) -> LayoutMode {
        LayoutMode::Graph
    }

    fn setup(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<()> {
        self.rebuild(sim, colors)
    }

    fn clear(&mut self) -> SpatialUpdate {
        self.layout.clear();
        SpatialUpdate::Relayout
    }

    fn step(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<SpatialUpdate> {
        self.rebuild(sim, colors)?;
        Ok(SpatialUpdate::Relayout)
    }

    fn view(&self) -> EnvironmentView<'_> {
        EnvironmentView::Graph(&self.layout)
    }
}
