//! Navigation graph representation and builder.
//!
//! # Data layout
//!
//! Lanes are undirected, so every lane `(a, b)` contributes two adjacency
//! entries: `a → b` and `b → a`.  Adjacency is stored in **Compressed Sparse
//! Row (CSR)** form.  Given a `VertexId v`, its neighbours occupy:
//!
//! ```text
//! adjacency[ adj_start[v] .. adj_start[v+1] ]
//! ```
//!
//! Duplicate lanes are kept, so a doubled lane shows up twice in the
//! neighbour slice.  Within one vertex, neighbours appear in lane order.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use fm_core::{Point, VertexId};

// ── Vertex / Lane ─────────────────────────────────────────────────────────────

/// A location on the floor plan plus free-form attributes such as `name` and
/// `is_charger`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawVertex")]
pub struct Vertex {
    pub pos:      Point,
    pub metadata: Map<String, Value>,
}

impl Vertex {
    pub fn new(pos: Point) -> Self {
        Self { pos, metadata: Map::new() }
    }

    /// The `name` attribute, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }

    /// `true` if the vertex carries `is_charger: true`.
    pub fn is_charger(&self) -> bool {
        self.metadata
            .get("is_charger")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// External vertex shape: `[x, y]` or `[x, y, {attrs}]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVertex {
    WithAttrs(f64, f64, Map<String, Value>),
    Bare(f64, f64),
}

impl From<RawVertex> for Vertex {
    fn from(raw: RawVertex) -> Self {
        match raw {
            RawVertex::WithAttrs(x, y, metadata) => Vertex { pos: Point::new(x, y), metadata },
            RawVertex::Bare(x, y) => Vertex::new(Point::new(x, y)),
        }
    }
}

/// An undirected connection between two vertices.  Attributes are carried
/// through from the source document but ignored by planning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawLane")]
pub struct Lane {
    pub a:     VertexId,
    pub b:     VertexId,
    pub attrs: Map<String, Value>,
}

impl Lane {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self { a, b, attrs: Map::new() }
    }
}

/// External lane shape: `[a, b]` or `[a, b, {attrs}]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLane {
    WithAttrs(u32, u32, Map<String, Value>),
    Bare(u32, u32),
}

impl From<RawLane> for Lane {
    fn from(raw: RawLane) -> Self {
        match raw {
            RawLane::WithAttrs(a, b, attrs) => Lane { a: VertexId(a), b: VertexId(b), attrs },
            RawLane::Bare(a, b) => Lane::new(VertexId(a), VertexId(b)),
        }
    }
}

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Undirected navigation graph with CSR adjacency.
///
/// Do not construct directly; use [`NavGraphBuilder`] or
/// [`NavGraph::from_parts`].
#[derive(Debug, Clone)]
pub struct NavGraph {
    /// Vertices in load order.  Indexed by `VertexId`.
    pub vertices: Vec<Vertex>,

    /// Lanes as supplied (including any the builder skipped as invalid).
    pub lanes: Vec<Lane>,

    /// CSR row pointer.  Length = `vertex_count + 1`.
    adj_start: Vec<u32>,

    /// Neighbour lists, concatenated in vertex order.
    adjacency: Vec<VertexId>,
}

impl NavGraph {
    /// A graph with no vertices or lanes.  What a failed load degrades to;
    /// every spawn and every plan against it fails cleanly.
    pub fn empty() -> Self {
        NavGraphBuilder::new().build()
    }

    /// Build from already-parsed collaborator data.
    pub fn from_parts(vertices: Vec<Vertex>, lanes: Vec<Lane>) -> Self {
        NavGraphBuilder { vertices, lanes }.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `true` if `v` is a valid index into this graph.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v.index())
    }

    /// Position of `v`.
    ///
    /// # Panics
    /// Panics if `v` is out of range; check with [`contains`](Self::contains)
    /// first when the id comes from outside.
    #[inline]
    pub fn position(&self, v: VertexId) -> Point {
        self.vertices[v.index()].pos
    }

    /// Neighbours of `v` in lane order.  Empty for unknown vertices.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        if !self.contains(v) {
            return &[];
        }
        let start = self.adj_start[v.index()] as usize;
        let end   = self.adj_start[v.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// Iterator over `(VertexId, &Vertex)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i as u32), v))
    }

    /// First vertex whose `name` attribute equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<VertexId> {
        self.iter().find(|(_, v)| v.name() == Some(name)).map(|(id, _)| id)
    }
}

// ── NavGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`NavGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fm_core::Point;
/// use fm_graph::NavGraphBuilder;
///
/// let mut b = NavGraphBuilder::new();
/// let a = b.add_vertex(Point::new(0.0, 0.0));
/// let c = b.add_vertex(Point::new(1.0, 0.0));
/// b.add_lane(a, c);
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.neighbors(a), &[c]);
/// ```
#[derive(Default)]
pub struct NavGraphBuilder {
    vertices: Vec<Vertex>,
    lanes:    Vec<Lane>,
}

impl NavGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with no attributes and return its `VertexId`
    /// (sequential from 0).
    pub fn add_vertex(&mut self, pos: Point) -> VertexId {
        self.push_vertex(Vertex::new(pos))
    }

    /// Add a vertex with a `name` attribute.
    pub fn add_named_vertex(&mut self, pos: Point, name: &str, is_charger: bool) -> VertexId {
        let mut vertex = Vertex::new(pos);
        vertex.metadata.insert("name".into(), Value::from(name));
        if is_charger {
            vertex.metadata.insert("is_charger".into(), Value::Bool(true));
        }
        self.push_vertex(vertex)
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(vertex);
        id
    }

    /// Add an undirected lane between `a` and `b`.
    pub fn add_lane(&mut self, a: VertexId, b: VertexId) {
        self.lanes.push(Lane::new(a, b));
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn lane_count(&self) -> usize { self.lanes.len() }

    /// Consume the builder and produce a [`NavGraph`].
    ///
    /// Lanes naming a vertex index past the end are logged and left out of
    /// the adjacency.  Time complexity: O(V + L log L).
    pub fn build(self) -> NavGraph {
        let vertex_count = self.vertices.len();

        // Two directed half-edges per lane; stable sort keeps lane order
        // within each source vertex.
        let mut half_edges: Vec<(VertexId, VertexId)> = Vec::with_capacity(self.lanes.len() * 2);
        for lane in &self.lanes {
            if lane.a.index() >= vertex_count || lane.b.index() >= vertex_count {
                warn!(a = lane.a.0, b = lane.b.0, vertex_count, "lane endpoint out of range; skipped");
                continue;
            }
            half_edges.push((lane.a, lane.b));
            half_edges.push((lane.b, lane.a));
        }
        half_edges.sort_by_key(|&(from, _)| from);

        let mut adj_start = vec![0u32; vertex_count + 1];
        for &(from, _) in &half_edges {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[vertex_count] as usize, half_edges.len());

        let adjacency = half_edges.into_iter().map(|(_, to)| to).collect();

        NavGraph {
            vertices: self.vertices,
            lanes: self.lanes,
            adj_start,
            adjacency,
        }
    }
}
