//! Editable mesh for boundary stitching.
//!
//! This module provides [`EditMesh`], an edge-based mesh representation for
//! edit-session style operations: vertex positions carry a selection flag,
//! edges are unique unordered vertex pairs with per-vertex incidence lists,
//! and triangle faces are kept for I/O and boundary detection.
//!
//! # Why edge-based
//!
//! Bridging two boundary loops inserts *wire* edges: edges with no incident
//! face. A face-centric connectivity structure cannot carry those, so the
//! mesh here stores the edge set explicitly and treats faces as an overlay
//! that contributes incidence counts.
//!
//! # Edge Uniqueness
//!
//! At most one edge exists per unordered vertex pair. [`EditMesh::insert_edge_if_absent`]
//! enforces this and is the idempotence guard that makes bridging safe to re-run.

use std::collections::HashMap;

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, MeshIndex, VertexId};

/// A vertex in the edit mesh.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Whether this vertex is part of the current selection.
    pub selected: bool,
}

impl Vertex {
    /// Create a new unselected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            selected: false,
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// An edge in the edit mesh: an unordered pair of distinct vertices.
///
/// Endpoints are stored in canonical order (`a < b`), so two edges over the
/// same unordered pair compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<I: MeshIndex = u32> {
    /// The smaller endpoint.
    pub a: VertexId<I>,

    /// The larger endpoint.
    pub b: VertexId<I>,
}

impl<I: MeshIndex> Edge<I> {
    /// Create an edge over the unordered pair `(a, b)`.
    pub fn new(a: VertexId<I>, b: VertexId<I>) -> Self {
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Get the endpoint opposite to `v`, or `None` if `v` is not an endpoint.
    pub fn other(&self, v: VertexId<I>) -> Option<VertexId<I>> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Check whether `v` is an endpoint of this edge.
    pub fn contains(&self, v: VertexId<I>) -> bool {
        v == self.a || v == self.b
    }
}

/// An edge-based editable mesh.
///
/// Stores vertex positions with selection flags, a unique unordered edge set
/// with per-vertex incidence lists, and triangle faces. Topology only grows;
/// there is no element removal. The structure models a single edit session,
/// not a general modeling kernel.
#[derive(Debug, Clone, Default)]
pub struct EditMesh<I: MeshIndex = u32> {
    vertices: Vec<Vertex>,
    edges: Vec<Edge<I>>,
    faces: Vec<[VertexId<I>; 3]>,

    /// Canonical (min, max) vertex pair -> edge id.
    edge_lookup: HashMap<(VertexId<I>, VertexId<I>), EdgeId<I>>,

    /// Incident edges per vertex, parallel to `vertices`.
    incidence: Vec<Vec<EdgeId<I>>>,

    /// Incident face count per edge, parallel to `edges`.
    edge_face_count: Vec<u32>,
}

impl<I: MeshIndex> EditMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            edge_lookup: HashMap::new(),
            incidence: Vec::new(),
            edge_face_count: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // Roughly E = 3F/2 for a closed triangle mesh, more with boundary
        let num_edges = num_faces + num_faces / 2 + 3;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            edges: Vec::with_capacity(num_edges),
            faces: Vec::with_capacity(num_faces),
            edge_lookup: HashMap::with_capacity(num_edges),
            incidence: Vec::with_capacity(num_vertices),
            edge_face_count: Vec::with_capacity(num_edges),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get the corner vertices of a face.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> [VertexId<I>; 3] {
        self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Selection ====================

    /// Check if a vertex is selected.
    #[inline]
    pub fn is_selected(&self, v: VertexId<I>) -> bool {
        self.vertex(v).selected
    }

    /// Mark a vertex as selected.
    #[inline]
    pub fn select(&mut self, v: VertexId<I>) {
        self.vertex_mut(v).selected = true;
    }

    /// Clear the selection on all vertices.
    pub fn deselect_all(&mut self) {
        for v in &mut self.vertices {
            v.selected = false;
        }
    }

    /// Get all selected vertices in id order.
    pub fn selected_vertices(&self) -> Vec<VertexId<I>> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.selected)
            .map(|(i, _)| VertexId::new(i))
            .collect()
    }

    /// Select every vertex on a boundary or non-manifold edge.
    ///
    /// A boundary edge has exactly one incident face; a non-manifold edge has
    /// three or more. Wire edges (zero incident faces) are not selected, so
    /// previously inserted bridge edges never re-enter the selection.
    ///
    /// Returns the total number of selected vertices afterwards.
    pub fn select_boundary(&mut self) -> usize {
        for (i, edge) in self.edges.iter().enumerate() {
            let count = self.edge_face_count[i];
            if count == 1 || count >= 3 {
                self.vertices[edge.a.index()].selected = true;
                self.vertices[edge.b.index()].selected = true;
            }
        }
        self.vertices.iter().filter(|v| v.selected).count()
    }

    // ==================== Topology ====================

    fn edge_key(a: VertexId<I>, b: VertexId<I>) -> (VertexId<I>, VertexId<I>) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Find the edge connecting `a` and `b`, if any.
    pub fn find_edge(&self, a: VertexId<I>, b: VertexId<I>) -> Option<EdgeId<I>> {
        self.edge_lookup.get(&Self::edge_key(a, b)).copied()
    }

    /// Check whether an edge connects the unordered pair `(a, b)`.
    #[inline]
    pub fn has_edge(&self, a: VertexId<I>, b: VertexId<I>) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Insert an edge between `a` and `b` unless one already exists.
    ///
    /// Returns `true` if a new edge was created. Inserting an existing pair
    /// or a self-loop (`a == b`) is a silent no-op returning `false`.
    pub fn insert_edge_if_absent(&mut self, a: VertexId<I>, b: VertexId<I>) -> bool {
        if a == b {
            return false;
        }
        let key = Self::edge_key(a, b);
        if self.edge_lookup.contains_key(&key) {
            return false;
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge::new(a, b));
        self.edge_face_count.push(0);
        self.incidence[a.index()].push(id);
        self.incidence[b.index()].push(id);
        self.edge_lookup.insert(key, id);
        true
    }

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        self.incidence.push(Vec::new());
        id
    }

    /// Add a triangle face and return its ID.
    ///
    /// The three perimeter edges are inserted if absent and their incident
    /// face counts updated. Corners must be distinct; the builder validates
    /// this for untrusted input.
    pub fn add_face(&mut self, corners: [VertexId<I>; 3]) -> FaceId<I> {
        debug_assert!(
            corners[0] != corners[1] && corners[1] != corners[2] && corners[0] != corners[2],
            "degenerate face {:?}",
            corners
        );

        let id = FaceId::new(self.faces.len());
        self.faces.push(corners);

        for (a, b) in [
            (corners[0], corners[1]),
            (corners[1], corners[2]),
            (corners[2], corners[0]),
        ] {
            self.insert_edge_if_absent(a, b);
            if let Some(e) = self.find_edge(a, b) {
                self.edge_face_count[e.index()] += 1;
            }
        }

        id
    }

    /// Get the number of faces incident to an edge.
    #[inline]
    pub fn edge_face_count(&self, e: EdgeId<I>) -> usize {
        self.edge_face_count[e.index()] as usize
    }

    /// Check if an edge is a wire edge (no incident faces).
    #[inline]
    pub fn is_wire_edge(&self, e: EdgeId<I>) -> bool {
        self.edge_face_count[e.index()] == 0
    }

    /// Check if an edge lies on an open boundary or a non-manifold fan.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let count = self.edge_face_count[e.index()];
        count == 1 || count >= 3
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(|i| VertexId::new(i))
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(|i| EdgeId::new(i))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(|i| FaceId::new(i))
    }

    /// Iterate over all edges with their IDs.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId<I>, &Edge<I>)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::new(i), e))
    }

    /// Iterate over all wire edges (edges with no incident face).
    pub fn wire_edges(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.edge_ids().filter(|&e| self.is_wire_edge(e))
    }

    /// Iterate over the edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.incidence[v.index()].iter().copied()
    }

    /// Iterate over the vertices adjacent to a vertex by one edge.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_edges(v)
            .filter_map(move |e| self.edge(e).other(v))
    }

    /// Compute the degree (incident edge count) of a vertex.
    #[inline]
    pub fn degree(&self, v: VertexId<I>) -> usize {
        self.incidence[v.index()].len()
    }

    // ==================== Geometry ====================

    /// Compute the length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        let edge = self.edge(e);
        (self.position(edge.b) - self.position(edge.a)).norm()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0].position;
        let mut max = self.vertices[0].position;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }
}
