//! Explicit edit sessions over a mesh.
//!
//! The stitching pipeline never touches a concrete mesh type directly; it is
//! written against the [`MeshEditingContext`] trait. [`EditSession`] is the
//! in-memory binding of that trait over an [`EditMesh`], replacing the
//! ambient active-object/edit-mode state a host editor would provide with an
//! explicit handle.
//!
//! # Example
//!
//! ```
//! use suture::mesh::{build_from_triangles, EditMesh};
//! use suture::session::{EditSession, MeshEditingContext};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//! let mut mesh: EditMesh = build_from_triangles(&vertices, &faces).unwrap();
//! mesh.select_boundary();
//!
//! let mut session = EditSession::new(&mut mesh);
//! assert_eq!(session.selected_vertices().len(), 3);
//! session.commit().unwrap();
//! ```

use nalgebra::Point3;

use crate::error::Result;
use crate::mesh::{EditMesh, MeshIndex, VertexId};

/// The mesh-editing surface the stitching pipeline depends on.
///
/// Mirrors what a host editor exposes to a scripted procedure: the current
/// selection, vertex positions, one-edge adjacency, idempotent edge
/// insertion, and a final commit. Implementations own how (and whether) the
/// edits are flushed anywhere.
pub trait MeshEditingContext<I: MeshIndex> {
    /// Get the currently selected vertices in a stable order.
    fn selected_vertices(&self) -> Vec<VertexId<I>>;

    /// Get the position of a vertex.
    fn position(&self, v: VertexId<I>) -> Point3<f64>;

    /// Move a vertex to a new position.
    fn set_position(&mut self, v: VertexId<I>, position: Point3<f64>);

    /// Get the vertices connected to `v` by one edge.
    fn neighbors(&self, v: VertexId<I>) -> Vec<VertexId<I>>;

    /// Get the number of edges incident to `v`.
    fn degree(&self, v: VertexId<I>) -> usize;

    /// Check whether an edge connects the unordered pair `(a, b)`.
    fn has_edge(&self, a: VertexId<I>, b: VertexId<I>) -> bool;

    /// Insert an edge between `a` and `b` unless one already exists.
    ///
    /// Returns `true` if a new edge was created.
    fn insert_edge_if_absent(&mut self, a: VertexId<I>, b: VertexId<I>) -> bool;

    /// Commit the edits made through this context.
    fn commit(&mut self) -> Result<()>;
}

/// An edit session over an in-memory [`EditMesh`].
///
/// Edits apply to the mesh in place; [`commit`](MeshEditingContext::commit)
/// finalizes the session and is where a host-backed implementation would
/// flush into an external edit buffer.
#[derive(Debug)]
pub struct EditSession<'m, I: MeshIndex = u32> {
    mesh: &'m mut EditMesh<I>,
}

impl<'m, I: MeshIndex> EditSession<'m, I> {
    /// Begin a session over the given mesh.
    pub fn new(mesh: &'m mut EditMesh<I>) -> Self {
        Self { mesh }
    }

    /// Access the underlying mesh.
    pub fn mesh(&self) -> &EditMesh<I> {
        self.mesh
    }
}

impl<'m, I: MeshIndex> MeshEditingContext<I> for EditSession<'m, I> {
    fn selected_vertices(&self) -> Vec<VertexId<I>> {
        self.mesh.selected_vertices()
    }

    fn position(&self, v: VertexId<I>) -> Point3<f64> {
        *self.mesh.position(v)
    }

    fn set_position(&mut self, v: VertexId<I>, position: Point3<f64>) {
        self.mesh.set_position(v, position);
    }

    fn neighbors(&self, v: VertexId<I>) -> Vec<VertexId<I>> {
        self.mesh.vertex_neighbors(v).collect()
    }

    fn degree(&self, v: VertexId<I>) -> usize {
        self.mesh.degree(v)
    }

    fn has_edge(&self, a: VertexId<I>, b: VertexId<I>) -> bool {
        self.mesh.has_edge(a, b)
    }

    fn insert_edge_if_absent(&mut self, a: VertexId<I>, b: VertexId<I>) -> bool {
        self.mesh.insert_edge_if_absent(a, b)
    }

    fn commit(&mut self) -> Result<()> {
        // The in-memory mesh is already current; nothing to flush.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;

    fn triangle_mesh() -> EditMesh<u32> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_session_reflects_selection() {
        let mut mesh = triangle_mesh();
        mesh.select(VertexId::new(1));

        let session = EditSession::new(&mut mesh);
        assert_eq!(session.selected_vertices(), vec![VertexId::new(1)]);
    }

    #[test]
    fn test_session_edits_apply_in_place() {
        let mut mesh = triangle_mesh();
        let v3 = mesh.add_vertex(Point3::new(2.0, 2.0, 2.0));

        let mut session = EditSession::new(&mut mesh);
        let v0 = VertexId::new(0);

        assert!(session.insert_edge_if_absent(v0, v3));
        assert!(!session.insert_edge_if_absent(v3, v0));
        session.set_position(v0, Point3::new(9.0, 0.0, 0.0));
        session.commit().unwrap();

        assert!(mesh.has_edge(v0, v3));
        assert_eq!(*mesh.position(v0), Point3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn test_neighbors_through_context() {
        let mut mesh = triangle_mesh();
        let session = EditSession::new(&mut mesh);

        let mut n: Vec<usize> = session
            .neighbors(VertexId::new(0))
            .iter()
            .map(|v| v.index())
            .collect();
        n.sort_unstable();
        assert_eq!(n, vec![1, 2]);
        assert_eq!(session.degree(VertexId::new(0)), 2);
    }
}
