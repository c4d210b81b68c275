//! # Suture
//!
//! A library for stitching mesh boundary loops and relaxing the seam.
//!
//! Suture takes a triangle mesh with two open boundary loops, say a body
//! scan and a separately modeled head, bridges them with nearest-neighbor
//! edges, and smooths the transition with a damped Laplacian pass so the
//! joint reads as one surface.
//!
//! ## Features
//!
//! - **Edge-based edit mesh**: unique unordered edges with per-vertex
//!   incidence, selection flags, and wire-edge support
//! - **Pluggable loop classification**: decide which boundary loop is the
//!   attachment target via a strategy trait
//! - **Nearest-neighbor bridging**: static kd-tree matching, idempotent
//!   edge insertion
//! - **Seam relaxation**: simultaneous-update Laplacian smoothing of the
//!   stitched seam, optionally in parallel
//! - **Multiple file formats**: OBJ (with wire edges), STL, PLY
//!
//! ## Quick Start
//!
//! ```no_run
//! use suture::prelude::*;
//! use suture::algo::classify::LongestAsBody;
//! use suture::algo::stitch::{stitch_selected, StitchOptions};
//!
//! // Load a mesh with two open boundary loops
//! let mut mesh: EditMesh = suture::io::load("scan.obj").unwrap();
//!
//! // Select the boundaries, as a host editor's non-manifold select would
//! mesh.select_boundary();
//!
//! // Stitch and relax
//! let mut session = EditSession::new(&mut mesh);
//! let report = stitch_selected(&mut session, &LongestAsBody, &StitchOptions::default()).unwrap();
//! println!("Added {} bridge edges", report.edges_added);
//!
//! suture::io::save(&mesh, "stitched.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use suture::prelude::*;
//! use nalgebra::Point3;
//!
//! // Define vertices and faces
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! // Build the mesh
//! let mesh: EditMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_edges(), 6);
//! ```
//!
//! ## Working Through a Session
//!
//! The geometric pipeline depends only on the
//! [`MeshEditingContext`](session::MeshEditingContext) trait, never on the
//! concrete mesh type. [`EditSession`](session::EditSession) binds the
//! trait to an in-memory [`EditMesh`](mesh::EditMesh); a host-backed
//! implementation can flush edits elsewhere in
//! [`commit`](session::MeshEditingContext::commit).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod session;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use suture::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, Edge, EdgeId, EditMesh, FaceId, MeshIndex, Vertex,
        VertexId,
    };
    pub use crate::session::{EditSession, MeshEditingContext};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mut mesh: EditMesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        // Closed mesh: every edge has exactly two incident faces
        assert_eq!(mesh.num_edges(), 6);
        for e in mesh.edge_ids() {
            assert_eq!(mesh.edge_face_count(e), 2);
        }

        // A closed mesh has no boundary to select
        assert_eq!(mesh.select_boundary(), 0);
    }
}
