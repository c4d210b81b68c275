//! Core mesh data structures.
//!
//! This module provides the edge-based [`EditMesh`] representation and related
//! types for stitching operations on triangle meshes.
//!
//! # Overview
//!
//! The primary type is [`EditMesh`], which stores vertex positions with
//! selection flags, a unique unordered edge set with per-vertex incidence
//! lists, and triangle faces. Edges may exist without faces (wire edges),
//! which is what the bridge builder inserts between boundary loops.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`]
//! trait), allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O or from face-vertex lists:
//!
//! ```
//! use suture::mesh::{EditMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: EditMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod edit;
mod index;

pub use builder::{build_from_triangles, to_face_vertex};
pub use edit::{Edge, EditMesh, Vertex};
pub use index::{EdgeId, FaceId, MeshIndex, VertexId};
