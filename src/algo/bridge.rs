//! Nearest-neighbor bridge builder.
//!
//! Connects a face loop to a body loop by matching every face vertex to its
//! single nearest body vertex and inserting the connecting edge. The match
//! runs against a static kd-tree built once over the body loop positions;
//! the tree is never mutated during bridging.
//!
//! Edge insertion goes through the context's idempotence guard, so bridging
//! the same loops twice yields the same topology as bridging them once.

use kiddo::{KdTree, SquaredEuclidean};

use crate::mesh::{MeshIndex, VertexId};
use crate::session::MeshEditingContext;

/// Counters describing one bridging pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeReport {
    /// Number of new bridge edges inserted.
    pub edges_added: usize,

    /// Number of matches skipped because the edge already existed.
    pub edges_skipped: usize,
}

/// Bridge `face_loop` onto `body_loop` with nearest-neighbor edges.
///
/// For each vertex in `face_loop` the closest vertex of `body_loop` by
/// Euclidean distance is found (ties broken arbitrarily) and an edge is
/// inserted between the pair unless one already exists. Topology only
/// grows; positions are untouched.
///
/// An empty body or face loop is a no-op returning a zero report.
pub fn bridge_loops<I, C>(
    ctx: &mut C,
    body_loop: &[VertexId<I>],
    face_loop: &[VertexId<I>],
) -> BridgeReport
where
    I: MeshIndex,
    C: MeshEditingContext<I>,
{
    if body_loop.is_empty() || face_loop.is_empty() {
        return BridgeReport::default();
    }

    // Static index over the attachment target, balanced once
    let mut tree: KdTree<f64, 3> = KdTree::with_capacity(body_loop.len());
    for (i, &v) in body_loop.iter().enumerate() {
        let p = ctx.position(v);
        tree.add(&[p.x, p.y, p.z], i as u64);
    }

    let mut report = BridgeReport::default();
    for &v_face in face_loop {
        let p = ctx.position(v_face);
        let nearest = tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y, p.z]);
        let v_body = body_loop[nearest.item as usize];

        if ctx.insert_edge_if_absent(v_face, v_body) {
            report.edges_added += 1;
        } else {
            report.edges_skipped += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::EditMesh;
    use crate::session::EditSession;
    use nalgebra::Point3;

    fn mesh_with(points: &[(f64, f64, f64)]) -> (EditMesh<u32>, Vec<VertexId<u32>>) {
        let mut mesh = EditMesh::new();
        let ids = points
            .iter()
            .map(|&(x, y, z)| mesh.add_vertex(Point3::new(x, y, z)))
            .collect();
        (mesh, ids)
    }

    #[test]
    fn test_tie_inserts_exactly_one_edge() {
        // The face vertex is equidistant from both body vertices; either
        // match is acceptable but exactly one edge must appear
        let (mut mesh, ids) = mesh_with(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 0.0, 1.0)]);
        let body = vec![ids[0], ids[1]];
        let face = vec![ids[2]];

        let mut session = EditSession::new(&mut mesh);
        let report = bridge_loops(&mut session, &body, &face);

        assert_eq!(report.edges_added, 1);
        assert_eq!(report.edges_skipped, 0);
        assert!(session.has_edge(ids[2], ids[0]) || session.has_edge(ids[2], ids[1]));
        drop(session);
        assert_eq!(mesh.num_edges(), 1);
    }

    #[test]
    fn test_one_edge_per_face_vertex() {
        // Distinct coordinates, no pre-existing cross edges: exactly
        // len(face_loop) insertions
        let (mut mesh, ids) = mesh_with(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (0.1, 0.0, 1.0),
            (1.1, 0.0, 1.0),
            (2.1, 0.0, 1.0),
        ]);
        let body = vec![ids[0], ids[1], ids[2]];
        let face = vec![ids[3], ids[4], ids[5]];

        let mut session = EditSession::new(&mut mesh);
        let report = bridge_loops(&mut session, &body, &face);

        assert_eq!(report.edges_added, face.len());
        assert!(session.has_edge(ids[3], ids[0]));
        assert!(session.has_edge(ids[4], ids[1]));
        assert!(session.has_edge(ids[5], ids[2]));
    }

    #[test]
    fn test_bridge_is_idempotent() {
        let (mut mesh, ids) = mesh_with(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.5),
            (1.0, 1.0, 0.5),
        ]);
        let body = vec![ids[0], ids[1]];
        let face = vec![ids[2], ids[3]];

        let mut session = EditSession::new(&mut mesh);
        let first = bridge_loops(&mut session, &body, &face);
        drop(session);
        let edges_after_first: Vec<_> = mesh.edges().map(|(_, e)| *e).collect();

        let mut session = EditSession::new(&mut mesh);
        let second = bridge_loops(&mut session, &body, &face);
        drop(session);

        assert_eq!(first.edges_added, 2);
        assert_eq!(second.edges_added, 0);
        assert_eq!(second.edges_skipped, 2);

        let edges_after_second: Vec<_> = mesh.edges().map(|(_, e)| *e).collect();
        assert_eq!(edges_after_first, edges_after_second);
    }

    #[test]
    fn test_empty_loops_are_noops() {
        let (mut mesh, ids) = mesh_with(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let mut session = EditSession::new(&mut mesh);

        let report = bridge_loops(&mut session, &[], &ids);
        assert_eq!(report, BridgeReport::default());

        let report = bridge_loops(&mut session, &ids, &[]);
        assert_eq!(report, BridgeReport::default());

        drop(session);
        assert_eq!(mesh.num_edges(), 0);
    }
}
