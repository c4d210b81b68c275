//! The stitching pipeline.
//!
//! Runs the full procedure over an edit session: trace and classify the
//! selected boundary loops, bridge the face loop onto the body loop, relax
//! the combined seam, and commit. Degenerate inputs (nothing selected,
//! fewer than two loops) produce a zero [`StitchReport`], never an error;
//! only [`commit`](crate::session::MeshEditingContext::commit) can fail.

use crate::error::Result;
use crate::mesh::{MeshIndex, VertexId};
use crate::session::MeshEditingContext;

use super::bridge::bridge_loops;
use super::classify::{trace_selected_loops, LoopClassifier};
use super::relax::{relax_seam, RelaxOptions};

/// Options for the full stitching pipeline.
#[derive(Debug, Clone, Default)]
pub struct StitchOptions {
    /// Relaxation parameters for the seam pass.
    pub relax: RelaxOptions,

    /// Skip the relaxation pass entirely (bridge only).
    pub skip_relax: bool,
}

impl StitchOptions {
    /// Create options with the given relaxation parameters.
    pub fn with_relax(mut self, relax: RelaxOptions) -> Self {
        self.relax = relax;
        self
    }

    /// Create options that bridge without relaxing the seam.
    pub fn without_relax(mut self) -> Self {
        self.skip_relax = true;
        self
    }
}

/// Summary of one stitching run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchReport {
    /// Vertex count of the classified body loop.
    pub body_loop_len: usize,

    /// Vertex count of the classified face loop.
    pub face_loop_len: usize,

    /// Number of new bridge edges inserted.
    pub edges_added: usize,

    /// Number of matches skipped because the edge already existed.
    pub edges_skipped: usize,

    /// Number of relaxation iterations applied to the seam.
    pub relax_iterations: usize,
}

/// Stitch the currently selected boundary loops and relax the seam.
///
/// Pipeline: classify → bridge → relax → commit. Re-running the pipeline on
/// the same mesh adds no edges the second time (insertion is idempotent),
/// but the seam relaxes further on every run.
///
/// # Example
///
/// ```
/// use suture::prelude::*;
/// use suture::algo::classify::LongestAsBody;
/// use suture::algo::stitch::{stitch_selected, StitchOptions};
/// use nalgebra::Point3;
///
/// // Two disjoint triangle fans, each with one open boundary ring
/// let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
/// let mut faces = Vec::new();
/// for i in 0..6 {
///     let a = i as f64 / 6.0 * std::f64::consts::TAU;
///     vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
/// }
/// for i in 0..6 {
///     faces.push([0, 1 + i, 1 + (i + 1) % 6]);
/// }
/// let base = vertices.len();
/// vertices.push(Point3::new(0.0, 0.0, 1.0));
/// for i in 0..4 {
///     let a = i as f64 / 4.0 * std::f64::consts::TAU;
///     vertices.push(Point3::new(0.5 * a.cos(), 0.5 * a.sin(), 1.0));
/// }
/// for i in 0..4 {
///     faces.push([base, base + 1 + i, base + 1 + (i + 1) % 4]);
/// }
///
/// let mut mesh: EditMesh = build_from_triangles(&vertices, &faces).unwrap();
/// mesh.select_boundary();
///
/// let mut session = EditSession::new(&mut mesh);
/// let report = stitch_selected(&mut session, &LongestAsBody, &StitchOptions::default()).unwrap();
/// assert_eq!(report.body_loop_len, 6);
/// assert_eq!(report.edges_added, 4);
/// ```
pub fn stitch_selected<I, C, S>(
    ctx: &mut C,
    classifier: &S,
    options: &StitchOptions,
) -> Result<StitchReport>
where
    I: MeshIndex,
    C: MeshEditingContext<I> + Sync,
    S: LoopClassifier<I> + ?Sized,
{
    let loops = trace_selected_loops(ctx);
    let classification = classifier.classify(loops);

    if classification.is_degenerate() {
        ctx.commit()?;
        return Ok(StitchReport::default());
    }

    let bridge = bridge_loops(ctx, &classification.body_loop, &classification.face_loop);

    let mut report = StitchReport {
        body_loop_len: classification.body_loop.len(),
        face_loop_len: classification.face_loop.len(),
        edges_added: bridge.edges_added,
        edges_skipped: bridge.edges_skipped,
        relax_iterations: 0,
    };

    if !options.skip_relax {
        // The seam is the union of both loops; they are disjoint by
        // construction
        let seam: Vec<VertexId<I>> = classification
            .body_loop
            .iter()
            .chain(classification.face_loop.iter())
            .copied()
            .collect();
        relax_seam(ctx, &seam, &options.relax);
        report.relax_iterations = options.relax.iterations;
    }

    ctx.commit()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::classify::LongestAsBody;
    use crate::mesh::EditMesh;
    use crate::session::EditSession;
    use nalgebra::Point3;

    /// Two disjoint triangle fans: one with `n0` boundary vertices at z=0,
    /// one with `n1` at z=1.
    fn two_fans(n0: usize, n1: usize) -> EditMesh<u32> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for (ring, z) in [(n0, 0.0), (n1, 1.0)] {
            let center = vertices.len();
            vertices.push(Point3::new(0.0, 0.0, z));
            for i in 0..ring {
                let a = i as f64 / ring as f64 * std::f64::consts::TAU;
                vertices.push(Point3::new(a.cos(), a.sin(), z));
            }
            for i in 0..ring {
                faces.push([center, center + 1 + i, center + 1 + (i + 1) % ring]);
            }
        }

        crate::mesh::build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let mut mesh = two_fans(6, 4);
        let selected = mesh.select_boundary();
        assert_eq!(selected, 10); // fan centers are interior

        let mut session = EditSession::new(&mut mesh);
        let report =
            stitch_selected(&mut session, &LongestAsBody, &StitchOptions::default()).unwrap();

        assert_eq!(report.body_loop_len, 6);
        assert_eq!(report.face_loop_len, 4);
        assert_eq!(report.edges_added, 4);
        assert_eq!(report.edges_skipped, 0);
        assert_eq!(report.relax_iterations, 3);
        drop(session);

        // Every new edge is a wire edge crossing between the fans
        assert_eq!(mesh.wire_edges().count(), 4);
    }

    #[test]
    fn test_rerun_adds_no_edges_but_keeps_relaxing() {
        // Equal-size rings at matching angles: every face vertex has an
        // unambiguous nearest partner straight across the gap, and
        // relaxation preserves the rotational symmetry, so matches are
        // stable across runs
        let mut mesh = two_fans(6, 6);
        mesh.select_boundary();

        let mut session = EditSession::new(&mut mesh);
        let options = StitchOptions::default();
        let first = stitch_selected(&mut session, &LongestAsBody, &options).unwrap();
        drop(session);

        let edges_after_first = mesh.num_edges();
        let positions_after_first: Vec<_> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

        // Selection is still in place; run the whole procedure again
        let mut session = EditSession::new(&mut mesh);
        let second = stitch_selected(&mut session, &LongestAsBody, &options).unwrap();
        drop(session);

        assert_eq!(first.edges_added, 6);
        assert_eq!(second.edges_added, 0);
        assert_eq!(second.edges_skipped, 6);
        assert_eq!(mesh.num_edges(), edges_after_first);

        // Smoothing has no idempotence guard: the seam moved again
        let moved = mesh
            .vertex_ids()
            .zip(positions_after_first.iter())
            .any(|(v, before)| (mesh.position(v) - before).norm() > 1e-12);
        assert!(moved);
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut mesh = two_fans(5, 3);
        let edges_before = mesh.num_edges();

        let mut session = EditSession::new(&mut mesh);
        let report =
            stitch_selected(&mut session, &LongestAsBody, &StitchOptions::default()).unwrap();
        drop(session);

        assert_eq!(report, StitchReport::default());
        assert_eq!(mesh.num_edges(), edges_before);
    }

    #[test]
    fn test_skip_relax_leaves_positions() {
        let mut mesh = two_fans(6, 4);
        mesh.select_boundary();
        let positions_before: Vec<_> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

        let mut session = EditSession::new(&mut mesh);
        let options = StitchOptions::default().without_relax();
        let report = stitch_selected(&mut session, &LongestAsBody, &options).unwrap();
        drop(session);

        assert_eq!(report.edges_added, 4);
        assert_eq!(report.relax_iterations, 0);
        for (v, before) in mesh.vertex_ids().zip(positions_before.iter()) {
            assert_eq!(mesh.position(v), before);
        }
    }

    #[test]
    fn test_classifier_as_trait_object() {
        let mut mesh = two_fans(6, 4);
        mesh.select_boundary();

        let classifier: Box<dyn LoopClassifier<u32>> = Box::new(LongestAsBody);
        let mut session = EditSession::new(&mut mesh);
        let report =
            stitch_selected(&mut session, classifier.as_ref(), &StitchOptions::default()).unwrap();
        assert_eq!(report.edges_added, 4);
    }
}
