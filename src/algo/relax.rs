//! Seam relaxation.
//!
//! After bridging, the seam between the two loops is uneven: bridge edges
//! pull face vertices toward whatever body vertex happened to be nearest.
//! Relaxation applies a damped discrete Laplacian step to the seam vertex
//! set so the transition reads as a continuous surface.
//!
//! # Update semantics
//!
//! Updates are simultaneous: each iteration reads a snapshot of the current
//! positions and writes every new position at the end of the pass. Neighbor
//! reads never observe a partially updated iteration, regardless of vertex
//! order or parallelism. (The staggered alternative of reading positions already moved this
//! iteration is order-dependent and is deliberately not implemented.)

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::mesh::{MeshIndex, VertexId};
use crate::session::MeshEditingContext;

use super::Progress;

/// Options for seam relaxation.
#[derive(Debug, Clone)]
pub struct RelaxOptions {
    /// Number of relaxation iterations.
    pub iterations: usize,

    /// Interpolation factor toward the neighbor average (0.0 to 1.0).
    /// 0.5 moves each vertex halfway to the mean of its neighbors.
    pub factor: f64,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            iterations: 3,
            factor: 0.5,
            parallel: true,
        }
    }
}

impl RelaxOptions {
    /// Create options with the specified number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create options with the specified interpolation factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Relax a set of seam vertices toward their neighbor averages.
///
/// For each iteration, every vertex in `seam` moves `factor` of the way
/// from its current position toward the arithmetic mean of its
/// edge-connected neighbors. Vertices with no incident edges are skipped
/// and keep their exact position. No topology changes.
///
/// # Example
///
/// ```
/// use suture::mesh::EditMesh;
/// use suture::session::EditSession;
/// use suture::algo::relax::{relax_seam, RelaxOptions};
/// use nalgebra::Point3;
///
/// let mut mesh: EditMesh = EditMesh::new();
/// let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.insert_edge_if_absent(v0, v1);
///
/// let mut session = EditSession::new(&mut mesh);
/// let options = RelaxOptions::default().with_iterations(1);
/// relax_seam(&mut session, &[v0, v1], &options);
/// ```
pub fn relax_seam<I, C>(ctx: &mut C, seam: &[VertexId<I>], options: &RelaxOptions)
where
    I: MeshIndex,
    C: MeshEditingContext<I> + Sync,
{
    if options.iterations == 0 || options.factor == 0.0 || seam.is_empty() {
        return;
    }

    for _ in 0..options.iterations {
        relax_iteration(ctx, seam, options.factor, options.parallel);
    }
}

/// Seam relaxation with progress reporting.
pub fn relax_seam_with_progress<I, C>(
    ctx: &mut C,
    seam: &[VertexId<I>],
    options: &RelaxOptions,
    progress: &Progress,
) where
    I: MeshIndex,
    C: MeshEditingContext<I> + Sync,
{
    if options.iterations == 0 || options.factor == 0.0 || seam.is_empty() {
        return;
    }

    for iter in 0..options.iterations {
        progress.report(iter, options.iterations, "Relaxing seam");
        relax_iteration(ctx, seam, options.factor, options.parallel);
    }
    progress.report(options.iterations, options.iterations, "Relaxing seam");
}

/// Apply a single simultaneous relaxation step to the seam set.
fn relax_iteration<I, C>(ctx: &mut C, seam: &[VertexId<I>], factor: f64, parallel: bool)
where
    I: MeshIndex,
    C: MeshEditingContext<I> + Sync,
{
    // Compute all new positions against the pre-iteration snapshot
    let new_positions: Vec<Point3<f64>> = {
        let ctx_read: &C = ctx;
        if parallel {
            seam.par_iter()
                .map(|&v| compute_relax_step(ctx_read, v, factor))
                .collect()
        } else {
            seam.iter()
                .map(|&v| compute_relax_step(ctx_read, v, factor))
                .collect()
        }
    };

    // Apply new positions
    for (&v, &pos) in seam.iter().zip(new_positions.iter()) {
        ctx.set_position(v, pos);
    }
}

/// Compute one relaxation step for a vertex using uniform weights.
fn compute_relax_step<I, C>(ctx: &C, v: VertexId<I>, factor: f64) -> Point3<f64>
where
    I: MeshIndex,
    C: MeshEditingContext<I>,
{
    let pos = ctx.position(v);
    let neighbors = ctx.neighbors(v);

    // Zero-degree vertices keep their exact position
    if neighbors.is_empty() {
        return pos;
    }

    let mut centroid = Vector3::zeros();
    for n in &neighbors {
        centroid += ctx.position(*n).coords;
    }
    centroid /= neighbors.len() as f64;

    // Move toward the centroid
    let displacement = centroid - pos.coords;
    Point3::from(pos.coords + factor * displacement)
}
