//! Boundary loop tracing and classification.
//!
//! The stitching pipeline needs two ordered vertex sequences out of the
//! current selection: the `body_loop` (attachment target) and the
//! `face_loop` (to be attached). Tracing walks the selected vertices into
//! connected chains; which chain plays which role is a policy decision left
//! to a pluggable [`LoopClassifier`] strategy.
//!
//! The provided strategies:
//!
//! - [`LongestAsBody`] (default): longest traced loop is the body, second
//!   longest the face.
//! - [`NearestToTarget`]: the loop whose vertex count is closest to a known
//!   target size is the body, the largest remaining loop the face.

use std::collections::HashSet;

use crate::mesh::{MeshIndex, VertexId};
use crate::session::MeshEditingContext;

/// The outcome of boundary classification: two disjoint ordered loops.
///
/// Either loop may be empty, in which case bridging and relaxation
/// degenerate to no-ops rather than failing.
#[derive(Debug, Clone, Default)]
pub struct Classification<I: MeshIndex = u32> {
    /// The attachment target.
    pub body_loop: Vec<VertexId<I>>,

    /// The loop to be attached.
    pub face_loop: Vec<VertexId<I>>,
}

impl<I: MeshIndex> Classification<I> {
    /// An empty classification (downstream stages become no-ops).
    pub fn empty() -> Self {
        Self {
            body_loop: Vec::new(),
            face_loop: Vec::new(),
        }
    }

    /// Check whether either loop is empty.
    pub fn is_degenerate(&self) -> bool {
        self.body_loop.is_empty() || self.face_loop.is_empty()
    }
}

/// Strategy for assigning traced loops to the body/face roles.
pub trait LoopClassifier<I: MeshIndex> {
    /// Partition traced loops into a body loop and a face loop.
    ///
    /// Implementations must keep the two loops disjoint (traced loops
    /// already are) and return [`Classification::empty`] when no sensible
    /// assignment exists.
    fn classify(&self, loops: Vec<Vec<VertexId<I>>>) -> Classification<I>;
}

/// Default strategy: the longest loop is the body, the second longest the face.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestAsBody;

impl<I: MeshIndex> LoopClassifier<I> for LongestAsBody {
    fn classify(&self, mut loops: Vec<Vec<VertexId<I>>>) -> Classification<I> {
        if loops.len() < 2 {
            return Classification::empty();
        }
        loops.sort_by_key(|l| std::cmp::Reverse(l.len()));
        let body_loop = loops.remove(0);
        let face_loop = loops.remove(0);
        Classification { body_loop, face_loop }
    }
}

/// Strategy keyed on a known loop size.
///
/// The loop whose vertex count is closest to `target` becomes the body; the
/// largest remaining loop becomes the face. Useful when the attachment
/// target's size is known up front (e.g. a body seam of ~210 vertices).
#[derive(Debug, Clone, Copy)]
pub struct NearestToTarget {
    /// The expected body loop vertex count.
    pub target: usize,
}

impl<I: MeshIndex> LoopClassifier<I> for NearestToTarget {
    fn classify(&self, mut loops: Vec<Vec<VertexId<I>>>) -> Classification<I> {
        if loops.len() < 2 {
            return Classification::empty();
        }

        let body_idx = loops
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| l.len().abs_diff(self.target))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let body_loop = loops.remove(body_idx);

        let face_idx = loops
            .iter()
            .enumerate()
            .max_by_key(|(i, l)| (l.len(), std::cmp::Reverse(*i)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let face_loop = loops.remove(face_idx);

        Classification { body_loop, face_loop }
    }
}

/// Trace the selected vertices into connected, ordered chains.
///
/// Vertices are grouped by walking edges whose endpoints are both selected;
/// each chain is emitted in walk order. Closed boundary loops come out as a
/// single cycle; an open chain is walked end to end regardless of which of
/// its vertices is visited first.
pub fn trace_selected_loops<I, C>(ctx: &C) -> Vec<Vec<VertexId<I>>>
where
    I: MeshIndex,
    C: MeshEditingContext<I>,
{
    let selected = ctx.selected_vertices();
    let in_selection: HashSet<VertexId<I>> = selected.iter().copied().collect();
    let mut visited: HashSet<VertexId<I>> = HashSet::with_capacity(selected.len());
    let mut loops = Vec::new();

    for &start in &selected {
        if visited.contains(&start) {
            continue;
        }
        visited.insert(start);

        // Walk forward from the start until the chain closes or ends
        let mut chain = vec![start];
        let mut current = start;
        while let Some(next) = next_unvisited(ctx, &in_selection, &visited, current) {
            visited.insert(next);
            chain.push(next);
            current = next;
        }

        // For open chains the start may sit mid-chain; pick up the other
        // direction and prepend it
        let mut head = Vec::new();
        current = start;
        while let Some(prev) = next_unvisited(ctx, &in_selection, &visited, current) {
            visited.insert(prev);
            head.push(prev);
            current = prev;
        }
        if !head.is_empty() {
            head.reverse();
            head.extend(chain);
            chain = head;
        }

        loops.push(chain);
    }

    loops
}

fn next_unvisited<I, C>(
    ctx: &C,
    in_selection: &HashSet<VertexId<I>>,
    visited: &HashSet<VertexId<I>>,
    v: VertexId<I>,
) -> Option<VertexId<I>>
where
    I: MeshIndex,
    C: MeshEditingContext<I>,
{
    ctx.neighbors(v)
        .into_iter()
        .find(|n| in_selection.contains(n) && !visited.contains(n))
}
