//! Stitching algorithms.
//!
//! This module contains the stages of the boundary stitching procedure:
//!
//! - **Classification**: trace the selected boundary vertices into ordered
//!   loops and assign the body/face roles ([`classify`])
//! - **Bridging**: nearest-neighbor edge insertion between the loops
//!   ([`bridge`])
//! - **Relaxation**: damped Laplacian smoothing of the seam ([`relax`])
//! - **Pipeline**: the three stages plus commit in one call ([`stitch`])

pub mod bridge;
pub mod classify;
pub mod progress;
pub mod relax;
pub mod stitch;

pub use progress::Progress;
