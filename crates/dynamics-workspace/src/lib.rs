//! Reachable-workspace sampling and its convex hull.
//!
//! Casts rays from a robot's neutral reach, walks each to its IK-reachable
//! boundary, and wraps the resulting point cloud in a convex hull.

pub mod error;
pub mod hull;
pub mod sampler;

pub use error::WorkspaceError;
pub use hull::{convex_hull, HullMesh};
pub use sampler::{
    fibonacci_sphere, sample_workspace, BoundingBox, WorkspaceOptions, WorkspaceResult,
};
