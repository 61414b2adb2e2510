//! # **`dynamics`**: a robot analysis engine
//!
//! `dynamics` ingests a URDF description of an articulated rigid-body
//! system and answers the numerical questions a robotics engineer asks of
//! it: where is every link (forward kinematics), what torques hold a given
//! motion (RNEA), what acceleration results from a given torque (ABA), what
//! configuration reaches a target point (inverse kinematics), what volume
//! of space can the end effector reach at all (workspace sampling), and
//! what is the worst-case torque any joint will ever see (max-torque
//! sampling).
//!
//! This library has two inspiration sources:
//! - Roy Featherstone's book ["Rigid Body Dynamics Algorithms"](https://link.springer.com/book/10.1007/978-1-4899-7560-7), which provides the theoretical
//!   foundation for the kinematics/dynamics kernel.
//! - The C++ library [Pinocchio](https://github.com/stack-of-tasks/pinocchio/), a widely-used
//!   library for rigid body dynamics in robotics, which served as a reference for the API design.
//!
//! ## Crates
//! The `dynamics` library is organized into several crates, each focusing on a specific aspect
//! of the analysis pipeline:
//! - [`dynamics-rs`](https://docs.rs/crate/dynamics-rs/latest): the main crate that provides high-level functionalities and interfaces.
//! - [`dynamics-linalg`](https://docs.rs/crate/dynamics-linalg/latest): small dense-linear-algebra building blocks (pseudo-inverse, 3x3 helpers, LDLT).
//! - [`dynamics-spatial`](https://docs.rs/crate/dynamics-spatial/latest): spatial algebra used in rigid body dynamics (spatial vectors, SE(3), configurations).
//! - [`dynamics-inertia`](https://docs.rs/crate/dynamics-inertia/latest): rigid-body spatial inertia.
//! - [`dynamics-joint`](https://docs.rs/crate/dynamics-joint/latest): joint types, their limits and subspaces.
//! - [`dynamics-model`](https://docs.rs/crate/dynamics-model/latest): `Model`/`Data` and the kinematics/dynamics kernel (FK, RNEA, ABA, CRBA, energies, center of mass, Jacobians).
//! - [`dynamics-parse`](https://docs.rs/crate/dynamics-parse/latest): URDF ingestion.
//! - [`dynamics-ik`](https://docs.rs/crate/dynamics-ik/latest): damped-least-squares position inverse kinematics.
//! - [`dynamics-workspace`](https://docs.rs/crate/dynamics-workspace/latest): reachable-workspace ray sampling and its convex hull.
//! - [`dynamics-torque`](https://docs.rs/crate/dynamics-torque/latest): max-torque sampling over a robot's joint-limit box.

pub use dynamics_ik as ik;
pub use dynamics_inertia as inertia;
pub use dynamics_joint as joint;
pub use dynamics_linalg as linalg;
pub use dynamics_model as model;
pub use dynamics_parse as parse;
pub use dynamics_spatial as spatial;
pub use dynamics_torque as torque;
pub use dynamics_workspace as workspace;

pub mod prelude;
