//! Synthetic model fixtures shared by this crate's integration tests and
//! benchmarks. Kept out of `dynamics-rs` itself since nothing outside tests
//! needs a fleet of toy robots.

pub mod fixtures {
    use dynamics_rs::inertia::Inertia;
    use dynamics_rs::joint::joint::JointType;
    use dynamics_rs::joint::limits::JointLimits;
    use dynamics_rs::prelude::{Configuration, Model, Vector3D, SE3};
    use dynamics_rs::spatial::motion::SpatialRotation;

    /// A single revolute joint about an arbitrary axis, with a point mass
    /// `mass` rigidly attached `offset` meters along the joint's x-axis.
    #[must_use]
    pub fn single_revolute(axis: Vector3D, mass: f64, offset: f64) -> Model {
        let mut model = Model::empty();
        let j = model
            .add_joint(
                0,
                JointType::Revolute,
                axis,
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j",
            )
            .unwrap();
        model
            .append_body(
                j,
                Inertia::new(mass, Vector3D::zeros(), Default::default()),
                SE3::from_parts(Vector3D::new(offset, 0.0, 0.0), SpatialRotation::identity()),
            )
            .unwrap();
        model.finalize().unwrap()
    }

    /// A 2-link planar arm in the xy-plane, both links length `link_length`,
    /// rotating about `z`, each link a unit point mass at its tip. The
    /// standard textbook 2R manipulator used throughout the kinematics and
    /// IK tests.
    #[must_use]
    pub fn two_r_planar(link_length: f64) -> Model {
        let mut model = Model::empty();
        let j1 = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j1",
            )
            .unwrap();
        model
            .append_body(
                j1,
                Inertia::new(1.0, Vector3D::zeros(), Default::default()),
                SE3::identity(),
            )
            .unwrap();
        let j2 = model
            .add_joint(
                j1,
                JointType::Revolute,
                Vector3D::z(),
                SE3::from_parts(Vector3D::new(link_length, 0.0, 0.0), SpatialRotation::identity()),
                JointLimits::new_unbounded(1),
                "j2",
            )
            .unwrap();
        model
            .append_body(
                j2,
                Inertia::new(1.0, Vector3D::zeros(), Default::default()),
                SE3::identity(),
            )
            .unwrap();
        model.finalize().unwrap()
    }

    /// A double pendulum: two revolute joints about `y`, each link a point
    /// mass `mass` at the end of a rod of length `link_length` along `x`.
    #[must_use]
    pub fn double_pendulum(link_length: f64, mass: f64) -> Model {
        let mut model = Model::empty();
        let j1 = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::y(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j1",
            )
            .unwrap();
        model
            .append_body(
                j1,
                Inertia::new(mass, Vector3D::zeros(), Default::default()),
                SE3::from_parts(Vector3D::new(link_length, 0.0, 0.0), SpatialRotation::identity()),
            )
            .unwrap();
        let j2 = model
            .add_joint(
                j1,
                JointType::Revolute,
                Vector3D::y(),
                SE3::from_parts(Vector3D::new(link_length, 0.0, 0.0), SpatialRotation::identity()),
                JointLimits::new_unbounded(1),
                "j2",
            )
            .unwrap();
        model
            .append_body(
                j2,
                Inertia::new(mass, Vector3D::zeros(), Default::default()),
                SE3::from_parts(Vector3D::new(link_length, 0.0, 0.0), SpatialRotation::identity()),
            )
            .unwrap();
        model.finalize().unwrap()
    }

    /// A 6-joint articulated arm with mixed joint types and finite limits,
    /// sized to give the benchmarks a realistic number of degrees of
    /// freedom without depending on an external URDF file.
    #[must_use]
    pub fn six_axis_arm() -> Model {
        let mut model = Model::empty();
        let mut parent = 0;
        let axes = [
            Vector3D::z(),
            Vector3D::y(),
            Vector3D::y(),
            Vector3D::x(),
            Vector3D::y(),
            Vector3D::x(),
        ];
        for (i, axis) in axes.iter().enumerate() {
            let limits = JointLimits::new(
                150.0,
                5.0,
                Configuration::from_row_slice(&[-3.0]),
                Configuration::from_row_slice(&[3.0]),
                0.0,
                0.0,
                0.0,
            );
            let placement = if i == 0 {
                SE3::identity()
            } else {
                SE3::from_parts(Vector3D::new(0.3, 0.0, 0.0), SpatialRotation::identity())
            };
            let joint = model
                .add_joint(parent, JointType::Revolute, *axis, placement, limits, format!("j{i}"))
                .unwrap();
            model
                .append_body(
                    joint,
                    Inertia::new(1.5, Vector3D::zeros(), Default::default()),
                    SE3::identity(),
                )
                .unwrap();
            parent = joint;
        }
        model.finalize().unwrap()
    }
}
