//! End-to-end workspace-reachability sampling and convex-hull scenarios.

use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::two_r_planar;

#[test]
fn the_sampled_workspace_of_a_two_link_arm_contains_the_origin_neighborhood() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let mut options = WorkspaceOptions::new(&model);
    options.num_rays = 200;
    let result = sample_workspace(&model, &mut data, &options, None, None).unwrap();

    assert!(!result.points.is_empty());
    assert!(result.success_rate > 0.0);
    // A fully-extended 2-link arm of total length 1 can reach no farther
    // than 1 from the base.
    for p in &result.points {
        assert!(p.norm() <= 1.0 + 1e-2);
    }
}

#[test]
fn a_cancellation_token_stops_the_sweep_before_all_rays_are_cast() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let mut options = WorkspaceOptions::new(&model);
    options.num_rays = 500;
    let result = sample_workspace(&model, &mut data, &options, None, Some(&|| true)).unwrap();
    assert!(result.points.is_empty());
    assert_eq!(result.success_rate, 0.0);
}

#[test]
fn the_convex_hull_of_the_sampled_points_has_outward_facing_normals() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let mut options = WorkspaceOptions::new(&model);
    options.num_rays = 300;
    let result = sample_workspace(&model, &mut data, &options, None, None).unwrap();
    let hull = convex_hull(&result.points);

    let vertex = |i: usize| Vector3D::new(hull.vertices[3 * i], hull.vertices[3 * i + 1], hull.vertices[3 * i + 2]);
    let n = hull.vertices.len() / 3;
    let mut sum = Vector3D::zeros();
    for i in 0..n {
        sum = sum + vertex(i);
    }
    let centroid = Vector3D::new(
        sum.as_slice()[0] / n as f64,
        sum.as_slice()[1] / n as f64,
        sum.as_slice()[2] / n as f64,
    );

    for tri in hull.indices.chunks(3) {
        let a = vertex(tri[0]);
        let b = vertex(tri[1]);
        let c = vertex(tri[2]);
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = edge1.cross(&edge2);
        let to_centroid = centroid - a;
        assert!(normal.dot(&to_centroid) <= 1e-9);
    }
}

#[test]
fn fibonacci_sphere_directions_cover_the_full_sphere() {
    let directions = fibonacci_sphere(100);
    assert_eq!(directions.len(), 100);
    let has_positive_z = directions.iter().any(|d| d.as_slice()[2] > 0.5);
    let has_negative_z = directions.iter().any(|d| d.as_slice()[2] < -0.5);
    assert!(has_positive_z);
    assert!(has_negative_z);
}
