//! 3-D QuickHull: an incremental convex hull over a cloud of boundary points.

use std::collections::{HashMap, HashSet, VecDeque};

use dynamics_spatial::vector3d::Vector3D;

/// A convex hull mesh: a deduplicated vertex array (flat `x, y, z, x, y,
/// z, ...`) and a triangle index array (3 indices per triangle, into the
/// vertex array), every triangle's winding giving an outward-pointing
/// normal.
#[derive(Clone, Debug, PartialEq)]
pub struct HullMesh {
    /// Flattened `[x0, y0, z0, x1, y1, z1, ...]` vertex positions.
    pub vertices: Vec<f64>,
    /// Triangle indices, 3 per face, into [`HullMesh::vertices`] (divided
    /// by 3 to get a vertex index).
    pub indices: Vec<usize>,
    /// Whether [`convex_hull`] fell back to the axis-aligned bounding box
    /// because the input was degenerate (fewer than 4 affinely independent
    /// points).
    pub degenerate: bool,
}

#[derive(Clone)]
struct Face {
    v: [usize; 3],
    normal: Vector3D,
    outside: Vec<usize>,
}

/// Computes the 3-D convex hull of `points` via QuickHull.
///
/// Requires at least 4 points. Falls back to the 12-triangle axis-aligned
/// bounding box (with [`HullMesh::degenerate`] set) if fewer than 4 points
/// are affinely independent (collinear/coplanar input, or the hull
/// construction collapses for any other reason).
#[must_use]
pub fn convex_hull(points: &[Vector3D]) -> HullMesh {
    if points.len() < 4 {
        return bounding_box_fallback(points);
    }

    match build_hull(points) {
        Some(mesh) => mesh,
        None => bounding_box_fallback(points),
    }
}

fn build_hull(points: &[Vector3D]) -> Option<HullMesh> {
    let seed = seed_tetrahedron(points)?;
    let scale = bounding_scale(points);
    let eps = 1e-9 * scale.max(1.0);

    let interior = Vector3D::new(
        (points[seed[0]].as_slice()[0]
            + points[seed[1]].as_slice()[0]
            + points[seed[2]].as_slice()[0]
            + points[seed[3]].as_slice()[0])
            / 4.0,
        (points[seed[0]].as_slice()[1]
            + points[seed[1]].as_slice()[1]
            + points[seed[2]].as_slice()[1]
            + points[seed[3]].as_slice()[1])
            / 4.0,
        (points[seed[0]].as_slice()[2]
            + points[seed[1]].as_slice()[2]
            + points[seed[2]].as_slice()[2]
            + points[seed[3]].as_slice()[2])
            / 4.0,
    );

    let mut faces: Vec<Face> = Vec::new();
    for &(a, b, c) in &[
        (seed[0], seed[1], seed[2]),
        (seed[0], seed[1], seed[3]),
        (seed[0], seed[2], seed[3]),
        (seed[1], seed[2], seed[3]),
    ] {
        faces.push(oriented_face(points, a, b, c, interior));
    }

    let seed_set: HashSet<usize> = seed.iter().copied().collect();
    for p in 0..points.len() {
        if seed_set.contains(&p) {
            continue;
        }
        assign_point(&mut faces, points, p, eps);
    }

    let max_iterations = 3 * points.len();
    for _ in 0..max_iterations {
        let Some((start_face, far_point)) = farthest(&faces, points, eps) else {
            break;
        };

        let visible = visible_set(&faces, points, start_face, far_point, eps);
        let horizon = horizon_edges(&faces, &visible);

        let mut orphans: Vec<usize> = Vec::new();
        for &fi in &visible {
            orphans.extend(faces[fi].outside.iter().copied());
        }

        let mut visible_sorted = visible.clone();
        visible_sorted.sort_unstable_by(|a, b| b.cmp(a));
        for fi in visible_sorted {
            faces.remove(fi);
        }

        let mut new_faces: Vec<Face> = Vec::new();
        for (a, b) in horizon {
            new_faces.push(oriented_face(points, a, b, far_point, interior));
        }
        let new_start = faces.len();
        faces.extend(new_faces);

        for orphan in orphans {
            if orphan == far_point {
                continue;
            }
            let mut best: Option<(usize, f64)> = None;
            for fi in new_start..faces.len() {
                let d = signed_distance(points, &faces[fi], orphan);
                if d > eps && best.is_none_or(|(_, bd)| d > bd) {
                    best = Some((fi, d));
                }
            }
            if let Some((fi, _)) = best {
                faces[fi].outside.push(orphan);
            }
        }
    }

    Some(mesh_from_faces(points, &faces))
}

/// Picks 4 affinely-independent seed points from the 6 axial extrema
/// (first-unique-wins), falling back to a linear scan if the axial
/// extrema degenerate (e.g. a flat sheet of points aligned with an axis).
fn seed_tetrahedron(points: &[Vector3D]) -> Option<[usize; 4]> {
    let mut extrema = Vec::new();
    for axis in 0..3 {
        let mut min_i = 0;
        let mut max_i = 0;
        for i in 1..points.len() {
            if points[i].as_slice()[axis] < points[min_i].as_slice()[axis] {
                min_i = i;
            }
            if points[i].as_slice()[axis] > points[max_i].as_slice()[axis] {
                max_i = i;
            }
        }
        extrema.push(min_i);
        extrema.push(max_i);
    }

    let mut unique = Vec::new();
    for idx in extrema {
        if !unique.contains(&idx) {
            unique.push(idx);
        }
        if unique.len() == 4 {
            break;
        }
    }
    if unique.len() < 4 {
        for i in 0..points.len() {
            if !unique.contains(&i) {
                unique.push(i);
            }
            if unique.len() == 4 {
                break;
            }
        }
    }
    if unique.len() < 4 {
        return None;
    }

    let seed = [unique[0], unique[1], unique[2], unique[3]];
    let volume6 = tetra_volume6(points, seed);
    if volume6.abs() < 1e-12 * bounding_scale(points).powi(3).max(1e-12) {
        return None;
    }
    Some(seed)
}

fn tetra_volume6(points: &[Vector3D], seed: [usize; 4]) -> f64 {
    let a = points[seed[0]];
    let b = points[seed[1]] - a;
    let c = points[seed[2]] - a;
    let d = points[seed[3]] - a;
    b.cross(&c).dot(&d)
}

fn bounding_scale(points: &[Vector3D]) -> f64 {
    let mut min = points[0];
    let mut max = points[0];
    for p in points.iter().skip(1) {
        min = component_min(min, *p);
        max = component_max(max, *p);
    }
    (max - min).norm()
}

fn component_min(a: Vector3D, b: Vector3D) -> Vector3D {
    Vector3D::new(
        a.as_slice()[0].min(b.as_slice()[0]),
        a.as_slice()[1].min(b.as_slice()[1]),
        a.as_slice()[2].min(b.as_slice()[2]),
    )
}

fn component_max(a: Vector3D, b: Vector3D) -> Vector3D {
    Vector3D::new(
        a.as_slice()[0].max(b.as_slice()[0]),
        a.as_slice()[1].max(b.as_slice()[1]),
        a.as_slice()[2].max(b.as_slice()[2]),
    )
}

/// Builds the face `(a, b, c)`, flipping its winding if needed so its
/// normal points away from `interior` (a point known to sit strictly
/// inside the hull, kept fixed across the whole construction).
fn oriented_face(points: &[Vector3D], a: usize, b: usize, c: usize, interior: Vector3D) -> Face {
    let pa = points[a];
    let pb = points[b];
    let pc = points[c];
    let mut normal = (pb - pa).cross(&(pc - pa));
    let mut verts = [a, b, c];
    if let Some(unit) = normal.normalize() {
        normal = unit;
        if normal.dot(&(interior - pa)) > 0.0 {
            verts = [a, c, b];
            normal = -normal;
        }
    }
    Face {
        v: verts,
        normal,
        outside: Vec::new(),
    }
}

fn signed_distance(points: &[Vector3D], face: &Face, idx: usize) -> f64 {
    (points[idx] - points[face.v[0]]).dot(&face.normal)
}

fn assign_point(faces: &mut [Face], points: &[Vector3D], idx: usize, eps: f64) {
    for face in faces.iter_mut() {
        if signed_distance(points, face, idx) > eps {
            face.outside.push(idx);
            return;
        }
    }
}

/// Returns the index of the face holding the globally farthest outside
/// point, and that point's index, or `None` if every face's outside set is
/// empty (the hull is complete).
fn farthest(faces: &[Face], points: &[Vector3D], eps: f64) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (fi, face) in faces.iter().enumerate() {
        for &p in &face.outside {
            let d = signed_distance(points, face, p);
            if d > eps && best.is_none_or(|(_, _, bd)| d > bd) {
                best = Some((fi, p, d));
            }
        }
    }
    best.map(|(fi, p, _)| (fi, p))
}

fn shares_edge(a: &Face, b: &Face) -> bool {
    a.v.iter().filter(|x| b.v.contains(x)).count() >= 2
}

/// BFS over face adjacency (sharing an edge) starting at `start`, visiting
/// any neighbor that also sees `far_point` from outside.
fn visible_set(faces: &[Face], points: &[Vector3D], start: usize, far_point: usize, eps: f64) -> Vec<usize> {
    let mut visited = HashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut order = vec![start];

    while let Some(fi) = queue.pop_front() {
        for (other_i, other) in faces.iter().enumerate() {
            if visited.contains(&other_i) || !shares_edge(&faces[fi], other) {
                continue;
            }
            if signed_distance(points, other, far_point) > eps {
                visited.insert(other_i);
                queue.push_back(other_i);
                order.push(other_i);
            }
        }
    }
    order
}

/// Extracts the horizon: directed edges of the visible set whose reverse
/// does not also appear among the visible set's edges (an internal edge
/// between two visible faces cancels out; only the boundary survives).
fn horizon_edges(faces: &[Face], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut present: HashMap<(usize, usize), usize> = HashMap::new();
    for &fi in visible {
        let f = &faces[fi];
        for &(a, b) in &[(f.v[0], f.v[1]), (f.v[1], f.v[2]), (f.v[2], f.v[0])] {
            *present.entry((a, b)).or_insert(0) += 1;
        }
    }
    let mut horizon = Vec::new();
    for &fi in visible {
        let f = &faces[fi];
        for &(a, b) in &[(f.v[0], f.v[1]), (f.v[1], f.v[2]), (f.v[2], f.v[0])] {
            if !present.contains_key(&(b, a)) {
                horizon.push((a, b));
            }
        }
    }
    horizon
}

fn mesh_from_faces(points: &[Vector3D], faces: &[Face]) -> HullMesh {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for face in faces {
        for &v in &face.v {
            let new_index = *remap.entry(v).or_insert_with(|| {
                let next = vertices.len() / 3;
                let p = points[v];
                vertices.push(p.as_slice()[0]);
                vertices.push(p.as_slice()[1]);
                vertices.push(p.as_slice()[2]);
                next
            });
            indices.push(new_index);
        }
    }

    HullMesh {
        vertices,
        indices,
        degenerate: false,
    }
}

/// Returns the axis-aligned bounding box of `points` as 12 outward-oriented
/// triangles, used when QuickHull construction degenerates.
fn bounding_box_fallback(points: &[Vector3D]) -> HullMesh {
    if points.is_empty() {
        return HullMesh {
            vertices: Vec::new(),
            indices: Vec::new(),
            degenerate: true,
        };
    }

    let mut min = points[0];
    let mut max = points[0];
    for p in points.iter().skip(1) {
        min = component_min(min, *p);
        max = component_max(max, *p);
    }

    let corners = [
        Vector3D::new(min.as_slice()[0], min.as_slice()[1], min.as_slice()[2]),
        Vector3D::new(max.as_slice()[0], min.as_slice()[1], min.as_slice()[2]),
        Vector3D::new(max.as_slice()[0], max.as_slice()[1], min.as_slice()[2]),
        Vector3D::new(min.as_slice()[0], max.as_slice()[1], min.as_slice()[2]),
        Vector3D::new(min.as_slice()[0], min.as_slice()[1], max.as_slice()[2]),
        Vector3D::new(max.as_slice()[0], min.as_slice()[1], max.as_slice()[2]),
        Vector3D::new(max.as_slice()[0], max.as_slice()[1], max.as_slice()[2]),
        Vector3D::new(min.as_slice()[0], max.as_slice()[1], max.as_slice()[2]),
    ];

    let mut vertices = Vec::with_capacity(24);
    for c in &corners {
        vertices.push(c.as_slice()[0]);
        vertices.push(c.as_slice()[1]);
        vertices.push(c.as_slice()[2]);
    }

    let triangles: [[usize; 3]; 12] = [
        [0, 3, 2],
        [0, 2, 1],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    let indices = triangles.into_iter().flatten().collect();

    HullMesh {
        vertices,
        indices,
        degenerate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<Vector3D> {
        let mut pts = Vec::new();
        for &x in &[0.0, 1.0] {
            for &y in &[0.0, 1.0] {
                for &z in &[0.0, 1.0] {
                    pts.push(Vector3D::new(x, y, z));
                }
            }
        }
        pts
    }

    fn mesh_volume(mesh: &HullMesh) -> f64 {
        let verts: Vec<Vector3D> = mesh
            .vertices
            .chunks(3)
            .map(|c| Vector3D::new(c[0], c[1], c[2]))
            .collect();
        let mut sum = 0.0;
        for tri in mesh.indices.chunks(3) {
            let v0 = verts[tri[0]];
            let v1 = verts[tri[1]];
            let v2 = verts[tri[2]];
            sum += v0.dot(&v1.cross(&v2));
        }
        (sum / 6.0).abs()
    }

    #[test]
    fn the_unit_cube_has_eight_vertices_and_twelve_triangles() {
        let mesh = convex_hull(&cube_corners());
        let nverts = mesh.vertices.len() / 3;
        assert_eq!(nverts, 8);
        assert_eq!(mesh.indices.len() / 3, 12);
    }

    #[test]
    fn the_unit_cube_hull_has_unit_volume() {
        let mesh = convex_hull(&cube_corners());
        assert!((mesh_volume(&mesh) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_four_points_falls_back_to_the_bounding_box() {
        let pts = vec![
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
        ];
        let mesh = convex_hull(&pts);
        assert!(mesh.degenerate);
        assert_eq!(mesh.indices.len() / 3, 12);
    }

    #[test]
    fn coplanar_points_fall_back_to_the_bounding_box() {
        let pts = vec![
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(1.0, 1.0, 0.0),
        ];
        let mesh = convex_hull(&pts);
        assert!(mesh.degenerate);
    }

    #[test]
    fn every_face_normal_points_away_from_the_centroid() {
        let mesh = convex_hull(&cube_corners());
        let verts: Vec<Vector3D> = mesh
            .vertices
            .chunks(3)
            .map(|c| Vector3D::new(c[0], c[1], c[2]))
            .collect();
        let mut centroid = Vector3D::zeros();
        for v in &verts {
            centroid = centroid + *v;
        }
        centroid = centroid * (1.0 / verts.len() as f64);

        for tri in mesh.indices.chunks(3) {
            let v0 = verts[tri[0]];
            let v1 = verts[tri[1]];
            let v2 = verts[tri[2]];
            let normal = (v1 - v0).cross(&(v2 - v0)).normalize().unwrap();
            for &v in &[v0, v1, v2] {
                assert!((v - centroid).dot(&normal) >= -1e-9);
            }
        }
    }
}
