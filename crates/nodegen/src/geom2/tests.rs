use super::*;
use nalgebra::{vector, Vector2};

fn square(half: f64) -> Poly2 {
    Poly2::from_halfspaces([
        Hs2::new(vector![1.0, 0.0], half),
        Hs2::new(vector![-1.0, 0.0], half),
        Hs2::new(vector![0.0, 1.0], half),
        Hs2::new(vector![0.0, -1.0], half),
    ])
}

#[test]
fn parallel_slab_without_interior_is_empty() {
    // x <= 0 and x >= 1
    let p = Poly2::from_halfspaces([
        Hs2::new(vector![1.0, 0.0], 0.0),
        Hs2::new(vector![-1.0, 0.0], -1.0),
        Hs2::new(vector![0.0, 1.0], 1.0),
        Hs2::new(vector![0.0, -1.0], 1.0),
    ]);
    assert!(p.halfspace_intersection().is_empty());
    assert!(square(1.0).halfspace_intersection().is_bounded());
}

#[test]
fn same_direction_halfspaces_keep_the_tightest() {
    let mut q = square(1.0);
    // scaled normal, x <= 0.5
    q.insert_halfspace(Hs2::new(vector![2.0, 0.0], 1.0));
    // looser, ignored
    q.insert_halfspace(Hs2::new(vector![0.0, 3.0], 6.0));
    assert_eq!(q.len(), 4);
    let verts = q.halfspace_intersection().vertices().expect("bounded");
    let max_x = verts.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = verts.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
    assert!((max_x - 0.5).abs() < 1e-12);
    assert!((max_y - 1.0).abs() < 1e-12);
}

#[test]
fn normals_end_up_sorted_by_angle() {
    let q = square(1.0);
    let angles: Vec<f64> = q.halfspaces().iter().map(Hs2::angle).collect();
    assert!(angles.windows(2).all(|w| w[0] < w[1]));
    assert!(q.halfspaces().iter().all(|h| (h.n.norm() - 1.0).abs() < 1e-12));
}

#[test]
fn vertices_are_counter_clockwise() {
    let verts = square(1.0).halfspace_intersection().vertices().unwrap();
    assert_eq!(verts.len(), 4);
    assert!((polygon_area(&verts) - 4.0).abs() < 1e-12);
}

#[test]
fn bisector_cut_splits_square_in_half() {
    let a = vector![-0.5, 0.0];
    let b = vector![0.5, 0.0];
    let mut cell = square(1.0);
    cell.insert_halfspace(Hs2::bisector(a, b).unwrap());
    let verts = cell.halfspace_intersection().vertices().expect("bounded");
    assert!((polygon_area(&verts).abs() - 2.0).abs() < 1e-12);
    let c = polygon_area_centroid(&verts, 1e-18).unwrap();
    assert!((c - vector![-0.5, 0.0]).norm() < 1e-12);
    assert!(cell.contains_eps(a, 0.0));
    assert!(!cell.contains_eps(b, 0.0));
    assert!(Hs2::bisector(a, a).is_none());
}

#[test]
fn redundant_cut_through_a_corner_changes_nothing() {
    let mut cell = square(1.0);
    cell.insert_halfspace(Hs2::new(vector![1.0, 1.0], 2.0));
    let verts = cell.halfspace_intersection_eps(1e-9).vertices().unwrap();
    assert!((polygon_area(&verts) - 4.0).abs() < 1e-12);
}

#[test]
fn too_few_directions_is_unbounded() {
    let p = Poly2::from_halfspaces([Hs2::new(vector![1.0, 1.0], 0.0)]);
    assert_eq!(p.halfspace_intersection(), HalfspaceIntersection::Unbounded);
    assert!(Hs2::new(Vector2::zeros(), 1.0).normalized().is_none());
}

#[test]
fn centroid_rejects_degenerate_polygons() {
    let line = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(2.0, 0.0),
    ];
    assert!(polygon_area_centroid(&line, 1e-18).is_none());
    assert!(polygon_area_centroid(&line[..2], 1e-18).is_none());
    assert_eq!(polygon_area(&line), 0.0);
}

#[test]
fn centroid_of_a_triangle_is_the_vertex_mean() {
    let tri = vec![vector![0.0, 0.0], vector![3.0, 0.0], vector![0.0, 3.0]];
    let c = polygon_area_centroid(&tri, 1e-18).unwrap();
    assert!((c - vector![1.0, 1.0]).norm() < 1e-12);
    let mut cw = tri.clone();
    cw.reverse();
    assert!((polygon_area_centroid(&cw, 1e-18).unwrap() - c).norm() < 1e-12);
}

#[test]
fn open_wedge_is_unbounded() {
    // normals within a half-turn leave a direction unconstrained
    let p = Poly2::from_halfspaces([
        Hs2::new(vector![1.0, 0.0], 1.0),
        Hs2::new(vector![1.0, 1.0], 1.0),
        Hs2::new(vector![0.0, 1.0], 1.0),
    ]);
    assert!(!p.halfspace_intersection().is_bounded());
    assert!(!p.halfspace_intersection().is_empty());
}
