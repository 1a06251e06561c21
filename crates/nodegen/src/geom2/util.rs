use nalgebra::Vector2;

/// Consecutive vertex pairs, closing the loop.
fn edges(verts: &[Vector2<f64>]) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
    verts.iter().zip(verts.iter().cycle().skip(1)).map(|(p, q)| (*p, *q))
}

#[inline]
fn cross(p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    p.x * q.y - q.x * p.y
}

/// Signed shoelace area (positive for CCW vertex order).
pub fn polygon_area(verts: &[Vector2<f64>]) -> f64 {
    if verts.len() < 3 {
        return 0.0;
    }
    0.5 * edges(verts).map(|(p, q)| cross(p, q)).sum::<f64>()
}

/// Area centroid of a simple polygon in either orientation.
///
/// `None` for fewer than three vertices or `|area| < eps_area`.
pub fn polygon_area_centroid(verts: &[Vector2<f64>], eps_area: f64) -> Option<Vector2<f64>> {
    if verts.len() < 3 {
        return None;
    }
    let (twice_area, moment) = edges(verts).fold((0.0, Vector2::zeros()), |(a, m), (p, q)| {
        let w = cross(p, q);
        (a + w, m + (p + q) * w)
    });
    if (0.5 * twice_area).abs() < eps_area {
        return None;
    }
    Some(moment / (3.0 * twice_area))
}
