use nalgebra::Vector2;

/// Andrew’s monotone chain convex hull (returns hull in CCW order).
pub(crate) fn convex_hull(points: &[Vector2<f64>]) -> Option<Vec<Vector2<f64>>> {
    if points.len() < 3 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| {
        match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-9);
    if pts.len() < 3 {
        return None;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    if hull.len() < 3 {
        return None;
    }
    Some(hull)
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Regular `n`-gon inscribed in the circle of `radius` around `center`.
pub(crate) fn disk(center: Vector2<f64>, radius: f64, n: usize) -> impl Iterator<Item = Vector2<f64>> {
    let step = std::f64::consts::TAU / (n as f64);
    (0..n).map(move |k| {
        let th = (k as f64) * step;
        center + Vector2::new(th.cos(), th.sin()) * radius
    })
}

/// Stadium around segment `a→b`: hull of the two endpoint disks.
///
/// Degenerates to a single disk when `a == b`.
pub(crate) fn capsule(
    a: Vector2<f64>,
    b: Vector2<f64>,
    radius: f64,
    n: usize,
) -> Option<Vec<Vector2<f64>>> {
    let pts: Vec<Vector2<f64>> = disk(a, radius, n).chain(disk(b, radius, n)).collect();
    convex_hull(&pts)
}

/// Shoelace area of a simple ring (vertices in order, not closed).
pub(crate) fn ring_area(verts: &[Vector2<f64>]) -> f64 {
    if verts.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..verts.len() {
        let p = verts[i];
        let q = verts[(i + 1) % verts.len()];
        a += p.x * q.y - q.x * p.y;
    }
    0.5 * a.abs()
}
