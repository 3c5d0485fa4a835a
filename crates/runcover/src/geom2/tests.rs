use super::*;
use crate::error::CoverageError;
use geo::{MultiPolygon, Polygon};

fn frame() -> LocalFrame {
    LocalFrame::at(LatLng::new(18.53, 73.85))
}

fn path_m(f: &LocalFrame, pts: &[(f64, f64)]) -> Path {
    pts.iter().map(|&(e, n)| f.offset(e, n)).collect()
}

fn square_m(f: &LocalFrame, x0: f64, y0: f64, side: f64) -> GeoPolygon {
    let ring: Vec<(f64, f64)> = [(x0, y0), (x0 + side, y0), (x0 + side, y0 + side), (x0, y0 + side)]
        .iter()
        .map(|&(e, n)| {
            let p = f.offset(e, n);
            (p.lng, p.lat)
        })
        .collect();
    MultiPolygon::new(vec![Polygon::new(ring.into(), vec![])])
}

fn rel(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs().max(1e-12)
}

#[test]
fn buffer_rejects_short_paths() {
    let cfg = GeomCfg::default();
    let f = frame();
    match buffer_path(&Path::new(), 15.0, &cfg) {
        Err(CoverageError::DegenerateInput { points: 0 }) => {}
        other => panic!("expected degenerate input, got {other:?}"),
    }
    match buffer_path(&path_m(&f, &[(0.0, 0.0)]), 15.0, &cfg) {
        Err(CoverageError::DegenerateInput { points: 1 }) => {}
        other => panic!("expected degenerate input, got {other:?}"),
    }
}

#[test]
fn buffer_rejects_bad_radius_and_coordinates() {
    let cfg = GeomCfg::default();
    let f = frame();
    let p = path_m(&f, &[(0.0, 0.0), (100.0, 0.0)]);
    assert!(matches!(
        buffer_path(&p, 0.0, &cfg),
        Err(CoverageError::InvalidRadius { .. })
    ));
    assert!(matches!(
        buffer_path(&p, f64::NAN, &cfg),
        Err(CoverageError::InvalidRadius { .. })
    ));
    let bad: Path = vec![LatLng::new(18.5, 73.8), LatLng::new(95.0, 73.8)].into();
    assert!(matches!(
        buffer_path(&bad, 15.0, &cfg),
        Err(CoverageError::Geometry { .. })
    ));
}

#[test]
fn buffer_rejects_paths_at_the_poles() {
    let cfg = GeomCfg::default();
    let polar: Path = vec![LatLng::new(89.95, 0.0), LatLng::new(89.95, 0.01)].into();
    assert!(matches!(
        buffer_path(&polar, 15.0, &cfg),
        Err(CoverageError::Geometry { .. })
    ));
    let south: Path = vec![LatLng::new(-80.0, 0.0), LatLng::new(-90.0, 0.0)].into();
    assert!(buffer_path(&south, 15.0, &cfg).is_err());
    let far_north: Path = vec![LatLng::new(89.0, 0.0), LatLng::new(89.001, 0.0)].into();
    assert!(buffer_path(&far_north, 15.0, &cfg).is_ok());
}

#[test]
fn buffer_area_matches_stadium() {
    let f = frame();
    let p = path_m(&f, &[(0.0, 0.0), (1000.0, 0.0)]);
    let b = buffer_path(&p, 15.0, &GeomCfg::default()).unwrap();
    let expected = 1000.0 * 30.0 + std::f64::consts::PI * 15.0 * 15.0;
    assert!(rel(area(Some(&b)), expected) < 0.01, "area {}", area(Some(&b)));
}

#[test]
fn buffer_of_folded_path_is_not_double_counted() {
    // Out and back along the same street covers one corridor.
    let f = frame();
    let cfg = GeomCfg::default();
    let once = buffer_path(&path_m(&f, &[(0.0, 0.0), (500.0, 0.0)]), 10.0, &cfg).unwrap();
    let back = buffer_path(&path_m(&f, &[(0.0, 0.0), (500.0, 0.0), (0.0, 0.0)]), 10.0, &cfg).unwrap();
    assert!(rel(area(Some(&back)), area(Some(&once))) < 1e-3);
}

#[test]
fn buffer_of_repeated_point_is_a_disk() {
    let f = frame();
    let p = path_m(&f, &[(0.0, 0.0), (0.0, 0.0)]);
    let b = buffer_path(&p, 20.0, &GeomCfg::default()).unwrap();
    let disk = std::f64::consts::PI * 400.0;
    assert!(rel(area(Some(&b)), disk) < 0.01);
}

#[test]
fn union_identity_and_empty() {
    let f = frame();
    let b = square_m(&f, 0.0, 0.0, 100.0);
    assert_eq!(union(None, &b), b);
    assert_eq!(union(Some(&MultiPolygon::new(vec![])), &b), b);
}

#[test]
fn union_commutes_and_associates_by_area() {
    let f = frame();
    let a = square_m(&f, 0.0, 0.0, 100.0);
    let b = square_m(&f, 50.0, 50.0, 100.0);
    let c = square_m(&f, 120.0, -30.0, 60.0);
    let ab = area(Some(&union(Some(&a), &b)));
    let ba = area(Some(&union(Some(&b), &a)));
    assert!(rel(ab, ba) < 1e-7);
    // two 100 m squares overlapping in a 50 m square
    assert!(rel(ab, 17_500.0) < 0.01);

    let ab_c = union(Some(&union(Some(&a), &b)), &c);
    let a_bc = union(Some(&a), &union(Some(&b), &c));
    assert!(rel(area(Some(&ab_c)), area(Some(&a_bc))) < 1e-6);
}

#[test]
fn union_of_disjoint_parts_is_multi_part() {
    let f = frame();
    let a = square_m(&f, 0.0, 0.0, 10.0);
    let b = square_m(&f, 1000.0, 1000.0, 10.0);
    let u = union(Some(&a), &b);
    assert_eq!(u.0.len(), 2);
    assert!(rel(area(Some(&u)), 200.0) < 0.01);
}

#[test]
fn intersect_empty_is_none_not_error() {
    let f = frame();
    let a = square_m(&f, 0.0, 0.0, 10.0);
    let b = square_m(&f, 1000.0, 1000.0, 10.0);
    assert!(intersect(&a, &b).is_none());
    assert!(intersect(&a, &MultiPolygon::new(vec![])).is_none());
}

#[test]
fn intersect_of_union_stays_inside_boundary() {
    let f = frame();
    let boundary = square_m(&f, 0.0, 0.0, 1000.0);
    let cfg = GeomCfg::default();
    let a = buffer_path(&path_m(&f, &[(-200.0, 500.0), (1200.0, 500.0)]), 25.0, &cfg).unwrap();
    let b = buffer_path(&path_m(&f, &[(500.0, -300.0), (500.0, 400.0)]), 25.0, &cfg).unwrap();
    let clipped = intersect(&union(Some(&a), &b), &boundary).unwrap();
    let bound_area = area(Some(&boundary));
    assert!(area(Some(&clipped)) <= bound_area * (1.0 + 1e-9));
    // the clipped piece of the horizontal corridor is 1000 m long, not 1400
    assert!(area(Some(&clipped)) < area(Some(&a)));
}

fn holed_square(f: &LocalFrame, side: f64, hole: f64, hole_clockwise: bool) -> GeoPolygon {
    let ring = |x0: f64, side: f64| -> geo::LineString<f64> {
        [(x0, x0), (x0 + side, x0), (x0 + side, x0 + side), (x0, x0 + side)]
            .iter()
            .map(|&(e, n)| {
                let p = f.offset(e, n);
                (p.lng, p.lat)
            })
            .collect::<Vec<_>>()
            .into()
    };
    let mut inner = ring((side - hole) / 2.0, hole);
    if hole_clockwise {
        inner.0.reverse();
    }
    MultiPolygon::new(vec![Polygon::new(ring(0.0, side), vec![inner])])
}

#[test]
fn area_subtracts_holes_of_either_winding() {
    let f = frame();
    let ccw = area(Some(&holed_square(&f, 1000.0, 400.0, false)));
    let cw = area(Some(&holed_square(&f, 1000.0, 400.0, true)));
    assert!(rel(ccw, 840_000.0) < 0.005, "{ccw}");
    assert!(rel(cw, ccw) < 1e-9, "{cw} vs {ccw}");
}

#[test]
fn intersect_with_holed_polygon_drops_the_hole() {
    let f = frame();
    let cfg = GeomCfg::default();
    let holed = holed_square(&f, 1000.0, 400.0, true);
    // hole spans 300..700 on both axes
    let inside_hole = buffer_path(&path_m(&f, &[(400.0, 500.0), (600.0, 500.0)]), 20.0, &cfg).unwrap();
    assert!(intersect(&inside_hole, &holed).is_none());

    let across = buffer_path(&path_m(&f, &[(100.0, 500.0), (900.0, 500.0)]), 20.0, &cfg).unwrap();
    let clipped = intersect(&across, &holed).unwrap();
    assert_eq!(clipped.0.len(), 2);
    // 400 m of corridor left over, 40 m wide, plus the two end caps
    let expected = 400.0 * 40.0 + std::f64::consts::PI * 400.0;
    assert!(rel(area(Some(&clipped)), expected) < 0.01, "{}", area(Some(&clipped)));
}

#[test]
fn area_of_nothing_is_zero() {
    assert_eq!(area(None), 0.0);
    assert_eq!(area(Some(&MultiPolygon::new(vec![]))), 0.0);
}

#[test]
fn length_in_meters() {
    let f = frame();
    assert_eq!(length(&Path::new()), 0.0);
    assert_eq!(length(&path_m(&f, &[(5.0, 5.0)])), 0.0);
    let p = path_m(&f, &[(0.0, 0.0), (1000.0, 0.0), (1000.0, 1000.0)]);
    assert!(rel(length(&p), 2000.0) < 0.005, "length {}", length(&p));
}

#[test]
fn repeated_cycles_do_not_drift() {
    let f = frame();
    let cfg = GeomCfg::default();
    let boundary = square_m(&f, -5000.0, -5000.0, 10_000.0);
    let p = path_m(&f, &[(0.0, 0.0), (800.0, 300.0), (1200.0, -400.0)]);
    let mut cov: Option<GeoPolygon> = None;
    let mut first = 0.0;
    for k in 0..12 {
        let b = buffer_path(&p, 15.0, &cfg).unwrap();
        let merged = union(cov.as_ref(), &b);
        cov = intersect(&merged, &boundary);
        let a = area(cov.as_ref());
        if k == 0 {
            first = a;
        } else {
            assert!(rel(a, first) < 1e-5, "iteration {k}: {a} vs {first}");
        }
    }
}
