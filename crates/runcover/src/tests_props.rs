//! Property tests over random runs inside and outside a 22 km city square.

use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::geom2::{area, intersect, union, LocalFrame};
use crate::prelude::*;
use crate::tracker::CoverageTracker;

const SIDE_M: f64 = 22_000.0;

fn center() -> LatLng {
    LatLng::new(18.53, 73.85)
}

fn tracker() -> CoverageTracker {
    CoverageTracker::new(
        Boundary::square_around(center(), SIDE_M).expect("boundary"),
        GeomCfg::default(),
    )
}

/// Random walk of `n` points, kept `margin` meters inside the square.
fn walk_inside(rng: &mut StdRng, n: usize, margin: f64) -> Path {
    let f = LocalFrame::at(center());
    let lim = SIDE_M / 2.0 - margin;
    let mut x = rng.gen_range(-lim..lim);
    let mut y = rng.gen_range(-lim..lim);
    let mut pts = Vec::with_capacity(n);
    for _ in 0..n {
        pts.push(f.offset(x, y));
        x = (x + rng.gen_range(-600.0..600.0)).clamp(-lim, lim);
        y = (y + rng.gen_range(-600.0..600.0)).clamp(-lim, lim);
    }
    pts.into()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn coverage_never_shrinks(seed in any::<u64>(), runs in 1usize..5, radius in 5.0f64..50.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = tracker();
        let mut prev = 0.0;
        for _ in 0..runs {
            let n = rng.gen_range(2..7);
            let p = walk_inside(&mut rng, n, 100.0);
            let out = t.record(&p, radius).expect("inside run must be accepted");
            let eps = 1e-6 * out.coverage.area_km2.max(1e-6);
            prop_assert!(out.coverage.area_km2 + eps >= prev);
            prop_assert!(out.run.new_area_added_km2 > -eps);
            prev = out.coverage.area_km2;
        }
        prop_assert_eq!(t.runs().len(), runs);
    }

    #[test]
    fn outside_runs_change_nothing(seed in any::<u64>(), radius in 5.0f64..50.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = tracker();
        t.record(&walk_inside(&mut rng, 3, 100.0), radius).expect("seed run");
        let cov = t.coverage().clone();
        let runs = t.runs().to_vec();

        // 20–40 km north of the square, well clear of its 11 km half-side
        let f = LocalFrame::at(center());
        let x0 = rng.gen_range(-5000.0..5000.0);
        let y0 = rng.gen_range(20_000.0..40_000.0);
        let p: Path = vec![f.offset(x0, y0), f.offset(x0 + 500.0, y0 + 300.0)].into();
        prop_assert_eq!(t.record(&p, radius).unwrap_err(), CoverageError::OutOfBounds);
        prop_assert_eq!(t.coverage(), &cov);
        prop_assert_eq!(t.runs(), runs.as_slice());
    }

    #[test]
    fn clipped_union_fits_in_boundary(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let b = Boundary::square_around(center(), SIDE_M).expect("boundary");
        let cfg = GeomCfg::default();
        // margin may be negative: walks can leave the square
        let a = crate::geom2::buffer_path(&walk_inside(&mut rng, 4, -3000.0), 50.0, &cfg).expect("a");
        let c = crate::geom2::buffer_path(&walk_inside(&mut rng, 4, -3000.0), 50.0, &cfg).expect("c");
        if let Some(clipped) = intersect(&union(Some(&a), &c), b.polygon()) {
            prop_assert!(area(Some(&clipped)) <= b.area_m2() * (1.0 + 1e-9));
        }
    }
}
