use field::{arange, masked_height, smoothstep5, BumpSurface, PlotConfig, Smoothing};

fn default_surface() -> BumpSurface {
    PlotConfig::default().surface().expect("default surface")
}

#[test]
fn test_axis_has_200_samples_with_exact_zero() {
    let axis = arange(-1.0, 1.0, 0.01).unwrap();
    assert_eq!(axis.len(), 200);
    assert_eq!(axis[0], -1.0);
    assert_eq!(axis[100], 0.0, "centre sample should be exactly zero");
    assert!(axis[199] < 1.0, "range end is exclusive");
}

#[test]
fn test_all_fields_share_shape() {
    let s = default_surface();
    let shape = (200, 200);
    assert_eq!(s.grid.x.shape(), shape);
    assert_eq!(s.grid.y.shape(), shape);
    assert_eq!(s.radius.shape(), shape);
    assert_eq!(s.height.shape(), shape);
    assert_eq!(s.masked.shape(), shape);
}

#[test]
fn test_meshgrid_uses_xy_indexing() {
    let s = default_surface();
    for (i, j) in [(0, 5), (17, 120), (199, 0)] {
        assert_eq!(s.grid.x[(i, j)], s.grid.xs[j]);
        assert_eq!(s.grid.y[(i, j)], s.grid.ys[i]);
    }
}

#[test]
fn test_zero_outside_unit_disk() {
    let s = default_surface();
    let mut outside = 0;
    for (r, w) in s.radius.iter().zip(s.masked.iter()) {
        if r >= 1.0 {
            outside += 1;
            assert_eq!(w, 0.0, "W must be exactly zero at R = {r}");
        }
    }
    println!("{outside} samples on or outside the unit circle");
    assert!(outside > 0);
}

#[test]
fn test_centre_is_one() {
    let s = default_surface();
    assert_eq!(s.radius[(100, 100)], 0.0);
    assert_eq!(s.height[(100, 100)], 0.0);
    assert_eq!(s.masked[(100, 100)], 1.0);
}

#[test]
fn test_boundary_is_continuous() {
    assert_eq!(smoothstep5(1.0), 1.0);
    assert_eq!(masked_height(1.0), 0.0, "mask is strict at R = 1");
    let just_inside = masked_height(1.0 - 1e-9);
    assert!(just_inside.abs() < 1e-12, "got {just_inside}");
}

#[test]
fn test_masked_matches_one_minus_height_inside() {
    let s = default_surface();
    for ((r, z), w) in s.radius.iter().zip(s.height.iter()).zip(s.masked.iter()) {
        if r < 1.0 {
            assert!((w - (1.0 - z)).abs() < 1e-15);
        }
    }
}

#[test]
fn test_radial_symmetry() {
    let s = default_surface();
    let w = &s.masked;
    for i in 1..200 {
        for j in 1..200 {
            // (X, Y) -> (Y, X) is exact: the sum of squares commutes.
            assert_eq!(w[(i, j)], w[(j, i)]);
            // x_j and -x_j sit at columns j and 200 - j.
            assert!((w[(i, j)] - w[(i, 200 - j)]).abs() < 1e-12, "mirror x at ({i}, {j})");
            assert!((w[(i, j)] - w[(200 - i, j)]).abs() < 1e-12, "mirror y at ({i}, {j})");
        }
    }
}

#[test]
fn test_summary_reports_peak_at_origin() {
    let summary = default_surface().summary().unwrap();
    println!("{summary:?}");
    assert_eq!(summary.shape, (200, 200));
    assert_eq!(summary.max, 1.0);
    assert_eq!(summary.min, 0.0);
    assert_eq!(summary.argmax, (0.0, 0.0));
    // Roughly pi / 4 of the square lies inside the disk.
    let fraction = summary.inside_disk as f64 / 40_000.0;
    assert!((fraction - std::f64::consts::FRAC_PI_4).abs() < 0.01, "fraction {fraction}");
}

#[test]
fn test_bad_step_is_rejected() {
    let err = BumpSurface::over_square(-1.0, 1.0, 0.0).unwrap_err();
    assert_eq!(err.to_string(), "step must be finite and positive, got 0");
}

#[test]
fn test_profile_is_taken_from_config() {
    let config = PlotConfig {
        smoothing: Smoothing::Sine,
        ..PlotConfig::default()
    };
    let s = config.surface().unwrap();
    let summary = s.summary().unwrap();
    println!("sine profile summary: {summary:?}");
    assert_eq!(s.smoothing, Smoothing::Sine);
    assert_eq!(summary.max, 1.0);
    assert_eq!(summary.min, 0.0);
    // R = 0.5 sits on the half-height contour for every symmetric profile
    let w = Smoothing::Sine.masked_height(0.5);
    assert!((w - 0.5).abs() < 1e-12, "got {w}");
    assert_eq!(PlotConfig::default().smoothing, Smoothing::Quintic);
}
