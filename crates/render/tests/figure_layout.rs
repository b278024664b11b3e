use field::PlotConfig;
use glam::Vec3;
use render::{ColorTarget, Figure};

fn default_figure() -> Figure {
    let config = PlotConfig::default();
    let surface = config.surface().unwrap();
    Figure::new(&config, &surface).unwrap()
}

fn labels(ticks: &[render::figure::Tick]) -> Vec<&str> {
    ticks.iter().map(|t| t.label.as_str()).collect()
}

#[test]
fn test_z_axis_has_ten_fixed_point_ticks() {
    let figure = default_figure();
    assert_eq!(
        labels(&figure.z_axis.ticks),
        vec!["-1.01", "-0.79", "-0.56", "-0.34", "-0.11", "0.11", "0.34", "0.56", "0.79", "1.01"]
    );
    assert_eq!(figure.z_axis.ticks[0].value, -1.01);
    assert_eq!(figure.z_axis.ticks[9].value, 1.01);
}

#[test]
fn test_xy_axes_use_quarter_steps() {
    let figure = default_figure();
    for axis in [&figure.x_axis, &figure.y_axis] {
        assert_eq!((axis.min, axis.max), (-1.01, 1.01));
        assert_eq!(
            labels(&axis.ticks),
            vec!["-1.00", "-0.75", "-0.50", "-0.25", "0.00", "0.25", "0.50", "0.75", "1.00"]
        );
    }
}

#[test]
fn test_colorbar_follows_patch_colour_range() {
    let figure = default_figure();
    println!("colour range: {:?}", figure.norm);
    assert_eq!(figure.norm.vmin, 0.0);
    assert!(figure.norm.vmax > 0.99 && figure.norm.vmax < 1.0);
    assert_eq!(figure.colorbar.shrink, 0.5);
    assert_eq!(figure.colorbar.aspect, 5.0);
    assert_eq!(labels(&figure.colorbar.ticks), vec!["0.0", "0.2", "0.4", "0.6", "0.8"]);
}

#[test]
fn test_flat_corner_patch_takes_cool_end() {
    let figure = default_figure();
    assert_eq!(figure.patches.len(), 2500);
    assert_eq!(figure.patch_colors.len(), 2500);
    // The first patch lies entirely outside the unit disk.
    assert_eq!(figure.patches[0].mean_z, 0.0);
    assert_eq!(figure.patch_colors[0], figure.colormap.map(0.0));
    let (peak, _) = figure
        .patches
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, p)| if p.mean_z > best.1 { (i, p.mean_z) } else { best });
    assert_eq!(figure.patch_colors[peak], figure.colormap.map(1.0));
}

#[test]
fn test_view_box_maps_to_box_aspect() {
    let figure = default_figure();
    let lo = figure.to_world([-1.01, -1.01, -1.01]);
    let hi = figure.to_world([1.01, 1.01, 1.01]);
    assert!((lo - Vec3::new(-1.0, -1.0, -0.75)).length() < 1e-6, "{lo:?}");
    assert!((hi - Vec3::new(1.0, 1.0, 0.75)).length() < 1e-6, "{hi:?}");
    assert_eq!(figure.half_extents(), Vec3::new(1.0, 1.0, 0.75));
    assert_eq!(figure.to_world([0.0, 0.0, 0.0]), Vec3::ZERO);
}

#[test]
fn test_surface_mesh_fans_every_patch() {
    let figure = default_figure();
    let vertices = figure.surface_vertices(ColorTarget::Unorm);
    // 49x49 full blocks with 16 perimeter points, 98 edge blocks with 14
    // and the last corner block with 12, three vertices per perimeter edge.
    assert_eq!(vertices.len(), (49 * 49 * 16 + 98 * 14 + 12) * 3);
    assert!(vertices.iter().all(|v| v.position[2].abs() <= 0.75 + 1e-6));
    assert_eq!(vertices[0].color, figure.patch_colors[0].rgb());
}

#[test]
fn test_window_constants() {
    let figure = default_figure();
    assert_eq!(figure.title, "3D surface (color map)");
    assert!(figure.antialiased);
    assert_eq!((figure.azimuth_deg, figure.elevation_deg), (-60.0, 30.0));
}
