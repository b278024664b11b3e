use glam::{Mat4, Vec3};
use render::axes::{self, back_sides};
use render::camera::{Camera, OrbitController};
use render::layout::FigureLayout;
use render::overlay;
use render::text::{push_label, Align, GlyphMetrics};
use render::{ColorTarget, Figure};

fn default_figure() -> Figure {
    let config = field::PlotConfig::default();
    let surface = config.surface().unwrap();
    Figure::new(&config, &surface).unwrap()
}

#[test]
fn test_default_orbit_eye() {
    let orbit = OrbitController::new(-60.0, 30.0, 6.0);
    let eye = orbit.eye(Vec3::ZERO);
    println!("default eye: {eye:?}");
    assert!((eye - Vec3::new(2.598, -4.5, 3.0)).length() < 1e-3);
}

#[test]
fn test_drag_and_reset() {
    let mut orbit = OrbitController::new(-60.0, 30.0, 6.0);
    orbit.mouse_pressed = true;
    assert!(!orbit.process_cursor(100.0, 100.0), "first position only anchors the drag");
    assert!(orbit.process_cursor(200.0, 100.0));
    // 100 px at 0.005 rad/px
    assert!((orbit.azimuth_deg - (-60.0 - 0.5f32.to_degrees())).abs() < 1e-3);
    orbit.process_scroll(1.0);
    assert!((orbit.distance - 5.0).abs() < 1e-6);

    orbit.reset();
    assert_eq!(orbit.azimuth_deg, -60.0);
    assert_eq!(orbit.elevation_deg, 30.0);
    assert_eq!(orbit.distance, 6.0);
}

#[test]
fn test_cursor_without_button_does_not_rotate() {
    let mut orbit = OrbitController::new(-60.0, 30.0, 6.0);
    assert!(!orbit.process_cursor(0.0, 0.0));
    assert!(!orbit.process_cursor(500.0, 300.0), "hover must not request a redraw");
    assert_eq!(orbit.azimuth_deg, -60.0);
    assert_eq!(orbit.last_mouse_pos, Some((500.0, 300.0)));
}

#[test]
fn test_stationary_cursor_while_pressed_is_not_a_change() {
    let mut orbit = OrbitController::new(-60.0, 30.0, 6.0);
    orbit.mouse_pressed = true;
    orbit.process_cursor(40.0, 40.0);
    assert!(!orbit.process_cursor(40.0, 40.0));
    assert!(orbit.process_cursor(40.0, 80.0));
    orbit.mouse_pressed = false;
    assert!(!orbit.process_cursor(90.0, 10.0));
    assert_eq!(orbit.elevation_deg, 30.0 + (40.0 * 0.005f32).to_degrees());
}

#[test]
fn test_camera_looks_at_target() {
    let mut camera = Camera {
        eye: Vec3::ZERO,
        target: Vec3::ZERO,
        up: Vec3::Z,
        aspect: 4.0 / 3.0,
        fovy: 30.0f32.to_radians(),
        znear: 0.1,
        zfar: 100.0,
    };
    OrbitController::new(-60.0, 30.0, 6.0).update_camera(&mut camera);
    let clip = camera.build_view_projection_matrix() * Vec3::ZERO.extend(1.0);
    assert!(clip.x.abs() / clip.w < 1e-5 && clip.y.abs() / clip.w < 1e-5);
}

#[test]
fn test_layout_for_default_window() {
    let layout = FigureLayout::new(800, 600, 0.5, 5.0);
    assert_eq!(layout.axes.width, 640.0);
    assert_eq!(layout.axes.height, 600.0);
    assert!((layout.colorbar.height - 231.0).abs() < 1e-3);
    assert!((layout.colorbar.width - 46.2).abs() < 1e-3);
    assert!(layout.colorbar.x >= layout.axes.right());
    assert!((layout.colorbar.y + layout.colorbar.height / 2.0 - 300.0).abs() < 1e-3);
    assert_eq!(layout.to_ndc(0.0, 0.0), [-1.0, 1.0]);
    assert_eq!(layout.to_ndc(800.0, 600.0), [1.0, -1.0]);
    assert_eq!(layout.colorbar_y(0.0), layout.colorbar.bottom());
}

#[test]
fn test_projection_into_axes_viewport() {
    let layout = FigureLayout::new(800, 600, 0.5, 5.0);
    assert_eq!(layout.project(Mat4::IDENTITY, Vec3::ZERO), Some((320.0, 300.0)));
    let behind = Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, -1.0, //
        0.0, 0.0, 0.0, 0.0,
    ]);
    assert_eq!(layout.project(behind, Vec3::new(0.0, 0.0, 1.0)), None);
}

#[test]
fn test_label_alignment() {
    let m = GlyphMetrics::new(1.0);
    assert_eq!(m.text_width("0.25"), 44.0);

    let mut rects = Vec::new();
    push_label(&mut rects, 100.0, 50.0, &m, "1", Align::Right);
    let right = rects.iter().map(|r| r.right()).fold(f32::MIN, f32::max);
    assert_eq!(right, 100.0);
    let top = rects.iter().map(|r| r.y).fold(f32::MAX, f32::min);
    assert!(top >= 50.0 - m.height / 2.0);
}

#[test]
fn test_default_view_decorations() {
    let figure = default_figure();
    let eye = OrbitController::new(-60.0, 30.0, 6.0).eye(Vec3::ZERO);
    let decorations = axes::decorate(&figure, eye, ColorTarget::Unorm);
    assert_eq!(decorations.labels.len(), 9 + 9 + 10);
    assert_eq!(decorations.lines.len() % 2, 0);
    assert_eq!(back_sides(eye), Vec3::new(-1.0, 1.0, -1.0));

    // Every z label sits beside the left vertical edge.
    let z_labels = &decorations.labels[18..];
    assert!(z_labels.iter().all(|l| l.position.x < -1.0 && l.position.y < -1.0));
    assert_eq!(z_labels[0].text, "-1.01");
}

#[test]
fn test_overlay_is_a_triangle_list() {
    let figure = default_figure();
    let layout = FigureLayout::new(800, 600, figure.colorbar.shrink, figure.colorbar.aspect);
    let orbit = OrbitController::new(-60.0, 30.0, 6.0);
    let mut camera = Camera {
        eye: Vec3::ZERO,
        target: Vec3::ZERO,
        up: Vec3::Z,
        aspect: layout.axes_aspect(),
        fovy: 30.0f32.to_radians(),
        znear: 0.1,
        zfar: 100.0,
    };
    orbit.update_camera(&mut camera);
    let decorations = axes::decorate(&figure, camera.eye, ColorTarget::Srgb);
    let vertices = overlay::build(
        &figure,
        &layout,
        &decorations.labels,
        camera.build_view_projection_matrix(),
        ColorTarget::Srgb,
        1.0,
    );
    assert_eq!(vertices.len() % 3, 0);
    // At least one band per colour map entry.
    assert!(vertices.len() >= figure.colormap.len() * 6);
    assert!(vertices
        .iter()
        .all(|v| v.position.iter().chain(&v.color).all(|c| c.is_finite())));
}
