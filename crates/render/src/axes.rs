//! Axes box decorations that depend on the view direction.
//!
//! Like a 3D plot, the grid is drawn on the three panes facing away from
//! the viewer, the x and y axes run along the floor edges nearest the
//! viewer and the z axis stands on whichever side corner appears leftmost.
//! Everything is rebuilt whenever the camera moves.

use glam::{Vec2, Vec3};

use field::Rgba;

use crate::figure::{ColorTarget, Figure};
use crate::gpu_types::Vertex;
use crate::text::Align;

const GRID_COLOR: Rgba = Rgba::new(0.85, 0.85, 0.85, 1.0);
const EDGE_COLOR: Rgba = Rgba::new(0.55, 0.55, 0.55, 1.0);
const AXIS_COLOR: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

/// Tick mark length in world units.
const TICK_LENGTH: f32 = 0.04;

/// Distance of a tick label from its axis line in world units.
const LABEL_OFFSET: f32 = 0.16;

/// A tick label anchored to a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLabel {
    pub position: Vec3,
    pub text: String,
    pub align: Align,
}

/// Line list plus the labels to project on top.
#[derive(Debug, Clone, Default)]
pub struct AxesDecorations {
    pub lines: Vec<Vertex>,
    pub labels: Vec<WorldLabel>,
}

impl AxesDecorations {
    fn line(&mut self, a: Vec3, b: Vec3, color: [f32; 3]) {
        self.lines.push(Vertex::new(a.to_array(), color));
        self.lines.push(Vertex::new(b.to_array(), color));
    }
}

/// Sign of the box side facing away from `eye` on each axis.
#[must_use]
pub fn back_sides(eye: Vec3) -> Vec3 {
    Vec3::new(
        if eye.x >= 0.0 { -1.0 } else { 1.0 },
        if eye.y >= 0.0 { -1.0 } else { 1.0 },
        if eye.z >= 0.0 { -1.0 } else { 1.0 },
    )
}

/// Build the grid, axis lines, tick marks and label anchors for a camera
/// at `eye` looking at the box centre.
#[must_use]
pub fn decorate(figure: &Figure, eye: Vec3, target: ColorTarget) -> AxesDecorations {
    let e = figure.half_extents();
    let back = back_sides(eye) * e;
    let front = -back;
    let grid = target.encode(GRID_COLOR);
    let edge = target.encode(EDGE_COLOR);
    let axis = target.encode(AXIS_COLOR);
    let mut out = AxesDecorations::default();

    let world = |x: f64, y: f64, z: f64| figure.to_world([x, y, z]);
    let x_ticks: Vec<f32> = figure.x_axis.ticks.iter().map(|t| world(t.value, 0.0, 0.0).x).collect();
    let y_ticks: Vec<f32> = figure.y_axis.ticks.iter().map(|t| world(0.0, t.value, 0.0).y).collect();
    let z_ticks: Vec<f32> = figure.z_axis.ticks.iter().map(|t| world(0.0, 0.0, t.value).z).collect();

    // Grid on the back panes.
    for &x in &x_ticks {
        out.line(Vec3::new(x, back.y, -e.z), Vec3::new(x, back.y, e.z), grid);
        out.line(Vec3::new(x, -e.y, back.z), Vec3::new(x, e.y, back.z), grid);
    }
    for &y in &y_ticks {
        out.line(Vec3::new(back.x, y, -e.z), Vec3::new(back.x, y, e.z), grid);
        out.line(Vec3::new(-e.x, y, back.z), Vec3::new(e.x, y, back.z), grid);
    }
    for &z in &z_ticks {
        out.line(Vec3::new(back.x, -e.y, z), Vec3::new(back.x, e.y, z), grid);
        out.line(Vec3::new(-e.x, back.y, z), Vec3::new(e.x, back.y, z), grid);
    }

    // Pane outlines: the three edges leaving the far corner and the
    // outer rims of the back panes.
    let far = back;
    for corner in [
        Vec3::new(front.x, far.y, far.z),
        Vec3::new(far.x, front.y, far.z),
        Vec3::new(far.x, far.y, front.z),
    ] {
        out.line(far, corner, edge);
    }
    out.line(Vec3::new(front.x, far.y, far.z), Vec3::new(front.x, far.y, front.z), edge);
    out.line(Vec3::new(far.x, front.y, far.z), Vec3::new(far.x, front.y, front.z), edge);
    out.line(Vec3::new(front.x, far.y, front.z), Vec3::new(far.x, far.y, front.z), edge);
    out.line(Vec3::new(far.x, front.y, front.z), Vec3::new(far.x, far.y, front.z), edge);

    // x axis along the near floor edge, ticks pointing away from the box.
    let out_y = front.y.signum();
    let floor = back.z;
    out.line(Vec3::new(-e.x, front.y, floor), Vec3::new(e.x, front.y, floor), axis);
    for (&x, tick) in x_ticks.iter().zip(&figure.x_axis.ticks) {
        let base = Vec3::new(x, front.y, floor);
        out.line(base, base + Vec3::new(0.0, out_y * TICK_LENGTH, 0.0), axis);
        out.labels.push(WorldLabel {
            position: base + Vec3::new(0.0, out_y * LABEL_OFFSET, 0.0),
            text: tick.label.clone(),
            align: Align::Center,
        });
    }

    let out_x = front.x.signum();
    out.line(Vec3::new(front.x, -e.y, floor), Vec3::new(front.x, e.y, floor), axis);
    for (&y, tick) in y_ticks.iter().zip(&figure.y_axis.ticks) {
        let base = Vec3::new(front.x, y, floor);
        out.line(base, base + Vec3::new(out_x * TICK_LENGTH, 0.0, 0.0), axis);
        out.labels.push(WorldLabel {
            position: base + Vec3::new(out_x * LABEL_OFFSET, 0.0, 0.0),
            text: tick.label.clone(),
            align: Align::Center,
        });
    }

    let corner = z_axis_corner(eye, back, front);
    let outward = corner.normalize_or_zero();
    out.line(corner.extend(-e.z), corner.extend(e.z), axis);
    for (&z, tick) in z_ticks.iter().zip(&figure.z_axis.ticks) {
        let base = corner.extend(z);
        out.line(base, base + (outward * TICK_LENGTH).extend(0.0), axis);
        out.labels.push(WorldLabel {
            position: base + (outward * LABEL_OFFSET).extend(0.0),
            text: tick.label.clone(),
            align: Align::Right,
        });
    }

    out
}

/// `(x, y)` of the vertical edge carrying the z axis.
///
/// Of the two side corners (one back and one front coordinate), the one
/// further left as seen from `eye`.
fn z_axis_corner(eye: Vec3, back: Vec3, front: Vec3) -> Vec2 {
    let forward = -Vec3::new(eye.x, eye.y, 0.0).normalize_or_zero();
    let right = forward.cross(Vec3::Z);
    let a = Vec2::new(back.x, front.y);
    let b = Vec2::new(front.x, back.y);
    let along = |c: Vec2| right.x * c.x + right.y * c.y;
    if along(a) <= along(b) {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_panes_face_away() {
        let back = back_sides(Vec3::new(3.0, -5.0, 2.0));
        assert_eq!(back, Vec3::new(-1.0, 1.0, -1.0));
    }

    #[test]
    fn default_view_puts_z_axis_on_back_x_front_y() {
        // Eye at azimuth -60 degrees.
        let eye = Vec3::new(0.5, -0.866, 0.5);
        let back = back_sides(eye);
        let corner = z_axis_corner(eye, back, -back);
        assert_eq!(corner, Vec2::new(-1.0, -1.0));
    }
}
