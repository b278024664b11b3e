//! Orbit camera for viewing the surface
//!
//! The camera always looks at the centre of the axes box with `+z` up. Its
//! position is an azimuth/elevation pair on a sphere around the target, the
//! same parametrisation a 3D plot uses for its view angles: azimuth is
//! measured from `+x` towards `+y` in the `xy` plane and elevation from the
//! `xy` plane towards `+z`.

use glam::{Mat4, Vec3};

/// Elevation is kept short of the poles so the up vector stays valid.
pub const MAX_ELEVATION_DEG: f32 = 89.0;

/// Radians of rotation per pixel of mouse drag.
pub const DRAG_SENSITIVITY: f32 = 0.005;

const MIN_DISTANCE: f32 = 1.5;
const MAX_DISTANCE: f32 = 30.0;

/// Perspective camera described by its eye and target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Render target aspect ratio
    pub aspect: f32,
    /// Field of view in radians
    pub fovy: f32,
    /// Near clipping plane distance
    pub znear: f32,
    /// Far clipping plane distance
    pub zfar: f32,
}

impl Camera {
    /// Computes a view projection matrix from the camera parameters
    #[must_use]
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

/// Orbit state driven by mouse input
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    pub azimuth_deg: f32,
    pub elevation_deg: f32,
    pub distance: f32,
    home: (f32, f32, f32),
    /// Left button held
    pub mouse_pressed: bool,
    /// Last cursor position seen, in physical pixels
    pub last_mouse_pos: Option<(f64, f64)>,
}

impl OrbitController {
    #[must_use]
    pub fn new(azimuth_deg: f32, elevation_deg: f32, distance: f32) -> Self {
        let elevation_deg = elevation_deg.clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG);
        let distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            azimuth_deg,
            elevation_deg,
            distance,
            home: (azimuth_deg, elevation_deg, distance),
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    /// Rotate by a cursor movement. Dragging right spins the surface
    /// clockwise seen from above; dragging up lowers the eye.
    pub fn process_drag(&mut self, dx: f64, dy: f64) {
        let d_azim = (dx as f32 * DRAG_SENSITIVITY).to_degrees();
        let d_elev = (dy as f32 * DRAG_SENSITIVITY).to_degrees();
        self.azimuth_deg = (self.azimuth_deg - d_azim).rem_euclid(360.0);
        if self.azimuth_deg > 180.0 {
            self.azimuth_deg -= 360.0;
        }
        self.elevation_deg =
            (self.elevation_deg + d_elev).clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG);
    }

    /// Feed a cursor position; rotates only while the button is held.
    ///
    /// Returns whether the view changed.
    pub fn process_cursor(&mut self, x: f64, y: f64) -> bool {
        let previous = self.last_mouse_pos.replace((x, y));
        match previous {
            Some((lx, ly)) if self.mouse_pressed && (lx, ly) != (x, y) => {
                self.process_drag(x - lx, y - ly);
                true
            }
            _ => false,
        }
    }

    /// Move towards the target for positive `scroll`.
    pub fn process_scroll(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Back to the initial view.
    pub fn reset(&mut self) {
        let (azimuth, elevation, distance) = self.home;
        self.azimuth_deg = azimuth;
        self.elevation_deg = elevation;
        self.distance = distance;
    }

    /// Eye position for the current angles around `target`.
    #[must_use]
    pub fn eye(&self, target: Vec3) -> Vec3 {
        let azim = self.azimuth_deg.to_radians();
        let elev = self.elevation_deg.to_radians();
        target
            + self.distance
                * Vec3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin())
    }

    pub fn update_camera(&self, camera: &mut Camera) {
        camera.eye = self.eye(camera.target);
        camera.up = Vec3::Z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_is_clamped() {
        let mut orbit = OrbitController::new(0.0, 30.0, 6.0);
        orbit.process_drag(0.0, 1.0e6);
        assert!((orbit.elevation_deg - MAX_ELEVATION_DEG).abs() < 1e-4);
        orbit.process_drag(0.0, -1.0e6);
        assert!((orbit.elevation_deg + MAX_ELEVATION_DEG).abs() < 1e-4);
    }

    #[test]
    fn azimuth_stays_in_half_open_turn() {
        let mut orbit = OrbitController::new(-60.0, 30.0, 6.0);
        for _ in 0..50 {
            orbit.process_drag(97.0, 0.0);
            assert!(orbit.azimuth_deg > -180.0 && orbit.azimuth_deg <= 180.0);
        }
    }
}
