use glam::Vec3;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::PerspectiveCamera;

pub const ORBIT_KEY_SPEED: f32 = 0.03;
pub const ORBIT_MOUSE_SENSITIVITY: f32 = 0.005;
pub const ZOOM_STEP: f32 = 0.9;
pub const MIN_DISTANCE: f32 = 0.05;

/// Pitch is kept just shy of the poles so the look-at up vector stays valid
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Default, Clone, Copy)]
struct OrbitMovement {
    rotate_left: bool,
    rotate_right: bool,
    rotate_up: bool,
    rotate_down: bool,
}

impl OrbitMovement {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32) {
        (
            Self::to_direction(self.rotate_right, self.rotate_left),
            Self::to_direction(self.rotate_up, self.rotate_down),
        )
    }
}

/// Interactive orbit control: rotates and zooms the camera around a mutable
/// `target` point. The viewer writes `target` and `max_distance` after
/// framing; user input drives everything else.
pub struct OrbitControls {
    pub target: Vec3,
    pub max_distance: f32,
    yaw: f32,
    pitch: f32,
    distance: f32,
    movement: OrbitMovement,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    pub fn new(target: Vec3, max_distance: f32, camera: &PerspectiveCamera) -> Self {
        let mut controls = Self {
            target,
            max_distance,
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            movement: OrbitMovement::default(),
            dragging: false,
            last_cursor: None,
        };
        controls.sync_to(camera);
        controls
    }

    /// Re-derive yaw/pitch/distance from the camera's current position so
    /// orbiting continues from wherever the camera was placed (e.g. right
    /// after framing).
    pub fn sync_to(&mut self, camera: &PerspectiveCamera) {
        let offset = camera.position - self.target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            self.distance = distance;
            self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
            self.yaw = offset.x.atan2(offset.z);
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::ArrowLeft | KeyCode::KeyQ => self.movement.rotate_left = is_pressed,
                KeyCode::ArrowRight | KeyCode::KeyE => self.movement.rotate_right = is_pressed,
                KeyCode::ArrowUp => self.movement.rotate_up = is_pressed,
                KeyCode::ArrowDown => self.movement.rotate_down = is_pressed,
                _ => {}
            }
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state.is_pressed();
            if !self.dragging {
                self.last_cursor = None;
            }
        }
    }

    pub fn process_cursor(&mut self, x: f64, y: f64) {
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                self.yaw -= ((x - last_x) as f32) * ORBIT_MOUSE_SENSITIVITY;
                self.pitch += ((y - last_y) as f32) * ORBIT_MOUSE_SENSITIVITY;
            }
        }
        self.last_cursor = Some((x, y));
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
        };
        self.distance *= ZOOM_STEP.powf(steps);
    }

    /// Apply accumulated input and write the camera's position and look-at
    /// target. Called once per tick between input handling and rendering.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let (yaw_vel, pitch_vel) = self.movement.velocity();
        self.yaw -= yaw_vel * ORBIT_KEY_SPEED;
        self.pitch += pitch_vel * ORBIT_KEY_SPEED;

        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        let max_distance = self.max_distance.max(MIN_DISTANCE);
        self.distance = self.distance.clamp(MIN_DISTANCE, max_distance);

        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;

        camera.position = self.target + offset;
        camera.look_at(self.target);
    }
}
